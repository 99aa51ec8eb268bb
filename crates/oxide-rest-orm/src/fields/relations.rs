//! Relation bindings between models.
//!
//! A [`Binding`] pairs key fields of an owning model with key fields of an
//! external model. During expansion the related rows are fetched in one batch
//! and attached under the binding's name.

use std::sync::Arc;

use oxide_rest_auth::Role;

use super::Field;
use crate::model::Model;

/// How many related rows a binding attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationLimit {
    /// Attach every related row as a list.
    #[default]
    Unbounded,
    /// Attach at most `n` rows. `Rows(1)` attaches a single object and
    /// `Rows(0)` forbids the relation, which then always attaches an empty
    /// list without querying.
    Rows(u64),
}

impl RelationLimit {
    /// Converts a signed limit: any negative value is unbounded.
    #[must_use]
    pub fn from_signed(limit: i64) -> Self {
        u64::try_from(limit).map_or(Self::Unbounded, Self::Rows)
    }

    /// Returns true if the relation attaches a single object.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self, Self::Rows(1))
    }

    /// Returns true if the relation is never queried.
    #[must_use]
    pub const fn is_forbidden(self) -> bool {
        matches!(self, Self::Rows(0))
    }
}

/// A declared relation: `owner[internal_keys] <-> external[external_keys]`.
///
/// Keys pair positionally. An empty role whitelist makes the binding visible
/// to every role.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use oxide_rest_auth::{Permission, Role};
/// use oxide_rest_orm::fields::{Binding, Field, RelationLimit};
/// use oxide_rest_orm::Model;
///
/// let read = Permission::read_only(Role::DEFAULT);
/// let posts = Arc::new(Model::new(
///     "posts",
///     vec![
///         Field::int64("author_id").permission(read),
///         Field::text("title").permission(read),
///     ],
/// ));
/// let binding = Binding::new(
///     "posts",
///     vec![Field::int64("id")],
///     posts,
///     vec![Field::int64("author_id")],
/// )
/// .limit(RelationLimit::Rows(10));
/// assert!(binding.is_visible_to(Role(5)));
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    name: String,
    internal_keys: Vec<Field>,
    external_model: Arc<Model>,
    external_keys: Vec<Field>,
    limit: RelationLimit,
    roles: Vec<Role>,
}

impl Binding {
    /// Creates an unbounded binding visible to every role.
    pub fn new(
        name: impl Into<String>,
        internal_keys: Vec<Field>,
        external_model: Arc<Model>,
        external_keys: Vec<Field>,
    ) -> Self {
        Self {
            name: name.into(),
            internal_keys,
            external_model,
            external_keys,
            limit: RelationLimit::Unbounded,
            roles: Vec::new(),
        }
    }

    /// Sets the result-count limit.
    #[must_use]
    pub const fn limit(mut self, limit: RelationLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Adds a role to the whitelist.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Returns the attribute name the related rows are attached under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning model's key fields.
    #[must_use]
    pub fn internal_keys(&self) -> &[Field] {
        &self.internal_keys
    }

    /// Returns the related model.
    #[must_use]
    pub fn external_model(&self) -> &Model {
        &self.external_model
    }

    /// Returns the related model's key fields.
    #[must_use]
    pub fn external_keys(&self) -> &[Field] {
        &self.external_keys
    }

    /// Returns the result-count limit.
    #[must_use]
    pub const fn get_limit(&self) -> RelationLimit {
        self.limit
    }

    /// Returns the role whitelist.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns true if `role` may see this relation.
    #[must_use]
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> Binding {
        let external = Arc::new(Model::new("profiles", vec![Field::int64("user_id")]));
        Binding::new(
            "profile",
            vec![Field::int64("id")],
            external,
            vec![Field::int64("user_id")],
        )
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(RelationLimit::from_signed(-1), RelationLimit::Unbounded);
        assert_eq!(RelationLimit::from_signed(0), RelationLimit::Rows(0));
        assert_eq!(RelationLimit::from_signed(1), RelationLimit::Rows(1));
        assert!(RelationLimit::Rows(1).is_single());
        assert!(RelationLimit::Rows(0).is_forbidden());
        assert!(!RelationLimit::Unbounded.is_single());
    }

    #[test]
    fn test_visibility() {
        let open = binding();
        assert!(open.is_visible_to(Role(9)));

        let restricted = binding().role(Role(1));
        assert!(restricted.is_visible_to(Role(1)));
        assert!(!restricted.is_visible_to(Role(2)));
    }

    #[test]
    fn test_accessors() {
        let b = binding().limit(RelationLimit::Rows(1));
        assert_eq!(b.name(), "profile");
        assert_eq!(b.internal_keys()[0].name(), "id");
        assert_eq!(b.external_keys()[0].name(), "user_id");
        assert_eq!(b.external_model().table().name(), "profiles");
        assert!(b.get_limit().is_single());
    }
}
