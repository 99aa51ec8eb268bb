//! The authenticated caller.

use oxide_rest_core::Scalar;
use serde::Serialize;

use crate::permissions::Role;

/// A caller identity: an optional primary key and a role.
///
/// Authentication itself happens upstream. By the time a request reaches a
/// model, only the role matters for field visibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    id: Option<Scalar>,
    role: Role,
}

impl User {
    /// Creates a user.
    #[must_use]
    pub const fn new(id: Option<Scalar>, role: Role) -> Self {
        Self { id, role }
    }

    /// The anonymous caller: no id, [`Role::DEFAULT`].
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::new(None, Role::DEFAULT)
    }

    /// Returns the user id.
    #[must_use]
    pub const fn id(&self) -> Option<&Scalar> {
        self.id.as_ref()
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns true for the anonymous caller.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }
}

impl Default for User {
    fn default() -> Self {
        Self::anonymous()
    }
}
