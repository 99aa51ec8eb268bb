//! Models and role-gated projection.
//!
//! A [`Model`] is a table with its declared [`Field`]s and relation
//! [`Binding`]s. Every question of "what may this role see or write" is
//! answered here, from the fields' permission grants.

use oxide_rest_auth::{AccessLevel, Role};
use oxide_rest_core::clause::{self, Table};
use oxide_rest_core::{FieldParsers, Scalar};
use serde_json::{Map, Value as JsonValue};

use crate::error::{OrmError, Result};
use crate::fields::{Binding, Field};

/// A table declaration: columns, permissions and relations.
///
/// # Example
///
/// ```rust
/// use oxide_rest_auth::{AccessLevel, Permission, Role};
/// use oxide_rest_orm::fields::Field;
/// use oxide_rest_orm::Model;
///
/// const STAFF: Role = Role(1);
///
/// let users = Model::new(
///     "users",
///     vec![
///         Field::int64("id").permission(Permission::read_only(Role::DEFAULT)),
///         Field::text("email").permission(Permission::read_write(STAFF)),
///     ],
/// );
///
/// let visible: Vec<_> = users
///     .fields_for(Role::DEFAULT, AccessLevel::Read)
///     .map(Field::name)
///     .collect();
/// assert_eq!(visible, vec!["id"]);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    table: Table,
    fields: Vec<Field>,
    bindings: Vec<Binding>,
}

impl Model {
    /// Creates a model without relations.
    pub fn new(table: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            table: Table::new(table),
            fields,
            bindings: Vec::new(),
        }
    }

    /// Adds a relation binding.
    #[must_use]
    pub fn binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Returns the table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Returns every declared field.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns every declared binding.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Fields `role` holds `level` on, in declaration order.
    pub fn fields_for(&self, role: Role, level: AccessLevel) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.allows(role, level))
    }

    /// Bindings visible to `role`, in declaration order.
    pub fn bindings_for(&self, role: Role) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.is_visible_to(role))
    }

    /// The allow-list for the reconciler: every field `role` holds `level`
    /// on, mapped to its value parser.
    #[must_use]
    pub fn field_parsers(&self, role: Role, level: AccessLevel) -> FieldParsers {
        self.fields_for(role, level)
            .map(|f| (f.name().to_string(), f.parser()))
            .collect()
    }

    /// The SELECT projection for `role`.
    #[must_use]
    pub fn projection(&self, role: Role) -> Vec<clause::Field> {
        self.fields_for(role, AccessLevel::Read)
            .map(|f| clause::Field::new(f.name()))
            .collect()
    }

    /// Gates a JSON write payload and converts it into INSERT/UPDATE fields.
    ///
    /// String values go through the field's parser. Other JSON scalars are
    /// taken as they are. Every value must pass the field's validator.
    ///
    /// # Errors
    ///
    /// - [`OrmError::EmptyPayload`] if the payload has no entries.
    /// - [`OrmError::Forbidden`] if `role` cannot write any field.
    /// - [`OrmError::InvalidField`] for the first entry naming a field `role`
    ///   cannot write, or carrying a non-scalar, unparsable or rejected value.
    pub fn writable_payload(
        &self,
        role: Role,
        payload: &Map<String, JsonValue>,
    ) -> Result<Vec<clause::Field>> {
        if payload.is_empty() {
            return Err(OrmError::EmptyPayload);
        }
        if self.fields_for(role, AccessLevel::Write).next().is_none() {
            return Err(OrmError::Forbidden(format!(
                "role {role} cannot write to {}",
                self.table.name()
            )));
        }

        payload
            .iter()
            .map(|(name, value)| {
                let field = self
                    .field(name)
                    .filter(|f| f.allows(role, AccessLevel::Write))
                    .ok_or_else(|| OrmError::InvalidField(name.clone()))?;
                let scalar = json_scalar(field, value)
                    .filter(|v| field.validate(v))
                    .ok_or_else(|| OrmError::InvalidField(name.clone()))?;
                Ok(clause::Field::with_value(name, scalar))
            })
            .collect()
    }
}

fn json_scalar(field: &Field, value: &JsonValue) -> Option<Scalar> {
    match value {
        JsonValue::Null => Some(Scalar::Null),
        JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_u64().map(Scalar::UInt))
            .or_else(|| n.as_f64().map(Scalar::Float)),
        JsonValue::String(s) => field.parse(s).ok(),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
