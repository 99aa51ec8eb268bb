//! Field declarations for models.
//!
//! A [`Field`] couples a column name with a value parser (raw query-string
//! text to typed [`Scalar`]), an optional validator for write payloads, and
//! the per-role permission grants that decide who may read or write it.
//!
//! Typed constructors cover the common column types:
//!
//! ```rust
//! use oxide_rest_auth::{Permission, Role};
//! use oxide_rest_orm::fields::Field;
//!
//! let id = Field::int64("id").permission(Permission::read_only(Role::DEFAULT));
//! let name = Field::text("name").permission(Permission::read_write(Role(1)));
//! let born = Field::datetime("born_at", "%Y-%m-%d %H:%M:%S");
//!
//! assert!(id.parse("42").is_ok());
//! assert!(id.parse("forty-two").is_err());
//! ```

mod boolean;
mod char;
mod numeric;
mod relations;
mod temporal;

pub use relations::{Binding, RelationLimit};

use std::fmt;
use std::sync::Arc;

use oxide_rest_auth::{AccessLevel, Permission, Role};
use oxide_rest_core::{ParseValueError, Scalar, ValueParser};

/// Checks a typed value before it is written.
pub type Validator = dyn Fn(&Scalar) -> bool + Send + Sync;

/// A model column with its parser, validator and permission grants.
#[derive(Clone)]
pub struct Field {
    name: String,
    parser: Arc<ValueParser>,
    validator: Option<Arc<Validator>>,
    permissions: Vec<Permission>,
}

impl Field {
    /// Creates a field with a custom value parser.
    pub fn new<F>(name: impl Into<String>, parser: F) -> Self
    where
        F: Fn(&str) -> Result<Scalar, ParseValueError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parser: Arc::new(parser),
            validator: None,
            permissions: Vec::new(),
        }
    }

    /// Adds a permission grant.
    #[must_use]
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    /// Sets the write validator.
    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Scalar) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a shared handle to the value parser.
    #[must_use]
    pub fn parser(&self) -> Arc<ValueParser> {
        Arc::clone(&self.parser)
    }

    /// Parses raw text into a typed value.
    ///
    /// # Errors
    ///
    /// Returns the parser's error if the text is not a valid value.
    pub fn parse(&self, raw: &str) -> Result<Scalar, ParseValueError> {
        (self.parser)(raw)
    }

    /// Runs the validator. A field without one accepts everything.
    #[must_use]
    pub fn validate(&self, value: &Scalar) -> bool {
        self.validator.as_ref().is_none_or(|v| v(value))
    }

    /// Returns the roles granted any of `levels`, or every granted role
    /// when `levels` is empty.
    #[must_use]
    pub fn roles(&self, levels: &[AccessLevel]) -> Vec<Role> {
        self.permissions
            .iter()
            .filter(|p| levels.is_empty() || levels.iter().any(|l| p.allows(*l)))
            .map(Permission::role)
            .collect()
    }

    /// Returns true if `role` holds a grant including `level`.
    #[must_use]
    pub fn allows(&self, role: Role, level: AccessLevel) -> bool {
        self.permissions
            .iter()
            .any(|p| p.role() == role && p.allows(level))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("validator", &self.validator.is_some())
            .field("permissions", &self.permissions)
            .finish_non_exhaustive()
    }
}

fn invalid(raw: &str, err: impl fmt::Display) -> ParseValueError {
    ParseValueError::new(raw, err.to_string())
}
