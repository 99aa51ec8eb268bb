//! The read pipeline.
//!
//! [`QueryCompiler`] turns a query string into a [`CompiledQuery`] for one
//! model and role: parse the filter language, reconcile it against the fields
//! the role may read, and project those same fields. The compiled query can
//! render its SQL text or run against a [`Driver`] and expand relations.
//!
//! # Example
//!
//! ```rust
//! use oxide_rest_auth::{Permission, Role};
//! use oxide_rest_orm::fields::Field;
//! use oxide_rest_orm::{Model, QueryCompiler};
//!
//! let read = Permission::read_only(Role::DEFAULT);
//! let users = Model::new(
//!     "users",
//!     vec![Field::int64("id").permission(read), Field::text("name").permission(read)],
//! );
//!
//! let query = QueryCompiler::new(&users, Role::DEFAULT)
//!     .compile_str("?:cmp_be[id]=10&password=x&:sort[name]=DESC&:limit=5")
//!     .unwrap();
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT id, name\nFROM users\nWHERE (id >= 10)\nORDER BY name DESC\nLIMIT 5;"
//! );
//! ```

use oxide_rest_auth::{AccessLevel, Role};
use oxide_rest_core::clause::{self, ClauseSet};
use oxide_rest_core::{parse, reconcile, Linker, QueryParams};

use crate::driver::Driver;
use crate::error::{OrmError, Result};
use crate::expand::Expander;
use crate::model::Model;
use crate::row::Row;

/// Compiles query strings against a model for one role.
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler<'m> {
    model: &'m Model,
    role: Role,
}

impl<'m> QueryCompiler<'m> {
    /// Creates a compiler.
    #[must_use]
    pub const fn new(model: &'m Model, role: Role) -> Self {
        Self { model, role }
    }

    /// Compiles decoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::Forbidden`] if the role cannot read any field.
    pub fn compile(&self, params: &QueryParams) -> Result<CompiledQuery<'m>> {
        let fields = self.model.projection(self.role);
        if fields.is_empty() {
            return Err(OrmError::Forbidden(format!(
                "role {} cannot read {}",
                self.role,
                self.model.table().name()
            )));
        }
        let parsers = self.model.field_parsers(self.role, AccessLevel::Read);
        let clauses = reconcile(parse(params), &parsers);
        Ok(CompiledQuery {
            model: self.model,
            role: self.role,
            fields,
            clauses,
        })
    }

    /// Compiles a raw query string.
    ///
    /// # Errors
    ///
    /// See [`QueryCompiler::compile`].
    pub fn compile_str(&self, raw: &str) -> Result<CompiledQuery<'m>> {
        self.compile(&QueryParams::parse(raw))
    }
}

/// A reconciled SELECT, ready to render or run.
#[derive(Debug, Clone)]
pub struct CompiledQuery<'m> {
    model: &'m Model,
    role: Role,
    fields: Vec<clause::Field>,
    clauses: ClauseSet,
}

impl CompiledQuery<'_> {
    /// Returns the projection.
    #[must_use]
    pub fn fields(&self) -> &[clause::Field] {
        &self.fields
    }

    /// Returns the reconciled clauses.
    #[must_use]
    pub const fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    /// Renders the SELECT text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        Linker::new().select(self.model.table(), &self.fields, &self.clauses)
    }

    /// Runs the SELECT and expands the model's relations into the rows.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the SELECT fails. Failures while
    /// fetching related rows are not errors.
    pub async fn fetch(&self, driver: &dyn Driver) -> Result<Vec<Row>> {
        let rows = driver
            .select(self.model.table(), &self.fields, &self.clauses)
            .await?;
        Ok(Expander::new(driver, self.role).expand(self.model, rows).await)
    }
}

#[cfg(test)]
mod tests {
    use oxide_rest_auth::Permission;
    use oxide_rest_core::Instruction;

    use super::*;
    use crate::fields::Field;

    const STAFF: Role = Role(1);

    fn accounts() -> Model {
        Model::new(
            "accounts",
            vec![
                Field::int64("id").permission(Permission::read_only(Role::DEFAULT)),
                Field::text("email").permission(Permission::read_only(STAFF)),
            ],
        )
    }

    #[test]
    fn test_forbidden_without_readable_fields() {
        let model = accounts();
        let result = QueryCompiler::new(&model, Role(9)).compile_str("");
        assert!(matches!(result, Err(OrmError::Forbidden(_))));
    }

    #[test]
    fn test_filters_are_gated_by_role() {
        let model = accounts();
        let query = QueryCompiler::new(&model, Role::DEFAULT)
            .compile_str("?email=a@b.c&id=3")
            .unwrap();
        assert_eq!(query.clauses().where_clause.len(), 1);
        assert_eq!(query.clauses().where_clause[0].field(), "id");
        assert_eq!(
            query.to_sql(),
            "SELECT id\nFROM accounts\nWHERE (id = 3);"
        );
    }

    #[test]
    fn test_values_are_typed_by_field() {
        let model = accounts();
        let query = QueryCompiler::new(&model, Role::DEFAULT)
            .compile_str("?id[]=1&id[]=2&id=abc")
            .unwrap();
        let w = &query.clauses().where_clause;
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].get_instruction(), Instruction::In);
        assert_eq!(
            query.to_sql(),
            "SELECT id\nFROM accounts\nWHERE (id IN (1, 2));"
        );
    }

    #[test]
    fn test_non_finite_floats_never_reach_sql() {
        let read = Permission::read_only(Role::DEFAULT);
        let model = Model::new(
            "products",
            vec![
                Field::int64("id").permission(read),
                Field::float64("price").permission(read),
            ],
        );
        let compiler = QueryCompiler::new(&model, Role::DEFAULT);
        for raw in [
            "?price=inf",
            "?price=NaN",
            "?:cmp_l[price]=-infinity",
            "?price[]=1&price[]=inf",
        ] {
            let query = compiler.compile_str(raw).unwrap();
            assert!(query.clauses().where_clause.is_empty(), "{raw}");
            assert_eq!(query.to_sql(), "SELECT id, price\nFROM products;");
        }
        let query = compiler.compile_str("?price=2.5").unwrap();
        assert_eq!(
            query.to_sql(),
            "SELECT id, price\nFROM products\nWHERE (price = 2.500000);"
        );
    }
}
