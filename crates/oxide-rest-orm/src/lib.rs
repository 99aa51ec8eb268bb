//! # oxide-rest-orm
//!
//! Role-gated models for REST endpoints, on top of the `oxide-rest-core`
//! query compiler.
//!
//! This crate provides:
//! - `Field` declarations with typed parsers, validators and per-role grants
//! - `Model` with role-gated projection and write-payload checks
//! - `Binding` relations, expanded in batches by the `Expander`
//! - `QueryCompiler` running query strings through parser and reconciler
//! - The `Driver` capability and a `SqliteDriver` built on sqlx
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_rest_auth::{Permission, Role};
//! use oxide_rest_orm::fields::{Binding, Field, RelationLimit};
//! use oxide_rest_orm::{DriverConfig, Model, QueryCompiler, SqliteDriver};
//!
//! # async fn example() -> oxide_rest_orm::Result<()> {
//! let read = Permission::read_only(Role::DEFAULT);
//!
//! let profiles = Arc::new(Model::new(
//!     "profiles",
//!     vec![Field::int64("user_id").permission(read), Field::text("bio").permission(read)],
//! ));
//! let users = Model::new(
//!     "users",
//!     vec![Field::int64("id").permission(read), Field::text("name").permission(read)],
//! )
//! .binding(
//!     Binding::new("profile", vec![Field::int64("id")], profiles, vec![Field::int64("user_id")])
//!         .limit(RelationLimit::Rows(1)),
//! );
//!
//! let driver = SqliteDriver::connect(&DriverConfig::from_env()).await?;
//! let rows = QueryCompiler::new(&users, Role::DEFAULT)
//!     .compile_str("?:like[name]=A%25&:limit=10")?
//!     .fetch(&driver)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Writes
//!
//! Write payloads are gated by [`Model::writable_payload`] and rendered by
//! the driver. UPDATE and DELETE without a WHERE predicate match nothing.

mod config;
pub mod driver;
mod error;
pub mod expand;
pub mod fields;
mod model;
pub mod query;
mod row;
pub mod sqlite;

pub use config::{DriverConfig, DATABASE_URL_ENV, MAX_CONNECTIONS_ENV};
pub use driver::{Driver, Inserted};
pub use error::{OrmError, Result};
pub use expand::Expander;
pub use model::Model;
pub use query::{CompiledQuery, QueryCompiler};
pub use row::{Datum, Row};
pub use sqlite::SqliteDriver;
