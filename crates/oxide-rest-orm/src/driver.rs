//! The driver capability.
//!
//! Everything above this trait is pure text transformation. A driver is the
//! only I/O boundary: it executes statements and owns connection limits,
//! timeouts and retries.

use std::future::Future;
use std::pin::Pin;

use oxide_rest_core::clause::{ClauseSet, Field, Table, Where};
use oxide_rest_core::Scalar;

use crate::error::Result;
use crate::row::Row;

/// A boxed future for async driver operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What an INSERT reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum Inserted {
    /// The generated primary key.
    Id(Scalar),
    /// The inserted row, for drivers that return it.
    Row(Row),
}

/// Executes compiled statements against a database.
///
/// # Example
///
/// ```rust
/// use oxide_rest_core::clause::{ClauseSet, Field, Table, Where};
/// use oxide_rest_core::Scalar;
/// use oxide_rest_orm::driver::{BoxFuture, Driver, Inserted};
/// use oxide_rest_orm::{Result, Row};
///
/// struct Empty;
///
/// impl Driver for Empty {
///     fn select<'a>(
///         &'a self,
///         _: &'a Table,
///         _: &'a [Field],
///         _: &'a ClauseSet,
///     ) -> BoxFuture<'a, Result<Vec<Row>>> {
///         Box::pin(async { Ok(Vec::new()) })
///     }
///     fn insert<'a>(&'a self, _: &'a Table, _: &'a [Field]) -> BoxFuture<'a, Result<Inserted>> {
///         Box::pin(async { Ok(Inserted::Id(Scalar::Null)) })
///     }
///     fn update<'a>(
///         &'a self,
///         _: &'a Table,
///         _: &'a [Field],
///         _: &'a [Where],
///     ) -> BoxFuture<'a, Result<()>> {
///         Box::pin(async { Ok(()) })
///     }
///     fn delete<'a>(&'a self, _: &'a Table, _: &'a [Where]) -> BoxFuture<'a, Result<()>> {
///         Box::pin(async { Ok(()) })
///     }
///     fn exec<'a>(&'a self, _: &'a [String]) -> BoxFuture<'a, Result<()>> {
///         Box::pin(async { Ok(()) })
///     }
/// }
/// ```
pub trait Driver: Send + Sync {
    /// Runs a SELECT and returns its rows.
    fn select<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [Field],
        clauses: &'a ClauseSet,
    ) -> BoxFuture<'a, Result<Vec<Row>>>;

    /// Runs an INSERT.
    fn insert<'a>(&'a self, table: &'a Table, fields: &'a [Field])
        -> BoxFuture<'a, Result<Inserted>>;

    /// Runs an UPDATE.
    fn update<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [Field],
        where_clause: &'a [Where],
    ) -> BoxFuture<'a, Result<()>>;

    /// Runs a DELETE.
    fn delete<'a>(&'a self, table: &'a Table, where_clause: &'a [Where])
        -> BoxFuture<'a, Result<()>>;

    /// Runs raw statements atomically: all of them commit or none does.
    fn exec<'a>(&'a self, statements: &'a [String]) -> BoxFuture<'a, Result<()>>;
}
