//! SQLite driver backed by `sqlx`.
//!
//! Statements are rendered with the [`Linker`] and executed as literal text.

use oxide_rest_core::clause::{ClauseSet, Field, Table, Where};
use oxide_rest_core::{Linker, Scalar};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::debug;

use crate::config::DriverConfig;
use crate::driver::{BoxFuture, Driver, Inserted};
use crate::error::Result;
use crate::row::{Datum, Row};

/// A [`Driver`] over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    pool: SqlitePool,
    linker: Linker,
}

impl SqliteDriver {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            linker: Linker::new(),
        }
    }

    /// Opens a pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn connect(config: &DriverConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn execute(&self, sql: &str) -> Result<sqlx::sqlite::SqliteQueryResult> {
        debug!(sql = %sql, "Executing SQL");
        Ok(sqlx::query(sql).execute(&self.pool).await?)
    }
}

impl Driver for SqliteDriver {
    fn select<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [Field],
        clauses: &'a ClauseSet,
    ) -> BoxFuture<'a, Result<Vec<Row>>> {
        Box::pin(async move {
            let sql = self.linker.select(table, fields, clauses);
            debug!(sql = %sql, "Executing SQL");
            let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
            rows.iter().map(decode_row).collect()
        })
    }

    fn insert<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [Field],
    ) -> BoxFuture<'a, Result<Inserted>> {
        Box::pin(async move {
            let sql = self.linker.insert(table, fields);
            let result = self.execute(&sql).await?;
            Ok(Inserted::Id(Scalar::Int(result.last_insert_rowid())))
        })
    }

    fn update<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [Field],
        where_clause: &'a [Where],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.execute(&self.linker.update(table, fields, where_clause))
                .await?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        table: &'a Table,
        where_clause: &'a [Where],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.execute(&self.linker.delete(table, where_clause)).await?;
            Ok(())
        })
    }

    fn exec<'a>(&'a self, statements: &'a [String]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            // Dropping the transaction on error rolls it back.
            let mut tx = self.pool.begin().await?;
            for sql in statements {
                debug!(sql = %sql, "Executing SQL");
                sqlx::query(sql).execute(&mut *tx).await?;
            }
            tx.commit().await?;
            Ok(())
        })
    }
}

/// Decodes a row by the storage class of each value.
fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut out = Row::new();
    for (i, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(i)?;
        let value = if raw.is_null() {
            Scalar::Null
        } else {
            let class = raw.type_info().name().to_string();
            match class.as_str() {
                "INTEGER" => Scalar::Int(row.try_get_unchecked(i)?),
                "REAL" => Scalar::Float(row.try_get_unchecked(i)?),
                "BLOB" => Scalar::Blob(row.try_get_unchecked(i)?),
                _ => Scalar::Text(row.try_get_unchecked(i)?),
            }
        };
        out.insert(column.name().to_string(), Datum::Scalar(value));
    }
    Ok(out)
}
