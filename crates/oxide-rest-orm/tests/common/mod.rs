#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use oxide_rest_auth::{Permission, Role};
use oxide_rest_core::clause::{ClauseSet, Field as SqlField, Table, Where};
use oxide_rest_core::{Linker, Scalar};
use oxide_rest_orm::driver::BoxFuture;
use oxide_rest_orm::fields::{Binding, Field, RelationLimit};
use oxide_rest_orm::{
    Datum, Driver, DriverConfig, Inserted, Model, OrmError, Result, Row, SqliteDriver,
};

pub const STAFF: Role = Role(1);

/// Answers SELECTs from canned rows per table and records every statement.
#[derive(Default)]
pub struct RecordingDriver {
    rows: HashMap<String, Vec<Row>>,
    failing: Vec<String>,
    log: Mutex<Vec<String>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, table: &str, rows: Vec<Row>) -> Self {
        self.rows.insert(table.to_string(), rows);
        self
    }

    pub fn failing(mut self, table: &str) -> Self {
        self.failing.push(table.to_string());
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, sql: String) {
        self.log.lock().unwrap().push(sql);
    }
}

impl Driver for RecordingDriver {
    fn select<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [SqlField],
        clauses: &'a ClauseSet,
    ) -> BoxFuture<'a, Result<Vec<Row>>> {
        Box::pin(async move {
            self.record(Linker::new().select(table, fields, clauses));
            if self.failing.iter().any(|t| t == table.name()) {
                return Err(OrmError::Driver(format!("{} is unavailable", table.name())));
            }
            Ok(self.rows.get(table.name()).cloned().unwrap_or_default())
        })
    }

    fn insert<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [SqlField],
    ) -> BoxFuture<'a, Result<Inserted>> {
        Box::pin(async move {
            self.record(Linker::new().insert(table, fields));
            Ok(Inserted::Id(Scalar::Int(1)))
        })
    }

    fn update<'a>(
        &'a self,
        table: &'a Table,
        fields: &'a [SqlField],
        where_clause: &'a [Where],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.record(Linker::new().update(table, fields, where_clause));
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        table: &'a Table,
        where_clause: &'a [Where],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.record(Linker::new().delete(table, where_clause));
            Ok(())
        })
    }

    fn exec<'a>(&'a self, statements: &'a [String]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            for sql in statements {
                self.record(sql.clone());
            }
            Ok(())
        })
    }
}

pub fn row(pairs: &[(&str, Scalar)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), Datum::Scalar(v.clone())))
        .collect()
}

pub fn int(n: i64) -> Scalar {
    Scalar::Int(n)
}

pub fn text(s: &str) -> Scalar {
    Scalar::Text(s.to_string())
}

fn read() -> Permission {
    Permission::read_only(Role::DEFAULT)
}

/// `comments(id, post_id, body)`
pub fn comments_model() -> Arc<Model> {
    Arc::new(Model::new(
        "comments",
        vec![
            Field::int64("id").permission(read()),
            Field::int64("post_id").permission(read()),
            Field::text("body").permission(read()),
        ],
    ))
}

/// `posts(id, author_id, title)` with `comments` (list).
pub fn posts_model() -> Arc<Model> {
    Arc::new(
        Model::new(
            "posts",
            vec![
                Field::int64("id").permission(read()),
                Field::int64("author_id").permission(read()),
                Field::text("title").permission(read()),
            ],
        )
        .binding(Binding::new(
            "comments",
            vec![Field::int64("id")],
            comments_model(),
            vec![Field::int64("post_id")],
        )),
    )
}

/// `profiles(user_id, bio)`, readable by staff only.
pub fn profiles_model() -> Arc<Model> {
    Arc::new(Model::new(
        "profiles",
        vec![
            Field::int64("user_id").permission(Permission::read_only(STAFF)),
            Field::text("bio").permission(Permission::read_only(STAFF)),
        ],
    ))
}

/// `users(id, name, email)` with `posts` (list), `profile` (single, staff
/// only) and `nothing` (forbidden).
pub fn users_model() -> Model {
    Model::new(
        "users",
        vec![
            Field::int64("id")
                .permission(read())
                .permission(Permission::read_only(STAFF)),
            Field::text("name")
                .permission(read())
                .permission(Permission::read_write(STAFF)),
            Field::text("email").permission(Permission::read_write(STAFF)),
        ],
    )
    .binding(Binding::new(
        "posts",
        vec![Field::int64("id")],
        posts_model(),
        vec![Field::int64("author_id")],
    ))
    .binding(
        Binding::new(
            "profile",
            vec![Field::int64("id")],
            profiles_model(),
            vec![Field::int64("user_id")],
        )
        .limit(RelationLimit::Rows(1))
        .role(STAFF),
    )
    .binding(
        Binding::new(
            "nothing",
            vec![Field::int64("id")],
            posts_model(),
            vec![Field::int64("author_id")],
        )
        .limit(RelationLimit::Rows(0)),
    )
}

/// An in-memory SQLite database with users, posts, comments and profiles.
pub async fn seeded_sqlite() -> SqliteDriver {
    let driver = SqliteDriver::connect(&DriverConfig::default().max_connections(1))
        .await
        .expect("Failed to create in-memory SQLite pool");
    let schema = [
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email TEXT)",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, author_id INTEGER, title TEXT)",
        "CREATE TABLE comments (id INTEGER PRIMARY KEY, post_id INTEGER, body TEXT)",
        "CREATE TABLE profiles (user_id INTEGER PRIMARY KEY, bio TEXT)",
        "INSERT INTO users (id, name, email) VALUES (1, 'Ann', 'ann@example.com')",
        "INSERT INTO users (id, name, email) VALUES (2, 'Bob', 'bob@example.com')",
        "INSERT INTO users (id, name, email) VALUES (3, 'Cid', NULL)",
        "INSERT INTO posts (id, author_id, title) VALUES (10, 1, 'Hello')",
        "INSERT INTO posts (id, author_id, title) VALUES (11, 1, 'Again')",
        "INSERT INTO posts (id, author_id, title) VALUES (12, 2, 'Bob''s post')",
        "INSERT INTO comments (id, post_id, body) VALUES (100, 10, 'first')",
        "INSERT INTO comments (id, post_id, body) VALUES (101, 10, 'second')",
        "INSERT INTO comments (id, post_id, body) VALUES (102, 12, 'nice')",
        "INSERT INTO profiles (user_id, bio) VALUES (1, 'Writer')",
    ];
    let statements: Vec<String> = schema.iter().map(|s| (*s).to_string()).collect();
    driver.exec(&statements).await.expect("Failed to seed database");
    driver
}
