//! # oxide-rest-core
//!
//! A query compiler for REST endpoints: an HTTP query string goes in, literal
//! and safely escaped SQL text comes out.
//!
//! This crate provides:
//! - A filter mini-language parser producing ordered clause entities
//! - An allow-list reconciler that types values through server-declared parsers
//! - A SQL linker rendering SELECT, INSERT, UPDATE and DELETE text
//! - A value escaper that every literal goes through
//!
//! ## Filter Language
//!
//! Each query-string key is `[NUM:][!][|]INSTRUCTION_OR_FIELD[[SUBFIELD]]`:
//!
//! ```text
//! status=active                  status = 'active'
//! !status=active                 status <> 'active'
//! id[]=1&id[]=2                  id IN ('1', '2')
//! :between[price][]=10&...=20    price BETWEEN '10' AND '20'
//! 2:|like[name]=A%               OR name LIKE 'A%', applied second
//! :sort[name]=DESC  :limit=10  :offset=20  :group[country]
//! ```
//!
//! ## Compiling a Query
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_rest_core::clause::{Field, Table};
//! use oxide_rest_core::{
//!     parse, reconcile, FieldParsers, Linker, ParseValueError, QueryParams, Scalar,
//! };
//!
//! let mut parsers = FieldParsers::new();
//! parsers.insert(
//!     "id".into(),
//!     Arc::new(|raw: &str| -> Result<Scalar, ParseValueError> {
//!         Ok(Scalar::Text(raw.to_string()))
//!     }),
//! );
//!
//! let params = QueryParams::parse("?:!in[id][]=1&:!in[id][]=2&secret=x");
//! let clauses = reconcile(parse(&params), &parsers);
//! let sql = Linker::new().select(&Table::new("users"), &[Field::new("id")], &clauses);
//!
//! assert_eq!(sql, "SELECT id\nFROM users\nWHERE (NOT(id IN ('1', '2')));");
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are escaped, never spliced. Field names only reach SQL text after the
//! reconciler has matched them against the allow-list.
//!
//! ```rust
//! use oxide_rest_core::Scalar;
//!
//! let user_input = Scalar::Text("'; DROP TABLE users; --".into());
//! assert_eq!(user_input.escape(), "'''; DROP TABLE users; --'");
//! ```

pub mod clause;
pub mod linker;
pub mod parser;
pub mod query;
pub mod reconcile;
pub mod value;

pub use clause::{ClauseSet, Having, Instruction, Separator, Where};
pub use linker::Linker;
pub use parser::{parse, parse_query};
pub use query::QueryParams;
pub use reconcile::{reconcile, FieldParsers, ParseValueError, ValueParser};
pub use value::{Scalar, ToScalar, Value};
