//! Allow-list reconciler.
//!
//! The second pass between parsing and linking. Every WHERE and HAVING field
//! must have an entry in the caller's [`FieldParsers`], and every raw text
//! value is re-parsed through that entry. Anything that does not survive is
//! dropped. This is the only place untrusted strings become typed values.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::clause::{ClauseSet, Condition, Instruction};
use crate::value::{Scalar, Value};

/// Error returned by a field value parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value {value:?}: {reason}")]
pub struct ParseValueError {
    /// The rejected input.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ParseValueError {
    /// Creates a new parse error.
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Converts a raw query-string value into a typed scalar.
pub type ValueParser = dyn Fn(&str) -> Result<Scalar, ParseValueError> + Send + Sync;

/// The server-declared allow-list: field name to value parser.
pub type FieldParsers = HashMap<String, Arc<ValueParser>>;

/// Filters and coerces a parsed clause set against an allow-list.
///
/// LIMIT and OFFSET carry no field and pass through unchanged.
#[must_use]
pub fn reconcile(clauses: ClauseSet, parsers: &FieldParsers) -> ClauseSet {
    ClauseSet {
        where_clause: reconcile_conditions(clauses.where_clause, parsers),
        group_by: clauses
            .group_by
            .into_iter()
            .filter(|g| allowed(g.field(), parsers))
            .collect(),
        having: reconcile_conditions(clauses.having, parsers),
        order_by: clauses
            .order_by
            .into_iter()
            .filter(|o| allowed(o.field(), parsers))
            .collect(),
        limit: clauses.limit,
        offset: clauses.offset,
    }
}

fn allowed(field: &str, parsers: &FieldParsers) -> bool {
    let known = parsers.contains_key(field);
    if !known {
        debug!(field = %field, "Dropping directive: field is not allowed");
    }
    known
}

fn reconcile_conditions<K>(
    conditions: Vec<Condition<K>>,
    parsers: &FieldParsers,
) -> Vec<Condition<K>> {
    conditions
        .into_iter()
        .filter_map(|c| {
            let Some(parser) = parsers.get(c.field()) else {
                debug!(field = %c.field(), "Dropping directive: field is not allowed");
                return None;
            };
            match coerce(&c, parser.as_ref()) {
                Some(value) => Some(c.with_value(value)),
                None => {
                    debug!(
                        field = %c.field(),
                        instruction = %c.get_instruction(),
                        "Dropping directive: value rejected by field parser"
                    );
                    None
                }
            }
        })
        .collect()
}

fn coerce<K>(condition: &Condition<K>, parser: &ValueParser) -> Option<Value> {
    match condition.value() {
        Value::Scalar(Scalar::Null) => (condition.get_instruction() == Instruction::IsNull)
            .then_some(Value::Scalar(Scalar::Null)),
        Value::Scalar(Scalar::Text(raw)) => parser(raw).ok().map(Value::Scalar),
        Value::Scalar(_) => None,
        Value::List(items) if items.is_empty() => None,
        Value::List(items) => items
            .iter()
            .map(|item| item.as_text().and_then(|raw| parser(raw).ok()))
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
    }
}
