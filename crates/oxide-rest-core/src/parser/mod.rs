//! Filter language parser.
//!
//! Turns decoded query parameters into an ordered [`ClauseSet`]. Every key is
//! validated on its own: a malformed directive is dropped and the rest of the
//! query proceeds.
//!
//! # Ordering
//!
//! Directives are applied by ordering number ascending. A key may carry an
//! explicit number (`2:like[name]`); unlabeled keys rank after every explicit
//! number and keep their encounter order among themselves.
//!
//! # Example
//!
//! ```rust
//! use oxide_rest_core::parser::parse;
//! use oxide_rest_core::QueryParams;
//!
//! let clauses = parse(&QueryParams::parse("?2:|like[name]=A%&1:like[name]=B%"));
//! assert_eq!(clauses.where_clause.len(), 2);
//! assert_eq!(clauses.where_clause[0].field(), "name");
//! ```

mod key;

pub use key::KeyToken;

use tracing::debug;

use crate::clause::{ClauseSet, GroupBy, Having, Instruction, OrderBy, SortOrder, Where};
use crate::query::QueryParams;
use crate::value::{Scalar, Value};

/// A directive waiting to be placed in the clause set.
#[derive(Debug)]
enum Directive {
    Where(Where),
    Group(GroupBy, Having),
    Order(OrderBy),
    Limit(u64),
    Offset(u64),
}

/// Parses query parameters into a clause set.
///
/// Never fails: unrecognized or malformed directives are dropped.
#[must_use]
pub fn parse(params: &QueryParams) -> ClauseSet {
    // unlabeled directives rank after every explicit number, in encounter order
    let mut directives: Vec<((bool, u64, usize), Directive)> =
        Vec::with_capacity(params.len());

    for (seq, (key, values)) in params.iter().enumerate() {
        let Some(token) = KeyToken::parse(key) else {
            debug!(key = %key, "Dropping directive: key does not match the filter grammar");
            continue;
        };
        match directive(&token, values) {
            Some(d) => {
                let rank = (token.number.is_none(), token.number.unwrap_or(0), seq);
                directives.push((rank, d));
            }
            None => debug!(key = %key, "Dropping directive: invalid field, arity or value"),
        }
    }

    directives.sort_by_key(|(rank, _)| *rank);

    let mut clauses = ClauseSet::new();
    for (_, d) in directives {
        match d {
            Directive::Where(w) => clauses.where_clause.push(w),
            Directive::Group(g, h) => {
                clauses.group_by.push(g);
                clauses.having.push(h);
            }
            Directive::Order(o) => clauses.order_by.push(o),
            Directive::Limit(n) => clauses = clauses.limit(n),
            Directive::Offset(n) => clauses = clauses.offset(n),
        }
    }
    clauses
}

/// Convenience: decodes a raw query string and parses it.
#[must_use]
pub fn parse_query(raw: &str) -> ClauseSet {
    parse(&QueryParams::parse(raw))
}

/// A non-negative count that fits a signed 64-bit SQL integer.
fn row_count(values: &[String]) -> Option<u64> {
    let n: i64 = values.first()?.parse().ok()?;
    u64::try_from(n).ok()
}

fn directive(token: &KeyToken, values: &[String]) -> Option<Directive> {
    if !token.named {
        return plain(token, values);
    }

    match token.name.to_lowercase().as_str() {
        "group" | "group-by" => {
            let field = token.field()?;
            let value = values
                .iter()
                .find(|v| !v.is_empty())
                .map_or(Scalar::Null, |v| Scalar::Text(v.clone()));
            let having = Having::new(field, value)
                .instruction(Instruction::Group)
                .separator(token.separator)
                .negative(token.negative);
            Some(Directive::Group(GroupBy::new(field), having))
        }
        "sort" | "order" | "order-by" => {
            let field = token.field()?;
            let sort = values.first().map_or(SortOrder::Asc, |v| SortOrder::parse(v));
            Some(Directive::Order(OrderBy::new(field, sort)))
        }
        "limit" => row_count(values).map(Directive::Limit),
        "offset" => row_count(values).map(Directive::Offset),
        name => {
            let instruction = Instruction::from_name(name)?;
            let field = token.field()?;
            let value = match instruction {
                Instruction::Between => match values {
                    [first, .., last] => Value::text_list([first.clone(), last.clone()]),
                    _ => return None,
                },
                Instruction::In if !values.is_empty() => Value::text_list(values.iter().cloned()),
                Instruction::IsNull => Value::Scalar(Scalar::Null),
                Instruction::In | Instruction::Equal | Instruction::Group => return None,
                _ => Value::text(values.first()?.clone()),
            };
            Some(Directive::Where(
                Where::new(field, value)
                    .instruction(instruction)
                    .separator(token.separator)
                    .negative(token.negative),
            ))
        }
    }
}

fn plain(token: &KeyToken, values: &[String]) -> Option<Directive> {
    let first = values.first()?;
    let list = token.subfields.first().is_some_and(String::is_empty);
    let condition = if list {
        Where::in_list(&token.name, values.iter().cloned().map(Scalar::Text).collect())
    } else {
        Where::new(&token.name, Value::text(first.clone()))
    };
    Some(Directive::Where(
        condition
            .separator(token.separator)
            .negative(token.negative),
    ))
}
