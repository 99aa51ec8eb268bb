#![allow(dead_code)]

use std::sync::Arc;

use oxide_rest_core::clause::{Field, Table};
use oxide_rest_core::{
    parse_query, reconcile, ClauseSet, FieldParsers, Linker, ParseValueError, Scalar, ValueParser,
};

pub fn text() -> Arc<ValueParser> {
    Arc::new(|raw: &str| -> Result<Scalar, ParseValueError> { Ok(Scalar::Text(raw.to_string())) })
}

pub fn int() -> Arc<ValueParser> {
    Arc::new(|raw: &str| {
        raw.parse::<i64>()
            .map(Scalar::Int)
            .map_err(|e| ParseValueError::new(raw, e.to_string()))
    })
}

/// Every listed field parses as text.
pub fn text_fields(names: &[&str]) -> FieldParsers {
    names.iter().map(|n| ((*n).to_string(), text())).collect()
}

pub fn compile(raw: &str, parsers: &FieldParsers) -> ClauseSet {
    reconcile(parse_query(raw), parsers)
}

pub fn select(table: &str, raw: &str, parsers: &FieldParsers) -> String {
    Linker::new().select(&Table::new(table), &[], &compile(raw, parsers))
}

pub fn where_line(raw: &str, parsers: &FieldParsers) -> String {
    let sql = select("t", raw, parsers);
    sql.lines()
        .find(|l| l.starts_with("WHERE "))
        .unwrap_or_else(|| panic!("No WHERE line in:\n{sql}"))
        .trim_end_matches(';')
        .to_string()
}

pub fn fields(names: &[&str]) -> Vec<Field> {
    names.iter().map(|n| Field::new(*n)).collect()
}
