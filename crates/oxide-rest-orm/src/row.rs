//! Result rows.
//!
//! A row maps column names to values. Relation expansion adds nested rows
//! under binding names, so a value is either a scalar, a single nested row,
//! or a list of nested rows.

use std::collections::BTreeMap;

use oxide_rest_core::Scalar;
use serde::Serialize;

/// One result row, keyed by column or binding name.
pub type Row = BTreeMap<String, Datum>;

/// A value in a [`Row`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    /// A column value.
    Scalar(Scalar),
    /// A single related row (binding limit 1). Empty when nothing matched.
    Object(Row),
    /// Related rows.
    List(Vec<Row>),
}

impl Datum {
    /// Returns the column value, if this is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested row, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Row> {
        match self {
            Self::Object(row) => Some(row),
            _ => None,
        }
    }

    /// Returns the nested rows, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Row]> {
        match self {
            Self::List(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<Scalar> for Datum {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut author = Row::new();
        author.insert("name".into(), Scalar::Text("Ann".into()).into());

        let mut row = Row::new();
        row.insert("id".into(), Scalar::Int(1).into());
        row.insert("author".into(), Datum::Object(author));
        row.insert("tags".into(), Datum::List(Vec::new()));

        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"author":{"name":"Ann"},"id":1,"tags":[]}"#
        );
    }

    #[test]
    fn test_empty_object_serializes_as_object() {
        assert_eq!(serde_json::to_string(&Datum::Object(Row::new())).unwrap(), "{}");
    }
}
