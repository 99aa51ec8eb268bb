//! SQL linker.
//!
//! Renders clause entities into literal, newline-delimited SQL text. Every
//! value goes through [`Scalar::escape`]; table and field names are emitted
//! verbatim and must come from server-declared schema.
//!
//! Predicates chain left to right with their own separator and no grouping
//! beyond each predicate's parentheses: `(a) OR (b) AND (c)`.
//!
//! # Example
//!
//! ```rust
//! use oxide_rest_core::clause::{ClauseSet, Field, Table, Where};
//! use oxide_rest_core::{Linker, Scalar};
//!
//! let sql = Linker::new().select(
//!     &Table::new("users"),
//!     &[Field::new("id"), Field::new("name")],
//!     &ClauseSet::filtered(vec![Where::new("id", Scalar::Int(1))]).limit(1),
//! );
//! assert_eq!(sql, "SELECT id, name\nFROM users\nWHERE (id = 1)\nLIMIT 1;");
//! ```

use std::fmt::Write;

use crate::clause::{ClauseKind, ClauseSet, Condition, Field, Instruction, Table, Where};
use crate::value::{Scalar, Value};

/// Renders SELECT, INSERT, UPDATE and DELETE statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linker;

impl Linker {
    /// Creates a linker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders a SELECT statement.
    ///
    /// An empty projection selects `*`.
    #[must_use]
    pub fn select(&self, table: &Table, fields: &[Field], clauses: &ClauseSet) -> String {
        let projection = if fields.is_empty() {
            String::from("*")
        } else {
            join_names(fields)
        };
        let mut sql = format!("SELECT {projection}\nFROM {}", table.name());

        if let Some(line) = self.clause(&clauses.where_clause) {
            let _ = write!(sql, "\n{line}");
        }
        if !clauses.group_by.is_empty() {
            let columns: Vec<_> = clauses.group_by.iter().map(|g| g.field()).collect();
            let _ = write!(sql, "\nGROUP BY {}", columns.join(", "));
        }
        if let Some(line) = self.clause(&clauses.having) {
            let _ = write!(sql, "\n{line}");
        }
        if !clauses.order_by.is_empty() {
            let columns: Vec<_> = clauses
                .order_by
                .iter()
                .map(|o| format!("{} {}", o.field(), o.sort().as_str()))
                .collect();
            let _ = write!(sql, "\nORDER BY {}", columns.join(", "));
        }
        if let Some(limit) = clauses.limit {
            let _ = write!(sql, "\nLIMIT {}", limit.count());
        }
        if let Some(offset) = clauses.offset {
            let _ = write!(sql, "\nOFFSET {}", offset.rows());
        }
        sql.push(';');
        sql
    }

    /// Renders an INSERT statement from payload fields.
    #[must_use]
    pub fn insert(&self, table: &Table, fields: &[Field]) -> String {
        let values: Vec<_> = fields.iter().map(field_value).collect();
        format!(
            "INSERT INTO {} ({})\nVALUES ({});",
            table.name(),
            join_names(fields),
            values.join(", ")
        )
    }

    /// Renders an UPDATE statement.
    ///
    /// Without any renderable WHERE predicate the statement is scoped to
    /// `WHERE (false)` and touches nothing.
    #[must_use]
    pub fn update(&self, table: &Table, fields: &[Field], where_clause: &[Where]) -> String {
        let assignments: Vec<_> = fields
            .iter()
            .map(|f| format!("{} = {}", f.name(), field_value(f)))
            .collect();
        format!(
            "UPDATE {}\nSET {}\nWHERE {};",
            table.name(),
            assignments.join(", "),
            guarded(where_clause)
        )
    }

    /// Renders a DELETE statement, guarded like [`Linker::update`].
    #[must_use]
    pub fn delete(&self, table: &Table, where_clause: &[Where]) -> String {
        format!(
            "DELETE FROM {}\nWHERE {};",
            table.name(),
            guarded(where_clause)
        )
    }

    /// Renders a WHERE or HAVING predicate chain without its keyword.
    ///
    /// Returns `None` when nothing renders.
    #[must_use]
    pub fn predicate<K>(&self, conditions: &[Condition<K>]) -> Option<String> {
        chain(conditions)
    }

    /// Renders a full WHERE or HAVING clause line, keyword included.
    #[must_use]
    pub fn clause<K: ClauseKind>(&self, conditions: &[Condition<K>]) -> Option<String> {
        chain(conditions).map(|p| format!("{} {p}", K::KEYWORD))
    }
}

fn join_names(fields: &[Field]) -> String {
    fields.iter().map(Field::name).collect::<Vec<_>>().join(", ")
}

fn field_value(field: &Field) -> String {
    field.value().unwrap_or(&Scalar::Null).escape()
}

fn guarded(where_clause: &[Where]) -> String {
    chain(where_clause).unwrap_or_else(|| String::from("(false)"))
}

fn chain<K>(conditions: &[Condition<K>]) -> Option<String> {
    conditions.iter().fold(None, |acc, c| match render(c) {
        None => acc,
        Some(p) => Some(match acc {
            None => format!("({p})"),
            Some(acc) => format!("{acc} {} ({p})", c.get_separator()),
        }),
    })
}

fn render<K>(condition: &Condition<K>) -> Option<String> {
    let field = condition.field();
    let negative = condition.is_negative();

    let predicate = match (condition.get_instruction(), condition.value()) {
        (Instruction::Equal | Instruction::Group, Value::Scalar(v)) => {
            let op = if negative { "<>" } else { "=" };
            return Some(format!("{field} {op} {}", v.escape()));
        }
        (Instruction::IsNull, _) => {
            let not = if negative { "NOT " } else { "" };
            return Some(format!("{field} IS {not}NULL"));
        }
        (Instruction::Between, Value::List(items)) => match items.as_slice() {
            [low, high] => format!("{field} BETWEEN {} AND {}", low.escape(), high.escape()),
            _ => return None,
        },
        (Instruction::In, Value::List(items)) if !items.is_empty() => {
            let list: Vec<_> = items.iter().map(Scalar::escape).collect();
            format!("{field} IN ({})", list.join(", "))
        }
        (Instruction::Like, Value::Scalar(v)) => format!("{field} LIKE {}", v.escape()),
        (Instruction::Less, Value::Scalar(v)) => format!("{field} < {}", v.escape()),
        (Instruction::LessOrEqual, Value::Scalar(v)) => format!("{field} <= {}", v.escape()),
        (Instruction::Greater, Value::Scalar(v)) => format!("{field} > {}", v.escape()),
        (Instruction::GreaterOrEqual, Value::Scalar(v)) => format!("{field} >= {}", v.escape()),
        _ => return None,
    };

    Some(if negative {
        format!("NOT({predicate})")
    } else {
        predicate
    })
}
