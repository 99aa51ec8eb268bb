//! Clause entities.
//!
//! These are immutable value objects built once per request, either by the
//! filter language parser or by server code, and consumed by the linker.

use std::fmt;
use std::marker::PhantomData;

use crate::value::{Scalar, Value};

/// A table identifier.
///
/// Rendered verbatim. Table names must come from server-declared schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
}

impl Table {
    /// Creates a table identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A column reference, optionally carrying a value.
///
/// Projections (SELECT) have no value, write payloads (INSERT/UPDATE) do.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Option<Scalar>,
}

impl Field {
    /// Creates a projection field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates a payload field.
    pub fn with_value(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// Returns the column name (or projection expression).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the payload value.
    #[must_use]
    pub const fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }
}

/// How a predicate joins the chain built before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// AND (default)
    #[default]
    And,
    /// OR
    Or,
}

impl Separator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation a predicate performs on its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Instruction {
    /// Implicit equality (`=`, or `<>` when negative).
    #[default]
    Equal,
    /// `BETWEEN low AND high`
    Between,
    /// `IN (...)`
    In,
    /// `LIKE pattern`
    Like,
    /// `IS NULL`
    IsNull,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// Produced by the `group` directive on HAVING records.
    Group,
}

impl Instruction {
    /// Resolves a predicate instruction from its directive name.
    ///
    /// Case-insensitive. `group`, `sort`, `limit` and `offset` are not
    /// predicates and resolve to `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "" => Some(Self::Equal),
            "between" => Some(Self::Between),
            "in" => Some(Self::In),
            "like" => Some(Self::Like),
            "is_null" => Some(Self::IsNull),
            "cmp_l" | "<" => Some(Self::Less),
            "cmp_le" | "<=" => Some(Self::LessOrEqual),
            "cmp_b" | ">" => Some(Self::Greater),
            "cmp_be" | ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }

    /// Returns the normalized instruction name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "",
            Self::Between => "between",
            Self::In => "in",
            Self::Like => "like",
            Self::IsNull => "is_null",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names the clause a [`Condition`] belongs to.
pub trait ClauseKind {
    /// The SQL keyword introducing the clause.
    const KEYWORD: &'static str;
}

/// Marker: WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhereClause;

/// Marker: HAVING clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HavingClause;

impl ClauseKind for WhereClause {
    const KEYWORD: &'static str = "WHERE";
}

impl ClauseKind for HavingClause {
    const KEYWORD: &'static str = "HAVING";
}

/// A single filter predicate.
///
/// WHERE and HAVING records share this shape and differ only by the marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<K> {
    instruction: Instruction,
    field: String,
    separator: Separator,
    value: Value,
    negative: bool,
    _clause: PhantomData<K>,
}

/// A WHERE predicate.
pub type Where = Condition<WhereClause>;

/// A HAVING predicate.
pub type Having = Condition<HavingClause>;

impl<K> Condition<K> {
    /// Creates an equality predicate joined with AND.
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            instruction: Instruction::Equal,
            field: field.into(),
            separator: Separator::And,
            value: value.into(),
            negative: false,
            _clause: PhantomData,
        }
    }

    /// Creates an `IN` predicate.
    pub fn in_list(field: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self::new(field, Value::List(values)).instruction(Instruction::In)
    }

    /// Sets the instruction.
    #[must_use]
    pub const fn instruction(mut self, instruction: Instruction) -> Self {
        self.instruction = instruction;
        self
    }

    /// Sets the separator.
    #[must_use]
    pub const fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the negative flag.
    #[must_use]
    pub const fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Returns a copy carrying another value.
    #[must_use]
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            instruction: self.instruction,
            field: self.field.clone(),
            separator: self.separator,
            value,
            negative: self.negative,
            _clause: PhantomData,
        }
    }

    /// Re-tags this predicate for another clause.
    #[must_use]
    pub fn into_clause<L>(self) -> Condition<L> {
        Condition {
            instruction: self.instruction,
            field: self.field,
            separator: self.separator,
            value: self.value,
            negative: self.negative,
            _clause: PhantomData,
        }
    }

    /// Returns the instruction.
    #[must_use]
    pub const fn get_instruction(&self) -> Instruction {
        self.instruction
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the separator.
    #[must_use]
    pub const fn get_separator(&self) -> Separator {
        self.separator
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns whether the predicate is negated.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }
}

/// A GROUP BY column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy {
    field: String,
}

impl GroupBy {
    /// Creates a GROUP BY entry.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (ASC)
    #[default]
    Asc,
    /// Descending order (DESC)
    Desc,
}

impl SortOrder {
    /// Parses `ASC` or `DESC` exactly; anything else is ascending.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "DESC" => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    field: String,
    sort: SortOrder,
}

impl OrderBy {
    /// Creates an ORDER BY entry.
    pub fn new(field: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            field: field.into(),
            sort,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the direction.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }
}

/// A LIMIT clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    count: u64,
}

impl Limit {
    /// Creates a LIMIT clause.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// Returns the row count.
    #[must_use]
    pub const fn count(self) -> u64 {
        self.count
    }
}

/// An OFFSET clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    rows: u64,
}

impl Offset {
    /// Creates an OFFSET clause.
    #[must_use]
    pub const fn new(rows: u64) -> Self {
        Self { rows }
    }

    /// Returns the number of skipped rows.
    #[must_use]
    pub const fn rows(self) -> u64 {
        self.rows
    }
}

/// Everything the filter language can express for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseSet {
    /// WHERE predicates, in application order.
    pub where_clause: Vec<Where>,
    /// GROUP BY columns.
    pub group_by: Vec<GroupBy>,
    /// HAVING predicates, in application order.
    pub having: Vec<Having>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// OFFSET clause.
    pub offset: Option<Offset>,
}

impl ClauseSet {
    /// Creates an empty clause set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clause set holding only WHERE predicates.
    #[must_use]
    pub fn filtered(where_clause: Vec<Where>) -> Self {
        Self {
            where_clause,
            ..Self::default()
        }
    }

    /// Sets the LIMIT clause.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some(Limit::new(count));
        self
    }

    /// Sets the OFFSET clause.
    #[must_use]
    pub const fn offset(mut self, rows: u64) -> Self {
        self.offset = Some(Offset::new(rows));
        self
    }
}
