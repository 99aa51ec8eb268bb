//! Typed filter values and literal escaping.
//!
//! Every literal that ends up in WHERE, HAVING, INSERT or UPDATE text goes
//! through [`Scalar::escape`]. Field and table names never do.

use serde::ser::{Serialize, Serializer};

/// A single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl Scalar {
    /// Returns the SQL literal for this value.
    ///
    /// Blobs have no literal form here and escape to an empty string.
    /// Non-finite floats escape to `NULL`.
    #[must_use]
    pub fn escape(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("TRUE"),
            Self::Bool(false) => String::from("FALSE"),
            Self::Int(n) => format!("{n}"),
            Self::UInt(n) => format!("{n}"),
            Self::Float(f) if f.is_finite() => format!("{f:.6}"),
            Self::Float(_) => String::from("NULL"),
            Self::Text(s) => {
                // Escape single quotes by doubling them
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(_) => String::new(),
        }
    }

    /// Returns true for [`Scalar::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content if this is a [`Scalar::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::UInt(n) => serializer.serialize_u64(*n),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Blob(b) => serializer.serialize_bytes(b),
        }
    }
}

/// The value carried by a WHERE or HAVING directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single value (`=`, `like`, comparisons, `is_null`).
    Scalar(Scalar),
    /// An ordered list of values (`between`, `in`).
    List(Vec<Scalar>),
}

impl Value {
    /// Creates a text scalar.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(s.into()))
    }

    /// Creates a list of text scalars.
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Scalar::Text(s.into())).collect())
    }

    /// Returns the scalar if this is a single value.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the items if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Self::List(items)
    }
}

/// Trait for types that can be converted to scalars.
pub trait ToScalar {
    /// Converts the value to a `Scalar`.
    fn to_scalar(self) -> Scalar;
}

impl ToScalar for Scalar {
    fn to_scalar(self) -> Scalar {
        self
    }
}

impl ToScalar for bool {
    fn to_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }
}

impl ToScalar for i64 {
    fn to_scalar(self) -> Scalar {
        Scalar::Int(self)
    }
}

impl ToScalar for i32 {
    fn to_scalar(self) -> Scalar {
        Scalar::Int(i64::from(self))
    }
}

impl ToScalar for i16 {
    fn to_scalar(self) -> Scalar {
        Scalar::Int(i64::from(self))
    }
}

impl ToScalar for i8 {
    fn to_scalar(self) -> Scalar {
        Scalar::Int(i64::from(self))
    }
}

impl ToScalar for u64 {
    fn to_scalar(self) -> Scalar {
        Scalar::UInt(self)
    }
}

impl ToScalar for u32 {
    fn to_scalar(self) -> Scalar {
        Scalar::UInt(u64::from(self))
    }
}

impl ToScalar for u16 {
    fn to_scalar(self) -> Scalar {
        Scalar::UInt(u64::from(self))
    }
}

impl ToScalar for u8 {
    fn to_scalar(self) -> Scalar {
        Scalar::UInt(u64::from(self))
    }
}

impl ToScalar for f64 {
    fn to_scalar(self) -> Scalar {
        Scalar::Float(self)
    }
}

impl ToScalar for f32 {
    fn to_scalar(self) -> Scalar {
        Scalar::Float(f64::from(self))
    }
}

impl ToScalar for String {
    fn to_scalar(self) -> Scalar {
        Scalar::Text(self)
    }
}

impl ToScalar for &str {
    fn to_scalar(self) -> Scalar {
        Scalar::Text(String::from(self))
    }
}

impl<T: ToScalar> ToScalar for Option<T> {
    fn to_scalar(self) -> Scalar {
        match self {
            Some(v) => v.to_scalar(),
            None => Scalar::Null,
        }
    }
}

impl ToScalar for Vec<u8> {
    fn to_scalar(self) -> Scalar {
        Scalar::Blob(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(Scalar::Text(String::from("hello")).escape(), "'hello'");
    }

    #[test]
    fn test_escape_text_doubles_quotes() {
        assert_eq!(Scalar::Text(String::from("O'Brien")).escape(), "'O''Brien'");
    }

    #[test]
    fn test_sql_injection_prevention() {
        let value = Scalar::Text(String::from("'; DROP TABLE users; --"));
        assert_eq!(value.escape(), "'''; DROP TABLE users; --'");
    }

    #[test]
    fn test_escape_integers() {
        assert_eq!(Scalar::Int(-100).escape(), "-100");
        assert_eq!(Scalar::UInt(u64::MAX).escape(), "18446744073709551615");
        assert_eq!(7_u8.to_scalar().escape(), "7");
        assert_eq!((-7_i8).to_scalar().escape(), "-7");
    }

    #[test]
    fn test_escape_float_is_fixed_point() {
        assert_eq!(Scalar::Float(2.5).escape(), "2.500000");
        assert_eq!(Scalar::Float(-0.125).escape(), "-0.125000");
        assert_eq!(1e20_f64.to_scalar().escape(), "100000000000000000000.000000");
    }

    #[test]
    fn test_escape_non_finite_float_is_null() {
        assert_eq!(Scalar::Float(f64::INFINITY).escape(), "NULL");
        assert_eq!(Scalar::Float(f64::NEG_INFINITY).escape(), "NULL");
        assert_eq!(Scalar::Float(f64::NAN).escape(), "NULL");
    }

    #[test]
    fn test_escape_bool() {
        assert_eq!(Scalar::Bool(true).escape(), "TRUE");
        assert_eq!(Scalar::Bool(false).escape(), "FALSE");
    }

    #[test]
    fn test_escape_null_and_blob() {
        assert_eq!(Scalar::Null.escape(), "NULL");
        assert_eq!(Scalar::Blob(vec![0x48, 0x49]).escape(), "");
    }

    #[test]
    fn test_to_scalar_conversions() {
        assert_eq!(true.to_scalar(), Scalar::Bool(true));
        assert_eq!(42_i32.to_scalar(), Scalar::Int(42));
        assert_eq!(42_u32.to_scalar(), Scalar::UInt(42));
        assert_eq!("hi".to_scalar(), Scalar::Text(String::from("hi")));
        assert_eq!(None::<i32>.to_scalar(), Scalar::Null);
    }

    #[test]
    fn test_serialize_scalar() {
        let json = serde_json::to_string(&vec![
            Scalar::Null,
            Scalar::Int(-1),
            Scalar::UInt(2),
            Scalar::Text(String::from("a")),
            Scalar::Bool(true),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,-1,2,"a",true]"#);
    }
}
