//! Boolean fields.

use oxide_rest_core::{ParseValueError, Scalar};

use super::Field;

impl Field {
    /// A boolean column.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, |raw: &str| match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Scalar::Bool(true)),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Scalar::Bool(false)),
            _ => Err(ParseValueError::new(raw, "invalid boolean")),
        })
    }
}
