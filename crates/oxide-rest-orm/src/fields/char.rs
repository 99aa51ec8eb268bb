//! Text fields.

use oxide_rest_core::Scalar;

use super::Field;

impl Field {
    /// A text column. Every input is accepted verbatim.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, |raw: &str| Ok(Scalar::Text(raw.to_string())))
    }
}
