//! Date and time fields.

use chrono::NaiveDateTime;
use oxide_rest_core::Scalar;

use super::{invalid, Field};

impl Field {
    /// A datetime column in the given `chrono` format.
    ///
    /// Input is parsed and re-formatted, so the value that reaches SQL is
    /// always in canonical form.
    pub fn datetime(name: impl Into<String>, format: impl Into<String>) -> Self {
        let format = format.into();
        Self::new(name, move |raw: &str| {
            NaiveDateTime::parse_from_str(raw, &format)
                .map(|dt| Scalar::Text(dt.format(&format).to_string()))
                .map_err(|e| invalid(raw, e))
        })
    }
}
