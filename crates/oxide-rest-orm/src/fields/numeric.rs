//! Integer and floating point fields.

use oxide_rest_core::ToScalar;

use super::{invalid, Field};

macro_rules! integer_field {
    ($($(#[$doc:meta])* $fn_name:ident => $ty:ty;)*) => {
        impl Field {
            $(
                $(#[$doc])*
                pub fn $fn_name(name: impl Into<String>) -> Self {
                    Self::new(name, |raw: &str| {
                        raw.parse::<$ty>()
                            .map(ToScalar::to_scalar)
                            .map_err(|e| invalid(raw, e))
                    })
                }
            )*
        }
    };
}

integer_field! {
    /// An 8-bit signed integer column.
    int8 => i8;
    /// A 16-bit signed integer column.
    int16 => i16;
    /// A 32-bit signed integer column.
    int32 => i32;
    /// A 64-bit signed integer column.
    int64 => i64;
    /// An 8-bit unsigned integer column.
    uint8 => u8;
    /// A 16-bit unsigned integer column.
    uint16 => u16;
    /// A 32-bit unsigned integer column.
    uint32 => u32;
    /// A 64-bit unsigned integer column.
    uint64 => u64;
}

macro_rules! float_field {
    ($($(#[$doc:meta])* $fn_name:ident => $ty:ty;)*) => {
        impl Field {
            $(
                $(#[$doc])*
                ///
                /// `inf` and `NaN` are rejected: they have no SQL literal.
                pub fn $fn_name(name: impl Into<String>) -> Self {
                    Self::new(name, |raw: &str| {
                        let f = raw.parse::<$ty>().map_err(|e| invalid(raw, e))?;
                        if f.is_finite() {
                            Ok(f.to_scalar())
                        } else {
                            Err(invalid(raw, "not a finite number"))
                        }
                    })
                }
            )*
        }
    };
}

float_field! {
    /// A single precision float column.
    float32 => f32;
    /// A double precision float column.
    float64 => f64;
}

#[cfg(test)]
mod tests {
    use oxide_rest_core::Scalar;

    use super::*;

    #[test]
    fn test_integer_ranges() {
        assert_eq!(Field::int8("n").parse("-128").unwrap(), Scalar::Int(-128));
        assert!(Field::int8("n").parse("128").is_err());
        assert_eq!(Field::uint8("n").parse("255").unwrap(), Scalar::UInt(255));
        assert!(Field::uint8("n").parse("-1").is_err());
        assert!(Field::int16("n").parse("40000").is_err());
        assert_eq!(Field::int32("n").parse("40000").unwrap(), Scalar::Int(40000));
        assert_eq!(
            Field::uint64("n").parse("18446744073709551615").unwrap(),
            Scalar::UInt(u64::MAX)
        );
        assert_eq!(Field::int64("n").parse("-9").unwrap(), Scalar::Int(-9));
    }

    #[test]
    fn test_integers_reject_text() {
        assert!(Field::int64("n").parse("1 OR 1=1").is_err());
        assert!(Field::uint32("n").parse("").is_err());
        assert!(Field::int16("n").parse("1.5").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(Field::float64("x").parse("2.5").unwrap(), Scalar::Float(2.5));
        assert_eq!(Field::float32("x").parse("0.5").unwrap(), Scalar::Float(0.5));
        assert_eq!(Field::float64("x").parse("3").unwrap(), Scalar::Float(3.0));
        assert!(Field::float64("x").parse("abc").is_err());
    }

    #[test]
    fn test_floats_reject_non_finite() {
        for raw in ["inf", "-inf", "infinity", "NaN", "1e400"] {
            assert!(Field::float64("x").parse(raw).is_err(), "{raw}");
        }
        assert!(Field::float32("x").parse("1e39").is_err());
        assert!(Field::float32("x").parse("nan").is_err());
    }

    #[test]
    fn test_parse_error_names_value() {
        let err = Field::int32("n").parse("abc").unwrap_err();
        assert_eq!(err.value, "abc");
    }
}
