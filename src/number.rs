//! Input value type accepted by the formatting entry points.

use crate::decimal::{self, Decimal};
use crate::error::FormatError;

/// A numeric value to format: a machine integer, a double, or an
/// arbitrary-precision decimal from the active backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// A signed machine integer.
    Integer(i64),
    /// An IEEE-754 double; NaN and the infinities format to the locale's
    /// symbol-table strings.
    Float(f64),
    /// A decimal from the active backend, formatted at full precision.
    Decimal(Decimal),
}

impl Number {
    /// True for negative values. Negative zero counts as positive for
    /// doubles; decimals report their sign field as-is.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(value) => *value < 0,
            Self::Float(value) => *value < 0.0,
            Self::Decimal(value) => decimal::is_negative(value),
        }
    }

    /// True for `NaN` and `±∞` doubles.
    #[must_use]
    pub fn is_non_finite(&self) -> bool {
        matches!(self, Self::Float(value) if !value.is_finite())
    }

    /// Converts the absolute value into a backend decimal.
    ///
    /// # Errors
    /// Returns [`FormatError::UnrepresentableValue`] when the value exceeds
    /// the backend's range (non-finite doubles included).
    pub fn to_abs_decimal(&self) -> Result<Decimal, FormatError> {
        let value = match self {
            Self::Integer(value) => Some(decimal::from_i64(*value)),
            Self::Float(value) => decimal::from_f64(*value),
            Self::Decimal(value) => Some(value.clone()),
        };
        value
            .map(|value| decimal::abs(&value))
            .ok_or(FormatError::UnrepresentableValue)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Self::Integer(value),
            Err(_) => Self::Decimal(decimal::from_u64(value)),
        }
    }
}

macro_rules! number_from_int {
    ($($int:ty)+) => {
        $(
            impl From<$int> for Number {
                fn from(value: $int) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )+
    };
}

number_from_int!(i8 i16 i32 i64 u8 u16 u32);
