//! Feature-dependent decimal abstraction.
//!
//! Formatting never mutates shared state; every helper here takes a value and
//! returns a new one. The `rust-decimal` backend caps precision at 28
//! fractional digits; values outside its range surface as
//! [`FormatError::UnrepresentableValue`](crate::FormatError::UnrepresentableValue)
//! at the crate boundary.

use std::str::FromStr;

#[cfg(all(feature = "rust-decimal", feature = "bigdecimal"))]
compile_error!(
    "features `rust-decimal` and `bigdecimal` are mutually exclusive; enable only one backend"
);

#[cfg(not(any(feature = "rust-decimal", feature = "bigdecimal")))]
compile_error!(
    "at least one decimal backend feature (`rust-decimal` or `bigdecimal`) must be enabled"
);

/// Rounding modes for display rounding, after TR35.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round toward zero (truncate).
    Down,
    /// Round halves away from zero.
    HalfUp,
    /// Round halves toward the nearest even digit.
    #[default]
    HalfEven,
    /// Round toward positive infinity.
    Ceiling,
    /// Round toward negative infinity.
    Floor,
    /// Round halves toward zero.
    HalfDown,
    /// Round away from zero.
    Up,
}

#[cfg(all(feature = "rust-decimal", not(feature = "bigdecimal")))]
mod backend {
    use super::{FromStr, RoundingMode};

    pub use rust_decimal::Decimal;
    use rust_decimal::RoundingStrategy;

    const MAX_SCALE: i64 = 28;

    pub(super) fn parse_decimal(value: &str) -> Option<Decimal> {
        Decimal::from_str(value).ok()
    }

    pub(super) const fn zero() -> Decimal {
        Decimal::ZERO
    }

    pub(super) fn from_i64(value: i64) -> Decimal {
        Decimal::from(value)
    }

    pub(super) fn from_u64(value: u64) -> Decimal {
        Decimal::from(value)
    }

    pub(super) fn is_zero(value: &Decimal) -> bool {
        value.is_zero()
    }

    pub(super) fn is_negative(value: &Decimal) -> bool {
        value.is_sign_negative()
    }

    pub(super) fn abs(value: &Decimal) -> Decimal {
        value.abs()
    }

    pub(super) fn to_plain_string(value: &Decimal) -> String {
        value.to_string()
    }

    // Rebuilds `mantissa * 10^-scale`, trading precision for range when the
    // 96-bit mantissa cannot hold the requested digits.
    fn rebuild(mut mantissa: i128, mut scale: i64) -> Decimal {
        while scale < 0 {
            match mantissa.checked_mul(10) {
                Some(next) => {
                    mantissa = next;
                    scale += 1;
                }
                None => return Decimal::MAX,
            }
        }
        loop {
            if scale <= MAX_SCALE
                && let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale as u32)
            {
                return value;
            }
            if scale == 0 {
                return if mantissa < 0 { Decimal::MIN } else { Decimal::MAX };
            }
            mantissa /= 10;
            scale -= 1;
        }
    }

    pub(super) fn shift(value: &Decimal, exponent: i32) -> Decimal {
        rebuild(value.mantissa(), i64::from(value.scale()) - i64::from(exponent))
    }

    pub(super) fn round_to_scale(value: &Decimal, scale: i32, mode: RoundingMode) -> Decimal {
        let strategy: RoundingStrategy = mode.into();
        if scale >= 0 {
            let dp = i64::from(scale).min(MAX_SCALE) as u32;
            value.round_dp_with_strategy(dp, strategy)
        } else {
            let shifted = shift(value, scale);
            let rounded = shifted.round_dp_with_strategy(0, strategy);
            shift(&rounded, -scale)
        }
    }

    impl From<RoundingMode> for RoundingStrategy {
        fn from(value: RoundingMode) -> Self {
            match value {
                RoundingMode::Down => Self::ToZero,
                RoundingMode::HalfUp => Self::MidpointAwayFromZero,
                RoundingMode::HalfEven => Self::MidpointNearestEven,
                RoundingMode::Ceiling => Self::ToPositiveInfinity,
                RoundingMode::Floor => Self::ToNegativeInfinity,
                RoundingMode::HalfDown => Self::MidpointTowardZero,
                RoundingMode::Up => Self::AwayFromZero,
            }
        }
    }
}

#[cfg(all(feature = "bigdecimal", not(feature = "rust-decimal")))]
mod backend {
    use super::{FromStr, RoundingMode as Mode};

    pub use bigdecimal::BigDecimal as Decimal;
    use bigdecimal::RoundingMode;
    use num_bigint::Sign;
    use num_traits::Zero;

    pub(super) fn parse_decimal(value: &str) -> Option<Decimal> {
        Decimal::from_str(value).ok()
    }

    pub(super) fn zero() -> Decimal {
        Decimal::zero()
    }

    pub(super) fn from_i64(value: i64) -> Decimal {
        Decimal::from(value)
    }

    pub(super) fn from_u64(value: u64) -> Decimal {
        Decimal::from(value)
    }

    pub(super) fn is_zero(value: &Decimal) -> bool {
        value.is_zero()
    }

    pub(super) fn is_negative(value: &Decimal) -> bool {
        value.sign() == Sign::Minus
    }

    pub(super) fn abs(value: &Decimal) -> Decimal {
        value.abs()
    }

    pub(super) fn to_plain_string(value: &Decimal) -> String {
        value.to_plain_string()
    }

    pub(super) fn shift(value: &Decimal, exponent: i32) -> Decimal {
        let (int, scale) = value.as_bigint_and_exponent();
        Decimal::new(int, scale - i64::from(exponent))
    }

    pub(super) fn round_to_scale(value: &Decimal, scale: i32, mode: Mode) -> Decimal {
        let mode = match mode {
            Mode::Down => RoundingMode::Down,
            Mode::HalfUp => RoundingMode::HalfUp,
            Mode::HalfEven => RoundingMode::HalfEven,
            Mode::Ceiling => RoundingMode::Ceiling,
            Mode::Floor => RoundingMode::Floor,
            Mode::HalfDown => RoundingMode::HalfDown,
            Mode::Up => RoundingMode::Up,
        };
        value.with_scale_round(i64::from(scale), mode)
    }
}

pub use backend::Decimal;

/// Parses a decimal string using the active backend.
///
/// Scientific notation is rejected so both backends share identical parsing
/// semantics; an optional leading `+` is accepted.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(['e', 'E']) {
        return None;
    }
    let normalized = trimmed.strip_prefix('+').unwrap_or(trimmed);
    backend::parse_decimal(normalized)
}

/// Returns the zero value for the active decimal backend.
#[must_use]
pub fn zero() -> Decimal {
    backend::zero()
}

/// Builds a decimal from a machine integer.
#[must_use]
pub fn from_i64(value: i64) -> Decimal {
    backend::from_i64(value)
}

/// Builds a decimal from an unsigned machine integer.
#[must_use]
pub fn from_u64(value: u64) -> Decimal {
    backend::from_u64(value)
}

/// Converts a finite double through its shortest round-trip decimal string.
#[must_use]
pub fn from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    backend::parse_decimal(&value.to_string())
}

/// True when the value equals zero (sign ignored).
#[must_use]
pub fn is_zero(value: &Decimal) -> bool {
    backend::is_zero(value)
}

/// True when the value carries a negative sign, including negative zero.
#[must_use]
pub fn is_negative(value: &Decimal) -> bool {
    backend::is_negative(value)
}

/// Returns the absolute value.
#[must_use]
pub fn abs(value: &Decimal) -> Decimal {
    backend::abs(value)
}

/// Renders the value in plain positional notation, never scientific.
#[must_use]
pub fn to_plain_string(value: &Decimal) -> String {
    backend::to_plain_string(value)
}

/// Multiplies by `10^exponent` without going through floating point.
#[must_use]
pub fn shift(value: &Decimal, exponent: i32) -> Decimal {
    backend::shift(value, exponent)
}

/// Rounds to `scale` fractional digits; a negative scale rounds integer
/// positions (`-2` rounds to hundreds).
#[must_use]
pub fn round_to_scale(value: &Decimal, scale: i32, mode: RoundingMode) -> Decimal {
    backend::round_to_scale(value, scale, mode)
}

/// The power of ten of the leading nonzero digit; zero values report 0.
#[must_use]
pub fn magnitude(value: &Decimal) -> i32 {
    let plain = to_plain_string(&abs(value));
    let (int_part, frac_part) = plain
        .split_once('.')
        .unwrap_or((plain.as_str(), ""));
    let significant = int_part.trim_start_matches('0');
    if !significant.is_empty() {
        return significant.len() as i32 - 1;
    }
    for (index, ch) in frac_part.chars().enumerate() {
        if ch != '0' {
            return -(index as i32) - 1;
        }
    }
    0
}
