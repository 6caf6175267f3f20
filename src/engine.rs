//! Digit engine: rounding, exponent selection, digit-array emission.
//!
//! Works on absolute values; the sign decides the sub-pattern upstream and
//! never reaches this module.

use crate::decimal::{self, Decimal, RoundingMode};
use crate::pattern::SubPattern;

/// Per-call rounding and digit constraints resolved from caller options and
/// currency data.
#[derive(Debug, Clone, Default)]
pub(crate) struct Constraints {
    pub rounding_mode: RoundingMode,
    /// Caller override; wins over everything and clears significant digits.
    pub fractional_digits: Option<usize>,
    /// Fraction digits from the bound currency.
    pub currency_digits: Option<usize>,
    /// Rounding increment in major units, from the caller or the currency.
    pub round_nearest: Option<Decimal>,
    /// Caller cap on integer digits; excess digits drop on the left.
    pub maximum_integer_digits: Option<usize>,
}

/// Digit arrays ready for assembly. Digits are values 0–9, most significant
/// first.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumberParts {
    pub integer: Vec<u8>,
    pub fraction: Vec<u8>,
    pub exponent: Option<i32>,
    /// The rounded absolute value, for plural-rule evaluation.
    pub rounded: Decimal,
}

pub(crate) fn decompose(value: &Decimal, sub: &SubPattern, bounds: &Constraints) -> NumberParts {
    let mut value = value.clone();
    let multiplier = sub.multiplier();
    if multiplier > 1 {
        value = value * decimal::from_i64(i64::from(multiplier));
    }

    let mut min_frac = sub.min_fraction_digits;
    let mut max_frac = sub.max_fraction_digits;
    let mut significant = sub
        .uses_significant_digits()
        .then_some((sub.min_significant_digits, sub.max_significant_digits));
    if let Some(digits) = bounds.fractional_digits {
        min_frac = digits;
        max_frac = digits;
        significant = None;
    } else if let Some(digits) = bounds.currency_digits {
        min_frac = digits;
        max_frac = digits;
    }

    let scientific = sub.exponent_digits > 0;
    // A scientific pattern with no required integer or fraction digits shows
    // every significant digit of the value.
    let unlimited = scientific
        && sub.min_integer_digits == 0
        && max_frac == 0
        && significant.is_none()
        && bounds.fractional_digits.is_none()
        && bounds.currency_digits.is_none();

    let mut exponent = 0i32;
    if scientific {
        exponent = select_exponent(&value, sub);
        value = decimal::shift(&value, -exponent);
    }

    let increment = bounds
        .round_nearest
        .clone()
        .or_else(|| sub.rounding_increment.clone())
        .filter(|increment| !decimal::is_zero(increment));
    if let Some(increment) = increment {
        value = round_increment(&value, &increment, bounds.rounding_mode);
        if !unlimited && significant.is_none() {
            value = decimal::round_to_scale(&value, max_frac as i32, bounds.rounding_mode);
        }
    } else if let Some((_, max_sig)) = significant {
        if !decimal::is_zero(&value) {
            let mag = decimal::magnitude(&value);
            value = decimal::round_to_scale(&value, max_sig as i32 - mag - 1, bounds.rounding_mode);
        }
    } else if !unlimited {
        value = decimal::round_to_scale(&value, max_frac as i32, bounds.rounding_mode);
    }

    if scientific {
        // Rounding can carry past the chosen window (9.99 → 10); recompute
        // the exponent against the rounded value once.
        let total = decimal::shift(&value, exponent);
        let adjusted = select_exponent(&total, sub);
        if adjusted != exponent {
            exponent = adjusted;
            value = decimal::shift(&total, -exponent);
        }
    }

    let plain = decimal::to_plain_string(&value);
    let (int_text, frac_text) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    let mut integer: Vec<u8> = int_text
        .trim_start_matches('0')
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|byte| byte - b'0')
        .collect();
    let mut fraction: Vec<u8> = frac_text
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|byte| byte - b'0')
        .collect();

    if let Some((min_sig, max_sig)) = significant {
        let (floor_len, ceil_len) = if !integer.is_empty() {
            (
                min_sig.saturating_sub(integer.len()),
                max_sig.saturating_sub(integer.len()),
            )
        } else if fraction.iter().any(|digit| *digit != 0) {
            let leading = fraction.iter().take_while(|digit| **digit == 0).count();
            (leading + min_sig, leading + max_sig)
        } else {
            // Zero: the displayed integer zero carries the first significant
            // position.
            (min_sig.saturating_sub(1), max_sig.saturating_sub(1))
        };
        while fraction.len() > floor_len && fraction.last() == Some(&0) {
            fraction.pop();
        }
        if fraction.len() > ceil_len {
            fraction.truncate(ceil_len);
        }
        while fraction.len() < floor_len {
            fraction.push(0);
        }
    } else {
        let cap = if unlimited { usize::MAX } else { max_frac };
        while fraction.len() > min_frac && fraction.last() == Some(&0) {
            fraction.pop();
        }
        if fraction.len() > cap {
            fraction.truncate(cap);
        }
        while fraction.len() < min_frac {
            fraction.push(0);
        }
    }

    while integer.len() < sub.min_integer_digits {
        integer.insert(0, 0);
    }
    if integer.is_empty() {
        integer.push(0);
    }
    if let Some(cap) = bounds.maximum_integer_digits
        && integer.len() > cap
    {
        let excess = integer.len() - cap;
        integer.drain(..excess);
        if integer.is_empty() {
            integer.push(0);
        }
    }

    NumberParts {
        integer,
        fraction,
        exponent: scientific.then_some(exponent),
        rounded: value,
    }
}

fn select_exponent(value: &Decimal, sub: &SubPattern) -> i32 {
    let mag = if decimal::is_zero(value) {
        0
    } else {
        decimal::magnitude(value)
    };
    let max_int = sub.max_integer_digits.unwrap_or(1).max(1) as i32;
    let min_int = sub.min_integer_digits as i32;
    if max_int > 1 && max_int > min_int {
        // Engineering grouping: exponent is a multiple of the placeholder
        // count.
        mag.div_euclid(max_int) * max_int
    } else {
        mag - (min_int.max(1) - 1)
    }
}

fn round_increment(value: &Decimal, increment: &Decimal, mode: RoundingMode) -> Decimal {
    let quotient = value.clone() / increment.clone();
    let quotient = decimal::round_to_scale(&quotient, 0, mode);
    quotient * increment.clone()
}
