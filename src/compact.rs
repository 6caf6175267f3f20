//! Compact (short/long) decimal and currency formatting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::backend::{NumberBackend, PluralCategory};
use crate::decimal::{self, Decimal};
use crate::engine::{self, Constraints};
use crate::error::FormatError;
use crate::options::Resolved;
use crate::pattern::DecimalFormat;
use crate::render::{self, FormatPart};

/// The compact pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactStyle {
    /// `12K`
    DecimalShort,
    /// `12 thousand`
    DecimalLong,
    /// `$12K`
    CurrencyShort,
    /// `12 US dollars`
    CurrencyLong,
}

impl CompactStyle {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::DecimalShort => "decimal_short",
            Self::DecimalLong => "decimal_long",
            Self::CurrencyShort => "currency_short",
            Self::CurrencyLong => "currency_long",
        }
    }
}

/// Compact patterns for one magnitude bucket, keyed by plural category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactBucket {
    /// Power of ten the bucket starts at (3 for thousands).
    pub exponent: u32,
    /// Pattern per plural category; `other` is required, `"0"` means no
    /// compact transform at this magnitude.
    pub patterns: BTreeMap<PluralCategory, String>,
}

impl CompactBucket {
    fn pattern(&self, category: PluralCategory) -> Option<&str> {
        self.patterns
            .get(&category)
            .or_else(|| self.patterns.get(&PluralCategory::Other))
            .map(String::as_str)
    }
}

/// Compact pattern buckets for one `(locale, number system, style)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactDecimals {
    /// Buckets in ascending magnitude order.
    pub buckets: Vec<CompactBucket>,
}

impl CompactDecimals {
    fn bucket_for(&self, magnitude: i32) -> Option<&CompactBucket> {
        self.buckets
            .iter()
            .rev()
            .find(|bucket| i32::try_from(bucket.exponent).is_ok_and(|exp| exp <= magnitude))
    }
}

fn compact_constraints(resolved: &Resolved<'_>) -> Constraints {
    // Currency precision does not apply inside compact patterns; only an
    // explicit caller override changes the pattern's fraction digits.
    Constraints {
        rounding_mode: resolved.rounding_mode,
        fractional_digits: resolved.fractional_digits,
        currency_digits: None,
        round_nearest: None,
        maximum_integer_digits: resolved.maximum_integer_digits,
    }
}

pub(crate) fn format_compact<B: NumberBackend + ?Sized>(
    abs: &Decimal,
    style: CompactStyle,
    backend: &B,
    resolved: &Resolved<'_>,
    wrapper: Option<&dyn Fn(&str, FormatPart) -> String>,
) -> Result<String, FormatError> {
    if style == CompactStyle::CurrencyLong {
        return format_currency_long(abs, backend, resolved, wrapper);
    }

    let data = backend
        .compact_patterns(&resolved.locale, &resolved.system, style)
        .ok_or_else(|| FormatError::UnknownFormat {
            name: style.name().to_string(),
            locale: resolved.locale.clone(),
            system: resolved.system.clone(),
        })?;

    let constraints = compact_constraints(resolved);
    let magnitude = if decimal::is_zero(abs) {
        0
    } else {
        decimal::magnitude(abs)
    };

    let mut bucket = data.bucket_for(magnitude);
    for _ in 0..2 {
        let Some(current) = bucket else { break };
        let Some(reference) = current.pattern(PluralCategory::Other) else {
            break;
        };
        if reference == "0" {
            break;
        }

        let reference_meta = DecimalFormat::cached(reference)?;
        let shown_digits = reference_meta.positive.min_integer_digits.max(1);
        let divisor_exponent = (current.exponent as i32 + 1) - shown_digits as i32;
        let quotient = decimal::shift(abs, -divisor_exponent);
        let parts = engine::decompose(&quotient, &reference_meta.positive, &constraints);

        // Rounding can push the quotient into the next bucket (999 999 at
        // the thousands bucket rounds to 1000K); reselect once.
        if parts.integer.len() > shown_digits {
            let next = data.bucket_for(magnitude + 1);
            if next.map(|b| b.exponent) != bucket.map(|b| b.exponent) {
                bucket = next;
                continue;
            }
        }

        let plural = backend.plural_category(&resolved.locale, &parts.rounded);
        let chosen = current.pattern(plural).unwrap_or(reference);
        if chosen == "0" {
            break;
        }
        let metadata = DecimalFormat::cached(chosen)?;
        let parts = engine::decompose(&quotient, &metadata.positive, &constraints);
        return Ok(render::assemble(
            &parts, &metadata, resolved, plural, wrapper,
        ));
    }

    // Below the smallest bucket, or a "0" pattern: the standard format.
    let parts = engine::decompose(abs, effective_subpattern(resolved), &constraints);
    let plural = backend.plural_category(&resolved.locale, &parts.rounded);
    Ok(render::assemble(
        &parts,
        &resolved.metadata,
        resolved,
        plural,
        wrapper,
    ))
}

fn effective_subpattern<'r>(resolved: &'r Resolved<'_>) -> &'r crate::pattern::SubPattern {
    if resolved.negative && resolved.metadata.negative.is_some() {
        resolved
            .metadata
            .negative
            .as_ref()
            .unwrap_or(&resolved.metadata.positive)
    } else {
        &resolved.metadata.positive
    }
}

fn format_currency_long<B: NumberBackend + ?Sized>(
    abs: &Decimal,
    backend: &B,
    resolved: &Resolved<'_>,
    wrapper: Option<&dyn Fn(&str, FormatPart) -> String>,
) -> Result<String, FormatError> {
    let constraints = compact_constraints(resolved);
    let parts = engine::decompose(abs, effective_subpattern(resolved), &constraints);
    let plural = backend.plural_category(&resolved.locale, &parts.rounded);
    let mut out = render::assemble(&parts, &resolved.metadata, resolved, plural, wrapper);

    if let Some(data) = &resolved.currency {
        let name = data
            .display_names
            .get(&plural)
            .or_else(|| data.display_names.get(&PluralCategory::Other))
            .map_or_else(|| data.symbol_or_code().to_string(), Clone::clone);
        let space = " ";
        match wrapper {
            Some(wrapper) => {
                out.push_str(&wrapper(space, FormatPart::Literal));
                out.push_str(&wrapper(&name, FormatPart::Currency));
            }
            None => {
                out.push_str(space);
                out.push_str(&name);
            }
        }
    }
    Ok(out)
}
