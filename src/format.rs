//! The formatting entry point.

use crate::backend::NumberBackend;
use crate::compact;
use crate::engine::{self, Constraints};
use crate::error::FormatError;
use crate::number::Number;
use crate::options::{self, FormatOptions};
use crate::render;

/// Formats a numeric value against a backend's locale data.
///
/// The output is a pure function of the value, the options, and the
/// backend's data; the same inputs always produce the same string.
///
/// # Errors
/// Returns a [`FormatError`] when an option fails validation, a pattern
/// fails to compile, or the value cannot be represented by the decimal
/// backend. Formatting itself does not fail on valid inputs.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, err)
)]
pub fn format<N, B>(
    value: N,
    backend: &B,
    options: &FormatOptions<'_>,
) -> Result<String, FormatError>
where
    N: Into<Number>,
    B: NumberBackend + ?Sized,
{
    let value = value.into();
    let resolved = options::resolve(&value, backend, options)?;
    let wrapper = options.wrapper;

    if let Number::Float(raw) = &value {
        if raw.is_nan() {
            let text = resolved.symbols.nan.clone();
            let metadata = resolved.metadata.clone();
            return Ok(render::assemble_special(&text, &metadata, &resolved, wrapper));
        }
        if raw.is_infinite() {
            let text = resolved.symbols.infinity.clone();
            let metadata = resolved.metadata.clone();
            return Ok(render::assemble_special(&text, &metadata, &resolved, wrapper));
        }
    }

    let abs = value.to_abs_decimal()?;

    if let Some(style) = resolved.compact {
        return compact::format_compact(&abs, style, backend, &resolved, wrapper);
    }

    let metadata = resolved.metadata.clone();
    let sub = if resolved.negative {
        metadata.negative.as_ref().unwrap_or(&metadata.positive)
    } else {
        &metadata.positive
    };
    let constraints = Constraints {
        rounding_mode: resolved.rounding_mode,
        fractional_digits: resolved.fractional_digits,
        currency_digits: resolved
            .currency
            .as_ref()
            .filter(|_| metadata.has_currency())
            .map(|data| usize::from(data.effective_digits(resolved.currency_digits))),
        round_nearest: resolved.round_nearest.clone(),
        maximum_integer_digits: resolved.maximum_integer_digits,
    };

    let parts = engine::decompose(&abs, sub, &constraints);
    let plural = backend.plural_category(&resolved.locale, &parts.rounded);
    Ok(render::assemble(&parts, &metadata, &resolved, plural, wrapper))
}
