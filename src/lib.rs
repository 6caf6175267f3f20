//! Locale-aware number, currency, and compact formatting after the CLDR
//! number format rules (TR35 §3).
//!
//! The crate compiles decimal format patterns such as `"¤#,##0.00"` into
//! reusable metadata, resolves caller options against locale data supplied
//! by a [`NumberBackend`], and renders integers, doubles, and backend
//! decimals into localized strings under rounding, grouping, padding,
//! scientific, significant-digit, and currency rules.
//!
//! Formatting is purely functional: calls share nothing but an internal
//! pattern-metadata cache, so the engine is safe under parallel use.
//!
//! # Feature flags
//! - `rust-decimal` (default): back [`Decimal`] with `rust_decimal`
//! - `bigdecimal`: back [`Decimal`] with `bigdecimal` (mutually exclusive)
//! - `tracing`: instrument the entry points

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Locale data provider capability and locale-level data types.
pub mod backend;
/// Compact (short/long) formatting data and styles.
pub mod compact;
/// Currency records, digital tokens, and placeholder expansion.
pub mod currency;
/// Decimal backend abstraction and rounding modes.
pub mod decimal;
mod engine;
/// Error definitions.
pub mod error;
mod format;
mod number;
/// Caller options and named formats.
pub mod options;
/// Pattern compiler and compiled metadata.
pub mod pattern;
mod render;
/// Symbol tables and currency spacing rules.
pub mod symbols;

pub use backend::{CurrencyFormatStyle, LocaleInfo, NumberBackend, PluralCategory};
pub use compact::{CompactBucket, CompactDecimals, CompactStyle};
pub use currency::{CurrencyData, CurrencyDigits, CurrencySymbol, DigitalTokenData};
pub use decimal::{Decimal, RoundingMode};
pub use error::FormatError;
pub use format::format;
pub use number::Number;
pub use options::{CurrencySpec, Format, FormatOptions, NamedFormat, NumberSystem};
pub use pattern::{AffixToken, DecimalFormat, PadPosition, Padding, SubPattern};
pub use render::FormatPart;
pub use symbols::{CurrencySpacing, NumberSymbols, SpacingRule};
