//! The data-provider capability consumed by the engine.
//!
//! Locale data loading is an external concern; the formatter only requires
//! the lookups below. Implementations own their data and hand out references,
//! so a call borrows from the backend for its whole duration.

use serde::{Deserialize, Serialize};

use crate::compact::{CompactDecimals, CompactStyle};
use crate::currency::{CurrencyData, DigitalTokenData};
use crate::decimal::Decimal;
use crate::options::NamedFormat;
use crate::symbols::NumberSymbols;

/// Plural category selected by a locale's cardinal plural rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    /// The `zero` category.
    Zero,
    /// The `one` category.
    One,
    /// The `two` category.
    Two,
    /// The `few` category.
    Few,
    /// The `many` category.
    Many,
    /// The `other` category; every locale defines it.
    #[default]
    Other,
}

/// Which currency pattern family a locale prefers by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyFormatStyle {
    /// The plain currency pattern.
    #[default]
    Currency,
    /// The accounting pattern (negatives in parentheses).
    Accounting,
}

/// Locale-level data that is not tied to a single number system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleInfo {
    /// The number system used when the caller requests none.
    pub default_number_system: String,
    /// The locale's native number system, when it differs from the default.
    pub native_number_system: Option<String>,
    /// Pattern family used when a currency is formatted without an explicit
    /// format choice.
    pub default_currency_format: CurrencyFormatStyle,
    /// Currency of the locale's territory, for `currency: from_locale`.
    pub default_currency: Option<String>,
    /// Minimum integer digits beyond the primary group size before group
    /// separators are inserted.
    pub minimum_grouping_digits: u8,
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self {
            default_number_system: "latn".to_string(),
            native_number_system: None,
            default_currency_format: CurrencyFormatStyle::Currency,
            default_currency: None,
            minimum_grouping_digits: 1,
        }
    }
}

/// Locale data lookups required by the formatter.
pub trait NumberBackend {
    /// The locale used when the caller supplies none.
    fn default_locale(&self) -> &str;

    /// Locale-level data, or `None` for locales this backend does not know.
    fn locale(&self, tag: &str) -> Option<&LocaleInfo>;

    /// Symbol table for a `(locale, number system)` pair.
    fn symbols(&self, locale: &str, system: &str) -> Option<&NumberSymbols>;

    /// Pattern string for a named format in a `(locale, number system)` pair.
    fn pattern(&self, locale: &str, system: &str, format: NamedFormat) -> Option<&str>;

    /// Locale-scoped currency record for an ISO 4217 code.
    fn currency(&self, locale: &str, code: &str) -> Option<&CurrencyData>;

    /// Digital-token registry record for a token code. Backends without
    /// token data keep the default.
    fn digital_token(&self, code: &str) -> Option<&DigitalTokenData> {
        let _ = code;
        None
    }

    /// Compact pattern buckets for a style in a `(locale, number system)`
    /// pair.
    fn compact_patterns(
        &self,
        locale: &str,
        system: &str,
        style: CompactStyle,
    ) -> Option<&CompactDecimals>;

    /// Evaluates the locale's cardinal plural rules for a value.
    fn plural_category(&self, locale: &str, value: &Decimal) -> PluralCategory;
}
