//! Currency records and the `¤` placeholder binder.

use std::collections::BTreeMap;

use iso_currency::Currency as IsoCurrency;
use serde::{Deserialize, Serialize};

use crate::backend::PluralCategory;
use crate::decimal::{self, Decimal};

/// Which fraction-digit and rounding data of a currency record applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDigits {
    /// Accounting precision (the ISO 4217 minor units).
    #[default]
    Accounting,
    /// Cash precision, for currencies whose smallest tendered coin differs.
    Cash,
    /// ISO precision; same digit data as accounting.
    Iso,
}

/// How the `¤` placeholder is expanded, when the caller overrides the
/// placeholder-count ladder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CurrencySymbol {
    /// Follow the pattern's placeholder count.
    #[default]
    Default,
    /// The currency's standard symbol.
    Standard,
    /// The ISO 4217 code.
    Iso,
    /// The narrow symbol.
    Narrow,
    /// Alias of [`CurrencySymbol::Standard`].
    Symbol,
    /// A caller-supplied literal.
    Explicit(String),
}

/// Locale-scoped currency display and precision data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyData {
    /// ISO 4217 three-letter code.
    pub code: String,
    /// Standard symbol; the code is used when absent.
    pub symbol: Option<String>,
    /// Narrow symbol variant.
    pub narrow_symbol: Option<String>,
    /// Long display name keyed by plural category.
    pub display_names: BTreeMap<PluralCategory, String>,
    /// Fraction digits for accounting contexts.
    pub digits: u8,
    /// Fraction digits for cash contexts, when they differ.
    pub cash_digits: Option<u8>,
    /// Accounting rounding increment in minor units; 0 means none.
    pub rounding: u32,
    /// Cash rounding increment in minor units, when it differs.
    pub cash_rounding: Option<u32>,
}

impl Default for CurrencyData {
    fn default() -> Self {
        Self {
            code: String::new(),
            symbol: None,
            narrow_symbol: None,
            display_names: BTreeMap::new(),
            digits: 2,
            cash_digits: None,
            rounding: 0,
            cash_rounding: None,
        }
    }
}

impl CurrencyData {
    /// Builds a record from ISO 4217 data, for currencies the backend has no
    /// locale record for.
    #[must_use]
    pub fn from_iso(iso: IsoCurrency) -> Self {
        let mut display_names = BTreeMap::new();
        display_names.insert(PluralCategory::Other, iso.name().to_string());
        Self {
            code: iso.code().to_string(),
            symbol: Some(iso.symbol().to_string()),
            narrow_symbol: None,
            display_names,
            digits: iso
                .exponent()
                .and_then(|e| u8::try_from(e).ok())
                .unwrap_or(2),
            cash_digits: None,
            rounding: 0,
            cash_rounding: None,
        }
    }

    /// Builds a record from a digital-token registry entry.
    #[must_use]
    pub fn from_token(token: &DigitalTokenData) -> Self {
        let short_name = token.short_names.first().cloned();
        let mut display_names = BTreeMap::new();
        if let Some(name) = &short_name {
            display_names.insert(PluralCategory::Other, name.clone());
        }
        Self {
            code: token.code.clone(),
            symbol: short_name.clone(),
            narrow_symbol: short_name,
            display_names,
            ..Self::default()
        }
    }

    /// Standard symbol, falling back to the code.
    #[must_use]
    pub fn symbol_or_code(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.code)
    }

    /// Fraction digits effective under the given precision choice.
    #[must_use]
    pub fn effective_digits(&self, digits: CurrencyDigits) -> u8 {
        match digits {
            CurrencyDigits::Accounting | CurrencyDigits::Iso => self.digits,
            CurrencyDigits::Cash => self.cash_digits.unwrap_or(self.digits),
        }
    }

    /// Rounding increment effective under the given precision choice, as a
    /// decimal in major units.
    #[must_use]
    pub fn rounding_increment(&self, digits: CurrencyDigits) -> Option<Decimal> {
        let (minor, scale) = match digits {
            CurrencyDigits::Accounting | CurrencyDigits::Iso => (self.rounding, self.digits),
            CurrencyDigits::Cash => (
                self.cash_rounding.unwrap_or(self.rounding),
                self.effective_digits(CurrencyDigits::Cash),
            ),
        };
        if minor == 0 {
            return None;
        }
        let increment = decimal::from_i64(i64::from(minor));
        Some(decimal::shift(&increment, -i32::from(scale)))
    }

    /// Expands a `¤` placeholder run of the given length.
    ///
    /// The ladder is 1 = symbol, 2 = ISO code, 3 = plural display name,
    /// 4 = narrow symbol, each falling back down the ladder when data is
    /// missing. A non-default `selection` takes precedence over the count.
    #[must_use]
    pub fn expand_placeholder(
        &self,
        count: u8,
        selection: &CurrencySymbol,
        plural: PluralCategory,
    ) -> String {
        match selection {
            CurrencySymbol::Explicit(text) => text.clone(),
            CurrencySymbol::Standard | CurrencySymbol::Symbol => self.symbol_or_code().to_string(),
            CurrencySymbol::Iso => self.code.clone(),
            CurrencySymbol::Narrow => self
                .narrow_symbol
                .as_deref()
                .unwrap_or(self.symbol_or_code())
                .to_string(),
            CurrencySymbol::Default => match count {
                2 => self.code.clone(),
                3 => self
                    .display_names
                    .get(&plural)
                    .or_else(|| self.display_names.get(&PluralCategory::Other))
                    .cloned()
                    .unwrap_or_else(|| self.symbol_or_code().to_string()),
                4 => self
                    .narrow_symbol
                    .as_deref()
                    .unwrap_or(self.symbol_or_code())
                    .to_string(),
                _ => self.symbol_or_code().to_string(),
            },
        }
    }
}

/// A digital-token registry record (DTIF), resolved by token code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalTokenData {
    /// Registry token code.
    pub code: String,
    /// Registered short names, preferred first.
    pub short_names: Vec<String>,
}
