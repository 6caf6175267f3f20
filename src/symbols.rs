//! Per-locale, per-number-system symbol tables.
//!
//! A number system contributes ten consecutive digit codepoints starting at
//! [`NumberSymbols::zero_digit`]; everything else is literal text substituted
//! for placeholder tokens during assembly.

use serde::{Deserialize, Serialize};

/// Symbol table for one `(locale, number system)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberSymbols {
    /// Codepoint of the localized zero digit; one through nine follow it.
    pub zero_digit: char,
    /// Separator between integer and fraction parts.
    pub decimal: String,
    /// Separator between integer digit groups.
    pub group: String,
    /// Exponent marker for scientific notation.
    pub exponential: String,
    /// Localized plus sign.
    pub plus_sign: String,
    /// Localized minus sign.
    pub minus_sign: String,
    /// Localized percent sign.
    pub percent_sign: String,
    /// Localized permille sign.
    pub permille_sign: String,
    /// String rendered for infinite doubles.
    pub infinity: String,
    /// String rendered for NaN doubles.
    pub nan: String,
    /// Decimal separator used inside currency formats, when it differs.
    pub currency_decimal: Option<String>,
    /// Group separator used inside currency formats, when it differs.
    pub currency_group: Option<String>,
    /// Spacing rules between a currency symbol and adjacent digits.
    pub currency_spacing: Option<CurrencySpacing>,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self {
            zero_digit: '0',
            decimal: ".".to_string(),
            group: ",".to_string(),
            exponential: "E".to_string(),
            plus_sign: "+".to_string(),
            minus_sign: "-".to_string(),
            percent_sign: "%".to_string(),
            permille_sign: "‰".to_string(),
            infinity: "∞".to_string(),
            nan: "NaN".to_string(),
            currency_decimal: None,
            currency_group: None,
            currency_spacing: None,
        }
    }
}

impl NumberSymbols {
    /// Maps an ASCII digit value (0–9) into the number system's digit set.
    #[must_use]
    pub fn map_digit(&self, digit: u8) -> char {
        debug_assert!(digit < 10);
        char::from_u32(self.zero_digit as u32 + u32::from(digit)).unwrap_or(self.zero_digit)
    }

    /// Decimal separator effective for the given context.
    #[must_use]
    pub fn decimal_for(&self, currency: bool) -> &str {
        if currency
            && let Some(sep) = &self.currency_decimal
        {
            return sep;
        }
        &self.decimal
    }

    /// Group separator effective for the given context.
    #[must_use]
    pub fn group_for(&self, currency: bool) -> &str {
        if currency
            && let Some(sep) = &self.currency_group
        {
            return sep;
        }
        &self.group
    }
}

/// Currency spacing rules: `before_currency` applies when the number precedes
/// the symbol (suffix position), `after_currency` when the symbol precedes the
/// number (prefix position).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySpacing {
    /// Rule at the number → symbol boundary.
    pub before_currency: SpacingRule,
    /// Rule at the symbol → number boundary.
    pub after_currency: SpacingRule,
}

/// A single currency spacing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingRule {
    /// Set the currency-side edge character must match.
    pub currency_match: String,
    /// Set the number-side edge character must match.
    pub surrounding_match: String,
    /// String inserted between the two when both sets match.
    pub insert_between: String,
}

impl Default for SpacingRule {
    fn default() -> Self {
        Self {
            currency_match: "[:^S:]".to_string(),
            surrounding_match: "[:digit:]".to_string(),
            insert_between: "\u{a0}".to_string(),
        }
    }
}

impl SpacingRule {
    /// Whether the rule fires for the given boundary characters.
    #[must_use]
    pub fn applies(&self, currency_edge: char, surrounding_edge: char) -> bool {
        class_matches(&self.currency_match, currency_edge)
            && class_matches(&self.surrounding_match, surrounding_edge)
    }
}

// Conservative reading of the two match sets CLDR ships: the digit set, and
// the non-symbol family which in practice gates on letters.
fn class_matches(set: &str, ch: char) -> bool {
    if set.contains("digit") {
        ch.is_numeric()
    } else if set.contains("^S") {
        ch.is_alphabetic()
    } else {
        false
    }
}
