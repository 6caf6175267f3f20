//! Caller options and their resolution against locale data.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use iso_currency::Currency as IsoCurrency;

use crate::backend::{CurrencyFormatStyle, NumberBackend, PluralCategory};
use crate::compact::CompactStyle;
use crate::currency::{CurrencyData, CurrencyDigits, CurrencySymbol};
use crate::decimal::{self, Decimal, RoundingMode};
use crate::error::FormatError;
use crate::number::Number;
use crate::pattern::DecimalFormat;
use crate::render::FormatPart;
use crate::symbols::NumberSymbols;

/// Format names resolvable through a backend's pattern tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedFormat {
    /// The locale's standard decimal pattern.
    Standard,
    /// The locale's currency pattern.
    Currency,
    /// The locale's accounting pattern.
    Accounting,
    /// The locale's percent pattern.
    Percent,
    /// The locale's scientific pattern.
    Scientific,
    /// Currency pattern with the symbol elided.
    CurrencyNoSymbol,
    /// Accounting pattern with the symbol elided.
    AccountingNoSymbol,
    /// Currency pattern variant used when a lettered symbol touches digits.
    CurrencyAlphaNextToNumber,
    /// Accounting pattern variant used when a lettered symbol touches digits.
    AccountingAlphaNextToNumber,
    /// Compact decimal, short form (`12K`).
    DecimalShort,
    /// Compact decimal, long form (`12 thousand`).
    DecimalLong,
    /// Compact currency, short form (`$12K`).
    CurrencyShort,
    /// Long-form currency with a pluralized display name (`12 US dollars`).
    CurrencyLong,
    /// Alias resolved to [`NamedFormat::DecimalShort`] or
    /// [`NamedFormat::CurrencyShort`] depending on currency presence.
    Short,
    /// Alias resolved to [`NamedFormat::DecimalLong`] or
    /// [`NamedFormat::CurrencyLong`] depending on currency presence.
    Long,
}

impl NamedFormat {
    /// Canonical snake-case name, as used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Currency => "currency",
            Self::Accounting => "accounting",
            Self::Percent => "percent",
            Self::Scientific => "scientific",
            Self::CurrencyNoSymbol => "currency_no_symbol",
            Self::AccountingNoSymbol => "accounting_no_symbol",
            Self::CurrencyAlphaNextToNumber => "currency_alpha_next_to_number",
            Self::AccountingAlphaNextToNumber => "accounting_alpha_next_to_number",
            Self::DecimalShort => "decimal_short",
            Self::DecimalLong => "decimal_long",
            Self::CurrencyShort => "currency_short",
            Self::CurrencyLong => "currency_long",
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

/// Where the effective pattern comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// A named entry in the locale's pattern tables.
    Named(NamedFormat),
    /// A literal pattern string.
    Pattern(String),
}

/// How the caller identifies the currency to bind.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencySpec {
    /// An ISO 4217 or digital-token code.
    Code(String),
    /// A fully specified currency record.
    Data(CurrencyData),
    /// The default currency of the locale's territory.
    FromLocale,
}

/// How the caller identifies the number system.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NumberSystem {
    /// The locale's default system.
    #[default]
    Default,
    /// The locale's native system, falling back to the default.
    Native,
    /// A system by name, e.g. `latn` or `thai`.
    Named(String),
}

/// Caller-facing formatting options. Every field defaults to "inherit from
/// the locale or the pattern".
#[derive(Default)]
pub struct FormatOptions<'a> {
    /// Pattern source; inferred from other options when absent.
    pub format: Option<Format>,
    /// Locale tag; the backend default when absent.
    pub locale: Option<&'a str>,
    /// Number system within the locale.
    pub number_system: NumberSystem,
    /// Currency to bind; also promotes the default format to currency.
    pub currency: Option<CurrencySpec>,
    /// Which currency precision data applies.
    pub currency_digits: Option<CurrencyDigits>,
    /// Deprecated alias: `true` behaves as cash precision.
    pub cash: Option<bool>,
    /// Overrides the `¤` placeholder expansion.
    pub currency_symbol: CurrencySymbol,
    /// Display rounding mode.
    pub rounding_mode: Option<RoundingMode>,
    /// Overrides the pattern's fraction digit bounds.
    pub fractional_digits: Option<u32>,
    /// Drops integer digits beyond this count, most significant first.
    pub maximum_integer_digits: Option<u32>,
    /// Snaps the value to a multiple of this integer.
    pub round_nearest: Option<u64>,
    /// Replaces the locale's grouping threshold addend.
    pub minimum_grouping_digits: Option<u32>,
    /// Receives each emitted component for decoration.
    pub wrapper: Option<&'a dyn Fn(&str, FormatPart) -> String>,
}

impl fmt::Debug for FormatOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOptions")
            .field("format", &self.format)
            .field("locale", &self.locale)
            .field("number_system", &self.number_system)
            .field("currency", &self.currency)
            .field("currency_digits", &self.currency_digits)
            .field("cash", &self.cash)
            .field("currency_symbol", &self.currency_symbol)
            .field("rounding_mode", &self.rounding_mode)
            .field("fractional_digits", &self.fractional_digits)
            .field("maximum_integer_digits", &self.maximum_integer_digits)
            .field("round_nearest", &self.round_nearest)
            .field("minimum_grouping_digits", &self.minimum_grouping_digits)
            .field("wrapper", &self.wrapper.map(|_| "…"))
            .finish()
    }
}

/// Fully resolved per-call state handed to the digit engine and assembler.
pub(crate) struct Resolved<'a> {
    pub locale: String,
    pub system: String,
    pub symbols: &'a NumberSymbols,
    pub pattern: String,
    pub metadata: Arc<DecimalFormat>,
    pub compact: Option<CompactStyle>,
    pub currency: Option<Cow<'a, CurrencyData>>,
    pub currency_digits: CurrencyDigits,
    pub currency_symbol: CurrencySymbol,
    pub currency_spacing: bool,
    pub rounding_mode: RoundingMode,
    pub fractional_digits: Option<usize>,
    pub maximum_integer_digits: Option<usize>,
    pub round_nearest: Option<Decimal>,
    pub minimum_grouping: usize,
    pub negative: bool,
}

pub(crate) fn resolve<'a, B: NumberBackend + ?Sized>(
    value: &Number,
    backend: &'a B,
    options: &FormatOptions<'_>,
) -> Result<Resolved<'a>, FormatError> {
    let locale = options
        .locale
        .unwrap_or_else(|| backend.default_locale())
        .to_string();
    let info = backend
        .locale(&locale)
        .ok_or_else(|| FormatError::UnknownLocale {
            locale: locale.clone(),
        })?;

    let system = match &options.number_system {
        NumberSystem::Default => info.default_number_system.clone(),
        NumberSystem::Native => info
            .native_number_system
            .clone()
            .unwrap_or_else(|| info.default_number_system.clone()),
        NumberSystem::Named(name) => name.clone(),
    };
    let symbols =
        backend
            .symbols(&locale, &system)
            .ok_or_else(|| FormatError::UnknownNumberSystem {
                system: system.clone(),
                locale: locale.clone(),
            })?;

    let currency: Option<Cow<'a, CurrencyData>> = match &options.currency {
        None => None,
        Some(CurrencySpec::Data(data)) => Some(Cow::Owned(data.clone())),
        Some(CurrencySpec::Code(code)) => Some(resolve_currency(backend, &locale, code)?),
        Some(CurrencySpec::FromLocale) => {
            let code =
                info.default_currency
                    .clone()
                    .ok_or_else(|| FormatError::UnknownCurrency {
                        code: format!("from_locale ({locale})"),
                    })?;
            Some(resolve_currency(backend, &locale, &code)?)
        }
    };

    let currency_digits = if options.cash == Some(true) {
        CurrencyDigits::Cash
    } else {
        options.currency_digits.unwrap_or_default()
    };

    // Infer the format, then resolve the short/long aliases.
    let format = options.format.clone().unwrap_or_else(|| {
        if currency.is_some() {
            Format::Named(match info.default_currency_format {
                CurrencyFormatStyle::Currency => NamedFormat::Currency,
                CurrencyFormatStyle::Accounting => NamedFormat::Accounting,
            })
        } else {
            Format::Named(NamedFormat::Standard)
        }
    });
    let format = match format {
        Format::Named(NamedFormat::Short) => Format::Named(if currency.is_some() {
            NamedFormat::CurrencyShort
        } else {
            NamedFormat::DecimalShort
        }),
        Format::Named(NamedFormat::Long) => Format::Named(if currency.is_some() {
            NamedFormat::CurrencyLong
        } else {
            NamedFormat::DecimalLong
        }),
        other => other,
    };

    let compact = match format {
        Format::Named(NamedFormat::DecimalShort) => Some(CompactStyle::DecimalShort),
        Format::Named(NamedFormat::DecimalLong) => Some(CompactStyle::DecimalLong),
        Format::Named(NamedFormat::CurrencyShort) => Some(CompactStyle::CurrencyShort),
        Format::Named(NamedFormat::CurrencyLong) => Some(CompactStyle::CurrencyLong),
        _ => None,
    };
    if matches!(
        compact,
        Some(CompactStyle::CurrencyShort | CompactStyle::CurrencyLong)
    ) && currency.is_none()
    {
        return Err(FormatError::CurrencyRequired {
            pattern: match &format {
                Format::Named(name) => name.name().to_string(),
                Format::Pattern(pattern) => pattern.clone(),
            },
        });
    }

    let mut pattern: String = match &format {
        Format::Pattern(pattern) => pattern.clone(),
        Format::Named(name) => {
            // Compact styles format through a per-bucket pattern; the base
            // pattern here is the fallback for small magnitudes.
            let lookup = match name {
                NamedFormat::DecimalShort
                | NamedFormat::DecimalLong
                | NamedFormat::CurrencyLong => NamedFormat::Standard,
                NamedFormat::CurrencyShort => NamedFormat::Currency,
                other => *other,
            };
            backend
                .pattern(&locale, &system, lookup)
                .ok_or_else(|| FormatError::UnknownFormat {
                    name: name.name().to_string(),
                    locale: locale.clone(),
                    system: system.clone(),
                })?
                .to_string()
        }
    };
    let mut metadata = DecimalFormat::cached(&pattern)?;

    if metadata.has_currency() && currency.is_none() {
        return Err(FormatError::CurrencyRequired { pattern });
    }

    // A lettered symbol directly against the digits switches to the
    // alpha-next-to-number pattern variant and suppresses currency spacing.
    let mut currency_spacing = true;
    if let Some(data) = &currency
        && let Format::Named(name @ (NamedFormat::Currency | NamedFormat::Accounting)) = &format
    {
        let symbol = data.expand_placeholder(
            metadata.positive.currency_placeholder_count,
            &options.currency_symbol,
            PluralCategory::Other,
        );
        // Only the symbol edge that faces the digits matters: the end of a
        // prefix symbol, the start of a suffix symbol.
        let lettered_adjacent = |sub: &crate::pattern::SubPattern| {
            (matches!(sub.prefix.last(), Some(crate::pattern::AffixToken::Currency(_)))
                && symbol.chars().last().is_some_and(char::is_alphabetic))
                || (matches!(sub.suffix.first(), Some(crate::pattern::AffixToken::Currency(_)))
                    && symbol.chars().next().is_some_and(char::is_alphabetic))
        };
        let should_switch = lettered_adjacent(&metadata.positive)
            || metadata.negative.as_ref().is_some_and(|sub| lettered_adjacent(sub));
        if should_switch {
            let variant = match name {
                NamedFormat::Currency => NamedFormat::CurrencyAlphaNextToNumber,
                _ => NamedFormat::AccountingAlphaNextToNumber,
            };
            if let Some(alpha) = backend.pattern(&locale, &system, variant) {
                pattern = alpha.to_string();
                metadata = DecimalFormat::cached(&pattern)?;
                currency_spacing = false;
            }
        }
    }

    if options.round_nearest == Some(0) {
        return Err(FormatError::InvalidOption {
            option: "round_nearest",
            value: "0".to_string(),
        });
    }
    let round_nearest = options
        .round_nearest
        .map(|nearest| decimal::from_u64(nearest))
        .or_else(|| {
            currency
                .as_ref()
                .filter(|_| metadata.has_currency())
                .and_then(|data| data.rounding_increment(currency_digits))
        });

    let minimum_grouping = options
        .minimum_grouping_digits
        .map_or(usize::from(info.minimum_grouping_digits), |digits| {
            digits as usize
        });

    Ok(Resolved {
        locale,
        system,
        symbols,
        pattern,
        metadata,
        compact,
        currency,
        currency_digits,
        currency_symbol: options.currency_symbol.clone(),
        currency_spacing,
        rounding_mode: options.rounding_mode.unwrap_or_default(),
        fractional_digits: options.fractional_digits.map(|digits| digits as usize),
        maximum_integer_digits: options.maximum_integer_digits.map(|digits| digits as usize),
        round_nearest,
        minimum_grouping,
        negative: value.is_negative(),
    })
}

fn resolve_currency<'a, B: NumberBackend + ?Sized>(
    backend: &'a B,
    locale: &str,
    code: &str,
) -> Result<Cow<'a, CurrencyData>, FormatError> {
    let trimmed = code.trim();
    let upper = trimmed.to_ascii_uppercase();
    if let Some(data) = backend.currency(locale, &upper) {
        return Ok(Cow::Borrowed(data));
    }
    if let Some(token) = backend.digital_token(trimmed) {
        return Ok(Cow::Owned(CurrencyData::from_token(token)));
    }
    if let Some(iso) = IsoCurrency::from_code(&upper) {
        return Ok(Cow::Owned(CurrencyData::from_iso(iso)));
    }
    Err(FormatError::UnknownCurrency {
        code: trimmed.to_string(),
    })
}
