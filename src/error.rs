//! Error types shared across the crate.

use thiserror::Error;

/// Errors emitted while resolving options, compiling patterns, or formatting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Occurs when a number format pattern fails to compile.
    #[error("syntax error ({reason}) before: \"{remaining}\"")]
    Compile {
        /// Short description of the grammar rule that was violated.
        reason: &'static str,
        /// The unconsumed tail of the pattern at the point of failure.
        remaining: String,
    },
    /// Occurs when a currency format is requested without a currency.
    #[error("currency format {pattern:?} requires that a currency be specified")]
    CurrencyRequired {
        /// The pattern that contains a currency placeholder.
        pattern: String,
    },
    /// Occurs when a named format is not defined for a locale and number system.
    #[error("format {name:?} is not defined for locale {locale:?} and number system {system:?}")]
    UnknownFormat {
        /// The requested format name.
        name: String,
        /// The locale the lookup ran against.
        locale: String,
        /// The number system the lookup ran against.
        system: String,
    },
    /// Occurs when the requested locale is not known to the backend.
    #[error("unknown locale: {locale:?}")]
    UnknownLocale {
        /// The requested locale tag.
        locale: String,
    },
    /// Occurs when the requested number system has no symbol data for the locale.
    #[error("unknown number system {system:?} for locale {locale:?}")]
    UnknownNumberSystem {
        /// The requested number system name.
        system: String,
        /// The locale the lookup ran against.
        locale: String,
    },
    /// Occurs when a currency or digital-token code cannot be resolved.
    #[error("unknown currency: {code:?}")]
    UnknownCurrency {
        /// The offending code.
        code: String,
    },
    /// Occurs when an option value is out of range or not a recognized choice.
    #[error("invalid value for option {option}: {value}")]
    InvalidOption {
        /// The option key.
        option: &'static str,
        /// The offending value, rendered for display.
        value: String,
    },
    /// Occurs when a value cannot be represented by the active decimal backend.
    #[error("value cannot be represented by the decimal backend")]
    UnrepresentableValue,
}
