mod common;

use cldr_numfmt::{
    CurrencyData, CurrencySpec, Format, FormatError, FormatOptions, NamedFormat, NumberSymbols,
    NumberSystem, format,
};

#[test]
fn unknown_locale_is_rejected() {
    let backend = common::backend();
    let options = FormatOptions {
        locale: Some("zz"),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::UnknownLocale { locale } if locale == "zz"
    ));
}

#[test]
fn unknown_number_system_is_rejected() {
    let backend = common::backend();
    let options = FormatOptions {
        number_system: NumberSystem::Named("arab".to_string()),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::UnknownNumberSystem { system, .. } if system == "arab"
    ));
}

#[test]
fn unknown_currency_is_rejected() {
    let backend = common::backend();
    let options = FormatOptions {
        currency: Some(CurrencySpec::Code("AAA".to_string())),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::UnknownCurrency { code } if code == "AAA"
    ));
}

#[test]
fn unknown_named_format_is_rejected() {
    let backend = common::backend();
    let options = FormatOptions {
        locale: Some("fr"),
        format: Some(Format::Named(NamedFormat::Scientific)),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::UnknownFormat { name, .. } if name == "scientific"
    ));
}

#[test]
fn currency_pattern_requires_a_currency() {
    let backend = common::backend();
    let options = FormatOptions {
        format: Some(Format::Pattern("¤0.00".to_string())),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::CurrencyRequired { .. }
    ));

    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::Currency)),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::CurrencyRequired { .. }
    ));

    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::CurrencyLong)),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::CurrencyRequired { .. }
    ));
}

#[test]
fn zero_round_nearest_is_invalid() {
    let backend = common::backend();
    let options = FormatOptions {
        round_nearest: Some(0),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1, &backend, &options).unwrap_err(),
        FormatError::InvalidOption {
            option: "round_nearest",
            ..
        }
    ));
}

#[test]
fn currency_presence_promotes_the_format() {
    let backend = common::backend();
    let options = FormatOptions {
        currency: Some(CurrencySpec::Code("USD".to_string())),
        ..FormatOptions::default()
    };
    assert_eq!(format(1234, &backend, &options).unwrap(), "$1,234.00");
}

#[test]
fn currency_from_locale_uses_the_territory_default() {
    let backend = common::backend();
    let options = FormatOptions {
        currency: Some(CurrencySpec::FromLocale),
        ..FormatOptions::default()
    };
    assert_eq!(format(1234, &backend, &options).unwrap(), "$1,234.00");

    // fr has no territory currency registered
    let options = FormatOptions {
        locale: Some("fr"),
        currency: Some(CurrencySpec::FromLocale),
        ..FormatOptions::default()
    };
    assert!(matches!(
        format(1234, &backend, &options).unwrap_err(),
        FormatError::UnknownCurrency { .. }
    ));
}

#[test]
fn explicit_currency_record_is_honored() {
    let backend = common::backend();
    let data = CurrencyData {
        code: "WIR".to_string(),
        symbol: Some("₩".to_string()),
        digits: 3,
        ..CurrencyData::default()
    };
    let options = FormatOptions {
        currency: Some(CurrencySpec::Data(data)),
        ..FormatOptions::default()
    };
    assert_eq!(format(1.5, &backend, &options).unwrap(), "₩1.500");
}

#[test]
fn iso_fallback_covers_unregistered_currencies() {
    let backend = common::backend();
    // GBP is not in the fixture data; ISO 4217 supplies the record.
    let options = FormatOptions {
        currency: Some(CurrencySpec::Code("GBP".to_string())),
        ..FormatOptions::default()
    };
    assert_eq!(format(5, &backend, &options).unwrap(), "£5.00");
}

#[test]
fn digital_token_codes_resolve_through_the_registry() {
    let backend = common::backend();
    let options = FormatOptions {
        currency: Some(CurrencySpec::Code("4H95J0R2X".to_string())),
        ..FormatOptions::default()
    };
    assert_eq!(format(1.5, &backend, &options).unwrap(), "BTC 1.50");
}

#[test]
fn no_symbol_formats_elide_the_placeholder() {
    let backend = common::backend();
    let options = FormatOptions {
        currency: Some(CurrencySpec::Code("USD".to_string())),
        format: Some(Format::Named(NamedFormat::CurrencyNoSymbol)),
        ..FormatOptions::default()
    };
    assert_eq!(format(1234, &backend, &options).unwrap(), "1,234.00");
}

#[test]
fn data_model_serde_round_trips() {
    let symbols = NumberSymbols::default();
    let json = serde_json::to_string(&symbols).unwrap();
    assert_eq!(serde_json::from_str::<NumberSymbols>(&json).unwrap(), symbols);

    let currency = CurrencyData {
        code: "USD".to_string(),
        symbol: Some("$".to_string()),
        ..CurrencyData::default()
    };
    let json = serde_json::to_string(&currency).unwrap();
    assert_eq!(serde_json::from_str::<CurrencyData>(&json).unwrap(), currency);
}
