mod common;

use cldr_numfmt::{CurrencySpec, Format, FormatOptions, NamedFormat, format};

fn short<'a>() -> FormatOptions<'a> {
    FormatOptions {
        format: Some(Format::Named(NamedFormat::Short)),
        ..FormatOptions::default()
    }
}

#[test]
fn short_decimal_buckets() {
    let backend = common::backend();
    assert_eq!(format(1234, &backend, &short()).unwrap(), "1K");
    assert_eq!(format(12345, &backend, &short()).unwrap(), "12K");
    assert_eq!(format(123456, &backend, &short()).unwrap(), "123K");
    assert_eq!(format(1234567, &backend, &short()).unwrap(), "1M");
    assert_eq!(format(12345678901i64, &backend, &short()).unwrap(), "12B");
}

#[test]
fn short_falls_back_below_the_smallest_bucket() {
    let backend = common::backend();
    assert_eq!(format(123, &backend, &short()).unwrap(), "123");
    assert_eq!(format(0, &backend, &short()).unwrap(), "0");
}

#[test]
fn rounding_can_promote_to_the_next_bucket() {
    let backend = common::backend();
    assert_eq!(format(999_999, &backend, &short()).unwrap(), "1M");
}

#[test]
fn long_decimal_names() {
    let backend = common::backend();
    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::Long)),
        ..FormatOptions::default()
    };
    assert_eq!(format(12345, &backend, &options).unwrap(), "12 thousand");
    assert_eq!(format(1234567, &backend, &options).unwrap(), "1 million");
}

#[test]
fn short_with_currency_uses_currency_buckets() {
    let backend = common::backend();
    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::Short)),
        currency: Some(CurrencySpec::Code("USD".to_string())),
        ..FormatOptions::default()
    };
    assert_eq!(format(12345, &backend, &options).unwrap(), "$12K");
}

#[test]
fn currency_long_appends_the_plural_name() {
    let backend = common::backend();
    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::CurrencyLong)),
        currency: Some(CurrencySpec::Code("USD".to_string())),
        ..FormatOptions::default()
    };
    assert_eq!(format(1234, &backend, &options).unwrap(), "1,234 US dollars");
    assert_eq!(format(1, &backend, &options).unwrap(), "1 US dollar");
}

#[test]
fn negative_compact_values_keep_the_sign() {
    let backend = common::backend();
    assert_eq!(format(-12345, &backend, &short()).unwrap(), "-12K");
}

#[test]
fn explicit_compact_names_match_the_aliases() {
    let backend = common::backend();
    let options = FormatOptions {
        format: Some(Format::Named(NamedFormat::DecimalShort)),
        ..FormatOptions::default()
    };
    assert_eq!(format(12345, &backend, &options).unwrap(), "12K");
}
