//! Shared fixture backend with a small CLDR-like dataset.

use std::collections::HashMap;

use cldr_numfmt::{
    CompactBucket, CompactDecimals, CompactStyle, CurrencyData, CurrencySpacing, Decimal,
    DigitalTokenData, LocaleInfo, NamedFormat, NumberBackend, NumberSymbols, PluralCategory,
    decimal,
};

type PatternKey = (String, String, NamedFormat);
type CompactKey = (String, String, CompactStyle);

pub struct TestBackend {
    locales: HashMap<String, LocaleInfo>,
    symbols: HashMap<(String, String), NumberSymbols>,
    patterns: HashMap<PatternKey, String>,
    currencies: HashMap<(String, String), CurrencyData>,
    tokens: HashMap<String, DigitalTokenData>,
    compact: HashMap<CompactKey, CompactDecimals>,
}

impl TestBackend {
    fn add_pattern(&mut self, locale: &str, system: &str, format: NamedFormat, pattern: &str) {
        self.patterns.insert(
            (locale.to_string(), system.to_string(), format),
            pattern.to_string(),
        );
    }

    fn add_currency(&mut self, locale: &str, data: CurrencyData) {
        self.currencies
            .insert((locale.to_string(), data.code.clone()), data);
    }
}

fn currency(code: &str, symbol: &str, digits: u8) -> CurrencyData {
    CurrencyData {
        code: code.to_string(),
        symbol: Some(symbol.to_string()),
        digits,
        ..CurrencyData::default()
    }
}

fn bucket(exponent: u32, pattern: &str) -> CompactBucket {
    let mut patterns = std::collections::BTreeMap::new();
    patterns.insert(PluralCategory::Other, pattern.to_string());
    CompactBucket { exponent, patterns }
}

fn en_compact(prefix: &str, suffixes: [&str; 4]) -> CompactDecimals {
    let mut buckets = Vec::new();
    for (step, suffix) in suffixes.iter().enumerate() {
        let base = 3 * (step as u32 + 1);
        buckets.push(bucket(base, &format!("{prefix}0{suffix}")));
        buckets.push(bucket(base + 1, &format!("{prefix}00{suffix}")));
        buckets.push(bucket(base + 2, &format!("{prefix}000{suffix}")));
    }
    CompactDecimals { buckets }
}

pub fn backend() -> TestBackend {
    let mut backend = TestBackend {
        locales: HashMap::new(),
        symbols: HashMap::new(),
        patterns: HashMap::new(),
        currencies: HashMap::new(),
        tokens: HashMap::new(),
        compact: HashMap::new(),
    };

    // en
    backend.locales.insert(
        "en".to_string(),
        LocaleInfo {
            default_currency: Some("USD".to_string()),
            ..LocaleInfo::default()
        },
    );
    backend.symbols.insert(
        ("en".to_string(), "latn".to_string()),
        NumberSymbols {
            currency_spacing: Some(CurrencySpacing::default()),
            ..NumberSymbols::default()
        },
    );
    backend.add_pattern("en", "latn", NamedFormat::Standard, "#,##0.###");
    backend.add_pattern("en", "latn", NamedFormat::Currency, "¤#,##0.00");
    backend.add_pattern(
        "en",
        "latn",
        NamedFormat::Accounting,
        "¤#,##0.00;(¤#,##0.00)",
    );
    backend.add_pattern("en", "latn", NamedFormat::Percent, "#,##0%");
    backend.add_pattern("en", "latn", NamedFormat::Scientific, "#E0");
    backend.add_pattern("en", "latn", NamedFormat::CurrencyNoSymbol, "#,##0.00");
    backend.add_pattern(
        "en",
        "latn",
        NamedFormat::AccountingNoSymbol,
        "#,##0.00;(#,##0.00)",
    );
    backend.add_pattern(
        "en",
        "latn",
        NamedFormat::CurrencyAlphaNextToNumber,
        "¤ #,##0.00",
    );
    backend.add_pattern(
        "en",
        "latn",
        NamedFormat::AccountingAlphaNextToNumber,
        "¤ #,##0.00;(¤ #,##0.00)",
    );

    let mut usd = currency("USD", "$", 2);
    usd.narrow_symbol = Some("$".to_string());
    usd.display_names
        .insert(PluralCategory::One, "US dollar".to_string());
    usd.display_names
        .insert(PluralCategory::Other, "US dollars".to_string());
    backend.add_currency("en", usd);
    backend.add_currency("en", currency("EUR", "€", 2));
    let mut thb = currency("THB", "THB", 2);
    thb.narrow_symbol = Some("฿".to_string());
    backend.add_currency("en", thb);
    backend.add_currency("en", currency("JPY", "¥", 0));
    let mut chf = currency("CHF", "CHF", 2);
    chf.cash_rounding = Some(5);
    backend.add_currency("en", chf);

    backend.compact.insert(
        ("en".to_string(), "latn".to_string(), CompactStyle::DecimalShort),
        en_compact("", ["K", "M", "B", "T"]),
    );
    backend.compact.insert(
        ("en".to_string(), "latn".to_string(), CompactStyle::DecimalLong),
        en_compact("", [" thousand", " million", " billion", " trillion"]),
    );
    backend.compact.insert(
        ("en".to_string(), "latn".to_string(), CompactStyle::CurrencyShort),
        en_compact("¤", ["K", "M", "B", "T"]),
    );

    backend.tokens.insert(
        "4H95J0R2X".to_string(),
        DigitalTokenData {
            code: "4H95J0R2X".to_string(),
            short_names: vec!["BTC".to_string()],
        },
    );

    // fr
    backend
        .locales
        .insert("fr".to_string(), LocaleInfo::default());
    backend.symbols.insert(
        ("fr".to_string(), "latn".to_string()),
        NumberSymbols {
            decimal: ",".to_string(),
            group: "\u{202f}".to_string(),
            ..NumberSymbols::default()
        },
    );
    backend.add_pattern("fr", "latn", NamedFormat::Standard, "#,##0.###");
    backend.add_pattern("fr", "latn", NamedFormat::Currency, "#,##0.00 ¤");

    // es
    backend.locales.insert(
        "es".to_string(),
        LocaleInfo {
            minimum_grouping_digits: 2,
            ..LocaleInfo::default()
        },
    );
    backend.symbols.insert(
        ("es".to_string(), "latn".to_string()),
        NumberSymbols {
            decimal: ",".to_string(),
            group: ".".to_string(),
            ..NumberSymbols::default()
        },
    );
    backend.add_pattern("es", "latn", NamedFormat::Standard, "#,##0.###");
    backend.add_pattern("es", "latn", NamedFormat::Currency, "#,##0.00 ¤");
    backend.add_currency("es", currency("EUR", "€", 2));

    // th, with a native numbering system
    backend.locales.insert(
        "th".to_string(),
        LocaleInfo {
            native_number_system: Some("thai".to_string()),
            ..LocaleInfo::default()
        },
    );
    backend.symbols.insert(
        ("th".to_string(), "latn".to_string()),
        NumberSymbols::default(),
    );
    backend.symbols.insert(
        ("th".to_string(), "thai".to_string()),
        NumberSymbols {
            zero_digit: '๐',
            ..NumberSymbols::default()
        },
    );
    for system in ["latn", "thai"] {
        backend.add_pattern("th", system, NamedFormat::Standard, "#,##0.###");
        backend.add_pattern("th", system, NamedFormat::Currency, "¤#,##0.00");
        backend.add_pattern(
            "th",
            system,
            NamedFormat::Accounting,
            "¤#,##0.00;(¤#,##0.00)",
        );
    }
    backend.add_currency("th", currency("THB", "฿", 2));

    backend
}

impl NumberBackend for TestBackend {
    fn default_locale(&self) -> &str {
        "en"
    }

    fn locale(&self, tag: &str) -> Option<&LocaleInfo> {
        self.locales.get(tag)
    }

    fn symbols(&self, locale: &str, system: &str) -> Option<&NumberSymbols> {
        self.symbols
            .get(&(locale.to_string(), system.to_string()))
    }

    fn pattern(&self, locale: &str, system: &str, format: NamedFormat) -> Option<&str> {
        self.patterns
            .get(&(locale.to_string(), system.to_string(), format))
            .map(String::as_str)
    }

    fn currency(&self, locale: &str, code: &str) -> Option<&CurrencyData> {
        self.currencies
            .get(&(locale.to_string(), code.to_string()))
    }

    fn digital_token(&self, code: &str) -> Option<&DigitalTokenData> {
        self.tokens.get(code)
    }

    fn compact_patterns(
        &self,
        locale: &str,
        system: &str,
        style: CompactStyle,
    ) -> Option<&CompactDecimals> {
        self.compact
            .get(&(locale.to_string(), system.to_string(), style))
    }

    fn plural_category(&self, _locale: &str, value: &Decimal) -> PluralCategory {
        if *value == decimal::from_i64(1) {
            PluralCategory::One
        } else {
            PluralCategory::Other
        }
    }
}
