//! Decimal format pattern compiler.
//!
//! Compiles TR35 decimal format patterns such as `"¤#,##0.00;(¤#,##0.00)"`
//! into [`DecimalFormat`] metadata. Compilation is deterministic, so compiled
//! patterns are cached process-wide by pattern string.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use crate::decimal::{self, Decimal};
use crate::error::FormatError;

/// One token of a compiled prefix or suffix.
#[derive(Debug, Clone, PartialEq)]
pub enum AffixToken {
    /// Literal text, quotes already resolved.
    Literal(String),
    /// A run of `count` currency placeholders (`¤`).
    Currency(u8),
    /// The percent placeholder; implies a ×100 multiplier.
    Percent,
    /// The permille placeholder; implies a ×1000 multiplier.
    Permille,
    /// The localized minus sign.
    MinusSign,
    /// The localized plus sign.
    PlusSign,
}

/// Where padding characters are inserted when the output is narrower than
/// the pad width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPosition {
    /// Before the prefix.
    BeforePrefix,
    /// Between the prefix and the number body.
    AfterPrefix,
    /// Between the number body and the suffix.
    BeforeSuffix,
    /// After the suffix.
    AfterSuffix,
}

/// Padding requested by a `*x` specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// The fill character.
    pub ch: char,
    /// Width in characters the output must reach.
    pub width: usize,
    /// Insertion point of the fill.
    pub position: PadPosition,
}

/// Metadata of a single sub-pattern (the positive or negative half).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubPattern {
    /// Prefix tokens.
    pub prefix: Vec<AffixToken>,
    /// Suffix tokens.
    pub suffix: Vec<AffixToken>,
    /// Required integer digits (left-padded with zeros).
    pub min_integer_digits: usize,
    /// Integer placeholder count; set only for scientific patterns, where it
    /// controls exponent grouping.
    pub max_integer_digits: Option<usize>,
    /// Required fraction digits (right-padded with zeros).
    pub min_fraction_digits: usize,
    /// Fraction digits beyond which the value is rounded.
    pub max_fraction_digits: usize,
    /// Required significant digits; 0 when the pattern does not use them.
    pub min_significant_digits: usize,
    /// Significant digits beyond which the value is rounded; 0 when unused.
    pub max_significant_digits: usize,
    /// Rounding increment embedded in the pattern digits, if any.
    pub rounding_increment: Option<Decimal>,
    /// Distance from the decimal point to the first group separator; 0
    /// disables grouping.
    pub grouping_primary: usize,
    /// Distance between subsequent group separators.
    pub grouping_secondary: usize,
    /// Exponent digit count; 0 for non-scientific patterns.
    pub exponent_digits: usize,
    /// Whether non-negative exponents carry an explicit plus sign.
    pub exponent_show_positive: bool,
    /// Padding specification, if any.
    pub padding: Option<Padding>,
    /// Longest `¤` run across both affixes (0–4).
    pub currency_placeholder_count: u8,
}

impl SubPattern {
    /// Pre-rounding multiplier implied by percent or permille placeholders.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        let tokens = self.prefix.iter().chain(&self.suffix);
        for token in tokens {
            match token {
                AffixToken::Percent => return 100,
                AffixToken::Permille => return 1000,
                _ => {}
            }
        }
        1
    }

    /// Whether the pattern constrains significant digits.
    #[must_use]
    pub fn uses_significant_digits(&self) -> bool {
        self.max_significant_digits > 0
    }

    /// Whether a `¤` placeholder touches the number body directly, with no
    /// literal text in between.
    #[must_use]
    pub fn currency_adjacent_to_number(&self) -> bool {
        matches!(self.prefix.last(), Some(AffixToken::Currency(_)))
            || matches!(self.suffix.first(), Some(AffixToken::Currency(_)))
    }
}

/// Compiled decimal format pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalFormat {
    /// Metadata for non-negative values.
    pub positive: SubPattern,
    /// Metadata for negative values; when absent, the positive sub-pattern
    /// is used with a minus sign prepended to its prefix.
    pub negative: Option<SubPattern>,
}

static PATTERN_CACHE: LazyLock<RwLock<HashMap<String, Arc<DecimalFormat>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

impl DecimalFormat {
    /// Compiles a pattern string.
    ///
    /// ```
    /// use cldr_numfmt::DecimalFormat;
    ///
    /// let format = DecimalFormat::compile("#,##0.00").unwrap();
    /// assert_eq!(format.positive.grouping_primary, 3);
    /// assert_eq!(format.positive.min_fraction_digits, 2);
    /// ```
    ///
    /// # Errors
    /// Returns [`FormatError::Compile`] when the pattern violates the
    /// grammar.
    pub fn compile(pattern: &str) -> Result<Self, FormatError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut split = None;
        let mut in_quote = false;
        for (index, ch) in chars.iter().enumerate() {
            match ch {
                '\'' => in_quote = !in_quote,
                ';' if !in_quote => {
                    if split.is_some() {
                        return Err(syntax("too many subpatterns", &chars[index..]));
                    }
                    split = Some(index);
                }
                _ => {}
            }
        }

        let (positive_chars, negative_chars) = match split {
            Some(index) => (&chars[..index], Some(&chars[index + 1..])),
            None => (&chars[..], None),
        };

        let positive = Compiler::new(positive_chars).run()?;
        let negative = match negative_chars {
            Some(chars) => {
                let parsed = Compiler::new(chars).run()?;
                // The negative sub-pattern contributes affixes only; digit
                // handling always follows the positive sub-pattern.
                Some(SubPattern {
                    prefix: parsed.prefix,
                    suffix: parsed.suffix,
                    currency_placeholder_count: parsed.currency_placeholder_count,
                    ..positive.clone()
                })
            }
            None => None,
        };

        Ok(Self { positive, negative })
    }

    /// Compiles through the process-wide cache.
    ///
    /// # Errors
    /// Returns [`FormatError::Compile`] when the pattern violates the
    /// grammar.
    pub fn cached(pattern: &str) -> Result<Arc<Self>, FormatError> {
        if let Some(hit) = PATTERN_CACHE
            .read()
            .ok()
            .and_then(|cache| cache.get(pattern).cloned())
        {
            return Ok(hit);
        }
        let compiled = Arc::new(Self::compile(pattern)?);
        if let Ok(mut cache) = PATTERN_CACHE.write() {
            cache.insert(pattern.to_string(), Arc::clone(&compiled));
        }
        Ok(compiled)
    }

    /// Whether either sub-pattern contains a currency placeholder.
    #[must_use]
    pub fn has_currency(&self) -> bool {
        self.positive.currency_placeholder_count > 0
            || self
                .negative
                .as_ref()
                .is_some_and(|sub| sub.currency_placeholder_count > 0)
    }
}

fn syntax(reason: &'static str, remaining: &[char]) -> FormatError {
    FormatError::Compile {
        reason,
        remaining: remaining.iter().collect(),
    }
}

const fn is_number_start(ch: char) -> bool {
    matches!(ch, '#' | '@' | ',' | '.') || ch.is_ascii_digit()
}

#[derive(Default)]
struct AffixBuilder {
    tokens: Vec<AffixToken>,
    literal: String,
}

impl AffixBuilder {
    fn push_char(&mut self, ch: char) {
        self.literal.push(ch);
    }

    fn push_token(&mut self, token: AffixToken) {
        self.flush();
        self.tokens.push(token);
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            self.tokens
                .push(AffixToken::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.literal.is_empty()
    }

    fn finish(mut self) -> Vec<AffixToken> {
        self.flush();
        self.tokens
    }
}

#[derive(Default)]
struct NumberSpec {
    int_digits: Vec<char>,
    int_commas: Vec<usize>,
    frac_digits: Vec<char>,
    exponent_digits: usize,
    exponent_plus: bool,
    scientific: bool,
}

struct Compiler<'a> {
    chars: &'a [char],
    pos: usize,
    in_suffix: bool,
    seen_number: bool,
    prefix: AffixBuilder,
    suffix: AffixBuilder,
    pad: Option<(char, PadPosition)>,
    width: usize,
    number: NumberSpec,
}

impl<'a> Compiler<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            in_suffix: false,
            seen_number: false,
            prefix: AffixBuilder::default(),
            suffix: AffixBuilder::default(),
            pad: None,
            width: 0,
            number: NumberSpec::default(),
        }
    }

    fn run(mut self) -> Result<SubPattern, FormatError> {
        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            if !self.in_suffix && !self.seen_number && is_number_start(ch) {
                self.parse_number()?;
                self.seen_number = true;
                self.in_suffix = true;
                continue;
            }
            self.parse_affix_char(ch)?;
        }
        self.finish()
    }

    fn remaining(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    fn affix_mut(&mut self) -> &mut AffixBuilder {
        if self.in_suffix {
            &mut self.suffix
        } else {
            &mut self.prefix
        }
    }

    fn parse_affix_char(&mut self, ch: char) -> Result<(), FormatError> {
        if self.in_suffix && is_number_start(ch) {
            return Err(syntax("unexpected character in suffix", self.remaining()));
        }
        match ch {
            '\'' => return self.parse_quoted(),
            '*' => return self.parse_padding(),
            '¤' => {
                let mut count = 0u8;
                while self.pos < self.chars.len() && self.chars[self.pos] == '¤' {
                    count += 1;
                    self.pos += 1;
                    self.width += 1;
                    if count > 4 {
                        return Err(syntax("too many currency placeholders", self.remaining()));
                    }
                }
                self.affix_mut().push_token(AffixToken::Currency(count));
            }
            '%' => {
                self.pos += 1;
                self.width += 1;
                self.affix_mut().push_token(AffixToken::Percent);
            }
            '‰' => {
                self.pos += 1;
                self.width += 1;
                self.affix_mut().push_token(AffixToken::Permille);
            }
            '-' => {
                self.pos += 1;
                self.width += 1;
                self.affix_mut().push_token(AffixToken::MinusSign);
            }
            '+' => {
                self.pos += 1;
                self.width += 1;
                self.affix_mut().push_token(AffixToken::PlusSign);
            }
            _ => {
                self.pos += 1;
                self.width += 1;
                self.affix_mut().push_char(ch);
            }
        }
        Ok(())
    }

    fn parse_quoted(&mut self) -> Result<(), FormatError> {
        let open = self.pos;
        self.pos += 1;
        if self.pos < self.chars.len() && self.chars[self.pos] == '\'' {
            // '' outside a quoted run is a literal apostrophe
            self.pos += 1;
            self.width += 1;
            self.affix_mut().push_char('\'');
            return Ok(());
        }
        loop {
            if self.pos >= self.chars.len() {
                return Err(syntax("unmatched quote", &self.chars[open..]));
            }
            let ch = self.chars[self.pos];
            if ch == '\'' {
                if self.pos + 1 < self.chars.len() && self.chars[self.pos + 1] == '\'' {
                    self.pos += 2;
                    self.width += 1;
                    self.affix_mut().push_char('\'');
                    continue;
                }
                self.pos += 1;
                return Ok(());
            }
            self.pos += 1;
            self.width += 1;
            self.affix_mut().push_char(ch);
        }
    }

    fn parse_padding(&mut self) -> Result<(), FormatError> {
        if self.pad.is_some() {
            return Err(syntax("duplicate padding specifier", self.remaining()));
        }
        if self.pos + 1 >= self.chars.len() {
            return Err(syntax(
                "padding specifier missing its fill character",
                self.remaining(),
            ));
        }
        let fill = self.chars[self.pos + 1];
        let position = if self.in_suffix {
            if self.suffix.is_empty() {
                PadPosition::BeforeSuffix
            } else {
                PadPosition::AfterSuffix
            }
        } else if self.prefix.is_empty() {
            PadPosition::BeforePrefix
        } else {
            PadPosition::AfterPrefix
        };
        self.pad = Some((fill, position));
        self.pos += 2;
        Ok(())
    }

    fn parse_number(&mut self) -> Result<(), FormatError> {
        #[derive(PartialEq)]
        enum Region {
            Integer,
            Fraction,
            Exponent,
        }

        let mut region = Region::Integer;
        let mut has_at = false;
        let mut hash_seen = false;
        let mut digit_seen = false;

        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            match region {
                Region::Integer | Region::Fraction => match ch {
                    '#' => {
                        if region == Region::Fraction {
                            self.number.frac_digits.push('#');
                        } else {
                            hash_seen = true;
                            self.number.int_digits.push('#');
                        }
                    }
                    '0'..='9' => {
                        if has_at {
                            return Err(syntax(
                                "significant digit marker mixed with digits",
                                self.remaining(),
                            ));
                        }
                        if region == Region::Fraction {
                            self.number.frac_digits.push(ch);
                        } else {
                            digit_seen = true;
                            self.number.int_digits.push(ch);
                        }
                    }
                    '@' => {
                        if region == Region::Fraction {
                            return Err(syntax(
                                "significant digit marker in fraction part",
                                self.remaining(),
                            ));
                        }
                        if digit_seen || hash_seen {
                            return Err(syntax(
                                "significant digit marker mixed with digits",
                                self.remaining(),
                            ));
                        }
                        has_at = true;
                        self.number.int_digits.push('@');
                    }
                    ',' => {
                        if region == Region::Fraction {
                            return Err(syntax(
                                "group separator in fraction part",
                                self.remaining(),
                            ));
                        }
                        self.number.int_commas.push(self.number.int_digits.len());
                    }
                    '.' => {
                        if region == Region::Fraction {
                            return Err(syntax("too many decimal points", self.remaining()));
                        }
                        if has_at {
                            return Err(syntax(
                                "fraction digits with significant digits",
                                self.remaining(),
                            ));
                        }
                        region = Region::Fraction;
                    }
                    'E' => {
                        region = Region::Exponent;
                        self.number.scientific = true;
                    }
                    _ => break,
                },
                Region::Exponent => match ch {
                    '+' => {
                        if self.number.exponent_digits == 0 && !self.number.exponent_plus {
                            self.number.exponent_plus = true;
                        } else if self.number.exponent_digits == 0 {
                            return Err(syntax("too many exponent signs", self.remaining()));
                        } else {
                            break;
                        }
                    }
                    '0'..='9' => self.number.exponent_digits += 1,
                    _ => break,
                },
            }
            self.pos += 1;
            self.width += 1;
        }

        if self.number.scientific && self.number.exponent_digits == 0 {
            return Err(syntax("exponent has no digits", self.remaining()));
        }
        Ok(())
    }

    fn finish(self) -> Result<SubPattern, FormatError> {
        let spec = &self.number;
        let int_count = spec.int_digits.len();
        let min_integer_digits = spec
            .int_digits
            .iter()
            .filter(|ch| ch.is_ascii_digit())
            .count();
        let min_significant_digits = spec.int_digits.iter().filter(|ch| **ch == '@').count();
        let max_significant_digits = if min_significant_digits > 0 {
            min_significant_digits + spec.int_digits.iter().filter(|ch| **ch == '#').count()
        } else {
            0
        };

        let (grouping_primary, grouping_secondary) = if spec.int_commas.is_empty() {
            (0, 0)
        } else {
            let last = *spec.int_commas.last().unwrap_or(&0);
            let primary = int_count - last;
            if primary == 0 {
                (0, 0)
            } else {
                let secondary = if spec.int_commas.len() >= 2 {
                    last - spec.int_commas[spec.int_commas.len() - 2]
                } else {
                    primary
                };
                (primary, if secondary == 0 { primary } else { secondary })
            }
        };

        let has_increment = spec
            .int_digits
            .iter()
            .chain(&spec.frac_digits)
            .any(|ch| ('1'..='9').contains(ch));
        let rounding_increment = if has_increment {
            let int_part: String = spec
                .int_digits
                .iter()
                .map(|ch| if ch.is_ascii_digit() { *ch } else { '0' })
                .collect();
            let frac_part: String = spec
                .frac_digits
                .iter()
                .map(|ch| if ch.is_ascii_digit() { *ch } else { '0' })
                .collect();
            let text = if frac_part.is_empty() {
                int_part
            } else {
                format!("{int_part}.{frac_part}")
            };
            decimal::parse_decimal(&text).filter(|value| !decimal::is_zero(value))
        } else {
            None
        };

        let prefix = self.prefix.finish();
        let suffix = self.suffix.finish();
        let currency_placeholder_count = prefix
            .iter()
            .chain(&suffix)
            .filter_map(|token| match token {
                AffixToken::Currency(count) => Some(*count),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        Ok(SubPattern {
            prefix,
            suffix,
            min_integer_digits,
            max_integer_digits: spec.scientific.then(|| int_count.max(1)),
            min_fraction_digits: spec
                .frac_digits
                .iter()
                .filter(|ch| ch.is_ascii_digit())
                .count(),
            max_fraction_digits: spec.frac_digits.len(),
            min_significant_digits,
            max_significant_digits,
            rounding_increment,
            grouping_primary,
            grouping_secondary,
            exponent_digits: spec.exponent_digits,
            exponent_show_positive: spec.exponent_plus,
            padding: self
                .pad
                .map(|(ch, position)| Padding {
                    ch,
                    width: self.width,
                    position,
                }),
            currency_placeholder_count,
        })
    }
}

const fn is_special_affix_char(ch: char) -> bool {
    matches!(
        ch,
        '#' | '@' | '.' | ',' | ';' | '¤' | '%' | '‰' | 'E' | '*' | '+' | '-'
    ) || ch.is_ascii_digit()
}

fn write_affix(out: &mut String, tokens: &[AffixToken]) {
    for token in tokens {
        match token {
            AffixToken::Literal(text) => {
                if text.chars().any(is_special_affix_char) {
                    out.push('\'');
                    for ch in text.chars() {
                        if ch == '\'' {
                            out.push_str("''");
                        } else {
                            out.push(ch);
                        }
                    }
                    out.push('\'');
                } else {
                    for ch in text.chars() {
                        if ch == '\'' {
                            out.push_str("''");
                        } else {
                            out.push(ch);
                        }
                    }
                }
            }
            AffixToken::Currency(count) => {
                for _ in 0..*count {
                    out.push('¤');
                }
            }
            AffixToken::Percent => out.push('%'),
            AffixToken::Permille => out.push('‰'),
            AffixToken::MinusSign => out.push('-'),
            AffixToken::PlusSign => out.push('+'),
        }
    }
}

fn write_number_body(out: &mut String, sub: &SubPattern) {
    let increment = sub
        .rounding_increment
        .as_ref()
        .map(|value| decimal::to_plain_string(value));
    let (increment_int, increment_frac) = match &increment {
        Some(text) => {
            let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
            (int_part.trim_start_matches('0'), frac_part)
        }
        None => ("", ""),
    };

    if sub.uses_significant_digits() {
        let mut digits: Vec<char> = Vec::new();
        for index in 0..sub.max_significant_digits {
            digits.push(if index < sub.min_significant_digits {
                '@'
            } else {
                '#'
            });
        }
        push_grouped(out, &digits, sub.grouping_primary, sub.grouping_secondary);
    } else {
        let placeholders = if let Some(count) = sub.max_integer_digits {
            count
        } else if sub.grouping_primary > 0 {
            let base = if sub.grouping_secondary == sub.grouping_primary {
                sub.grouping_primary + 1
            } else {
                sub.grouping_primary + sub.grouping_secondary + 1
            };
            base.max(sub.min_integer_digits)
        } else {
            sub.min_integer_digits.max(1)
        };
        let mut digits: Vec<char> = Vec::with_capacity(placeholders);
        for index in 0..placeholders {
            let from_right = placeholders - index;
            digits.push(if from_right <= sub.min_integer_digits {
                '0'
            } else {
                '#'
            });
        }
        for (offset, ch) in increment_int.chars().rev().enumerate() {
            if offset < placeholders {
                let index = placeholders - 1 - offset;
                digits[index] = ch;
            }
        }
        push_grouped(out, &digits, sub.grouping_primary, sub.grouping_secondary);
    }

    if sub.max_fraction_digits > 0 {
        out.push('.');
        for index in 0..sub.max_fraction_digits {
            let ch = increment_frac.chars().nth(index).unwrap_or_else(|| {
                if index < sub.min_fraction_digits {
                    '0'
                } else {
                    '#'
                }
            });
            out.push(ch);
        }
    }

    if sub.exponent_digits > 0 {
        out.push('E');
        if sub.exponent_show_positive {
            out.push('+');
        }
        for _ in 0..sub.exponent_digits {
            out.push('0');
        }
    }
}

fn push_grouped(out: &mut String, digits: &[char], primary: usize, secondary: usize) {
    let total = digits.len();
    for (index, ch) in digits.iter().enumerate() {
        let from_right = total - index;
        if primary > 0 && index > 0 {
            if from_right == primary {
                out.push(',');
            } else if from_right > primary && (from_right - primary) % secondary.max(1) == 0 {
                out.push(',');
            }
        }
        out.push(*ch);
    }
}

fn write_subpattern(out: &mut String, sub: &SubPattern) {
    let pad = |out: &mut String, at: PadPosition| {
        if let Some(padding) = sub.padding
            && padding.position == at
        {
            out.push('*');
            out.push(padding.ch);
        }
    };
    pad(out, PadPosition::BeforePrefix);
    write_affix(out, &sub.prefix);
    pad(out, PadPosition::AfterPrefix);
    write_number_body(out, sub);
    pad(out, PadPosition::BeforeSuffix);
    write_affix(out, &sub.suffix);
    pad(out, PadPosition::AfterSuffix);
}

impl fmt::Display for DecimalFormat {
    /// Reserializes the metadata to a canonical pattern string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_subpattern(&mut out, &self.positive);
        if let Some(negative) = &self.negative {
            out.push(';');
            write_subpattern(&mut out, negative);
        }
        f.write_str(&out)
    }
}
