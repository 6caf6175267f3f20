//! Output assembly: grouping, digit mapping, affixes, padding, spacing.

use crate::backend::PluralCategory;
use crate::engine::NumberParts;
use crate::options::Resolved;
use crate::pattern::{AffixToken, DecimalFormat, PadPosition, SubPattern};

/// Tag attached to each emitted component, for wrapper callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatPart {
    /// Literal affix text.
    Literal,
    /// The number body: digits, separators, exponent.
    Number,
    /// An expanded currency placeholder or display name.
    Currency,
    /// A localized minus sign.
    Minus,
    /// A localized plus sign.
    Plus,
    /// A localized percent sign.
    Percent,
    /// A localized permille sign.
    Permille,
    /// Padding fill characters.
    Pad,
}

type Wrapper<'a> = &'a dyn Fn(&str, FormatPart) -> String;

struct Emitter<'a> {
    out: String,
    wrapper: Option<Wrapper<'a>>,
}

impl<'a> Emitter<'a> {
    fn new(wrapper: Option<Wrapper<'a>>) -> Self {
        Self {
            out: String::new(),
            wrapper,
        }
    }

    fn push(&mut self, part: FormatPart, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.wrapper {
            Some(wrapper) => self.out.push_str(&wrapper(text, part)),
            None => self.out.push_str(text),
        }
    }
}

pub(crate) fn assemble(
    parts: &NumberParts,
    metadata: &DecimalFormat,
    resolved: &Resolved<'_>,
    plural: PluralCategory,
    wrapper: Option<Wrapper<'_>>,
) -> String {
    let (sub, implicit_minus) = select_subpattern(metadata, resolved.negative);
    let currency_context = metadata.has_currency();
    let body = render_body(parts, sub, resolved, currency_context);

    let mut prefix = render_affix(&sub.prefix, resolved, plural);
    if implicit_minus {
        prefix.insert(0, (FormatPart::Minus, resolved.symbols.minus_sign.clone()));
    }
    let mut suffix = render_affix(&sub.suffix, resolved, plural);

    if currency_context
        && resolved.currency_spacing
        && let Some(spacing) = &resolved.symbols.currency_spacing
    {
        let after = match prefix.last() {
            Some((FormatPart::Currency, symbol)) => symbol
                .chars()
                .last()
                .zip(body.chars().next())
                .filter(|(currency_edge, number_edge)| {
                    spacing.after_currency.applies(*currency_edge, *number_edge)
                })
                .map(|_| spacing.after_currency.insert_between.clone()),
            _ => None,
        };
        if let Some(insert) = after {
            prefix.push((FormatPart::Literal, insert));
        }
        let before = match suffix.first() {
            Some((FormatPart::Currency, symbol)) => symbol
                .chars()
                .next()
                .zip(body.chars().last())
                .filter(|(currency_edge, number_edge)| {
                    spacing.before_currency.applies(*currency_edge, *number_edge)
                })
                .map(|_| spacing.before_currency.insert_between.clone()),
            _ => None,
        };
        if let Some(insert) = before {
            suffix.insert(0, (FormatPart::Literal, insert));
        }
    }

    let visible: usize = prefix
        .iter()
        .chain(&suffix)
        .map(|(_, text)| text.chars().count())
        .sum::<usize>()
        + body.chars().count();
    let padding = sub.padding.and_then(|padding| {
        (padding.width > visible).then(|| {
            (
                padding.position,
                padding.ch.to_string().repeat(padding.width - visible),
            )
        })
    });

    let mut emitter = Emitter::new(wrapper);
    let emit_pad = |emitter: &mut Emitter<'_>, at: PadPosition| {
        if let Some((position, text)) = &padding
            && *position == at
        {
            emitter.push(FormatPart::Pad, text);
        }
    };

    emit_pad(&mut emitter, PadPosition::BeforePrefix);
    for (part, text) in &prefix {
        emitter.push(*part, text);
    }
    emit_pad(&mut emitter, PadPosition::AfterPrefix);
    emitter.push(FormatPart::Number, &body);
    emit_pad(&mut emitter, PadPosition::BeforeSuffix);
    for (part, text) in &suffix {
        emitter.push(*part, text);
    }
    emit_pad(&mut emitter, PadPosition::AfterSuffix);
    emitter.out
}

/// Renders NaN and the infinities: the symbol-table string wrapped in the
/// sign-appropriate affixes, with no digit processing.
pub(crate) fn assemble_special(
    text: &str,
    metadata: &DecimalFormat,
    resolved: &Resolved<'_>,
    wrapper: Option<Wrapper<'_>>,
) -> String {
    let (sub, implicit_minus) = select_subpattern(metadata, resolved.negative);
    let mut emitter = Emitter::new(wrapper);
    if implicit_minus {
        emitter.push(FormatPart::Minus, &resolved.symbols.minus_sign);
    }
    for (part, piece) in render_affix(&sub.prefix, resolved, PluralCategory::Other) {
        emitter.push(part, &piece);
    }
    emitter.push(FormatPart::Number, text);
    for (part, piece) in render_affix(&sub.suffix, resolved, PluralCategory::Other) {
        emitter.push(part, &piece);
    }
    emitter.out
}

fn select_subpattern(metadata: &DecimalFormat, negative: bool) -> (&SubPattern, bool) {
    if negative {
        match &metadata.negative {
            Some(sub) => (sub, false),
            None => (&metadata.positive, true),
        }
    } else {
        (&metadata.positive, false)
    }
}

fn render_body(
    parts: &NumberParts,
    sub: &SubPattern,
    resolved: &Resolved<'_>,
    currency_context: bool,
) -> String {
    let symbols = resolved.symbols;
    let mut body = String::new();
    let int_len = parts.integer.len();
    let grouping = sub.grouping_primary > 0
        && sub.exponent_digits == 0
        && int_len >= sub.grouping_primary + resolved.minimum_grouping;

    for (index, digit) in parts.integer.iter().enumerate() {
        if grouping && index > 0 {
            let from_right = int_len - index;
            let primary = sub.grouping_primary;
            let secondary = sub.grouping_secondary.max(1);
            if from_right == primary
                || (from_right > primary && (from_right - primary) % secondary == 0)
            {
                body.push_str(symbols.group_for(currency_context));
            }
        }
        body.push(symbols.map_digit(*digit));
    }

    if !parts.fraction.is_empty() {
        body.push_str(symbols.decimal_for(currency_context));
        for digit in &parts.fraction {
            body.push(symbols.map_digit(*digit));
        }
    }

    if let Some(exponent) = parts.exponent {
        body.push_str(&symbols.exponential);
        if exponent < 0 {
            body.push_str(&symbols.minus_sign);
        } else if sub.exponent_show_positive {
            body.push_str(&symbols.plus_sign);
        }
        let digits = exponent.unsigned_abs().to_string();
        for _ in digits.len()..sub.exponent_digits {
            body.push(symbols.map_digit(0));
        }
        for byte in digits.bytes() {
            body.push(symbols.map_digit(byte - b'0'));
        }
    }

    body
}

fn render_affix(
    tokens: &[AffixToken],
    resolved: &Resolved<'_>,
    plural: PluralCategory,
) -> Vec<(FormatPart, String)> {
    let symbols = resolved.symbols;
    let mut pieces = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            AffixToken::Literal(text) => pieces.push((FormatPart::Literal, text.clone())),
            AffixToken::Currency(count) => {
                if let Some(data) = &resolved.currency {
                    pieces.push((
                        FormatPart::Currency,
                        data.expand_placeholder(*count, &resolved.currency_symbol, plural),
                    ));
                }
            }
            AffixToken::Percent => {
                pieces.push((FormatPart::Percent, symbols.percent_sign.clone()));
            }
            AffixToken::Permille => {
                pieces.push((FormatPart::Permille, symbols.permille_sign.clone()));
            }
            AffixToken::MinusSign => pieces.push((FormatPart::Minus, symbols.minus_sign.clone())),
            AffixToken::PlusSign => pieces.push((FormatPart::Plus, symbols.plus_sign.clone())),
        }
    }
    pieces
}
