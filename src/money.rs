use once_cell::sync::Lazy;
use std::collections::HashSet;

// Currency words we accept around the numeric part. Anything alphabetic
// that is not in this set means the text is not a money amount.
static CURRENCY_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "usd", "eur", "gbp", "chf", "jpy", "cad", "aud", "nzd", "sek", "nok", "dkk", "pln",
        "czk", "huf", "inr", "brl", "zar", "kr", "zl",
    ]
    .into_iter()
    .collect()
});

/// Parse a rendered money string into a numeric amount.
///
/// The host page renders values like `"$1,234.56"`, `"€1.234,56"` or
/// `"&#8364;1 234,56"` depending on locale; this is lenient about currency
/// symbols, HTML entities and separator conventions. Returns `None` when
/// the text does not look like a money amount.
pub fn parse(raw: &str) -> Option<f64> {
    let text = strip_entities(raw);

    // Reject texts carrying words that are not currency codes ("2 items").
    for token in alphabetic_tokens(&text) {
        if !CURRENCY_TOKENS.contains(token.to_lowercase().as_str()) {
            return None;
        }
    }

    let negative = text.trim_start().starts_with('-');

    // Keep only digits and the two possible separators.
    let mut numeric = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            numeric.push(c);
        }
    }
    if !numeric.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let normalized = normalize_separators(&numeric)?;
    let amount: f64 = normalized.parse().ok()?;
    Some(if negative { -amount } else { amount })
}

// Decide which of '.'/',' is the decimal separator and rewrite the number
// into plain "1234.56" form.
fn normalize_separators(numeric: &str) -> Option<String> {
    let last_dot = numeric.rfind('.');
    let last_comma = numeric.rfind(',');

    let decimal = match (last_dot, last_comma) {
        // Both present: the later one is the decimal separator.
        (Some(d), Some(c)) => Some(if d > c { '.' } else { ',' }),
        (Some(d), None) => single_separator_role(numeric, '.', d),
        (None, Some(c)) => single_separator_role(numeric, ',', c),
        (None, None) => None,
    };

    let mut out = String::with_capacity(numeric.len());
    for (i, c) in numeric.char_indices() {
        match c {
            '.' | ',' => {
                if Some(c) == decimal && Some(i) == numeric.rfind(c) {
                    out.push('.');
                }
                // Thousands separators are dropped.
            }
            _ => out.push(c),
        }
    }
    Some(out)
}

// One separator kind only: repeated occurrences or a trailing group of
// exactly three digits mean thousands grouping ("1,000"), otherwise it is
// the decimal point ("3.5"). A zero (or absent) integer part settles it:
// "0.999" can only be a sub-unit price, never grouping.
fn single_separator_role(numeric: &str, sep: char, last: usize) -> Option<char> {
    if numeric.matches(sep).count() > 1 {
        return None;
    }
    let head = &numeric[..last];
    if head.is_empty() || head == "0" {
        return Some(sep);
    }
    let tail = &numeric[last + 1..];
    if tail.len() == 3 && tail.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some(sep)
    }
}

fn alphabetic_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
}

// Drop HTML entities like "&#8364;" or "&euro;" that come along when the
// scraped text is raw innerHTML. Numeric entities would otherwise pollute
// the digit scan.
fn strip_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(end) = raw[i + 1..]
                .char_indices()
                .take(12)
                .take_while(|(_, c)| c.is_alphanumeric() || *c == '#' || *c == ';')
                .find(|(_, c)| *c == ';')
                .map(|(j, _)| i + 1 + j)
            {
                i = end + 1;
                continue;
            }
        }
        let c = raw[i..].chars().next().unwrap();
        out.push(c);
        i += c.len_utf8();
    }
    out
}
