/*!
 * Number normalization for marker tokens.
 *
 * Script markers number their pages, panels, scenes and acts in three
 * competing styles: word form ("fourteen", "twenty-one"), roman numerals
 * ("XIV") and plain decimals ("14"). This module collapses all three to an
 * integer, returning the sentinel `0` when no rule matches. Callers treat
 * `0` as "unknown" and flag or drop the marker rather than inventing a
 * number.
 */

use std::collections::HashMap;
use std::sync::LazyLock;

/// Value cap for roman numerals in stage-play act markers (I through V).
pub const ROMAN_CAP_ACT: u32 = 5;

/// Word-form number table, keyed by the lowercase token with hyphens and
/// spaces removed so "twenty-one", "twenty one" and "twentyone" share one
/// entry.
static WORD_VALUES: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    HashMap::from([
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("twentyone", 21),
        ("twentytwo", 22),
        ("twentythree", 23),
        ("twentyfour", 24),
        ("twentyfive", 25),
        ("twentysix", 26),
        ("twentyseven", 27),
        ("twentyeight", 28),
    ])
});

/// Normalize a word-form, roman-numeral or decimal token to an integer.
///
/// Rule order: word table, then roman numerals built from I/V/X, then a
/// decimal parse. Unparseable tokens yield `0`, never an error.
pub fn normalize_number(token: &str) -> u32 {
    normalize_number_capped(token, u32::MAX)
}

/// Like [`normalize_number`] but rejecting roman numerals above `roman_cap`
/// (stage-play act markers only accept I through V).
pub fn normalize_number_capped(token: &str, roman_cap: u32) -> u32 {
    let key: String = token
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if key.is_empty() {
        return 0;
    }

    if let Some(&value) = WORD_VALUES.get(key.as_str()) {
        return value;
    }

    if let Some(value) = parse_roman(&key) {
        return if value <= roman_cap { value } else { 0 };
    }

    key.parse::<u32>().unwrap_or(0)
}

/// Parse a roman numeral composed of the symbols I, V and X (covering
/// values up to XXXIX). Returns `None` when any other character appears.
fn parse_roman(token: &str) -> Option<u32> {
    let values: Vec<u32> = token
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<u32>>>()?;

    if values.is_empty() {
        return None;
    }

    // Subtractive notation: a symbol smaller than its successor is negated.
    // Signed accumulation so a leading subtractive pair ("IV", "IX") works.
    let mut total = 0i64;
    for (i, &value) in values.iter().enumerate() {
        if values.get(i + 1).is_some_and(|&next| next > value) {
            total -= i64::from(value);
        } else {
            total += i64::from(value);
        }
    }

    u32::try_from(total).ok().filter(|&v| v > 0)
}
