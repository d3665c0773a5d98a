//! Locale-style string ordering for column paths
//!
//! Approximates the root collation order: whitespace, then punctuation and
//! symbols, then digits, then letters. Letters compare case-insensitively
//! first; lowercase sorts before uppercase only when the strings are otherwise
//! equal. Code point order breaks any remaining tie so the order is total.

use std::cmp::Ordering;

/// Root-collation order of ASCII punctuation and symbols
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Compare two strings the way a locale-aware sort would
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| tertiary_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let left = a.chars().map(primary_weight);
    let right = b.chars().map(primary_weight);
    left.cmp(right)
}

fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    let left = a.chars().map(|c| c.is_uppercase());
    let right = b.chars().map(|c| c.is_uppercase());
    left.cmp(right)
}

/// (group, rank) where group orders the character classes
fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        return (0, c as u32);
    }
    if let Some(pos) = PUNCTUATION_ORDER.find(c) {
        return (1, pos as u32);
    }
    if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_control()) {
        return (2, c as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (3, digit);
    }
    if c.is_alphabetic() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        return (4, folded as u32);
    }
    (5, c as u32)
}
