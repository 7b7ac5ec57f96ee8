//! Locale-aware string ordering.
//!
//! Column sorting should read like a phone book, not like a byte dump: "émile"
//! sits next to "Emile", "bob" and "Bob" sort together, and names sort after
//! numbers and punctuation. Comparison runs in three passes, each consulted
//! only when the previous one ties:
//!
//! 1. **Base letters**: NFD-decompose, drop combining marks, fold case, then
//!    order characters by class (whitespace < punctuation < symbols < digits <
//!    letters) and within a class by code point.
//! 2. **Accents**: the decomposed, case-folded strings with marks kept.
//! 3. **Case**: lowercase before uppercase, position by position.
//!
//! A final code-point comparison makes the order total, so equal results only
//! come from identical strings.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_ascii_punctuation() {
        match c {
            '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => CharClass::Symbol,
            _ => CharClass::Punctuation,
        }
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    }
}

fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (classify(c), c))
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
