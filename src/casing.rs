// src/casing.rs

//! Key-case translation between snake_case and camelCase
//!
//! The Nexus REST API speaks camelCase while resource state is kept in
//! snake_case internally. These helpers rewrite the top-level keys of a
//! JSON object in either direction; values are carried over untouched.
//!
//! Both conversions are best-effort heuristics tuned to the key vocabulary
//! the Nexus API actually emits. They are not mutually inverse for
//! arbitrary strings (acronym runs and leading underscores lose
//! information), which is fine for the fixed set of keys we deal with.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

// Splits an uppercase run from a following capitalized word: HTTPStatus -> HTTP_Status
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

// Splits a lowercase letter or digit from a following uppercase: fooBar -> foo_Bar
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// Convert a single camelCase or PascalCase identifier to snake_case
pub fn snake_case(key: &str) -> String {
    let key = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let key = WORD_BOUNDARY.replace_all(&key, "${1}_${2}");
    key.to_lowercase()
}

/// Convert a single snake_case identifier to camelCase
///
/// Underscore runs are collapsed and the following letter is uppercased;
/// the first letter (after any leading whitespace) is forced to lowercase.
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    // Lowercase the first letter, skipping leading whitespace
    let mut result = String::with_capacity(out.len());
    let mut at_start = true;
    for c in out.chars() {
        if at_start && c.is_whitespace() {
            result.push(c);
        } else if at_start {
            result.extend(c.to_lowercase());
            at_start = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Rewrite the top-level keys of a JSON object to snake_case
pub fn keys_to_snake_case(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (snake_case(k), v.clone()))
        .collect()
}

/// Rewrite the top-level keys of a JSON object to camelCase
pub fn keys_to_camel_case(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (camel_case(k), v.clone()))
        .collect()
}
