//! Field resolution shared by every section extractor.
//!
//! Upstream shapes put the same value in different places. Extractors describe
//! those places as a [`FieldChain`], an ordered list of key paths, and take
//! the first one that holds a usable value. Values from two locations are
//! never merged here.

use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

/// Object keys walked from a root, e.g. `&["strength_analysis", "final_score"]`.
pub type FieldPath = &'static [&'static str];

/// Candidate paths, highest priority first.
pub type FieldChain = &'static [FieldPath];

/// Follow `path` from `root`. `null` counts as absent.
pub fn lookup<'a>(root: &'a Object, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = root.get(*first)?;
    for key in rest {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// First path in `chain` whose value survives `extract`.
pub fn first_present<'a, T, F>(root: &'a Object, chain: &[FieldPath], extract: F) -> Option<T>
where
    F: Fn(&'a Value) -> Option<T>,
{
    chain
        .iter()
        .find_map(|path| lookup(root, path).and_then(|value| extract(value)))
}

pub fn first_text(root: &Object, chain: &[FieldPath]) -> Option<String> {
    first_present(root, chain, as_text)
}

pub fn first_number(root: &Object, chain: &[FieldPath]) -> Option<f64> {
    first_present(root, chain, as_number)
}

/// Non-blank string, or a number rendered as text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number, or a string that parses as one.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "present" | "formed" => Some(true),
            "false" | "no" | "absent" | "not formed" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn as_count(value: &Value) -> Option<u64> {
    as_number(value).filter(|n| *n >= 0.0).map(|n| n as u64)
}

/// House number in 1..=12. Accepts `4`, `"4"`, `"4th"` and `"house_4"`.
pub fn as_house(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_house_label(s),
        _ => None,
    }?;
    if (1..=12).contains(&number) {
        Some(number as u8)
    } else {
        None
    }
}

pub(crate) fn parse_house_label(label: &str) -> Option<u64> {
    let trimmed = label.trim();
    let trimmed = trimmed.strip_prefix("house_").unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Array of strings (non-text items dropped) or a single string.
pub fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(as_text).collect()),
        Value::String(_) => as_text(value).map(|s| vec![s]),
        _ => None,
    }
}

/// Like [`string_list`], but an empty result counts as absent.
pub fn non_empty_list(value: &Value) -> Option<Vec<String>> {
    string_list(value).filter(|items| !items.is_empty())
}

/// `key: value` lines for every text-valued entry, in object order.
pub fn key_value_lines(object: &Object) -> Vec<String> {
    object
        .iter()
        .filter_map(|(key, value)| as_text(value).map(|text| format!("{key}: {text}")))
        .collect()
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `gemstone_remedies` -> `Gemstone Remedies`.
pub fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Push `item` unless an identical string is already present.
pub fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}
