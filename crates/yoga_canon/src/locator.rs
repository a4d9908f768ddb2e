//! Primary-analysis location.
//!
//! Finds the one sub-object carrying the yoga verdict. Key name patterns are
//! tried first, in list order; if none match, a marker-field scan over the
//! remaining keys is used. The raj yoga list is probed independently.

use crate::keys::{
    is_known_non_analysis_key, is_planet_detail_key, ANALYSIS_MARKER_FIELDS, RAJ_YOGA_KEY,
};
use crate::resolve::Object;
use serde_json::Value;

/// Name pattern for a primary-analysis key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    Affixed {
        prefix: &'static str,
        suffix: &'static str,
    },
    Suffix(&'static str),
}

impl KeyPattern {
    pub fn matches(&self, key: &str) -> bool {
        match *self {
            KeyPattern::Affixed { prefix, suffix } => {
                key.len() > prefix.len() + suffix.len()
                    && key.starts_with(prefix)
                    && key.ends_with(suffix)
            }
            KeyPattern::Suffix(suffix) => key.len() > suffix.len() && key.ends_with(suffix),
        }
    }
}

/// Ordered: an earlier pattern matching any key beats every later pattern.
pub const ANALYSIS_KEY_PATTERNS: &[KeyPattern] = &[
    KeyPattern::Affixed {
        prefix: "comprehensive_",
        suffix: "_analysis",
    },
    KeyPattern::Suffix("_yoga_comprehensive"),
    KeyPattern::Suffix("_yoga_analysis"),
    KeyPattern::Affixed {
        prefix: "traditional_",
        suffix: "_permutations",
    },
    KeyPattern::Suffix("_analysis"),
];

pub fn matches_any_pattern(key: &str) -> bool {
    ANALYSIS_KEY_PATTERNS.iter().any(|pattern| pattern.matches(key))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryAnalysis<'a> {
    pub key: &'a str,
    pub object: &'a Object,
}

/// Everything the locator found in one payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Located<'a> {
    pub primary: Option<PrimaryAnalysis<'a>>,
    /// Value under the raj yoga key, set only when it holds a non-empty list.
    pub raj_yogas: Option<&'a Value>,
}

impl<'a> Located<'a> {
    /// No verdict-bearing content at all.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.raj_yogas.is_none()
    }

    pub fn analysis(&self) -> Option<&'a Object> {
        self.primary.map(|p| p.object)
    }

    /// Key the display name is derived from.
    pub fn display_key(&self) -> Option<&'a str> {
        match (self.primary, self.raj_yogas) {
            (Some(primary), _) => Some(primary.key),
            (None, Some(_)) => Some(RAJ_YOGA_KEY),
            (None, None) => None,
        }
    }
}

pub fn locate(payload: &Object) -> Located<'_> {
    let primary = locate_by_pattern(payload).or_else(|| locate_by_markers(payload));
    match primary {
        Some(found) => log::debug!("primary analysis located at key `{}`", found.key),
        None => log::debug!("no primary analysis among {} top-level keys", payload.len()),
    }

    let raj_yogas = payload
        .get(RAJ_YOGA_KEY)
        .filter(|value| raj_yoga_entries(value).is_some());
    if raj_yogas.is_some() {
        log::trace!("raj yoga list present under `{}`", RAJ_YOGA_KEY);
    }

    Located { primary, raj_yogas }
}

fn locate_by_pattern(payload: &Object) -> Option<PrimaryAnalysis<'_>> {
    ANALYSIS_KEY_PATTERNS.iter().find_map(|pattern| {
        payload.iter().find_map(|(key, value)| {
            let object = value.as_object()?;
            pattern.matches(key).then_some(PrimaryAnalysis {
                key: key.as_str(),
                object,
            })
        })
    })
}

fn locate_by_markers(payload: &Object) -> Option<PrimaryAnalysis<'_>> {
    payload
        .iter()
        .filter(|(key, _)| {
            !is_known_non_analysis_key(key) && !is_planet_detail_key(key) && key.as_str() != RAJ_YOGA_KEY
        })
        .find_map(|(key, value)| {
            let object = value.as_object()?;
            ANALYSIS_MARKER_FIELDS
                .iter()
                .any(|marker| object.contains_key(*marker))
                .then_some(PrimaryAnalysis {
                    key: key.as_str(),
                    object,
                })
        })
}

/// Entries of a raj yoga list: a bare array, or an object with a `yogas`
/// array. A list counts only when it holds at least one usable entry (an
/// object, or a bare yoga name).
pub fn raj_yoga_entries(value: &Value) -> Option<&Vec<Value>> {
    let entries = match value {
        Value::Array(items) => items,
        Value::Object(object) => object.get("yogas")?.as_array()?,
        _ => return None,
    };
    if entries.iter().any(is_raj_entry) {
        Some(entries)
    } else {
        None
    }
}

fn is_raj_entry(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::String(name) => !name.trim().is_empty(),
        _ => false,
    }
}
