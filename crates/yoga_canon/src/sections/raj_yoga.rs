//! Raj yoga list section.

use crate::locator::{raj_yoga_entries, Located};
use crate::record::{RajYogaEntry, RajYogaSet};
use crate::resolve::{
    as_count, as_house, as_text, first_number, first_present, first_text, string_list, FieldChain, Object,
};
use serde_json::Value;
use std::collections::BTreeMap;

const UNKNOWN_LABEL: &str = "Unknown";

const TOTAL_COUNT: FieldChain = &[&["total_count"], &["total_raj_yogas"]];
const AVERAGE_STRENGTH: FieldChain = &[&["average_strength"], &["avg_strength"]];

const ENTRY_TYPE: FieldChain = &[&["type"], &["yoga_type"], &["name"]];
const ENTRY_STRENGTH: FieldChain = &[&["strength"], &["strength_score"]];
const ENTRY_PRIORITY: FieldChain = &[&["priority"], &["priority_level"]];
const ENTRY_CANCELLATIONS: FieldChain = &[&["cancellations"], &["cancellation_factors"]];

pub fn extract_raj_yoga_set(located: &Located<'_>) -> Option<RajYogaSet> {
    let value = located.raj_yogas?;
    let yogas: Vec<RajYogaEntry> = raj_yoga_entries(value)?
        .iter()
        .filter_map(|item| match item {
            Value::Object(raw) => Some(entry(raw)),
            Value::String(_) => as_text(item).map(named_entry),
            _ => None,
        })
        .collect();
    if yogas.is_empty() {
        return None;
    }

    let summary = value.as_object();
    let total_count = summary
        .and_then(|s| first_present(s, TOTAL_COUNT, as_count))
        .unwrap_or(yogas.len() as u64);
    let average_strength = summary
        .and_then(|s| first_number(s, AVERAGE_STRENGTH))
        .unwrap_or(0.0);
    let type_distribution = summary
        .and_then(|s| s.get("type_distribution"))
        .and_then(Value::as_object)
        .map(|distribution| {
            distribution
                .iter()
                .filter_map(|(kind, count)| as_count(count).map(|n| (kind.clone(), n)))
                .collect::<BTreeMap<_, _>>()
        })
        .filter(|distribution| !distribution.is_empty());

    Some(RajYogaSet {
        total_count,
        average_strength,
        type_distribution,
        yogas,
    })
}

/// A bare string entry is the yoga's type; everything else defaults.
fn named_entry(yoga_type: String) -> RajYogaEntry {
    RajYogaEntry {
        yoga_type,
        planets: Vec::new(),
        houses: Vec::new(),
        strength: 0.0,
        priority: UNKNOWN_LABEL.to_string(),
        cancellations: Vec::new(),
    }
}

fn entry(raw: &Object) -> RajYogaEntry {
    RajYogaEntry {
        yoga_type: first_text(raw, ENTRY_TYPE).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        planets: raw.get("planets").and_then(string_list).unwrap_or_default(),
        houses: raw
            .get("houses")
            .and_then(Value::as_array)
            .map(|houses| houses.iter().filter_map(as_house).collect())
            .unwrap_or_default(),
        strength: first_number(raw, ENTRY_STRENGTH).unwrap_or(0.0),
        priority: first_text(raw, ENTRY_PRIORITY).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        cancellations: first_present(raw, ENTRY_CANCELLATIONS, string_list).unwrap_or_default(),
    }
}
