//! Technical notes.
//!
//! Scalar fields come from the first notes-like object found (objects are
//! not merged field by field). Rule explanations are concatenated from
//! several sources in a fixed order: classical rule pairs, coverage list,
//! fixes list, interpretation guide pairs.

use crate::record::{Meta, Technical};
use crate::resolve::{as_text, key_value_lines, string_list, Object};
use crate::sections::Root;
use serde_json::Value;

const NOTES_LOCATIONS: &[(Root, &str)] = &[
    (Root::Analysis, "technical_notes"),
    (Root::Payload, "technical_notes"),
    (Root::Payload, "calculation_notes"),
    (Root::Analysis, "calculation_details"),
    (Root::Payload, "methodology_notes"),
    (Root::Analysis, "technical_details"),
];

pub fn extract_technical(
    payload: &Object,
    analysis: Option<&Object>,
    meta: Option<&Meta>,
) -> Option<Technical> {
    let notes = NOTES_LOCATIONS.iter().find_map(|(root, key)| {
        root.pick(payload, analysis)?.get(*key)?.as_object()
    });

    let mut rules = Vec::new();
    if let Some(classical) = analysis.and_then(|a| a.get("classical_rules")) {
        rules.extend(rule_pairs(classical));
    }
    if let Some(notes) = notes {
        for list_key in ["comprehensive_coverage", "fixes_applied"] {
            if let Some(items) = notes.get(list_key).and_then(string_list) {
                rules.extend(items);
            }
        }
    }
    if let Some(guide) = analysis
        .and_then(|a| a.get("interpretation_guide"))
        .and_then(Value::as_object)
    {
        rules.extend(key_value_lines(guide));
    }

    if notes.is_none() && rules.is_empty() {
        return None;
    }

    let scalar = |key: &str| notes.and_then(|n| n.get(key)).and_then(as_text);
    let technical = Technical {
        ayanamsa: meta.and_then(|m| m.ayanamsa.clone()),
        house_system: meta.and_then(|m| m.house_system.clone()),
        chart_type: meta.and_then(|m| m.chart_type.clone()),
        calculation_method: scalar("calculation_method"),
        coordinate_system: scalar("coordinate_system"),
        methodology: scalar("methodology"),
        rules,
    };
    if technical.is_empty() {
        None
    } else {
        Some(technical)
    }
}

/// `{ rule: source }` maps, `[{ rule, source }]` lists, or plain strings.
fn rule_pairs(classical: &Value) -> Vec<String> {
    match classical {
        Value::Object(pairs) => key_value_lines(pairs),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(pair) => {
                    let rule = pair.get("rule").and_then(as_text)?;
                    Some(match pair.get("source").and_then(as_text) {
                        Some(source) => format!("{rule}: {source}"),
                        None => rule,
                    })
                }
                other => as_text(other),
            })
            .collect(),
        other => as_text(other).into_iter().collect(),
    }
}
