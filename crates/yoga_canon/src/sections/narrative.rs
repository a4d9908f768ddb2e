//! Description and effects text.

use crate::record::{Description, Effects};
use crate::resolve::{as_text, first_text, lookup, non_empty_list, FieldChain, Object};
use serde_json::Value;

const DESCRIPTION_TEXT: FieldChain = &[&["description"], &["yoga_description"]];
const DESCRIPTION_EXPLANATION: FieldChain = &[
    &["explanation"],
    &["detailed_explanation"],
    &["formation_analysis", "explanation"],
];

pub const ALTERNATIVE_COMBINATIONS_CAPTION: &str = "Alternative combinations that can form this yoga";

pub fn extract_description(analysis: &Object) -> Option<Description> {
    let text = first_text(analysis, DESCRIPTION_TEXT)?;
    // Skip any candidate that would repeat the main text.
    let explanation = DESCRIPTION_EXPLANATION
        .iter()
        .filter_map(|path| lookup(analysis, path).and_then(as_text))
        .find(|candidate| *candidate != text);
    Some(Description { text, explanation })
}

/// The first effects source that yields anything wins outright; sources are
/// never merged. A source with no effects and no overall text is skipped.
pub fn extract_effects(analysis: &Object) -> Option<Effects> {
    let from_comprehensive = || {
        let bucket = analysis.get("comprehensive_effects")?.as_object()?;
        non_empty_effects(
            list_field(bucket, "specific_effects"),
            bucket.get("overall_effect").and_then(as_text),
        )
    };
    let from_strongest = || {
        let strongest = analysis.get("strongest_combination")?.as_object()?;
        non_empty_effects(
            list_field(strongest, "effects"),
            strongest.get("description").and_then(as_text),
        )
    };
    let from_combined = || {
        let combined = analysis.get("combined_influence")?.as_object()?;
        non_empty_effects(
            list_field(combined, "individual_effects"),
            combined.get("overall_influence").and_then(as_text),
        )
    };
    // The caption alone is not content; at least one alternative is needed.
    let from_alternatives = || {
        let alternatives = analysis.get("alternative_combinations")?.as_array()?;
        let specific: Vec<String> = alternatives.iter().filter_map(alternative_text).collect();
        if specific.is_empty() {
            return None;
        }
        Some(Effects {
            specific,
            overall: Some(ALTERNATIVE_COMBINATIONS_CAPTION.to_string()),
        })
    };

    from_comprehensive()
        .or_else(from_strongest)
        .or_else(from_combined)
        .or_else(from_alternatives)
}

fn non_empty_effects(specific: Vec<String>, overall: Option<String>) -> Option<Effects> {
    if specific.is_empty() && overall.is_none() {
        None
    } else {
        Some(Effects { specific, overall })
    }
}

fn list_field(object: &Object, key: &str) -> Vec<String> {
    object.get(key).and_then(non_empty_list).unwrap_or_default()
}

fn alternative_text(item: &Value) -> Option<String> {
    match item {
        Value::Object(alt) => alt
            .get("description")
            .and_then(as_text)
            .or_else(|| alt.get("type").and_then(as_text)),
        other => as_text(other),
    }
}
