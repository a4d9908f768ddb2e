//! Cancellation factors and dosha severity.

use crate::record::{CancellationFactor, DoshaSeverity};
use crate::resolve::{as_flag, as_text, first_present, first_text, FieldChain, Object};
use serde_json::Value;

const FACTOR: FieldChain = &[&["factor"], &["name"], &["type"]];
const DESCRIPTION: FieldChain = &[&["description"], &["details"]];
const VERIFIED: FieldChain = &[&["verified"], &["is_verified"], &["applies"]];

pub fn extract_cancellation_factors(analysis: &Object) -> Option<Vec<CancellationFactor>> {
    let factors: Vec<CancellationFactor> = analysis
        .get("cancellation_factors")?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|raw| {
            Some(CancellationFactor {
                factor: first_text(raw, FACTOR)?,
                description: first_text(raw, DESCRIPTION).unwrap_or_default(),
                verified: first_present(raw, VERIFIED, as_flag).unwrap_or(false),
                strength: raw.get("strength").and_then(as_text),
                impact: raw.get("impact").and_then(as_text),
            })
        })
        .collect();
    if factors.is_empty() {
        None
    } else {
        Some(factors)
    }
}

/// Top-level pair first, then the pair nested in the analysis object.
pub fn extract_dosha_severity(payload: &Object, analysis: Option<&Object>) -> Option<DoshaSeverity> {
    severity_pair(payload, "dosha_severity")
        .or_else(|| analysis.and_then(|a| severity_pair(a, "severity")))
}

fn severity_pair(root: &Object, level_key: &str) -> Option<DoshaSeverity> {
    let level = root.get(level_key).and_then(as_text)?;
    Some(DoshaSeverity {
        level,
        description: root.get("severity_description").and_then(as_text),
    })
}
