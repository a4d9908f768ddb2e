//! Canonical record assembly.

use crate::envelope::unwrap_envelope;
use crate::keys::{is_known_non_analysis_key, is_planet_detail_key, RAJ_YOGA_KEY};
use crate::locator::{locate, matches_any_pattern, Located};
use crate::record::CanonicalYoga;
use crate::resolve::Object;
use crate::sections::*;
use serde_json::{Map, Value};

/// Normalize one raw upstream payload into a [`CanonicalYoga`].
///
/// Never fails. Input that matches no known shape produces a record whose
/// `header` is `None`, with its top-level keys preserved in `passthrough`.
pub fn normalize(raw: &Value) -> CanonicalYoga {
    let Some(payload) = unwrap_envelope(raw).as_object() else {
        log::debug!("payload is not a JSON object; nothing to normalize");
        return CanonicalYoga::default();
    };

    let located = locate(payload);
    let meta = extract_meta(payload);
    let planet_positions = extract_planet_positions(payload);
    let house_placements = extract_house_placements(payload);
    let passthrough = collect_passthrough(payload, &located);

    if located.is_empty() {
        log::debug!(
            "unrecognised payload shape; {} top-level keys kept in passthrough",
            passthrough.as_ref().map_or(0, Map::len)
        );
        return CanonicalYoga {
            meta,
            planet_positions,
            house_placements,
            passthrough,
            ..CanonicalYoga::default()
        };
    }

    let analysis = located.analysis();
    let raj_yoga_set = extract_raj_yoga_set(&located);

    CanonicalYoga {
        header: extract_header(&located, raj_yoga_set.as_ref()),
        description: analysis.and_then(extract_description),
        effects: analysis.and_then(extract_effects),
        strength: extract_strength(analysis, raj_yoga_set.as_ref()),
        combinations: analysis.and_then(extract_combinations),
        conditions: analysis.and_then(|a| extract_conditions(payload, a)),
        timing: analysis.and_then(extract_timing),
        remedies: extract_remedies(payload, analysis),
        cancellation_factors: analysis.and_then(extract_cancellation_factors),
        dosha_severity: extract_dosha_severity(payload, analysis),
        technical: extract_technical(payload, analysis, meta.as_ref()),
        raj_yoga_set,
        meta,
        planet_positions,
        house_placements,
        passthrough,
    }
}

/// Top-level keys no extractor reads, in input order.
fn collect_passthrough(payload: &Object, located: &Located<'_>) -> Option<Map<String, Value>> {
    let primary_key = located.primary.map(|p| p.key);
    let unclaimed: Map<String, Value> = payload
        .iter()
        .filter(|(key, _)| {
            let key = key.as_str();
            !is_known_non_analysis_key(key)
                && !is_planet_detail_key(key)
                && Some(key) != primary_key
                && !matches_any_pattern(key)
                && key != RAJ_YOGA_KEY
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if unclaimed.is_empty() {
        None
    } else {
        Some(unclaimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_input() {
        assert_eq!(normalize(&json!([1, 2, 3])), CanonicalYoga::default());
        assert_eq!(normalize(&Value::Null), CanonicalYoga::default());
    }

    #[test]
    fn test_passthrough_excludes_claimed_keys() {
        let raw = json!({
            "dhana_yoga_analysis": { "is_present": true },
            "lakshmi_yoga_analysis": { "is_present": false },
            "jupiter_details": { "sign": "Cancer" },
            "chart_info": {},
            "raj_yogas": [],
            "request_id": "abc"
        });
        let record = normalize(&raw);
        let passthrough = record.passthrough.unwrap();
        assert_eq!(passthrough.keys().collect::<Vec<_>>(), vec!["request_id"]);
    }

    #[test]
    fn test_top_level_sections_without_analysis() {
        let raw = json!({
            "ascendant": "Scorpio",
            "house_signs": { "1": "Scorpio" },
            "remedies": ["not shown without a verdict"]
        });
        let record = normalize(&raw);
        assert!(record.header.is_none());
        assert!(record.remedies.is_none());
        assert_eq!(record.meta.unwrap().ascendant_sign.as_deref(), Some("Scorpio"));
        assert_eq!(record.house_placements.unwrap().len(), 1);
        assert!(record.passthrough.is_none());
    }
}
