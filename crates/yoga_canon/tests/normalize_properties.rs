use serde_json::{json, Value};
use yoga_canon::{
    normalize, normalize_str, CanonError, CanonicalYoga, Degree, Remedies, ANALYSIS_KEY_PATTERNS,
};

const FIXTURES: &[&str] = &[
    include_str!("fixtures/gaja_kesari_comprehensive.json"),
    include_str!("fixtures/budhaditya_yoga_comprehensive.json"),
    include_str!("fixtures/dhana_yoga_analysis.json"),
    include_str!("fixtures/vipreet_raj_yoga_permutations.json"),
    include_str!("fixtures/raj_yogas.json"),
];

fn parsed(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_envelope_levels_are_equivalent() {
    let flat = json!({
        "ascendant": "Aries",
        "kemadruma_yoga_analysis": { "is_present": false, "summary": "Moon has neighbours" }
    });
    let single = json!({ "success": true, "data": flat.clone() });
    let double = json!({ "data": { "data": flat.clone() } });

    let expected = normalize(&flat);
    assert_eq!(normalize(&single), expected);
    assert_eq!(normalize(&double), expected);
    assert_eq!(expected.header.unwrap().title, "Kemadruma Yoga");
}

#[test]
fn test_unrecognized_payload_is_kept_whole() {
    let raw = json!({
        "horoscope": { "lucky_number": 7 },
        "note": "free text"
    });
    let record = normalize(&raw);

    assert!(!record.is_recognized());
    assert!(record.header.is_none());
    assert!(record.meta.is_none());
    assert!(record.strength.is_none());
    assert!(record.renderable_sections().is_empty());
    assert_eq!(Value::Object(record.passthrough.unwrap()), raw);
}

#[test]
fn test_non_object_input_is_empty() {
    assert_eq!(normalize(&json!([1, 2, 3])), CanonicalYoga::default());
    assert_eq!(normalize(&json!("text")), CanonicalYoga::default());
    assert_eq!(normalize(&Value::Null), CanonicalYoga::default());
}

#[test]
fn test_unrecognized_keeps_chart_sections() {
    let record = normalize(&json!({
        "ascendant": { "sign": "Libra", "degree": 9.5 },
        "house_signs": { "1": "Libra" },
        "extra": true
    }));
    assert!(record.header.is_none());
    assert_eq!(record.meta.unwrap().ascendant_sign.as_deref(), Some("Libra"));
    assert_eq!(record.house_placements.unwrap().len(), 1);
    assert_eq!(record.passthrough.unwrap().len(), 1);
}

#[test]
fn test_ascendant_source_priority() {
    let record = normalize(&json!({
        "ascendant_sign": "Gemini",
        "ascendant_degree": 3.0,
        "lagna": { "sign": "Cancer", "degree": 14.0 },
        "chart_info": { "ascendant": { "sign": "Leo", "degree": "22°10'" } },
        "sunapha_yoga_analysis": { "is_present": true }
    }));
    let meta = record.meta.unwrap();
    assert_eq!(meta.ascendant_sign.as_deref(), Some("Leo"));
    assert_eq!(meta.ascendant_degree, Some(Degree::Formatted("22°10'".to_string())));
}

#[test]
fn test_earlier_pattern_beats_document_order() {
    let record = normalize(&json!({
        "ruchaka_analysis": { "is_present": false },
        "ruchaka_yoga_comprehensive": { "is_present": true }
    }));
    let header = record.header.unwrap();
    assert_eq!(header.title, "Ruchaka Yoga");
    assert!(header.is_present);
    // The losing candidate still matches a name pattern, so it is not passthrough.
    assert!(record.passthrough.is_none());
}

#[test]
fn test_marker_fallback_locates_unpatterned_key() {
    let record = normalize(&json!({
        "name": "Ravi",
        "shasha": { "is_present": true, "strength": "Medium" },
        "trace_id": "abc"
    }));
    let header = record.header.unwrap();
    assert_eq!(header.title, "Shasha");
    assert_eq!(header.strength.as_deref(), Some("Medium"));
    let passthrough = record.passthrough.unwrap();
    assert_eq!(passthrough.keys().collect::<Vec<_>>(), vec!["trace_id"]);
}

#[test]
fn test_remedy_shapes_are_preserved() {
    let categorized = normalize(&json!({
        "malavya_yoga_analysis": {
            "is_present": true,
            "remedies": [
                { "category": "Gemstone", "items": ["Diamond"] },
                { "category": "Empty", "items": [] }
            ]
        }
    }));
    match categorized.remedies.unwrap() {
        Remedies::Categorized(groups) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].items, vec!["Diamond"]);
        }
        other => panic!("expected categorized remedies, got {other:?}"),
    }

    let flat = normalize(&json!({
        "malavya_yoga_analysis": { "is_present": true, "remedies": ["Wear white", "Fast on Fridays"] }
    }));
    assert_eq!(
        flat.remedies,
        Some(Remedies::Flat(vec!["Wear white".to_string(), "Fast on Fridays".to_string()]))
    );
}

#[test]
fn test_conditions_merge_all_sources_without_duplicates() {
    let record = normalize(&json!({
        "hamsa_yoga_analysis": {
            "is_present": true,
            "conditions": {
                "met": ["Jupiter in kendra"],
                "failed": ["Jupiter combust"]
            },
            "planetary_conditions": [
                { "planet": "Jupiter", "sign": "Cancer", "house": 4, "condition_met": true },
                { "planet": "Jupiter", "sign": "Cancer", "house": 4, "condition_met": true }
            ],
            "rule_evaluation": {
                "own_or_exalted": { "met": false, "details": "Jupiter exalted but combust" },
                "jupiter_combust": false
            }
        }
    }));
    let conditions = record.conditions.unwrap();
    assert_eq!(conditions.met, vec!["Jupiter in kendra", "Jupiter in Cancer (House 4)"]);
    assert_eq!(
        conditions.failed,
        vec![
            "Jupiter combust",
            "Own Or Exalted: Jupiter exalted but combust",
            "Jupiter Combust",
        ]
    );
}

#[test]
fn test_passthrough_is_disjoint_from_claimed_keys() {
    for json in FIXTURES {
        let raw = parsed(json);
        let record = normalize(&raw);
        let Some(passthrough) = record.passthrough else {
            continue;
        };
        for key in passthrough.keys() {
            assert!(
                !ANALYSIS_KEY_PATTERNS.iter().any(|pattern| pattern.matches(key)),
                "{key} matches an analysis pattern"
            );
            assert_ne!(key, "raj_yogas");
            assert!(!key.ends_with("_details"), "{key} is a planet detail key");
        }
    }
}

#[test]
fn test_normalize_str_matches_normalize() {
    for json in FIXTURES {
        assert_eq!(normalize_str(json).unwrap(), normalize(&parsed(json)));
    }
}

#[test]
fn test_normalize_str_rejects_invalid_json() {
    let err = normalize_str("{ not json").unwrap_err();
    assert!(matches!(err, CanonError::InvalidJson(_)));
}

#[test]
fn test_empty_raj_list_is_not_context() {
    let record = normalize(&json!({ "raj_yogas": { "total_count": 0, "yogas": [] } }));
    assert!(record.header.is_none());
    assert!(record.raj_yoga_set.is_none());
}

#[test]
fn test_normalization_is_deterministic() {
    for json in FIXTURES {
        let raw = parsed(json);
        let first = serde_json::to_string(&normalize(&raw)).unwrap();
        let second = serde_json::to_string(&normalize(&raw)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_flat_string_matching_derived_item_listed_once() {
    let record = normalize(&json!({
        "hamsa_yoga_analysis": {
            "is_present": true,
            "conditions": {
                "met": ["Jupiter in Cancer (House 4) - exalted"],
                "failed": []
            },
            "planetary_conditions": [
                { "planet": "Jupiter", "sign": "Cancer", "house": 4, "role": "exalted", "condition_met": true }
            ]
        }
    }));
    let conditions = record.conditions.unwrap();
    assert_eq!(conditions.met, vec!["Jupiter in Cancer (House 4) - exalted"]);
    assert!(conditions.failed.is_empty());
}

#[test]
fn test_flat_pair_plus_one_item_each_way() {
    let record = normalize(&json!({
        "hamsa_yoga_analysis": {
            "is_present": true,
            "conditions": { "met": ["a"], "failed": ["b"] },
            "planetary_conditions": [
                { "planet": "Jupiter", "condition_met": true },
                { "planet": "Moon", "condition_met": false }
            ]
        }
    }));
    let conditions = record.conditions.unwrap();
    assert_eq!(conditions.met, vec!["a", "Jupiter"]);
    assert_eq!(conditions.failed, vec!["b", "Moon"]);
}

#[test]
fn test_empty_effects_source_leaves_section_absent() {
    let record = normalize(&json!({
        "dhana_yoga_analysis": { "is_present": true, "comprehensive_effects": {} }
    }));
    assert!(record.effects.is_none());
    assert_eq!(record.renderable_sections(), vec![yoga_canon::SectionKey::Header]);
}

#[test]
fn test_raj_list_of_names_is_present() {
    let record = normalize(&json!({ "raj_yogas": ["Kendra-Trikona", "Dharma-Karmadhipati"] }));
    let header = record.header.unwrap();
    assert_eq!(header.title, "Raj Yogas");
    assert!(header.is_present);
    assert_eq!(header.total_count, Some(2));
    let set = record.raj_yoga_set.unwrap();
    assert_eq!(set.yogas[1].yoga_type, "Dharma-Karmadhipati");
}

#[test]
fn test_non_finite_scores_are_dropped() {
    let record = normalize(&json!({
        "sasa_yoga_analysis": { "is_present": true, "strength": "Strong", "strength_score": "NaN" }
    }));
    assert_eq!(record.header.as_ref().unwrap().strength_score, None);
    assert_eq!(record.strength.as_ref().unwrap().final_score, 0.0);

    let text = serde_json::to_string(&record).unwrap();
    let back: CanonicalYoga = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
}
