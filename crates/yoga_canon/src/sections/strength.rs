use crate::record::{RajYogaSet, Strength};
use crate::resolve::{first_number, first_present, first_text, non_empty_list, FieldChain, Object};

const BASE: FieldChain = &[
    &["base_strength"],
    &["strength_analysis", "base_strength"],
    &["strength_breakdown", "base"],
];
const PENALTY: FieldChain = &[
    &["penalty"],
    &["strength_analysis", "penalty"],
    &["strength_breakdown", "penalty"],
];
const FINAL: FieldChain = &[
    &["final_strength"],
    &["strength_score"],
    &["strength_analysis", "final_score"],
    &["strength_assessment", "score"],
];
const LABEL: FieldChain = &[
    &["strength"],
    &["overall_strength"],
    &["strength_analysis", "strength_label"],
    &["strength_breakdown", "label"],
];
const OVERALL_RATING: FieldChain = &[&["overall_rating"], &["strength_analysis", "overall_rating"]];
const FUNCTIONAL_STATUS: FieldChain = &[
    &["functional_status"],
    &["strength_analysis", "functional_status"],
];
const SPECIAL_FEATURES: FieldChain = &[
    &["special_features"],
    &["strength_analysis", "special_features"],
];

pub fn extract_strength(analysis: Option<&Object>, raj: Option<&RajYogaSet>) -> Option<Strength> {
    let base = analysis.and_then(|a| first_number(a, BASE));
    let penalty = analysis.and_then(|a| first_number(a, PENALTY));
    let label = analysis.and_then(|a| first_text(a, LABEL));
    let direct_final = analysis.and_then(|a| first_number(a, FINAL));
    let raj_average = raj.map(|r| r.average_strength);

    if base.is_none() && penalty.is_none() && label.is_none() && direct_final.is_none() && raj_average.is_none() {
        return None;
    }

    Some(Strength {
        base,
        penalty,
        final_score: direct_final.or(raj_average).or(base).unwrap_or(0.0),
        label,
        overall_rating: analysis.and_then(|a| first_text(a, OVERALL_RATING)),
        functional_status: analysis.and_then(|a| first_text(a, FUNCTIONAL_STATUS)),
        special_features: analysis.and_then(|a| first_present(a, SPECIAL_FEATURES, non_empty_list)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_final_falls_back_to_base() {
        let analysis = json!({ "strength_analysis": { "base_strength": 60, "penalty": 10 } });
        let strength = extract_strength(analysis.as_object(), None).unwrap();
        assert_eq!(strength.base, Some(60.0));
        assert_eq!(strength.penalty, Some(10.0));
        assert_eq!(strength.final_score, 60.0);
    }

    #[test]
    fn test_final_chain_order() {
        let analysis = json!({
            "strength_score": 40,
            "final_strength": 55,
            "strength_assessment": { "score": 10 }
        });
        let strength = extract_strength(analysis.as_object(), None).unwrap();
        assert_eq!(strength.final_score, 55.0);
    }

    #[test]
    fn test_label_only_defaults_final_to_zero() {
        let analysis = json!({ "strength": "Weak" });
        let strength = extract_strength(analysis.as_object(), None).unwrap();
        assert_eq!(strength.label.as_deref(), Some("Weak"));
        assert_eq!(strength.final_score, 0.0);
    }

    #[test]
    fn test_nothing_resolved_is_absent() {
        let analysis = json!({ "summary": "Formed" });
        assert_eq!(extract_strength(analysis.as_object(), None), None);
    }
}
