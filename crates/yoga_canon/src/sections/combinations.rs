use crate::record::Combination;
use crate::resolve::{
    as_flag, as_house, as_text, first_number, first_present, first_text, string_list, FieldChain,
    Object,
};
use serde_json::Value;

const TYPE: FieldChain = &[&["type"], &["combination_type"], &["name"]];
const PRESENT: FieldChain = &[&["present"], &["is_present"], &["formed"]];
const STRENGTH_SCORE: FieldChain = &[&["strength_score"], &["strength"]];

/// `yoga_combinations` entries, renamed. Nothing is synthesised from other
/// fields.
pub fn extract_combinations(analysis: &Object) -> Option<Vec<Combination>> {
    let combinations: Vec<Combination> = analysis
        .get("yoga_combinations")?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .map(combination)
        .collect();
    if combinations.is_empty() {
        None
    } else {
        Some(combinations)
    }
}

fn combination(raw: &Object) -> Combination {
    Combination {
        combination_type: first_text(raw, TYPE).unwrap_or_default(),
        present: first_present(raw, PRESENT, as_flag).unwrap_or(false),
        effects: raw.get("effects").and_then(string_list).unwrap_or_default(),
        house: raw.get("house").and_then(as_house),
        sign: raw.get("sign").and_then(as_text),
        planets: raw.get("planets").and_then(string_list).filter(|p| !p.is_empty()),
        description: raw.get("description").and_then(as_text),
        strength_score: first_number(raw, STRENGTH_SCORE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renaming() {
        let analysis = json!({
            "yoga_combinations": [
                {
                    "combination_type": "Jupiter in 4th from Moon",
                    "is_present": true,
                    "effects": ["property"],
                    "house": "4",
                    "sign": "Cancer",
                    "strength_score": 72.5
                },
                "not an object"
            ]
        });
        let combos = extract_combinations(analysis.as_object().unwrap()).unwrap();
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].combination_type, "Jupiter in 4th from Moon");
        assert!(combos[0].present);
        assert_eq!(combos[0].house, Some(4));
        assert_eq!(combos[0].strength_score, Some(72.5));
    }

    #[test]
    fn test_empty_list_absent() {
        let analysis = json!({ "yoga_combinations": [] });
        assert_eq!(extract_combinations(analysis.as_object().unwrap()), None);
    }
}
