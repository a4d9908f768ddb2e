use crate::record::{Remedies, RemedyCategory};
use crate::resolve::{as_text, humanize, non_empty_list, Object};
use crate::sections::Root;
use serde_json::Value;

/// Flat list locations, highest priority first.
const LIST_LOCATIONS: &[(Root, &str)] = &[
    (Root::Analysis, "remedies"),
    (Root::Analysis, "recommended_remedies"),
    (Root::Payload, "remedies"),
    (Root::Payload, "recommendations"),
];

const CATEGORIZED_LOCATION: &str = "remedial_measures";

pub fn extract_remedies(payload: &Object, analysis: Option<&Object>) -> Option<Remedies> {
    let from_lists = LIST_LOCATIONS.iter().find_map(|(root, key)| {
        root.pick(payload, analysis)?
            .get(*key)
            .and_then(Value::as_array)
            .and_then(|items| remedy_list(items))
    });
    if from_lists.is_some() {
        return from_lists;
    }

    let measures = analysis?.get(CATEGORIZED_LOCATION)?.as_object()?;
    let groups: Vec<RemedyCategory> = measures
        .iter()
        .filter_map(|(key, items)| {
            Some(RemedyCategory {
                category: humanize(key),
                items: non_empty_list(items)?,
            })
        })
        .collect();
    if groups.is_empty() {
        None
    } else {
        Some(Remedies::Categorized(groups))
    }
}

/// Keeps whichever shape the list already has. A list holding
/// `{category, items}` objects stays categorized; otherwise its strings form
/// a flat list.
fn remedy_list(items: &[Value]) -> Option<Remedies> {
    let categorized = items
        .iter()
        .any(|item| item.as_object().is_some_and(|o| o.contains_key("category")));

    let remedies = if categorized {
        let groups: Vec<RemedyCategory> = items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|group| {
                Some(RemedyCategory {
                    category: group.get("category").and_then(as_text)?,
                    items: group.get("items").and_then(non_empty_list)?,
                })
            })
            .collect();
        Remedies::Categorized(groups)
    } else {
        Remedies::Flat(items.iter().filter_map(as_text).collect())
    };

    if remedies.is_empty() {
        None
    } else {
        Some(remedies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_analysis_list_beats_payload_list() {
        let payload = object(json!({ "remedies": ["payload"] }));
        let analysis = object(json!({ "recommended_remedies": ["analysis"] }));
        assert_eq!(
            extract_remedies(&payload, Some(&analysis)),
            Some(Remedies::Flat(vec!["analysis".to_string()]))
        );
    }

    #[test]
    fn test_empty_list_falls_through() {
        let payload = object(json!({ "recommendations": ["donate on Thursdays"] }));
        let analysis = object(json!({ "remedies": [] }));
        assert_eq!(
            extract_remedies(&payload, Some(&analysis)),
            Some(Remedies::Flat(vec!["donate on Thursdays".to_string()]))
        );
    }

    #[test]
    fn test_categorized_object_humanized() {
        let analysis = object(json!({
            "remedial_measures": {
                "gemstone_remedies": ["Yellow sapphire"],
                "mantra_remedies": [],
                "charity": "Feed cows"
            }
        }));
        let remedies = extract_remedies(&Object::new(), Some(&analysis)).unwrap();
        assert_eq!(
            remedies,
            Remedies::Categorized(vec![
                RemedyCategory {
                    category: "Gemstone Remedies".to_string(),
                    items: vec!["Yellow sapphire".to_string()],
                },
                RemedyCategory {
                    category: "Charity".to_string(),
                    items: vec!["Feed cows".to_string()],
                },
            ])
        );
    }

    #[test]
    fn test_payload_list_without_analysis() {
        let payload = object(json!({ "remedies": ["x"] }));
        assert_eq!(
            extract_remedies(&payload, None),
            Some(Remedies::Flat(vec!["x".to_string()]))
        );
    }
}
