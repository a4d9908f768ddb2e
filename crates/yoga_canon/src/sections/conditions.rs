//! Conditions met / failed.
//!
//! Unlike most sections this one merges three independently shaped sources:
//! a flat met/failed pair, a per-planet array with a `condition_met` flag, and
//! a rule-keyed map. Derived strings are de-duplicated against what is
//! already listed.

use crate::record::Conditions;
use crate::resolve::{
    as_flag, as_house, as_text, first_present, humanize, push_unique, string_list, FieldChain,
    Object,
};
use serde_json::Value;

const ITEM_FLAG: FieldChain = &[&["condition_met"], &["met"], &["satisfied"]];
const RULE_FLAG: FieldChain = &[&["met"], &["satisfied"], &["condition_met"]];
const RULE_DETAILS: FieldChain = &[&["details"], &["description"], &["explanation"]];

pub const RECOMMENDATION_LABEL: &str = "Recommendation";

pub fn extract_conditions(payload: &Object, analysis: &Object) -> Option<Conditions> {
    let mut conditions = flat_pair(analysis);

    if let Some(items) = analysis.get("planetary_conditions").and_then(Value::as_array) {
        for item in items.iter().filter_map(Value::as_object) {
            let Some(met) = first_present(item, ITEM_FLAG, as_flag) else {
                continue;
            };
            if let Some(line) = describe_item(item) {
                push_by_flag(&mut conditions, met, line);
            }
        }
    }

    if let Some(rules) = analysis.get("rule_evaluation").and_then(Value::as_object) {
        for (rule, outcome) in rules {
            let (met, details) = match outcome {
                Value::Object(fields) => match first_present(fields, RULE_FLAG, as_flag) {
                    Some(met) => (met, first_present(fields, RULE_DETAILS, as_text)),
                    None => continue,
                },
                other => match as_flag(other) {
                    Some(met) => (met, None),
                    None => continue,
                },
            };
            let line = match details {
                Some(details) => format!("{}: {}", humanize(rule), details),
                None => humanize(rule),
            };
            push_by_flag(&mut conditions, met, line);
        }
    }

    // Upstream reports its overall verdict alongside the conditions.
    if let Some(recommendation) = payload.get("final_recommendation").and_then(as_text) {
        push_unique(
            &mut conditions.met,
            format!("{RECOMMENDATION_LABEL}: {recommendation}"),
        );
    }

    if conditions.met.is_empty() && conditions.failed.is_empty() {
        None
    } else {
        Some(conditions)
    }
}

fn flat_pair(analysis: &Object) -> Conditions {
    let (met, failed) = match analysis.get("conditions").and_then(Value::as_object) {
        Some(pair) => (pair.get("met"), pair.get("failed")),
        None => (analysis.get("conditions_met"), analysis.get("conditions_failed")),
    };
    let mut conditions = Conditions::default();
    for item in met.and_then(string_list).unwrap_or_default() {
        push_unique(&mut conditions.met, item);
    }
    for item in failed.and_then(string_list).unwrap_or_default() {
        push_unique(&mut conditions.failed, item);
    }
    conditions
}

fn push_by_flag(conditions: &mut Conditions, met: bool, line: String) {
    if met {
        push_unique(&mut conditions.met, line);
    } else {
        push_unique(&mut conditions.failed, line);
    }
}

/// `Jupiter in Cancer (House 4) - kendra from Moon`.
fn describe_item(item: &Object) -> Option<String> {
    let planet = item.get("planet").and_then(as_text);
    let sign = item.get("sign").and_then(as_text);
    let house = item.get("house").and_then(as_house);
    let role = item.get("role").and_then(as_text);

    let mut line = String::new();
    if let Some(planet) = planet {
        line.push_str(&planet);
    }
    if let Some(sign) = sign {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str("in ");
        line.push_str(&sign);
    }
    if let Some(house) = house {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("(House {house})"));
    }
    if let Some(role) = role {
        if line.is_empty() {
            line.push_str(&role);
        } else {
            line.push_str(" - ");
            line.push_str(&role);
        }
    }

    if line.is_empty() {
        item.get("description").and_then(as_text)
    } else {
        Some(line)
    }
}
