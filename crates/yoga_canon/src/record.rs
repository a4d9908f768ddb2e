//! Canonical yoga record.
//!
//! Every section is independently optional. An absent section is `None` and is
//! omitted from serialized output; the engine never fills a section with
//! placeholder content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalYoga {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Effects>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combinations: Option<Vec<Combination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raj_yoga_set: Option<RajYogaSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_positions: Option<PlanetPositions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_placements: Option<Vec<HousePlacement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remedies: Option<Remedies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_factors: Option<Vec<CancellationFactor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosha_severity: Option<DoshaSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<Technical>,
    /// Unrecognised top-level keys, in input order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub is_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// Birth and chart identity fields echoed from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascendant_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascendant_degree: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        *self == Meta::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub specific: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty: Option<f64>,
    #[serde(rename = "final")]
    pub final_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_features: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    #[serde(rename = "type")]
    pub combination_type: String,
    pub present: bool,
    pub effects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub met: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RajYogaSet {
    pub total_count: u64,
    pub average_strength: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_distribution: Option<BTreeMap<String, u64>>,
    pub yogas: Vec<RajYogaEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RajYogaEntry {
    #[serde(rename = "type")]
    pub yoga_type: String,
    pub planets: Vec<String>,
    pub houses: Vec<u8>,
    pub strength: f64,
    pub priority: String,
    pub cancellations: Vec<String>,
}

/// A degree as the upstream reported it: decimal, or an already formatted
/// string such as `15°20'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Degree {
    Decimal(f64),
    Formatted(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    pub retrograde: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra_lord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_lord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_sub_lord: Option<String>,
}

/// Planet name -> position. Keys are unique; order carries no meaning.
pub type PlanetPositions = BTreeMap<String, PlanetPosition>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePlacement {
    pub house_number: u8,
    pub sign: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lord: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_periods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_transits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_effects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remedial_timing: Option<String>,
}

/// Remedies arrive either as a flat list or grouped by category. The two
/// forms are never converted into each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Remedies {
    Flat(Vec<String>),
    Categorized(Vec<RemedyCategory>),
}

impl Remedies {
    pub fn is_empty(&self) -> bool {
        match self {
            Remedies::Flat(items) => items.is_empty(),
            Remedies::Categorized(groups) => groups.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemedyCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationFactor {
    pub factor: String,
    pub description: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoshaSeverity {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    /// Rule explanations in source order.
    pub rules: Vec<String>,
}

impl Technical {
    pub fn is_empty(&self) -> bool {
        *self == Technical::default()
    }
}
