//! Section extractors.
//!
//! Each extractor reads the flat payload and/or the located analysis object
//! and returns its section, or `None` when no known source holds it.

pub mod cancellation;
pub mod chart;
pub mod combinations;
pub mod conditions;
pub mod header;
pub mod meta;
pub mod narrative;
pub mod raj_yoga;
pub mod remedies;
pub mod strength;
pub mod technical;
pub mod timing;

pub use cancellation::{extract_cancellation_factors, extract_dosha_severity};
pub use chart::{extract_house_placements, extract_planet_positions};
pub use combinations::extract_combinations;
pub use conditions::extract_conditions;
pub use header::extract_header;
pub use meta::extract_meta;
pub use narrative::{extract_description, extract_effects};
pub use raj_yoga::extract_raj_yoga_set;
pub use remedies::extract_remedies;
pub use strength::extract_strength;
pub use technical::extract_technical;
pub use timing::extract_timing;

use crate::record::Degree;
use crate::resolve::{as_text, Object};
use serde_json::Value;

/// Which object a source location is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Root {
    Analysis,
    Payload,
}

impl Root {
    pub(crate) fn pick<'a>(self, payload: &'a Object, analysis: Option<&'a Object>) -> Option<&'a Object> {
        match self {
            Root::Analysis => analysis,
            Root::Payload => Some(payload),
        }
    }
}

pub(crate) fn as_degree(value: &Value) -> Option<Degree> {
    match value {
        Value::Number(n) => n.as_f64().map(Degree::Decimal),
        other => as_text(other).map(Degree::Formatted),
    }
}
