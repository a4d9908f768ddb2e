//! Normalization of upstream yoga analysis payloads.
//!
//! The upstream service has shipped many incompatible response shapes for
//! the same information. [`normalize`] turns any of them into one
//! [`CanonicalYoga`] record so consumers are written once.

pub mod assembler;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod locator;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod sections;
pub mod type_name;

pub use assembler::normalize;
pub use error::CanonError;
pub use locator::{locate, KeyPattern, Located, PrimaryAnalysis, ANALYSIS_KEY_PATTERNS};
pub use record::*;
pub use registry::{SectionKey, RENDER_ORDER};
pub use type_name::normalize_type_name;

/// Parse JSON text and normalize it. Only fails when the text is not JSON.
pub fn normalize_str(json: &str) -> Result<CanonicalYoga, CanonError> {
    let raw: serde_json::Value =
        serde_json::from_str(json).map_err(|e| CanonError::InvalidJson(e.to_string()))?;
    Ok(normalize(&raw))
}
