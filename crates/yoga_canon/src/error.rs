use thiserror::Error;

/// Errors at the edges of the engine. Normalizing a parsed JSON value never
/// fails; these cover text input and section names.
#[derive(Error, Debug)]
pub enum CanonError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}
