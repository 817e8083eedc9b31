//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors describe what is wrong with an order document.
/// Structural errors surface while loading; field errors surface when a field is read.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("missing section: <{0}>")]
    MissingSection(String),

    #[error("missing field: <{0}>")]
    MissingField(String),

    #[error("malformed number in <{field}>: {value:?}")]
    MalformedNumber { field: String, value: String },
}

impl From<roxmltree::Error> for DomainError {
    fn from(e: roxmltree::Error) -> Self {
        DomainError::MalformedDocument(e.to_string())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
