//! Error types for chart generation.

use thiserror::Error;

/// Failures that end an entry point early.
///
/// None of these escape the public API: each entry point turns them into a
/// `{"error": ..., "status": "failed"}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A required text input was blank.
    #[error("{what} cannot be empty")]
    EmptyInput { what: &'static str },

    /// The payload did not decode to a recognized dataset shape.
    #[error("Could not parse data_sample")]
    UnparseableData,

    /// The dataset decoded but its first record has no fields.
    #[error("No data to visualize")]
    NoFields,
}

impl GenerationError {
    /// Extra guidance attached to the failure envelope, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GenerationError::UnparseableData => {
                Some("Expected JSON array of objects or SQL result format")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
