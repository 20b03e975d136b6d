//! Error types shared by the store, the models and the import/export code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No set selected")]
    NoSetSelected,

    #[error("Set not found at index {0}")]
    SetNotFound(usize),

    #[error("Set '{0}' has no terms")]
    EmptySet(String),
}

pub type Result<T> = std::result::Result<T, FlashcardsError>;

/// Rejections from saving a set. The message is shown to the user as is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a set name.")]
    EmptyName,

    #[error("Please add at least one term.")]
    NoTerms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyName.to_string(),
            "Please enter a set name."
        );
        assert_eq!(
            ValidationError::NoTerms.to_string(),
            "Please add at least one term."
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: FlashcardsError = ValidationError::NoTerms.into();
        assert_eq!(err.to_string(), "Please add at least one term.");
    }
}
