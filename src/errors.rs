use thiserror::Error;

use crate::domains::user_management::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid user fields: {0}")]
    Validation(FieldErrors),

    #[error("Failed to access user storage: {0}")]
    Storage(String),

    #[error("Failed to serialize user records: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::Storage(error.to_string())
    }
}

impl From<FieldErrors> for StoreError {
    fn from(errors: FieldErrors) -> Self {
        StoreError::Validation(errors)
    }
}
