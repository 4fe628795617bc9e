use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ModelError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("wrong email or password")]
    Authentication,
    #[error("collection {collection} is corrupt: {reason}")]
    StorageCorrupt { collection: String, reason: String },
    #[error("collection {0} is busy, retry later")]
    ResourceBusy(String),
    #[error("storage io error: {0}")]
    Io(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Authentication => 1004,
            ServiceError::ResourceBusy(_) => 1201,
            ServiceError::StorageCorrupt { .. } => 1202,
            ServiceError::Io(_) => 1203,
        }
    }
}
