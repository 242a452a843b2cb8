use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
    pub fn conflict(entity: &str) -> Self { Self::Conflict(format!("{} already exists", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            // a concurrent insert that passed the name check lands here
            ModelError::Duplicate(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
