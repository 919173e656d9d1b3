use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CoachError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoachError::Validation(msg.into())
    }

    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        CoachError::NotFound(format!("{what} with ID {id} not found"))
    }
}

pub type CoachResult<T> = Result<T, CoachError>;
