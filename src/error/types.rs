// src/error/types.rs
use crate::domain::{CandidateId, DomainError, JobId};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Candidate {candidate_id} has already applied for job {job_id}")]
    DuplicateApplication {
        candidate_id: CandidateId,
        job_id: JobId,
    },

    #[error("Invalid transition {from} -> {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired or missing, please log in again")]
    Unauthorized,

    /// Transport or backend failure; the message is shown to the user as is
    #[error("{0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn invalid_transition(
        from: impl ToString,
        to: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AppError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.into(),
        }
    }

    /// Lost a race with another writer; the caller should re-fetch
    pub fn is_recoverable_conflict(&self) -> bool {
        matches!(self, AppError::InvalidTransition { .. })
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvariantViolation(msg) => AppError::Validation(msg),
            DomainError::UnknownValue { .. } => AppError::Validation(err.to_string()),
            DomainError::InvalidStateTransition { from, to, reason } => {
                AppError::InvalidTransition { from, to, reason }
            }
            DomainError::NotFound(what) => AppError::NotFound(what),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
