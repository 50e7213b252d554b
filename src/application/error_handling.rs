// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors -> dismissable messages for the view
// - Every backend error reaches the user; nothing is swallowed here
// - Logs what the user will not see

use serde::{Deserialize, Serialize};

use crate::application::dto::ApplicationDto;
use crate::error::AppError;

/// Standard error response for views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or malformed input
    Validation,

    /// The candidate already has a blocking application for the job
    DuplicateApplication,

    /// The requested status change is not allowed (or lost a race)
    InvalidTransition,

    NotFound,

    /// No session, or the backend rejected the token; back to login
    Unauthorized,

    /// Transport failure or backend error
    Network,

    /// Local failures (config, session file, malformed data)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Validation(message) => Self::new(ErrorType::Validation, message, None),

            AppError::DuplicateApplication { .. } => Self::new(
                ErrorType::DuplicateApplication,
                "You have already applied for this job",
                Some(error.to_string()),
            ),

            AppError::InvalidTransition { from, to, reason } => Self::new(
                ErrorType::InvalidTransition,
                format!("Cannot change status from {} to {}", from, to),
                Some(reason),
            ),

            AppError::NotFound(what) => {
                Self::new(ErrorType::NotFound, format!("{} not found", what), None)
            }

            AppError::Unauthorized => Self::new(
                ErrorType::Unauthorized,
                "Your session has ended, please log in again",
                None,
            ),

            AppError::Network(message) => Self::new(ErrorType::Network, message, None),

            AppError::Serialization(e) => {
                log::error!("serialization error: {:?}", e);
                Self::new(
                    ErrorType::Internal,
                    "Received data could not be read",
                    Some(e.to_string()),
                )
            }

            AppError::Io(e) => {
                log::error!("io error: {:?}", e);
                Self::new(
                    ErrorType::Internal,
                    "Local file operation failed",
                    Some(e.to_string()),
                )
            }

            AppError::Config(message) => Self::new(
                ErrorType::Internal,
                "Client is misconfigured",
                Some(message),
            ),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// The view should drop the session and show the login form
    pub fn requires_login(&self) -> bool {
        self.error_type == ErrorType::Unauthorized
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

/// A failed status change, with the record as the backend now has it so the
/// view can re-render the true status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionFailure {
    pub error: ErrorResponse,
    pub current: Option<ApplicationDto>,
}

impl From<AppError> for TransitionFailure {
    fn from(error: AppError) -> Self {
        Self {
            error: error.into(),
            current: None,
        }
    }
}

impl From<ErrorResponse> for TransitionFailure {
    fn from(error: ErrorResponse) -> Self {
        Self {
            error,
            current: None,
        }
    }
}

impl std::fmt::Display for TransitionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(current) = &self.current {
            write!(f, "; application is now {}", current.status)?;
        }
        Ok(())
    }
}

impl std::error::Error for TransitionFailure {}
