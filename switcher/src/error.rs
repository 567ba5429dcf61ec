//! Switcher error types

use shared::{GroupId, PersonId, SharedError};
use thiserror::Error;

/// Result type for switcher operations
pub type SwitcherResult<T> = Result<T, SwitcherError>;

/// Switcher error types
#[derive(Error, Debug)]
pub enum SwitcherError {
    #[error("Group {group} is not configured for any organization")]
    UnconfiguredGroup { group: GroupId },

    #[error("No on-leave or off-leave markers found for {person}")]
    NoApplicableState { person: PersonId },

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Platform returned HTTP {status} for {path}")]
    PlatformStatus { status: u16, path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),
}

impl SwitcherError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Text shown to the person who made the request
    pub fn requester_message(&self) -> String {
        match self {
            SwitcherError::UnconfiguredGroup { .. } => {
                "This server is not configured and you cannot use this bot here.".to_string()
            }
            SwitcherError::NoApplicableState { .. } => {
                "You do not have any roles that indicate that you are either on-leave or off-leave, \
                 so there are no roles to switch."
                    .to_string()
            }
            SwitcherError::InvalidInput { field, reason } => format!("The {field} {reason}."),
            other => format!("Something went wrong: {other}"),
        }
    }
}
