//! Shared error types for the leave switcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Failed to read configuration from {path}: {message}")]
    ConfigUnreadable { path: String, message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },
}

impl SharedError {
    pub fn invalid_config(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
