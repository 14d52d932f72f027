use synckit::StoreError;
use thiserror::Error;

/// Errors that are safe to expose to callers of the profile module.
#[derive(Error, Debug, Clone)]
pub enum ProfileError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProfileError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }
}
