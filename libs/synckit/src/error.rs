use thiserror::Error;

/// Failure taxonomy shared by every storage backend.
///
/// "Not found" is deliberately absent: a missing cursor or item is an
/// `Option`/empty result at the contract level, never an error.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("connectivity failure: {message}")]
    Connectivity { message: String },

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("serialization failure: {message}")]
    Serialization { message: String },

    #[error("backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
