//! Error types for the storage and network legs of a cart update.
//!
//! Neither error is fatal to the host page. Storage errors degrade to an
//! empty or unsaved cart; sync errors are reported to the visitor and the
//! page is left as is.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors raised by a [`crate::storage::CartStorage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage area is reachable (no window, storage disabled, etc.).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused or failed the read.
    #[error("storage read failed: {0}")]
    Read(String),

    /// The backend refused or failed the write (quota, permissions, ...).
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Errors produced while syncing a cart change with the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl SyncError {
    /// Short machine-readable code for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "E_ENCODE",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
        }
    }

    /// Whether the same request could plausibly succeed if sent again.
    ///
    /// Decides whether the visitor is told to try again. Nothing in this
    /// crate retries on its own.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}
