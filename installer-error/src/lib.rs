use std::io;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("Storage backend rejected the request: {0}")]
    StorageRejected(String),

    #[error("No storage backend command configured for {0}")]
    NotConfigured(&'static str),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HalError {
    /// Short text suitable for an inline step notification.
    pub fn summary(&self) -> String {
        match self {
            HalError::CommandFailed { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }
}
