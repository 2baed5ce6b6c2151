use thiserror::Error;

/// Why a remote turn failed. Only ever shown in the log; the user sees one
/// fixed error message whatever the cause.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("request task failed: {0}")]
    TaskFailed(String),
}

impl RemoteError {
    /// Short label for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Transport(_) => "transport",
            RemoteError::Status(_) => "status",
            RemoteError::MalformedPayload(_) => "payload",
            RemoteError::TaskFailed(_) => "task",
        }
    }
}
