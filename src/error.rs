use std::fmt;

use serde::Serialize;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a failed request, shown alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Host unreachable, connection reset, timeout
    Network,
    /// Non-success HTTP status
    Status,
    /// Body was not the JSON we can read
    Malformed,
    /// Backend answered with an `error` field
    Backend,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Network => "network",
            ErrorKind::Status => "http status",
            ErrorKind::Malformed => "malformed response",
            ErrorKind::Backend => "backend",
            ErrorKind::Config => "configuration",
        };
        f.write_str(label)
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // reqwest reports body decode failures through the same type
            ClientError::Network(e) if e.is_decode() => ErrorKind::Malformed,
            ClientError::Network(e) => match e.status() {
                Some(_) => ErrorKind::Status,
                None => ErrorKind::Network,
            },
            ClientError::Status { .. } => ErrorKind::Status,
            ClientError::Decode(_) => ErrorKind::Malformed,
            ClientError::Backend(_) => ErrorKind::Backend,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
