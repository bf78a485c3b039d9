//! Error types for the Appletflow collaborator clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to an external collaborator
///
/// Nothing in this crate retries; callers decide whether a failure is fatal
/// (contract calls) or falls back to a local value (oracle, summarizer).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, TLS)
    #[error("Could not reach collaborator: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator answered with a non-success status
    #[error("Collaborator answered {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Request could not be built (e.g. a contract address that was never configured)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The collaborator needs a credential that is not configured
    #[error("No {0} configured")]
    MissingCredential(&'static str),
}

impl ClientError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status behind this error, if the collaborator answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// 4xx answers, including rate limiting
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_some_and(|s| (400..500).contains(&s))
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_some_and(|s| s >= 500)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
