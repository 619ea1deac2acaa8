use thiserror::Error;

/// Failure of a single client operation.
///
/// Every variant is terminal for the call that produced it only; the
/// workflow stays usable and the operation can be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid URL format: {0}")]
    InvalidUrlFormat(String),
    #[error("check a short URL before extending its lifetime")]
    NoPriorCheck,
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("malformed response from server: {0}")]
    MalformedResponse(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Errors caused by local input or workflow ordering rather than by the
    /// remote service. These are shown to the user but never logged as faults.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::InvalidUrlFormat(_) | ClientError::NoPriorCheck
        )
    }
}
