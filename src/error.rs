// src/error.rs
// Typed errors surfaced by the chat assistant

use thiserror::Error;

/// Closed set of failures the chat assistant can surface.
///
/// Every variant formats to a message suitable for direct display in
/// the conversation log; `kind()` gives the stable tag the UI keys
/// styling and retry affordances on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Credential missing at construction time or rejected by the service.
    #[error("{0}")]
    ApiKey(String),

    /// The local call governor refused the call; the user must wait.
    #[error("{0}")]
    RateLimited(String),

    /// Connectivity failure reaching the completion service.
    #[error("Network error occurred")]
    Network,

    /// The service answered but produced no usable text.
    #[error("No response received")]
    EmptyResponse,

    /// Catch-all carrying the underlying message verbatim.
    #[error("{0}")]
    Unknown(String),
}

impl ChatError {
    /// No credential configured at all (construction-time failure).
    pub fn missing_api_key() -> Self {
        Self::ApiKey("Missing API key".to_string())
    }

    /// The service rejected the configured credential.
    pub fn invalid_api_key() -> Self {
        Self::ApiKey("Invalid API key".to_string())
    }

    /// Stable snake_case tag for UI dispatch.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::RateLimited(_) => "rate_limited",
            Self::Network => "network",
            Self::EmptyResponse => "empty_response",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Whether the caller should offer a retry for this failure.
    ///
    /// A bad credential cannot be fixed by resubmitting the same text;
    /// everything else is worth another attempt.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ApiKey(_))
    }
}

/// Convenience alias for results on the governed chat path.
pub type Result<T> = std::result::Result<T, ChatError>;
