//! Error types for the Seafile API client.
//!
//! # Design
//! Every failure reaches the caller as one of these variants; the client
//! performs no retries and no local recovery. Non-2xx responses keep the raw
//! status and body so callers can tell "permission denied" from "not found"
//! without the client interpreting the payload.

/// Errors returned by session and transport operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The auth-token exchange rejected the credentials.
    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Response { status: u16, body: String },

    /// No response was received (DNS failure, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The call was cancelled through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// The session holds no transport; log in or initialise it first.
    #[error("session is not initialised")]
    NotInitialized,

    /// `relogin` was called on a session holding no credentials.
    #[error("session holds no credentials")]
    MissingCredentials,

    /// A token or CSRF value could not be used as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// A payload could not be serialized or deserialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A server or site root is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be built or used.
    #[error("http client error: {0}")]
    Client(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() {
            return ApiError::Network(e.to_string());
        }
        if e.is_builder() {
            return ApiError::Client(e.to_string());
        }
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        ApiError::InvalidHeader(e.to_string())
    }
}
