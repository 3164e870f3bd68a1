use std::fmt;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client could not be built (bad base URL, TLS init). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-2xx status. `message` is the backend's
    /// `error`/`message` field when the body carried one.
    Api { status: u16, message: Option<String> },
    /// Body could not be decoded into the expected shape.
    Parse(String),
    /// Body decoded but a required field was absent or empty.
    MissingField(&'static str),
}

/// Coarse failure taxonomy used by callers that want to surface errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network failure or 5xx.
    Transport,
    /// Backend rejected the request (bad credentials, duplicate email, 401).
    Validation,
    /// Backend answered but the body was not what we expected.
    Malformed,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Config(_) | ApiError::Network(_) => FailureKind::Transport,
            ApiError::Api { status, .. } if *status >= 500 => FailureKind::Transport,
            ApiError::Api { .. } => FailureKind::Validation,
            ApiError::Parse(_) | ApiError::MissingField(_) => FailureKind::Malformed,
        }
    }

    /// Error text supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "client config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api {
                status,
                message: Some(message),
            } => write!(f, "backend error (HTTP {status}): {message}"),
            ApiError::Api {
                status,
                message: None,
            } => write!(f, "backend error (HTTP {status})"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::MissingField(field) => write!(f, "response missing `{field}`"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if err.is_builder() {
            ApiError::Config(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
