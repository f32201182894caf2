use reqwest::StatusCode;
use thiserror::Error;

/// Classification of a client-side failure
///
/// Every failure a network client can produce maps into one of these kinds,
/// and all of them surface through the same user-visible message slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local precondition failure; never reaches the network
    Validation,
    /// HTTP 429; the server enforces a usage quota per identity
    RateLimit,
    /// Any other non-2xx response
    Server,
    /// Transport-level failure; no response was obtained
    Network,
    /// A 2xx response whose body did not carry a success status
    Unknown,
}

/// Error type shared by all network-facing clients
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    RateLimit(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Unexpected(String),

    /// Identity storage fault; storage is assumed available, so this
    /// surfaces as a generic fault rather than its own user-facing kind
    #[error("identity storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// The taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::RateLimit(_) => ErrorKind::RateLimit,
            ClientError::Server(_) => ErrorKind::Server,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Unexpected(_) => ErrorKind::Unknown,
            ClientError::Storage(_) => ErrorKind::Server,
        }
    }
}

/// Kind-specific fallback messages used when a failure response carries no
/// message of its own
#[derive(Debug, Clone, Copy)]
pub struct ErrorDefaults {
    pub rate_limit: &'static str,
    pub server: &'static str,
}

/// Map an HTTP status to an error kind
///
/// Single source of truth for the 429 mapping shared by the extraction,
/// analysis and key-provisioning clients.
pub fn classify(status: StatusCode) -> ErrorKind {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ErrorKind::RateLimit
    } else if !status.is_success() {
        ErrorKind::Server
    } else {
        ErrorKind::Unknown
    }
}

/// Build a classified error from a response status and optional server message
///
/// The server-supplied message always wins; the defaults only fill in when
/// the body carried none.
pub fn from_response(
    status: StatusCode,
    message: Option<String>,
    defaults: &ErrorDefaults,
) -> ClientError {
    match classify(status) {
        ErrorKind::RateLimit => {
            ClientError::RateLimit(message.unwrap_or_else(|| defaults.rate_limit.to_string()))
        }
        ErrorKind::Unknown => {
            ClientError::Unexpected(message.unwrap_or_else(|| defaults.server.to_string()))
        }
        _ => ClientError::Server(message.unwrap_or_else(|| defaults.server.to_string())),
    }
}
