//! Error types for API client operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while calling the blockchain.info API.
///
/// The variants fall into four categories:
///
/// - **Client argument errors**: [`MissingArgument`](ApiError::MissingArgument),
///   [`OutOfRange`](ApiError::OutOfRange),
///   [`InvalidArgument`](ApiError::InvalidArgument),
///   [`DuplicateKey`](ApiError::DuplicateKey) - raised before any network
///   call, or re-mapped from a server error the caller can correct by
///   changing input
/// - **Server errors**: [`Server`](ApiError::Server) - the remote service
///   rejected or failed the request, including the synthetic error-envelope
///   case reported with a success status
/// - **Transport errors**: [`Transport`](ApiError::Transport) - anything
///   below the HTTP layer (connectivity, TLS, timeout)
/// - **Decode errors**: [`Json`](ApiError::Json), [`Url`](ApiError::Url)
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was missing or blank.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// A numeric argument fell outside its documented bounds.
    #[error("argument `{name}` out of range: {message}")]
    OutOfRange {
        name: &'static str,
        message: String,
    },

    /// An argument was well-formed locally but rejected by the service.
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument {
        name: &'static str,
        message: String,
    },

    /// [`QueryString::add`](super::QueryString::add) was called with a key
    /// that is already present.
    #[error("query string already has a value for {0}")]
    DuplicateKey(String),

    /// The remote service rejected or failed the request.
    #[error("server error {status}: {message}")]
    Server {
        status: StatusCode,
        message: String,
    },

    /// The HTTP request failed below the HTTP layer (DNS, TLS, connection
    /// reset, timeout). Never silently swallowed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the target type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A base URL or route could not be parsed.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// True for the dedicated not-found server error produced by a
    /// `Block Not Found` response body.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// The message of a [`Server`](ApiError::Server) error, if that is what
    /// this is. Explorers use this to re-map known service error strings.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}
