//! Error types for the API client

use bytes::Bytes;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ParticleError>;

/// Which credential an operation needed but did not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// An OAuth access token (`Bearer` auth)
    AccessToken,
    /// Account username and password (`Basic` auth)
    Account,
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken => write!(f, "access token"),
            Self::Account => write!(f, "account credentials (username/password)"),
        }
    }
}

/// API client errors
#[derive(Error, Debug)]
pub enum ParticleError {
    /// A required credential is not configured
    #[error("missing credential: no {0} set")]
    MissingCredential(CredentialKind),

    /// An operation argument is invalid or inconsistent
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A parameter set could not be encoded for the chosen body format
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The transport failed before any response was received
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a failure status and an unstructured body
    #[error("HTTP error {status}: {}", body_preview(.body))]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: Bytes,
    },

    /// The API reported a business-level error in the response body
    #[error("API error in {operation} ({url}): {message}")]
    Api {
        /// The logical operation that produced the failing request
        operation: &'static str,
        /// The request URL
        url: String,
        /// Error message reported by the API
        message: String,
    },

    /// The response body could not be decoded as JSON
    #[error("decode error: body is not valid JSON: {}", body_preview(.body))]
    Decode {
        /// Raw response body
        body: Bytes,
    },
}

impl ParticleError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Check if this error is an API-reported business error
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a client-side HTTP error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server-side HTTP error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status >= 500)
    }

    /// Check if the failure happened before a response was received
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A failure in the transport collaborator: the request never produced a
/// response.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a transport error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Render the leading bytes of a body for error messages without assuming
/// it is valid UTF-8.
fn body_preview(body: &Bytes) -> String {
    const MAX: usize = 120;
    let text = String::from_utf8_lossy(body);
    if text.len() > MAX {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    } else {
        text.into_owned()
    }
}
