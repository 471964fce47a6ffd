//! Error types for OneFuse operations.
//!
//! Every failure the client can produce is a returned [`Error`] value. HTTP
//! failures carry the operation name, the request URL and the response body so
//! they can be diagnosed without repeating the request.

use thiserror::Error;

/// Main error type for OneFuse operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request timed out at the transport level
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The connection to the OneFuse server could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The server answered with a 4xx status
    #[error("{operation} failed with client error {status} at {url}: {body}")]
    ClientError {
        /// Operation that issued the request
        operation: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body as returned by the server
        body: String,
    },

    /// The server answered with a 5xx status
    #[error("{operation} failed with server error {status} at {url}: {body}")]
    ServerError {
        /// Operation that issued the request
        operation: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body as returned by the server
        body: String,
    },

    /// A response body did not match the expected structure
    #[error("{operation} returned an undecodable body from {url}: {message}")]
    Decode {
        /// Operation that issued the request
        operation: String,
        /// Request URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// A required field was missing before any request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// The `Default` workspace could not be found
    #[error("Unable to find default workspace")]
    NoDefaultWorkspace,

    /// The operation is not supported for the resource kind
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// A hypermedia link did not contain a resource identifier
    #[error("Invalid link `{href}`: {reason}")]
    InvalidLink {
        /// The offending href
        href: String,
        /// Why no identifier could be extracted
        reason: String,
    },

    /// A lookup returned no matching resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection or client configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for OneFuse operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "TIMEOUT",
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::ClientError { .. } => "CLIENT_ERROR",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NoDefaultWorkspace => "NO_DEFAULT_WORKSPACE",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::InvalidLink { .. } => "INVALID_LINK",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Returns the HTTP status for errors produced from a server response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body for errors produced from a server response.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::ClientError { body, .. } | Self::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the resource is gone, either from a 404 or an empty lookup.
    ///
    /// Callers reading state back use this to drop a resource instead of failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::ClientError { status: 404, .. })
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ServerError { .. } | Self::Decode { .. } | Self::ConfigError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(format!("Invalid endpoint URL: {err}"))
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
