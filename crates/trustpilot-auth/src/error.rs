//! Error types for Trustpilot OAuth operations
//!
//! Every failure surfaced by the `Authenticator` is one of these variants.
//! `Display` renders the human-readable message only, so callers that log
//! `%err` get the same text regardless of the variant.

/// Boxed underlying failure carried by transport errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from Trustpilot OAuth operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, TLS, DNS, timeout, or body streaming failure.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Non-success HTTP status from an OAuth endpoint.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// Response body was not valid JSON.
    #[error("{0}")]
    Decode(String),

    /// Well-formed JSON that is not a usable token response.
    #[error("{0}")]
    Protocol(String),

    /// Token data present but could not be turned into an `AccessToken`.
    #[error("{0}")]
    Construction(String),
}

impl Error {
    /// HTTP status that caused this error, if it was status-based.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Numeric error code: the HTTP status, or 0 for every other failure.
    pub fn code(&self) -> u16 {
        self.status().unwrap_or(0)
    }
}

/// Result alias for OAuth operations.
pub type Result<T> = std::result::Result<T, Error>;
