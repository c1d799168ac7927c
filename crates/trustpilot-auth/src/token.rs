//! Access token value
//!
//! An `AccessToken` is produced by the `Authenticator` from a successful
//! token response and never changes afterwards. Storage is the caller's
//! concern; `expiry_unix_millis()` gives the integer form for persistence.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Bearer token issued by the Trustpilot OAuth API.
///
/// `Debug` output redacts both the bearer and the refresh token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expiry: SystemTime,
    refresh_token: Option<String>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expiry: SystemTime, refresh_token: Option<String>) -> Self {
        Self {
            token: token.into(),
            expiry,
            refresh_token,
        }
    }

    /// Bearer credential for the `Authorization` header of API calls.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Absolute expiry instant.
    pub fn expiry(&self) -> SystemTime {
        self.expiry
    }

    /// Refresh token, present only when the server returned one.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Whether the token has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(SystemTime::now())
    }

    /// Whether the token has expired as of `reference`.
    ///
    /// A token whose expiry equals the reference instant counts as expired.
    pub fn is_expired_at(&self, reference: SystemTime) -> bool {
        self.expiry <= reference
    }

    /// Remaining lifetime measured from `reference`, zero once expired.
    pub fn expires_in_from(&self, reference: SystemTime) -> Duration {
        self.expiry.duration_since(reference).unwrap_or_default()
    }

    /// Expiry as a unix timestamp in milliseconds.
    pub fn expiry_unix_millis(&self) -> u64 {
        self.expiry
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
