//! Endpoint configuration
//!
//! Defaults point at the production Trustpilot API. Any subset can be
//! overridden, e.g. from a `[endpoints]` TOML table, to target a staging
//! environment or a local test double.

use serde::Deserialize;

use crate::constants::{AUTHORIZE_ENDPOINT, REFRESH_ENDPOINT, REVOKE_ENDPOINT, TOKEN_ENDPOINT};

/// OAuth endpoint URLs used by an `Authenticator`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub token_url: String,
    pub refresh_url: String,
    pub revoke_url: String,
    pub authorize_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_ENDPOINT.into(),
            refresh_url: REFRESH_ENDPOINT.into(),
            revoke_url: REVOKE_ENDPOINT.into(),
            authorize_url: AUTHORIZE_ENDPOINT.into(),
        }
    }
}

impl Endpoints {
    /// All endpoint URLs, labelled by their config key.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("token_url", self.token_url.as_str()),
            ("refresh_url", self.refresh_url.as_str()),
            ("revoke_url", self.revoke_url.as_str()),
            ("authorize_url", self.authorize_url.as_str()),
        ]
        .into_iter()
    }
}
