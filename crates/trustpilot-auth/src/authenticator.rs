//! OAuth grant flows and token revocation
//!
//! Every grant funnels through `request_token` (POST with basic auth,
//! status check, JSON validation) and `create_access_token`. Each public
//! operation performs at most one round trip: no retries, no caching.
//!
//! Flows:
//! 1. `request_password_access_token`: business user credentials
//! 2. `request_client_credentials_access_token`: application only
//! 3. `request_authorization_code_access_token`: code from the redirect
//! 4. `refresh_access_token`: posted to the refresh endpoint
//! 5. `revoke_refresh_token`: no credentials, no payload inspection

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::authorize;
use crate::clock::{Clock, SystemClock};
use crate::constants::{
    DEFAULT_TOKEN_LIFETIME, GRANT_AUTHORIZATION_CODE, GRANT_CLIENT_CREDENTIALS, GRANT_PASSWORD,
    GRANT_REFRESH_TOKEN,
};
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::response::TokenResponse;
use crate::token::AccessToken;
use crate::transport::{BasicAuth, FormRequest, HttpTransport, ReqwestTransport, TransportError};

/// Trustpilot OAuth client.
///
/// Holds no mutable state, so one instance can be shared across tasks
/// behind an `Arc` as long as the transport allows concurrent use.
#[derive(Clone)]
pub struct Authenticator {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("endpoints", &self.endpoints)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Authenticator with default endpoints and the wall clock.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoints: Endpoints::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Authenticator over an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::new(Arc::new(ReqwestTransport::new(client)))
    }

    /// Replace the default endpoint URLs.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the time source used for expiry computation.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Endpoint URLs in use.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Exchange business user credentials for a token (`password` grant).
    pub async fn request_password_access_token(
        &self,
        api_key: &str,
        api_secret: &str,
        username: &str,
        password: &str,
    ) -> Result<AccessToken> {
        let form = vec![
            ("grant_type", GRANT_PASSWORD.to_owned()),
            ("username", username.to_owned()),
            ("password", password.to_owned()),
        ];
        let response = self
            .request_token(&self.endpoints.token_url, api_key, api_secret, form)
            .await?;
        self.create_access_token(response)
    }

    /// Application-only token (`client_credentials` grant).
    pub async fn request_client_credentials_access_token(
        &self,
        api_key: &str,
        api_secret: &str,
    ) -> Result<AccessToken> {
        let form = vec![("grant_type", GRANT_CLIENT_CREDENTIALS.to_owned())];
        let response = self
            .request_token(&self.endpoints.token_url, api_key, api_secret, form)
            .await?;
        self.create_access_token(response)
    }

    /// Exchange the code received on the redirect (`authorization_code` grant).
    ///
    /// `redirect_uri` must match the one used to build the authorization URL.
    pub async fn request_authorization_code_access_token(
        &self,
        api_key: &str,
        api_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AccessToken> {
        let form = vec![
            ("grant_type", GRANT_AUTHORIZATION_CODE.to_owned()),
            ("code", code.to_owned()),
            ("redirect_uri", redirect_uri.to_owned()),
        ];
        let response = self
            .request_token(&self.endpoints.token_url, api_key, api_secret, form)
            .await?;
        self.create_access_token(response)
    }

    /// Obtain a new access token from a refresh token.
    pub async fn refresh_access_token(
        &self,
        api_key: &str,
        api_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken> {
        let form = vec![
            ("grant_type", GRANT_REFRESH_TOKEN.to_owned()),
            ("refresh_token", refresh_token.to_owned()),
        ];
        let response = self
            .request_token(&self.endpoints.refresh_url, api_key, api_secret, form)
            .await?;
        self.create_access_token(response)
    }

    /// Revoke a refresh token.
    ///
    /// Any 2xx status is success; the response body is not inspected.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<()> {
        let request = FormRequest {
            url: self.endpoints.revoke_url.clone(),
            basic_auth: None,
            form: vec![("token", refresh_token.to_owned())],
        };

        debug!(endpoint = %request.url, "revoking refresh token");

        let response = self.transport.post_form(&request).await.map_err(|e| {
            let source = match e {
                TransportError::Send(source) | TransportError::Body(source) => source,
            };
            warn!(error = %source, "network error while revoking refresh token");
            Error::Transport {
                message: format!(
                    "Network error while revoking Trustpilot refresh token: {source}"
                ),
                source,
            }
        })?;

        if !(200..300).contains(&response.status) {
            warn!(status = response.status, "token revocation rejected");
            return Err(Error::HttpStatus {
                status: response.status,
                message: format!(
                    "Trustpilot returned HTTP {} while attempting to revoke token.",
                    response.status
                ),
            });
        }

        info!("refresh token revoked");
        Ok(())
    }

    /// Browser redirect URL for the authorization-code flow. No I/O.
    pub fn build_authorization_url<S: AsRef<str>>(
        &self,
        api_key: &str,
        redirect_uri: &str,
        state: Option<&str>,
        scopes: &[S],
    ) -> String {
        authorize::build_authorization_url(
            &self.endpoints.authorize_url,
            api_key,
            redirect_uri,
            state,
            scopes,
        )
    }

    /// POST a grant to `url` with basic auth and validate the response.
    async fn request_token(
        &self,
        url: &str,
        api_key: &str,
        api_secret: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<TokenResponse> {
        let request = FormRequest {
            url: url.to_owned(),
            basic_auth: Some(BasicAuth::new(api_key, api_secret)),
            form,
        };

        debug!(
            endpoint = %request.url,
            grant_type = request.field("grant_type").unwrap_or_default(),
            "requesting OAuth token"
        );

        let response = self
            .transport
            .post_form(&request)
            .await
            .map_err(|e| match e {
                TransportError::Send(source) => {
                    warn!(error = %source, "network error while contacting OAuth endpoint");
                    Error::Transport {
                        message: format!(
                            "Network error while contacting Trustpilot OAuth endpoint: {source}"
                        ),
                        source,
                    }
                }
                TransportError::Body(source) => {
                    warn!(error = %source, "network error while streaming OAuth response");
                    Error::Transport {
                        message: format!("Network error while streaming content: {source}"),
                        source,
                    }
                }
            })?;

        // Status is checked before the body is parsed
        if response.status >= 400 {
            warn!(status = response.status, "OAuth request rejected");
            return Err(Error::HttpStatus {
                status: response.status,
                message: format!(
                    "Trustpilot returned HTTP {} during OAuth request.",
                    response.status
                ),
            });
        }

        TokenResponse::from_slice(&response.body).inspect_err(|e| {
            warn!(error = %e, "invalid OAuth token response");
        })
    }

    fn create_access_token(&self, response: TokenResponse) -> Result<AccessToken> {
        let construction_error = |cause: String| {
            warn!(error = %cause, "could not create access token");
            Error::Construction(format!(
                "Could not create AccessToken from Trustpilot data: {cause}"
            ))
        };

        let expires_in = match &response.expires_in {
            Some(expires_in) => expires_in.seconds().map_err(construction_error)?,
            None => None,
        };

        let now = self.clock.now();
        let expiry = match expires_in {
            None => now.checked_add(DEFAULT_TOKEN_LIFETIME),
            Some(secs) if secs > 0 => now.checked_add(Duration::from_secs(secs.unsigned_abs())),
            // Negative lifetime: the token is issued already expired
            Some(secs) => now.checked_sub(Duration::from_secs(secs.unsigned_abs())),
        }
        .ok_or_else(|| construction_error(format!("expires_in {expires_in:?} out of range")))?;

        info!(
            expires_in_secs = expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME.as_secs() as i64),
            has_refresh_token = response.refresh_token.is_some(),
            "access token issued"
        );

        Ok(AccessToken::new(
            response.access_token,
            expiry,
            response.refresh_token,
        ))
    }
}
