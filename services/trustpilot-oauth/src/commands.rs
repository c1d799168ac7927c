//! Command execution
//!
//! Each command maps to exactly one `Authenticator` call. The result is
//! returned as a JSON value for printing on stdout.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use trustpilot_auth::{AccessToken, Authenticator, generate_state};

use crate::cli::Command;
use crate::config::{Config, PASSWORD_ENV};

/// JSON form of an issued token.
#[derive(Debug, Serialize)]
pub struct TokenOutput<'a> {
    pub access_token: &'a str,
    /// Unix timestamp in milliseconds
    pub expires_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<&'a str>,
}

impl<'a> From<&'a AccessToken> for TokenOutput<'a> {
    fn from(token: &'a AccessToken) -> Self {
        Self {
            access_token: token.token(),
            expires_at: token.expiry_unix_millis(),
            refresh_token: token.refresh_token(),
        }
    }
}

/// Run one command against the authenticator.
pub async fn run(
    authenticator: &Authenticator,
    config: &Config,
    command: Command,
) -> Result<serde_json::Value> {
    let api_key = config.credentials.api_key.as_str();

    let token = match command {
        Command::ClientCredentials => {
            authenticator
                .request_client_credentials_access_token(api_key, config.api_secret()?)
                .await?
        }
        Command::Password { username } => {
            let password = config
                .credentials
                .password
                .as_ref()
                .with_context(|| format!("password grant requires {PASSWORD_ENV}"))?;
            authenticator
                .request_password_access_token(
                    api_key,
                    config.api_secret()?,
                    &username,
                    password.expose(),
                )
                .await?
        }
        Command::AuthorizationCode { code, redirect_uri } => {
            let redirect_uri = redirect_uri_or_default(redirect_uri, config)?;
            authenticator
                .request_authorization_code_access_token(
                    api_key,
                    config.api_secret()?,
                    &code,
                    &redirect_uri,
                )
                .await?
        }
        Command::Refresh { refresh_token } => {
            authenticator
                .refresh_access_token(api_key, config.api_secret()?, &refresh_token)
                .await?
        }
        Command::Revoke { refresh_token } => {
            authenticator.revoke_refresh_token(&refresh_token).await?;
            return Ok(serde_json::json!({ "revoked": true }));
        }
        Command::AuthorizeUrl {
            redirect_uri,
            state,
            generate_state: generate,
            scopes,
        } => {
            let redirect_uri = redirect_uri_or_default(redirect_uri, config)?;
            let state = if generate { Some(generate_state()) } else { state };
            let url = authenticator.build_authorization_url(
                api_key,
                &redirect_uri,
                state.as_deref(),
                scopes.as_slice(),
            );
            return Ok(serde_json::json!({ "url": url, "state": state }));
        }
    };

    info!(
        expires_at = token.expiry_unix_millis(),
        has_refresh_token = token.refresh_token().is_some(),
        "token obtained"
    );
    Ok(serde_json::to_value(TokenOutput::from(&token))?)
}

fn redirect_uri_or_default(redirect_uri: Option<String>, config: &Config) -> Result<String> {
    redirect_uri
        .or_else(|| config.credentials.redirect_uri.clone())
        .context("no redirect URI: pass --redirect-uri or set credentials.redirect_uri")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, UNIX_EPOCH};
    use trustpilot_auth::{
        BoxFuture, Endpoints, FixedClock, FormRequest, HttpResponse, HttpTransport,
        TransportError,
    };

    use crate::config::{CredentialsConfig, HttpConfig};

    /// Returns one fixed response and keeps every request.
    struct StubTransport {
        status: u16,
        body: &'static str,
        requests: Mutex<Vec<FormRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl HttpTransport for StubTransport {
        fn post_form<'a>(
            &'a self,
            request: &'a FormRequest,
        ) -> BoxFuture<'a, std::result::Result<HttpResponse, TransportError>> {
            self.requests.lock().unwrap().push(request.clone());
            let response = HttpResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            };
            Box::pin(async move { Ok(response) })
        }
    }

    fn config(secret: Option<&str>, password: Option<&str>) -> Config {
        Config {
            credentials: CredentialsConfig {
                api_key: "api-key".into(),
                api_secret: secret.map(|s| s.to_owned().into()),
                api_secret_file: None,
                password: password.map(|s| s.to_owned().into()),
                redirect_uri: Some("https://example.com/callback".into()),
            },
            endpoints: Endpoints::default(),
            http: HttpConfig::default(),
        }
    }

    fn authenticator(transport: &Arc<StubTransport>) -> Authenticator {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        Authenticator::new(transport.clone()).with_clock(Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn client_credentials_prints_token() {
        let transport = StubTransport::new(
            200,
            r#"{"access_token":"client-token","expires_in":7200}"#,
        );
        let output = run(
            &authenticator(&transport),
            &config(Some("api-secret"), None),
            Command::ClientCredentials,
        )
        .await
        .unwrap();

        assert_eq!(output["access_token"], "client-token");
        assert_eq!(output["expires_at"], 1_700_007_200_000u64);
        assert!(output.get("refresh_token").is_none());
    }

    #[tokio::test]
    async fn password_requires_password_env() {
        let transport = StubTransport::new(200, r#"{"access_token":"t"}"#);
        let err = run(
            &authenticator(&transport),
            &config(Some("api-secret"), None),
            Command::Password {
                username: "user@example.com".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains(PASSWORD_ENV), "got: {err}");
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn password_grant_sends_credentials() {
        let transport = StubTransport::new(
            200,
            r#"{"access_token":"abc123","expires_in":3600,"refresh_token":"refresh123"}"#,
        );
        let output = run(
            &authenticator(&transport),
            &config(Some("api-secret"), Some("secret")),
            Command::Password {
                username: "user@example.com".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(output["refresh_token"], "refresh123");
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].field("password"), Some("secret"));
    }

    #[tokio::test]
    async fn grant_without_secret_is_config_error() {
        let transport = StubTransport::new(200, r#"{"access_token":"t"}"#);
        let err = run(
            &authenticator(&transport),
            &config(None, None),
            Command::Refresh {
                refresh_token: "rt".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("API secret not set"), "got: {err}");
    }

    #[tokio::test]
    async fn authorization_code_uses_configured_redirect() {
        let transport = StubTransport::new(200, r#"{"access_token":"t"}"#);
        run(
            &authenticator(&transport),
            &config(Some("api-secret"), None),
            Command::AuthorizationCode {
                code: "the-code".into(),
                redirect_uri: None,
            },
        )
        .await
        .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0].field("redirect_uri"),
            Some("https://example.com/callback")
        );
    }

    #[tokio::test]
    async fn revoke_reports_success_and_failure() {
        let transport = StubTransport::new(200, "");
        let output = run(
            &authenticator(&transport),
            &config(None, None),
            Command::Revoke {
                refresh_token: "rt".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(output, serde_json::json!({ "revoked": true }));

        let transport = StubTransport::new(500, "");
        let err = run(
            &authenticator(&transport),
            &config(None, None),
            Command::Revoke {
                refresh_token: "rt".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Trustpilot returned HTTP 500 while attempting to revoke token."
        );
    }

    #[tokio::test]
    async fn authorize_url_with_generated_state() {
        let transport = StubTransport::new(500, "");
        let output = run(
            &authenticator(&transport),
            &config(None, None),
            Command::AuthorizeUrl {
                redirect_uri: None,
                state: None,
                generate_state: true,
                scopes: vec!["scope1".into(), "scope2".into()],
            },
        )
        .await
        .unwrap();

        let state = output["state"].as_str().unwrap();
        assert_eq!(state.len(), 43);
        let url = output["url"].as_str().unwrap();
        assert!(url.contains(&format!("state={state}")), "got: {url}");
        assert!(url.contains("scope=scope1+scope2"));
        assert!(transport.requests.lock().unwrap().is_empty());
    }
}
