//! Configuration types and loading
//!
//! Config path precedence: `--config` > `TRUSTPILOT_OAUTH_CONFIG` env var >
//! `trustpilot-oauth.toml`. The API secret and user password come from the
//! environment (or a secret file), never from the TOML directly.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use trustpilot_auth::Endpoints;

pub const API_SECRET_ENV: &str = "TRUSTPILOT_API_SECRET";
pub const PASSWORD_ENV: &str = "TRUSTPILOT_PASSWORD";
pub const CONFIG_PATH_ENV: &str = "TRUSTPILOT_OAUTH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "trustpilot-oauth.toml";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Application credentials
#[derive(Debug, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: String,
    #[serde(skip)]
    pub api_secret: Option<Secret<String>>,
    /// Path to a file containing the API secret (alternative to the env var)
    #[serde(default)]
    pub api_secret_file: Option<PathBuf>,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    /// Default redirect URI for the authorization-code flow
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file, then overlay secrets from the
    /// environment.
    ///
    /// API secret resolution order:
    /// 1. TRUSTPILOT_API_SECRET env var (ignored when empty)
    /// 2. api_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| common::Error::io(path, e))?;
        let mut config: Config = toml::from_str(&contents)?;
        config.validate()?;

        config.credentials.api_secret = match Secret::from_env(API_SECRET_ENV) {
            Some(secret) => Some(secret),
            None => match config.credentials.api_secret_file {
                Some(ref secret_file) => Secret::from_file(secret_file)?,
                None => None,
            },
        };

        config.credentials.password = Secret::from_env(PASSWORD_ENV);

        Ok(config)
    }

    fn validate(&self) -> common::Result<()> {
        if self.credentials.api_key.trim().is_empty() {
            return Err(common::Error::Config("api_key must not be empty".into()));
        }

        for (key, url) in self.endpoints.iter() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(common::Error::Config(format!(
                    "{key} must start with http:// or https://, got: {url}"
                )));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// The API secret, or a configuration error naming where to set it.
    pub fn api_secret(&self) -> common::Result<&str> {
        self.credentials
            .api_secret
            .as_ref()
            .map(|s| s.expose().as_str())
            .ok_or_else(|| {
                common::Error::Config(format!(
                    "API secret not set: export {API_SECRET_ENV} or set credentials.api_secret_file"
                ))
            })
    }

    /// Resolve config file path from CLI arg or TRUSTPILOT_OAUTH_CONFIG env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }
}
