//! Trustpilot OAuth constants
//!
//! Default endpoint URLs for the business-users-for-applications OAuth API.
//! They can be overridden per `Authenticator` through `Endpoints`.

use std::time::Duration;

/// Token endpoint for password, client-credentials and authorization-code grants
pub const TOKEN_ENDPOINT: &str =
    "https://api.trustpilot.com/v1/oauth/oauth-business-users-for-applications/accesstoken";

/// Refresh endpoint for the refresh_token grant
pub const REFRESH_ENDPOINT: &str =
    "https://api.trustpilot.com/v1/oauth/oauth-business-users-for-applications/refresh";

/// Revocation endpoint for refresh tokens
pub const REVOKE_ENDPOINT: &str =
    "https://api.trustpilot.com/v1/oauth/oauth-business-users-for-applications/revoke";

/// Browser-facing authorization endpoint for the authorization-code flow
pub const AUTHORIZE_ENDPOINT: &str = "https://authenticate.trustpilot.com";

/// Lifetime assumed when the token response carries no usable `expires_in`.
/// Some grant types omit expiry; the token is treated as long-lived.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(100 * 60 * 60);

pub const GRANT_PASSWORD: &str = "password";
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";
