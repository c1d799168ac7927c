//! Trustpilot OAuth client library
//!
//! Obtains, refreshes and revokes access tokens for the Trustpilot
//! business-users-for-applications OAuth API, and builds the browser
//! redirect URL for the authorization-code flow. Token storage, refresh
//! scheduling and retries are left to the caller.
//!
//! Authorization-code flow:
//! 1. Caller generates a CSRF value with `authorize::generate_state()`
//! 2. User is sent to `Authenticator::build_authorization_url()`
//! 3. Caller exchanges the returned code via
//!    `Authenticator::request_authorization_code_access_token()`
//! 4. Before expiry, `Authenticator::refresh_access_token()` issues a new token
//! 5. On logout, `Authenticator::revoke_refresh_token()` invalidates the refresh token

pub mod authenticator;
pub mod authorize;
pub mod clock;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod response;
pub mod token;
pub mod transport;

pub use authenticator::Authenticator;
pub use authorize::{build_authorization_url, generate_state};
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use endpoints::Endpoints;
pub use error::{BoxError, Error, Result};
pub use response::{ExpiresIn, TokenResponse};
pub use token::AccessToken;
pub use transport::{
    BasicAuth, BoxFuture, FormRequest, HttpResponse, HttpTransport, ReqwestTransport,
    TransportError,
};
