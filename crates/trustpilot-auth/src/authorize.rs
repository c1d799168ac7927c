//! Authorization-code redirect URL and CSRF state
//!
//! Query values use `application/x-www-form-urlencoded` encoding, so spaces
//! in the scope list become `+`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use url::form_urlencoded;

/// Generate a random `state` value for CSRF protection.
///
/// 32 random bytes encoded as URL-safe base64 without padding (43 chars).
/// The authorization server echoes it back in the callback unchanged.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the browser redirect URL for the authorization-code flow.
///
/// `state` is included only when given; `scope` only when `scopes` is
/// non-empty, joined with single spaces.
pub fn build_authorization_url<S: AsRef<str>>(
    authorize_url: &str,
    api_key: &str,
    redirect_uri: &str,
    state: Option<&str>,
    scopes: &[S],
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("client_id", api_key)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code");

    if let Some(state) = state {
        query.append_pair("state", state);
    }

    if !scopes.is_empty() {
        let scope = scopes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        query.append_pair("scope", &scope);
    }

    format!("{authorize_url}?{}", query.finish())
}
