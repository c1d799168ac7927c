//! Token endpoint response decoding
//!
//! Validation happens in a fixed order so each failure maps to exactly one
//! error variant: invalid JSON is `Decode`, a non-object or a missing
//! `access_token` is `Protocol`, and a field of the wrong type is
//! `Construction`. A scalar `access_token` is coerced to its string form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Successful response from the token and refresh endpoints.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(deserialize_with = "token_as_string")]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<ExpiresIn>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Accept a scalar `access_token` and use its string form.
fn token_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(token) => Ok(token),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "access_token must be a string, number or boolean, got {other}"
        ))),
    }
}

/// `expires_in` as sent by the server: normally an integer number of
/// seconds, occasionally a float or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExpiresIn {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ExpiresIn {
    /// Lifetime in whole seconds, or `None` when the value is zero or empty.
    ///
    /// Fractions are truncated. A negative value is kept: the token is
    /// issued already expired.
    pub fn seconds(&self) -> std::result::Result<Option<i64>, String> {
        let secs = match self {
            ExpiresIn::Integer(secs) => *secs,
            ExpiresIn::Float(secs) => secs.trunc() as i64,
            ExpiresIn::Text(text) if text.trim().is_empty() => return Ok(None),
            ExpiresIn::Text(text) => {
                let trimmed = text.trim();
                match trimmed.parse::<i64>() {
                    Ok(secs) => secs,
                    Err(_) => trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|secs| secs.is_finite())
                        .map(|secs| secs.trunc() as i64)
                        .ok_or_else(|| format!("invalid expires_in {text:?}"))?,
                }
            }
        };
        Ok((secs != 0).then_some(secs))
    }
}

impl TokenResponse {
    /// Decode and validate a token endpoint body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            Error::Decode(format!("Failed to decode Trustpilot OAuth JSON response: {e}"))
        })?;

        let Value::Object(fields) = value else {
            return Err(Error::Protocol(
                "Unexpected OAuth response format from Trustpilot.".into(),
            ));
        };

        if fields.get("access_token").is_none_or(Value::is_null) {
            return Err(Error::Protocol(
                "Token response missing required field: access_token".into(),
            ));
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            Error::Construction(format!(
                "Could not create AccessToken from Trustpilot data: {e}"
            ))
        })
    }
}
