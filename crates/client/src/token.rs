//! Bearer token identity decoding.
//!
//! The backend issues JWTs whose claims carry the user's identity as a
//! two-element array `[email, role]`. The client only reads those claims;
//! the signature is checked by the server on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::error::TokenError;

/// Prefix the backend puts in front of issued tokens.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub role: String,
}

/// Decode the `[email, role]` identity from `token`.
///
/// Accepts the token with or without its `Bearer ` prefix. The identity is
/// read from the `identity` claim, falling back to `sub`.
pub fn decode_identity(token: &str) -> Result<Identity, TokenError> {
    let claims = decode_claims(token)?;

    let identity = claims
        .get("identity")
        .or_else(|| claims.get("sub"))
        .and_then(Value::as_array)
        .ok_or(TokenError::MissingIdentity)?;

    match (
        identity.first().and_then(Value::as_str),
        identity.get(1).and_then(Value::as_str),
    ) {
        (Some(email), Some(role)) => Ok(Identity {
            email: email.to_string(),
            role: role.to_string(),
        }),
        _ => Err(TokenError::MissingIdentity),
    }
}

/// Decode the claims segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<Value, TokenError> {
    let raw = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();

    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 || segments[1].is_empty() {
        return Err(TokenError::Malformed);
    }

    let claims_segment = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(claims_segment)
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Json(e.to_string()))
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}{}.{}.c2lnbmF0dXJl", BEARER_PREFIX, header, body)
}
