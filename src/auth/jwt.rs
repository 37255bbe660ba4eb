use base64::Engine;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::credentials::Credential;
use crate::error::{ClientError, Result};
use crate::utils::constants::ISSUER_USER_SUFFIX;

/// Claims read from the api key. The signature is never checked: the key is
/// only a carrier for the issuer, and the key material to verify it is not
/// available here.
#[derive(Debug, Deserialize, Default)]
pub struct ApiKeyClaims {
    pub iss: Option<String>,
}

pub fn decode_claims(token: &str) -> Result<ApiKeyClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClientError::InvalidToken("expected three dot-separated segments".into()));
    }

    let payload = parts[1].trim_end_matches('=');
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ClientError::InvalidToken(format!("base64 decode error: {}", e)))?;

    serde_json::from_slice::<ApiKeyClaims>(&decoded)
        .map_err(|e| ClientError::InvalidToken(format!("invalid JWT payload: {}", e)))
}

/// Service root taken from the api key issuer, `/user` suffix removed.
pub fn url_from_jwt(credential: &Credential) -> Result<String> {
    let claims = decode_claims(&credential.api_key)?;
    let issuer = claims.iss.unwrap_or_else(|| {
        warn!(key_id = %credential.key_id, "api key has no issuer claim");
        String::new()
    });
    let url = issuer
        .strip_suffix(ISSUER_USER_SUFFIX)
        .unwrap_or(&issuer)
        .to_owned();
    debug!(url = %url, "resolved api url from key issuer");
    Ok(url)
}
