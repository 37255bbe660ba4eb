use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::credentials::Credential;
use crate::error::{ClientError, Result};
use crate::utils::constants::{ACCESS_TOKEN_FIELD, ACCESS_TOKEN_PATH, BEARER_PREFIX};

/// Bearer token and the authorization header derived from it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    access_token: String,
    headers: HeaderMap,
}

impl AuthSession {
    pub fn new(access_token: String) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("{}{}", BEARER_PREFIX, access_token))
            .map_err(|e| ClientError::Decode(format!("access token is not a valid header value: {}", e)))?;
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(AUTHORIZATION, value);
        Ok(Self { access_token, headers })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Exchange the api key for a short-lived access token.
pub async fn request_access_token(
    client: &Client,
    api_url: &str,
    credential: &Credential,
) -> Result<AuthSession> {
    let url = format!("{}{}", api_url, ACCESS_TOKEN_PATH);
    debug!(url = %url, key_id = %credential.key_id, "requesting access token");

    let response = client
        .post(&url)
        .json(credential)
        .send()
        .await
        .inspect_err(|e| error!(url = %url, error = %e, "request error during authentication"))?;

    let status = response.status();
    if !status.is_success() {
        error!(url = %url, status = status.as_u16(), "HTTP error during authentication");
        return Err(ClientError::Http { status, url });
    }

    let body: Value = response
        .json()
        .await
        .inspect_err(|e| error!(url = %url, error = %e, "unreadable authentication response"))?;

    let access_token = body[ACCESS_TOKEN_FIELD]
        .as_str()
        .ok_or(ClientError::MissingField(ACCESS_TOKEN_FIELD))
        .inspect_err(|_| error!(url = %url, "authentication response has no access_token"))?
        .to_owned();

    let session = AuthSession::new(access_token)
        .inspect_err(|e| error!(url = %url, error = %e, "access token cannot be used as a header"))?;
    info!(status = status.as_u16(), "authentication successful");
    Ok(session)
}
