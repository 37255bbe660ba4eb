// tests/common/mod.rs
use std::io::Write;
use std::path::Path;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
pub use serde_json::json;
use serde_json::Value;
use tempfile::NamedTempFile;

pub const KEY_ID: &str = "mock_key_id";

/// Unsigned api key carrying the given claims.
pub fn sample_api_key(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.not-a-real-signature", header, payload)
}

/// Api key whose issuer points at `base_url`, the way fence issues them.
pub fn api_key_for(base_url: &str) -> String {
    sample_api_key(json!({
        "iss": format!("{}/user", base_url),
        "sub": "42",
        "purpose": "api_key",
        "aud": ["data", "user", "fence", "openid"],
    }))
}

/// Body the client is expected to post to the token endpoint.
pub fn credential_json(api_key: &str, key_id: &str) -> Value {
    json!({"api_key": api_key, "key_id": key_id})
}

pub fn write_credentials(api_key: &str, key_id: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp credential file");
    file.write_all(credential_json(api_key, key_id).to_string().as_bytes())
        .expect("write credential file");
    file
}

/// Replace the content of an existing credential file.
pub fn rewrite_credentials(path: &Path, api_key: &str, key_id: &str) {
    std::fs::write(path, credential_json(api_key, key_id).to_string()).expect("rewrite credential file");
}
