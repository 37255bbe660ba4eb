use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::credentials::credential::Credential;
use crate::credentials::relaxed::{is_unquoted, quote_bare_tokens};
use crate::error::{ClientError, Result};

/// Read and parse a credential file.
pub async fn load_credential(path: &Path) -> Result<Credential> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => ClientError::FileNotFound { path: path.to_path_buf() },
            _ => ClientError::Io { path: path.to_path_buf(), source },
        })
        .inspect_err(|e| error!(path = %path.display(), error = %e, "credential load failed"))?;

    parse_credential(&raw)
        .inspect_err(|e| error!(path = %path.display(), error = %e, "credential decode failed"))
}

/// Strict JSON first, then the unquoted dialect if the content has no quotes.
pub fn parse_credential(raw: &str) -> Result<Credential> {
    let strict_err = match serde_json::from_str::<Credential>(raw) {
        Ok(credential) => return Ok(credential),
        Err(e) => e,
    };

    if !is_unquoted(raw) {
        return Err(strict_err.into());
    }

    warn!("credential is not strict JSON, retrying as unquoted object");
    let repaired = quote_bare_tokens(raw);
    debug!(len = repaired.len(), "credential repaired");
    serde_json::from_str::<Credential>(&repaired)
        .map_err(|e| ClientError::Decode(format!("unrepairable credential: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_strict_file_matches_content() {
        let content = json!({"api_key": "eyJ.eyJ.sig", "key_id": "8c1d"});
        let file = write_temp(&content.to_string());

        let credential = load_credential(file.path()).await.unwrap();
        assert_eq!(credential.to_value(), content);
    }

    #[tokio::test]
    async fn test_unquoted_file_matches_quoted_form() {
        let quoted = write_temp(r#"{"api_key": "eyJhbGciOi.eyJpc3Mi.c2ln-_", "key_id": "8c1d-44"}"#);
        let unquoted = write_temp("{api_key: eyJhbGciOi.eyJpc3Mi.c2ln-_, key_id: 8c1d-44}");

        let expected = load_credential(quoted.path()).await.unwrap();
        let repaired = load_credential(unquoted.path()).await.unwrap();
        assert_eq!(repaired, expected);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let res = load_credential(Path::new("/definitely/not/here/credentials.json")).await;
        assert!(matches!(res, Err(ClientError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_credential(dir.path()).await;
        assert!(matches!(res, Err(ClientError::Io { .. })));
    }

    #[test]
    fn test_quoted_but_malformed_is_not_repaired() {
        let res = parse_credential(r#"{"api_key": abc, "key_id": "k"}"#);
        assert!(matches!(res, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_unrepairable_unquoted_content() {
        let res = parse_credential("api_key = abc\nkey_id = k");
        match res {
            Err(ClientError::Decode(msg)) => assert!(msg.contains("unrepairable")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
