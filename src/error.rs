//! Client error taxonomy.
//!
//! Every failure the client can hit maps to exactly one variant. Callers
//! decide how to recover; the client itself never retries.

use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential file does not exist.
    #[error("credential file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Credential file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON or does not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// API key is not a decodable JWT.
    #[error("invalid api key token: {0}")]
    InvalidToken(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { status: StatusCode, url: String },

    /// A required field is absent from a response or payload.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// Network or client-side failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// Status code carried by an HTTP failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::MissingField("access_token");
        assert_eq!(err.to_string(), "missing field 'access_token'");

        let err = ClientError::Http {
            status: StatusCode::UNAUTHORIZED,
            url: "https://example.org/user/credentials/cdis/access_token".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 401 Unauthorized from https://example.org/user/credentials/cdis/access_token"
        );
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        let err = ClientError::FileNotFound { path: PathBuf::from("/nope/credentials.json") };
        assert_eq!(err.to_string(), "credential file not found: /nope/credentials.json");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
