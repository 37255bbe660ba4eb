//! Shared constants and invariants

pub const DEFAULT_API_VERSION: &str = "v0";
pub const DEFAULT_CONFIG_PATH: &str = "gen3-metadata.yaml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Suffix stripped from the api key issuer to obtain the service root.
pub const ISSUER_USER_SUFFIX: &str = "/user";

pub const ACCESS_TOKEN_PATH: &str = "/user/credentials/cdis/access_token";
pub const ACCESS_TOKEN_FIELD: &str = "access_token";
pub const DATA_FIELD: &str = "data";

pub const BEARER_PREFIX: &str = "bearer ";
