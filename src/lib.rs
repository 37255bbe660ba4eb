//! # Gen3 Metadata Client Library
//!
//! Authenticates against a Gen3 data commons with an api key file,
//! exports submission metadata for program/project/node triples,
//! and flattens the returned records into tables.
//!
//! Modules:
//! - `credentials` — api key file loading (strict and unquoted dialects)
//! - `auth` — issuer lookup from the api key and bearer token exchange
//! - `client` — the metadata client and its data/table stores
//! - `table` — JSON record flattening
//! - `config` — client settings loaded from YAML

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod table;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::client::{FetchKey, FetchOptions, MetadataClient};
pub use crate::error::{ClientError, Result};
pub use crate::table::{json_to_table, Table};
