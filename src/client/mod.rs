pub mod fetch_key;
pub mod metadata_client;

pub use fetch_key::FetchKey;
pub use metadata_client::{FetchOptions, MetadataClient};
