pub mod credential;
pub mod loader;
pub mod relaxed;

pub use credential::Credential;
pub use loader::{load_credential, parse_credential};
