pub mod jwt;
pub mod session;

pub use jwt::{decode_claims, url_from_jwt, ApiKeyClaims};
pub use session::{request_access_token, AuthSession};
