//! Authentication module
//!
//! bcrypt password hashing, HMAC-signed bearer tokens, and the middleware
//! that gates protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, SIGNING_ALGORITHM};
pub use middleware::{bearer_token, require_bearer, AuthUser};
pub use password::PasswordService;
