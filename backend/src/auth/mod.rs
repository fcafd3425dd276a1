//! Authentication module
//!
//! Sessions are bearer JWTs with a `jti`; logging out revokes the `jti`.
//! Passwords are hashed with argon2.

mod jwt;
mod middleware;
mod password;
mod sessions;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use sessions::RevokedSessions;
