//! Authentication module
//!
//! JWT access/refresh tokens (distinct secrets), bcrypt password hashing
//! and opaque verification-token generation.

mod jwt;
mod middleware;
mod password;
mod verification;

pub use jwt::{AccessClaims, Claims, RefreshClaims, TokenError, TokenService};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use verification::{generate_email_verification_token, generate_password_reset_token};
