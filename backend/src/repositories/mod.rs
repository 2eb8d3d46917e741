//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod login_attempts;
pub mod user;
pub mod verification;

pub use login_attempts::LoginAttemptRepository;
pub use user::{
    is_unique_violation, CreateUser, NewVerificationToken, UserRecord, UserRepository,
    UserWithProfileRecord,
};
pub use verification::VerificationTokenRepository;
