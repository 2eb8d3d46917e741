//! Password hashing using bcrypt
//!
//! Provides secure password hashing and verification with a fixed cost
//! factor.
//!
//! # Performance Considerations
//!
//! Bcrypt is intentionally CPU-intensive. Handlers should use the
//! `*_async` variants, which run the work on the blocking thread pool.

use anyhow::Result;

/// Bcrypt cost factor. Higher doubles the work per increment.
const BCRYPT_COST: u32 = 12;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt (blocking operation)
    ///
    /// # Performance Note
    /// This is CPU-intensive. For async contexts, use `hash_async`.
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// Uses bcrypt's own verify routine, which is safe against timing
    /// attacks on the comparison.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
