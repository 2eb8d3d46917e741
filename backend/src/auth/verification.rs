//! Opaque single-use token generation
//!
//! Email verification and password reset tokens are not JWTs: they are
//! 32 random bytes hex-encoded, unguessable and unique with overwhelming
//! probability, stored server-side with an expiry and a used flag.

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token (64 hex characters on the wire)
const TOKEN_BYTES: usize = 32;

fn random_hex_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut out = String::with_capacity(TOKEN_BYTES * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Generate an email verification token
pub fn generate_email_verification_token() -> String {
    random_hex_token()
}

/// Generate a password reset token
pub fn generate_password_reset_token() -> String {
    random_hex_token()
}
