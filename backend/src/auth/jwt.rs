//! JWT token generation and validation
//!
//! Access and refresh tokens are signed with distinct secrets so a leaked
//! refresh secret never validates access tokens (and vice versa). Keys are
//! pre-computed once at startup and shared via `AppState`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Token type discriminator embedded in every claim set
const TYPE_ACCESS: &str = "access";
const TYPE_REFRESH: &str = "refresh";

/// Raw JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email, present on access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

/// Verified access token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: Uuid,
    pub email: String,
}

/// Verified refresh token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    pub user_id: Uuid,
}

/// Token verification outcome, made explicit instead of a catch-all error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("wrong token type")]
    WrongType,
}

/// Pre-computed signing/verification keys for one secret
#[derive(Clone)]
struct KeyPair {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl KeyPair {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service holding both key pairs and the expiry configuration
///
/// # Performance Note
/// Create once at application startup and store in AppState.
/// Do NOT create per-request.
#[derive(Clone)]
pub struct TokenService {
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
}

impl TokenService {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_expiry_secs: i64,
        refresh_expiry_secs: i64,
    ) -> Self {
        Self {
            access_keys: KeyPair::new(access_secret),
            refresh_keys: KeyPair::new(refresh_secret),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    /// Generate a short-lived access token carrying the user's email
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        self.generate(
            user_id,
            Some(email.to_string()),
            TYPE_ACCESS,
            self.access_expiry_secs,
            &self.access_keys,
        )
    }

    /// Generate a longer-lived refresh token
    pub fn generate_refresh_token(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.generate(
            user_id,
            None,
            TYPE_REFRESH,
            self.refresh_expiry_secs,
            &self.refresh_keys,
        )
    }

    fn generate(
        &self,
        user_id: Uuid,
        email: Option<String>,
        token_type: &str,
        expiry_secs: i64,
        keys: &KeyPair,
    ) -> anyhow::Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type, e))
    }

    fn verify(&self, token: &str, keys: &KeyPair, expected_type: &str) -> Result<Claims, TokenError> {
        let data =
            decode::<Claims>(token, &keys.decoding, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                }
            })?;

        if data.claims.token_type != expected_type {
            return Err(TokenError::WrongType);
        }
        Ok(data.claims)
    }

    /// Verify an access token: signature, expiry and discriminator
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims = self.verify(token, &self.access_keys, TYPE_ACCESS)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)?;
        let email = claims.email.ok_or(TokenError::Malformed)?;
        Ok(AccessClaims { user_id, email })
    }

    /// Verify a refresh token with the same discipline
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let claims = self.verify(token, &self.refresh_keys, TYPE_REFRESH)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)?;
        Ok(RefreshClaims { user_id })
    }

    /// Refresh token lifetime, used for the cookie Max-Age
    #[inline]
    pub fn refresh_expiry_secs(&self) -> i64 {
        self.refresh_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("access-test-secret", "refresh-test-secret", 900, 604800)
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id, "a@b.com").unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_generate_and_verify_refresh_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_refresh_token(user_id).unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();
        let token = service
            .generate_access_token(Uuid::new_v4(), "a@b.com")
            .unwrap();

        // Different secret, so the signature itself fails first
        assert!(service.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = create_test_service();
        let token = service.generate_refresh_token(Uuid::new_v4()).unwrap();

        assert!(service.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_type_detected_even_with_shared_secret() {
        // Same secret on both sides: only the discriminator can tell the
        // tokens apart, and it must
        let service = TokenService::new("same-secret", "same-secret", 900, 604800);
        let refresh = service.generate_refresh_token(Uuid::new_v4()).unwrap();

        assert_eq!(
            service.verify_access_token(&refresh),
            Err(TokenError::WrongType)
        );
    }

    #[test]
    fn test_expired_token_reported_as_expired() {
        let service = TokenService::new("access-test-secret", "refresh-test-secret", -120, -120);
        let token = service
            .generate_access_token(Uuid::new_v4(), "a@b.com")
            .unwrap();

        assert_eq!(service.verify_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = create_test_service();
        assert_eq!(
            service.verify_access_token("invalid.token.here"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Arc increments only
    }
}
