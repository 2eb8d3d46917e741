//! Authentication workflows: signup, login, email verification
//!
//! Each workflow is a sequence of short-circuiting checks over the
//! relational store. Ordering matters and is part of the contract: e.g.
//! the rate limit check runs before any credential work, and the
//! duplicate-email lookup runs before category validation.

use crate::auth::{
    generate_email_verification_token, PasswordService, TokenService,
};
use crate::config::{RateLimitConfig, VerificationConfig};
use crate::error::ApiError;
use crate::repositories::{
    is_unique_violation, CreateUser, LoginAttemptRepository, NewVerificationToken,
    UserRecord, UserRepository, VerificationTokenRepository,
};
use campus_connect_shared::models::{AccountStatus, Category};
use campus_connect_shared::types::{
    FieldError, LoginData, LoginRequest, LoginUser, PublicUser, SignupData, SignupRequest,
    VerifyEmailData,
};
use campus_connect_shared::validation::{
    validate_category_fields, validate_email, validate_password_strength,
    validate_signup_structure,
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use validator::ValidateEmail;

/// Request metadata captured for the login attempt log
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

/// Successful login: the JSON payload plus the refresh token that goes
/// into the HttpOnly cookie, never into the body
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub data: LoginData,
    pub refresh_token: String,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user with category-specific profile data
    ///
    /// On success the user, its profile row and a 24-hour email
    /// verification token are committed as one transaction. The token is
    /// handed to the out-of-band delivery channel; the response carries
    /// only public user fields.
    pub async fn signup(
        pool: &PgPool,
        verification: &VerificationConfig,
        req: SignupRequest,
    ) -> Result<SignupData, ApiError> {
        // 1. Structural schema validation
        let errors = validate_signup_structure(&req);
        if !errors.is_empty() {
            return Err(ApiError::Validation {
                message: "Invalid input data".to_string(),
                details: errors,
            });
        }

        // 2. Passwords must match
        if req.password != req.confirm_password {
            return Err(ApiError::Validation {
                message: "Passwords do not match".to_string(),
                details: vec![FieldError::new("confirmPassword", "Passwords do not match")],
            });
        }

        // 3. Password strength policy
        let strength_errors = validate_password_strength(&req.password);
        if !strength_errors.is_empty() {
            return Err(ApiError::validation_for_field(
                "Password does not meet requirements",
                "password",
                strength_errors,
            ));
        }

        // 4. Email format again, through a second validator
        let email = req.email.trim().to_string();
        if !email.validate_email() {
            return Err(ApiError::Validation {
                message: "Invalid email format".to_string(),
                details: vec![FieldError::new("email", "Invalid email format")],
            });
        }

        // 5. Duplicate email pre-check (the unique constraint is the
        // backstop for concurrent signups)
        if UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .is_some()
        {
            return Err(ApiError::UserExists);
        }

        // 6. Category-conditional fields
        let category: Category = req
            .category
            .parse()
            .map_err(|_| ApiError::validation("Category must be either college or alumni"))?;
        let profile = validate_category_fields(category, &req).map_err(|details| {
            let message = match category {
                Category::College => "Course and graduation year are required for college students",
                Category::Alumni => "Profession and year passed out are required for alumni",
            };
            ApiError::Validation {
                message: message.to_string(),
                details,
            }
        })?;

        // 7. Hash password on the blocking thread pool
        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        // 8-10. User + profile + verification token, one atomic unit
        let token = generate_email_verification_token();
        let expires_at = Utc::now() + Duration::hours(verification.token_expiry_hours);

        let user = UserRepository::create_with_profile(
            pool,
            CreateUser {
                name: req.name.trim().to_string(),
                email,
                password_hash,
                mobile_number: req.mobile.clone(),
                alternate_mobile_number: req.alternate_mobile.clone(),
                gender: req.gender.clone(),
                category: category.as_str().to_string(),
            },
            profile,
            NewVerificationToken {
                token: token.clone(),
                expires_at,
            },
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                // Lost the race against a concurrent signup
                ApiError::UserExists
            } else {
                ApiError::Internal(e)
            }
        })?;

        // 11. Hand the token to the out-of-band delivery channel.
        // TODO: wire this to a real mail sender; until then the token is
        // surfaced in the logs for manual delivery.
        info!(email = %user.email, token = %token, "Email verification token issued");

        // 12. Public fields only
        Ok(SignupData {
            user: public_user(&user)?,
        })
    }

    /// Login with email and password
    ///
    /// Every rejection on this path is logged as a failed attempt,
    /// including the rate-limit rejection itself, which keeps the window
    /// saturated under continued hammering.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        rate_limit: &RateLimitConfig,
        req: LoginRequest,
        client: &ClientInfo,
    ) -> Result<LoginOutcome, ApiError> {
        // 1. Payload shape
        let email = req.email.trim().to_string();
        let mut errors = Vec::new();
        if !validate_email(&email) {
            errors.push(FieldError::new("email", "Please enter a valid email"));
        }
        if req.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation {
                message: "Invalid input data".to_string(),
                details: errors,
            });
        }

        // 2. Rate limit over the trailing window
        let recent_failures = LoginAttemptRepository::count_recent_failures(
            pool,
            &email,
            rate_limit.window_minutes as i32,
        )
        .await
        .map_err(ApiError::Internal)?;
        if recent_failures >= rate_limit.max_failed_attempts {
            Self::log_attempt(pool, &email, client, false).await?;
            return Err(ApiError::RateLimited);
        }

        // 3. User lookup; absence is indistinguishable from a bad password
        let Some(user) = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        else {
            Self::log_attempt(pool, &email, client, false).await?;
            return Err(ApiError::InvalidCredentials);
        };

        // 4. Password check on the blocking thread pool
        let valid = PasswordService::verify_async(req.password.clone(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            Self::log_attempt(pool, &email, client, false).await?;
            return Err(ApiError::InvalidCredentials);
        }

        // 5. Email must be verified
        if !user.email_verified {
            Self::log_attempt(pool, &email, client, false).await?;
            return Err(ApiError::EmailNotVerified);
        }

        // 6. Account status
        if !AccountStatus::from_db(&user.status).can_login() {
            Self::log_attempt(pool, &email, client, false).await?;
            return Err(ApiError::AccountSuspended);
        }

        // 7. Issue tokens and log success
        let access_token = tokens
            .generate_access_token(user.id, &user.email)
            .map_err(ApiError::Internal)?;
        let refresh_token = tokens
            .generate_refresh_token(user.id)
            .map_err(ApiError::Internal)?;

        Self::log_attempt(pool, &email, client, true).await?;

        let category = parse_category(&user)?;
        Ok(LoginOutcome {
            data: LoginData {
                user: LoginUser {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    category,
                    status: user.status,
                    email_verified: user.email_verified,
                },
                access_token,
            },
            refresh_token,
        })
    }

    /// Verify an email address from an opaque token
    ///
    /// Missing, expired and already-used tokens all produce the same
    /// error so the endpoint cannot be used as a token-guessing oracle.
    pub async fn verify_email(pool: &PgPool, token: &str) -> Result<VerifyEmailData, ApiError> {
        if token.is_empty() {
            return Err(ApiError::validation("Verification token is required"));
        }

        let email = VerificationTokenRepository::consume(pool, token)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::InvalidVerificationToken)?;

        Ok(VerifyEmailData { email })
    }

    async fn log_attempt(
        pool: &PgPool,
        email: &str,
        client: &ClientInfo,
        success: bool,
    ) -> Result<(), ApiError> {
        LoginAttemptRepository::record(
            pool,
            email,
            &client.ip_address,
            &client.user_agent,
            success,
        )
        .await
        .map_err(ApiError::Internal)
    }
}

fn parse_category(user: &UserRecord) -> Result<Category, ApiError> {
    user.category.parse().map_err(|_| {
        ApiError::Internal(anyhow::anyhow!(
            "user {} has unexpected category {:?}",
            user.id,
            user.category
        ))
    })
}

fn public_user(user: &UserRecord) -> Result<PublicUser, ApiError> {
    Ok(PublicUser {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        category: parse_category(user)?,
        status: user.status.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Workflow paths that touch the database are covered by the
    // integration tests. The pure pieces are covered here.

    #[test]
    fn test_public_user_never_carries_hash() {
        let user = UserRecord {
            id: uuid::Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password_hash: "$2b$12$secret".into(),
            mobile_number: "9876543210".into(),
            alternate_mobile_number: None,
            gender: "female".into(),
            category: "college".into(),
            email_verified: false,
            mobile_verified: false,
            status: "pending".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let public = public_user(&user).unwrap();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert_eq!(public.category, Category::College);
    }

    #[test]
    fn test_unexpected_category_is_internal_error() {
        let user = UserRecord {
            id: uuid::Uuid::new_v4(),
            name: "X".into(),
            email: "x@example.com".into(),
            password_hash: String::new(),
            mobile_number: String::new(),
            alternate_mobile_number: None,
            gender: "other".into(),
            category: "faculty".into(),
            email_verified: true,
            mobile_verified: false,
            status: "active".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(parse_category(&user).is_err());
    }
}
