//! API request and response types
//!
//! Every endpoint answers with the same envelope shape so clients can
//! branch on `success` and `error.code` without caring which route they
//! called.

use crate::models::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope with a data payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Successful envelope with a human-readable message
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Failed envelope carrying an error body
    pub fn failure(error: ErrorBody) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }
}

/// Error body inside a failed envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Vec<FieldError>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

/// Field-scoped validation error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Signup request payload
///
/// All fields are defaulted so a missing field surfaces as a field-scoped
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile: String,
    pub alternate_mobile: Option<String>,
    pub gender: String,
    pub category: String,
    // College-specific fields
    pub course: Option<String>,
    pub graduation_year: Option<String>,
    // Alumni-specific fields
    pub profession: Option<String>,
    pub passed_out_year: Option<String>,
}

/// Login request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Email verification request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Public user fields returned after signup
///
/// Never carries the password hash or any other credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub category: Category,
    pub status: String,
}

/// Signup response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    pub user: PublicUser,
}

/// User fields returned on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub category: Category,
    pub status: String,
    pub email_verified: bool,
}

/// Login response payload
///
/// The refresh token is deliberately absent: it travels only in the
/// HttpOnly cookie set alongside this body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub user: LoginUser,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Email verification response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailData {
    pub email: String,
}

/// Common user fields on the profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub gender: String,
    pub category: Category,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// College-specific profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeInfo {
    pub course: String,
    pub year_of_graduation: i32,
    pub id_card_photo_url: Option<String>,
    pub verification_status: String,
}

/// Alumni-specific profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlumniInfo {
    pub profession: String,
    pub year_passed_out: i32,
    pub verification_status: String,
}

/// Profile response, discriminated by user category
///
/// Serialized untagged: the common fields are flattened and exactly one
/// of `college_info` / `alumni_info` appears, matching the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserProfile {
    College {
        #[serde(flatten)]
        user: UserDetail,
        college_info: CollegeInfo,
    },
    Alumni {
        #[serde(flatten)]
        user: UserDetail,
        alumni_info: AlumniInfo,
    },
}

impl UserProfile {
    /// The common fields regardless of variant
    pub fn user(&self) -> &UserDetail {
        match self {
            UserProfile::College { user, .. } | UserProfile::Alumni { user, .. } => user,
        }
    }
}

/// Profile response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub user: UserProfile,
}
