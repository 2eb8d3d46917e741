//! Profile retrieval service
//!
//! Shapes the joined user + profile row into the category-discriminated
//! response union.

use crate::error::ApiError;
use crate::repositories::{UserRepository, UserWithProfileRecord};
use campus_connect_shared::models::Category;
use campus_connect_shared::types::{
    AlumniInfo, CollegeInfo, ProfileData, UserDetail, UserProfile,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Profile service
pub struct ProfileService;

impl ProfileService {
    /// Fetch a user's profile, joined with its category-specific row
    ///
    /// A user deleted after token issuance yields `UserNotFound`. A user
    /// whose profile row is missing violates the signup invariant and is
    /// treated as an internal error, not a client one.
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileData, ApiError> {
        let record = UserRepository::find_with_profile(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::UserNotFound)?;

        let category: Category = record.category.parse().map_err(|_| {
            ApiError::Internal(anyhow::anyhow!(
                "user {} has unexpected category {:?}",
                record.id,
                record.category
            ))
        })?;

        let profile = match category {
            Category::College => UserProfile::College {
                college_info: college_info(&record)?,
                user: user_detail(record, category),
            },
            Category::Alumni => UserProfile::Alumni {
                alumni_info: alumni_info(&record)?,
                user: user_detail(record, category),
            },
        };

        Ok(ProfileData { user: profile })
    }
}

fn user_detail(record: UserWithProfileRecord, category: Category) -> UserDetail {
    UserDetail {
        id: record.id,
        name: record.name,
        email: record.email,
        mobile_number: record.mobile_number,
        alternate_mobile_number: record.alternate_mobile_number,
        gender: record.gender,
        category,
        email_verified: record.email_verified,
        mobile_verified: record.mobile_verified,
        status: record.status,
        created_at: record.created_at,
    }
}

fn college_info(record: &UserWithProfileRecord) -> Result<CollegeInfo, ApiError> {
    match (&record.course, record.year_of_graduation) {
        (Some(course), Some(year_of_graduation)) => Ok(CollegeInfo {
            course: course.clone(),
            year_of_graduation,
            id_card_photo_url: record.id_card_photo_url.clone(),
            verification_status: record
                .college_verification_status
                .clone()
                .unwrap_or_else(|| "pending".to_string()),
        }),
        _ => Err(missing_profile(record)),
    }
}

fn alumni_info(record: &UserWithProfileRecord) -> Result<AlumniInfo, ApiError> {
    match (&record.profession, record.year_passed_out) {
        (Some(profession), Some(year_passed_out)) => Ok(AlumniInfo {
            profession: profession.clone(),
            year_passed_out,
            verification_status: record
                .alumni_verification_status
                .clone()
                .unwrap_or_else(|| "pending".to_string()),
        }),
        _ => Err(missing_profile(record)),
    }
}

fn missing_profile(record: &UserWithProfileRecord) -> ApiError {
    ApiError::Internal(anyhow::anyhow!(
        "user {} ({}) has no matching profile row",
        record.id,
        record.category
    ))
}
