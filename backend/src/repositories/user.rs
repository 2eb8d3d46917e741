//! User repository for database operations

use crate::repositories::VerificationTokenRepository;
use anyhow::Result;
use campus_connect_shared::validation::CategoryData;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub gender: String,
    pub category: String,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User joined with whichever category profile row exists
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserWithProfileRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub gender: String,
    pub category: String,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    // College profile columns (NULL for alumni)
    pub course: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub id_card_photo_url: Option<String>,
    pub college_verification_status: Option<String>,
    // Alumni profile columns (NULL for college students)
    pub profession: Option<String>,
    pub year_passed_out: Option<i32>,
    pub alumni_verification_status: Option<String>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub alternate_mobile_number: Option<String>,
    pub gender: String,
    pub category: String,
}

/// Verification token to persist alongside the new user
#[derive(Debug, Clone)]
pub struct NewVerificationToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, mobile_number, \
     alternate_mobile_number, gender, category, email_verified, mobile_verified, \
     status, created_at, updated_at";

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a user, its category profile row and its email verification
    /// token as one transaction
    ///
    /// Either all three rows exist afterwards or none do; a unique
    /// violation on `users.email` rolls everything back and surfaces to
    /// the caller (see [`is_unique_violation`]).
    pub async fn create_with_profile(
        pool: &PgPool,
        user: CreateUser,
        profile: CategoryData,
        verification: NewVerificationToken,
    ) -> Result<UserRecord> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, mobile_number,
                               alternate_mobile_number, gender, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.mobile_number)
        .bind(&user.alternate_mobile_number)
        .bind(&user.gender)
        .bind(&user.category)
        .fetch_one(&mut *tx)
        .await?;

        match profile {
            CategoryData::College {
                course,
                graduation_year,
            } => {
                sqlx::query(
                    r#"
                    INSERT INTO college_students (user_id, course, year_of_graduation)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(record.id)
                .bind(course)
                .bind(graduation_year)
                .execute(&mut *tx)
                .await?;
            }
            CategoryData::Alumni {
                profession,
                passed_out_year,
            } => {
                sqlx::query(
                    r#"
                    INSERT INTO alumni (user_id, profession, year_passed_out)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(record.id)
                .bind(profession)
                .bind(passed_out_year)
                .execute(&mut *tx)
                .await?;
            }
        }

        VerificationTokenRepository::insert(
            &mut *tx,
            record.id,
            &verification.token,
            verification.expires_at,
        )
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#,
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find a user joined with both profile tables
    ///
    /// At most one side of the join matches thanks to the signup
    /// transaction invariant.
    pub async fn find_with_profile(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<UserWithProfileRecord>> {
        let user = sqlx::query_as::<_, UserWithProfileRecord>(
            r#"
            SELECT
                u.id, u.name, u.email, u.mobile_number, u.alternate_mobile_number,
                u.gender, u.category, u.email_verified, u.mobile_verified,
                u.status, u.created_at,
                cs.course, cs.year_of_graduation, cs.id_card_photo_url,
                cs.verification_status AS college_verification_status,
                a.profession, a.year_passed_out,
                a.verification_status AS alumni_verification_status
            FROM users u
            LEFT JOIN college_students cs ON u.id = cs.user_id
            LEFT JOIN alumni a ON u.id = a.user_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

/// Whether an error from [`UserRepository::create_with_profile`] is a
/// unique-constraint violation (concurrent duplicate signup)
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| match e {
            sqlx::Error::Database(db) => db.code().map(|c| c == "23505"),
            _ => None,
        })
        .unwrap_or(false)
}
