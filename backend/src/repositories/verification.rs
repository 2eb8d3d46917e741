//! Email verification token repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Email verification token repository
pub struct VerificationTokenRepository;

impl VerificationTokenRepository {
    /// Insert a fresh token for a user
    ///
    /// Generic over the executor so it can join the signup transaction.
    pub async fn insert<'e, E>(
        executor: E,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO email_verification_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Consume a token and mark the owning user's email verified
    ///
    /// The token update is conditional on `used = FALSE` and an
    /// unexpired timestamp, so of two concurrent requests exactly one
    /// sees a row; the loser gets `None`. Both updates commit together.
    ///
    /// Returns the verified email address on success. Missing, expired
    /// and already-used tokens are indistinguishable to the caller.
    pub async fn consume(pool: &PgPool, token: &str) -> Result<Option<String>> {
        let mut tx = pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE email_verification_tokens
            SET used = TRUE
            WHERE token = $1 AND used = FALSE AND expires_at > NOW()
            RETURNING user_id
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            tx.rollback().await?;
            return Ok(None);
        };

        let email = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE users
            SET email_verified = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING email
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(email))
    }
}

#[cfg(test)]
mod tests {
    // Consume-once semantics are exercised by the integration tests,
    // which require a database.
}
