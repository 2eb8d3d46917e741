//! Login attempt log repository
//!
//! Append-only: rows are inserted and counted over a trailing window,
//! never mutated or deleted.

use anyhow::Result;
use sqlx::PgPool;

/// Login attempt repository
pub struct LoginAttemptRepository;

impl LoginAttemptRepository {
    /// Append one attempt to the log
    pub async fn record(
        pool: &PgPool,
        email: &str,
        ip_address: &str,
        user_agent: &str,
        success: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (email, ip_address, user_agent, success)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(email)
        .bind(ip_address)
        .bind(user_agent)
        .bind(success)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Count failed attempts for an email inside the trailing window
    ///
    /// Successful logins are not counted, so they never consume rate
    /// limit budget.
    pub async fn count_recent_failures(
        pool: &PgPool,
        email: &str,
        window_minutes: i32,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM login_attempts
            WHERE email = $1
              AND success = FALSE
              AND attempted_at > NOW() - make_interval(mins => $2)
            "#,
        )
        .bind(email)
        .bind(window_minutes)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    // Windowed counting is exercised by the integration tests, which
    // require a database.
}
