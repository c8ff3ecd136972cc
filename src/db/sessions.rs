use chrono::Utc;
use sqlx::SqlitePool;

/// Records a session. `expires_at` is a unix timestamp matching the token's `exp`.
pub async fn create<'e, E: sqlx::SqliteExecutor<'e>>(
    executor: E,
    id: &str,
    user_id: i64,
    expires_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(user_id)
        .bind(expires_at)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn is_active(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE id = $1 AND expires_at > $2")
            .bind(id)
            .bind(Utc::now().timestamp())
            .fetch_one(pool)
            .await?;
    Ok(row.0 > 0)
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
