use sqlx::SqlitePool;

use crate::models::User;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub telephone: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub is_barber: bool,
}

pub async fn create<'e, E: sqlx::SqliteExecutor<'e>>(
    executor: E,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, last_name, telephone, username, password_hash, is_barber)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user.name)
    .bind(user.last_name)
    .bind(user.telephone)
    .bind(user.username)
    .bind(user.password_hash)
    .bind(user.is_barber)
    .fetch_one(executor)
    .await
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_all<'e, E: sqlx::SqliteExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}
