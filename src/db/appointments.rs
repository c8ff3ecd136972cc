use sqlx::SqlitePool;

use crate::models::{Appointment, NewAppointment};

pub async fn create<'e, E: sqlx::SqliteExecutor<'e>>(
    executor: E,
    appointment: &NewAppointment,
) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        "INSERT INTO appointments (user_id, user_name, service_type, specifications, date_time)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(appointment.user_id)
    .bind(&appointment.user_name)
    .bind(&appointment.service_type)
    .bind(&appointment.specifications)
    .bind(&appointment.date_time)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        "SELECT * FROM appointments WHERE user_id = $1 ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY id ASC")
        .fetch_all(pool)
        .await
}

/// Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
