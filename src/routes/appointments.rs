use axum::extract::{Path, State};
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Appointment;
use crate::state::SharedState;

/// Appointments visible to the session user: their own as a client, every
/// row as a barber.
pub async fn visible_to(
    state: &SharedState,
    auth: &AuthUser,
) -> Result<Vec<Appointment>, AppError> {
    let rows = if auth.is_barber {
        db::appointments::list_all(&state.pool).await?
    } else {
        db::appointments::list_by_user(&state.pool, auth.user_id).await?
    };
    Ok(rows)
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    Ok(Json(visible_to(&state, &auth).await?))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = db::appointments::find_by_id(&state.pool, id)
        .await?
        .filter(|a| auth.can_access(a))
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    Ok(Json(appointment))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Someone else's appointment looks the same as a missing one
    db::appointments::find_by_id(&state.pool, id)
        .await?
        .filter(|a| auth.can_access(a))
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    if !db::appointments::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    }

    tracing::info!(appointment_id = id, user_id = auth.user_id, "Appointment deleted");
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
