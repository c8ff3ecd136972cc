use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::auth::extractor::AuthUser;
use crate::auth::session::{self, LoginRequest, SignupRequest};
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn signup(
    State(state): State<SharedState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AppError> {
    let user = session::signup(&state, &req).await?;
    let access_token = session::start_session(&state, &user).await?;

    let jar = session::session_cookie(&state.config, &access_token);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse { access_token, user }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let user = session::login(&state, &req).await?;
    let access_token = session::start_session(&state, &user).await?;

    let jar = session::session_cookie(&state.config, &access_token);
    Ok((jar, Json(AuthResponse { access_token, user })))
}

/// Ends the session. Works without a valid session so stale cookies can
/// always be cleared.
pub async fn logout(
    State(state): State<SharedState>,
    auth: Option<AuthUser>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if let Some(auth) = auth {
        session::end_session(&state, &auth).await?;
    }

    Ok((
        session::clear_session_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    Ok(Json(user))
}
