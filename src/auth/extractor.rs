use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::jwt::{self, Claims};
use crate::auth::session::SESSION_COOKIE;
use crate::db;
use crate::error::AppError;
use crate::models::Appointment;
use crate::state::SharedState;

/// The session user of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub is_barber: bool,
    pub session_id: String,
}

impl AuthUser {
    /// Barbers see every appointment, clients only their own.
    pub fn can_access(&self, appointment: &Appointment) -> bool {
        self.is_barber || appointment.user_id == self.user_id
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            user_id: claims.uid,
            username: claims.sub,
            name: claims.name,
            is_barber: claims.barber,
            session_id: claims.jti,
        }
    }
}

/// A token is only honoured while its session row exists.
async fn authenticate(token: &str, state: &SharedState) -> Result<AuthUser, AppError> {
    let claims = jwt::decode_token(token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    if !db::sessions::is_active(&state.pool, &claims.jti).await? {
        return Err(AppError::Unauthorized("Session has ended".to_string()));
    }
    Ok(claims.into())
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token first, then the session cookie
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return authenticate(token, state).await;
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(SESSION_COOKIE) {
            Some(cookie) => authenticate(cookie.value(), state).await,
            None => Err(AppError::Unauthorized(
                "Missing authentication token".to_string(),
            )),
        }
    }
}

/// Pages that behave differently for signed-in visitors take `Option<AuthUser>`.
impl OptionalFromRequestParts<SharedState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <AuthUser as FromRequestParts<SharedState>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}
