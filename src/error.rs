use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::session::AuthError;
use crate::booking::WizardError;

/// Failure of a request handler. Client-facing variants carry the message
/// shown to the user; store and internal failures are logged and masked.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => f.write_str(msg),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
            AppError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(_) | AppError::Database(_) => {
                tracing::error!(error = %self, "Request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::MissingFields
            | AuthError::PasswordMismatch
            | AuthError::TermsNotAccepted => AppError::BadRequest(message),
            AuthError::IncorrectCredentials => AppError::Unauthorized(message),
            AuthError::UsernameTaken => AppError::Conflict(message),
            AuthError::Database(e) => AppError::Database(e),
            AuthError::Internal(e) => AppError::Internal(e),
        }
    }
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::NoDraft => AppError::NotFound(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_client_statuses() {
        assert_eq!(
            AppError::from(AuthError::UsernameTaken).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::IncorrectCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::PasswordMismatch).to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn missing_draft_is_not_found() {
        let err = AppError::from(WizardError::NoDraft);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(WizardError::NoServiceSelected).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
