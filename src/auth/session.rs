//! Login, signup and logout, shared by the JSON API and the HTML pages.
//!
//! Every failure carries the exact message shown to the user. Validation runs
//! before the store is touched. A session is a signed token plus a row in
//! `sessions`; logout deletes the row, which invalidates the token.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::config::Config;
use crate::db;
use crate::db::users::NewUser;
use crate::models::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "access_token";

#[derive(Debug)]
pub enum AuthError {
    MissingFields,
    PasswordMismatch,
    TermsNotAccepted,
    IncorrectCredentials,
    UsernameTaken,
    Database(sqlx::Error),
    Internal(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingFields => f.write_str("Please fill all the fields"),
            AuthError::PasswordMismatch => f.write_str("Passwords do not match"),
            AuthError::TermsNotAccepted => f.write_str("You must accept terms and conditions"),
            AuthError::IncorrectCredentials => f.write_str("Incorrect Credentials"),
            AuthError::UsernameTaken => f.write_str("The username is already in use"),
            AuthError::Database(err) => write!(f, "Database error: {err}"),
            AuthError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub accept_terms: bool,
    #[serde(default)]
    pub is_barber: bool,
}

impl SignupRequest {
    /// Local checks, in the order the user sees them.
    pub fn validate(&self) -> Result<(), AuthError> {
        let text_fields = [&self.name, &self.last_name, &self.telephone, &self.username];
        if text_fields.iter().any(|f| f.trim().is_empty())
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !self.accept_terms {
            return Err(AuthError::TermsNotAccepted);
        }
        Ok(())
    }
}

pub async fn login(state: &AppState, req: &LoginRequest) -> Result<User, AuthError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let username = req.username.trim();
    let Some(user) = db::users::find_by_username(&state.pool, username).await? else {
        tracing::info!(username, "Login failed, unknown username");
        return Err(AuthError::IncorrectCredentials);
    };

    let valid = password::verify(&req.password, &user.password_hash).map_err(AuthError::Internal)?;
    if !valid {
        tracing::info!(username, "Login failed, wrong password");
        return Err(AuthError::IncorrectCredentials);
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(user)
}

pub async fn signup(state: &AppState, req: &SignupRequest) -> Result<User, AuthError> {
    req.validate()?;

    let username = req.username.trim();
    if db::users::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let pw_hash = password::hash(&req.password).map_err(AuthError::Internal)?;
    let new_user = NewUser {
        name: req.name.trim(),
        last_name: req.last_name.trim(),
        telephone: req.telephone.trim(),
        username,
        password_hash: &pw_hash,
        is_barber: req.is_barber,
    };

    // The unique index catches a signup that raced past the lookup
    let user = db::users::create(&state.pool, &new_user)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AuthError::UsernameTaken
            }
            _ => AuthError::Database(e),
        })?;

    tracing::info!(user_id = user.id, is_barber = user.is_barber, "User signed up");
    Ok(user)
}

/// Opens a session for `user` and returns its token.
pub async fn start_session(state: &AppState, user: &User) -> Result<String, AuthError> {
    let purged = db::sessions::delete_expired(&state.pool).await?;
    if purged > 0 {
        tracing::debug!(purged, "Expired sessions removed");
    }

    let session_id = Uuid::now_v7().to_string();
    let claims = Claims::for_user(user, &session_id, state.config.session_ttl_minutes);
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AuthError::Internal)?;

    db::sessions::create(&state.pool, &session_id, user.id, claims.exp).await?;
    Ok(token)
}

/// Ends the session behind `auth` and drops any unfinished wizard draft.
pub async fn end_session(state: &AppState, auth: &AuthUser) -> Result<(), AuthError> {
    db::sessions::delete(&state.pool, &auth.session_id).await?;
    state.wizards.discard(auth.user_id);
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(())
}

pub fn session_cookie(config: &Config, token: &str) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(config.session_ttl_minutes))
        .build();
    CookieJar::new().add(cookie)
}

pub fn clear_session_cookie() -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SignupRequest {
        SignupRequest {
            name: "Luis".into(),
            last_name: "Perez".into(),
            telephone: "555-0199".into(),
            username: "luis".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            accept_terms: true,
            is_barber: false,
        }
    }

    #[test]
    fn complete_signup_passes() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn blank_field_is_reported_first() {
        let req = SignupRequest {
            telephone: "   ".into(),
            confirm_password: "different".into(),
            accept_terms: false,
            ..complete()
        };
        assert!(matches!(req.validate(), Err(AuthError::MissingFields)));
    }

    #[test]
    fn mismatch_before_terms() {
        let req = SignupRequest {
            confirm_password: "different".into(),
            accept_terms: false,
            ..complete()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn terms_must_be_accepted() {
        let req = SignupRequest {
            accept_terms: false,
            ..complete()
        };
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "You must accept terms and conditions"
        );
    }
}
