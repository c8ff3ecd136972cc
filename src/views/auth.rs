use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;

use crate::auth::extractor::AuthUser;
use crate::auth::session::{self, AuthError, LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    username: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
struct SignupTemplate {
    form: SignupRequest,
    error: Option<String>,
}

pub async fn index(auth: Option<AuthUser>) -> Redirect {
    match auth {
        Some(_) => Redirect::to("/home"),
        None => Redirect::to("/login"),
    }
}

pub async fn login_page(auth: Option<AuthUser>) -> Response {
    if auth.is_some() {
        return Redirect::to("/home").into_response();
    }
    let template = LoginTemplate {
        username: String::new(),
        error: None,
    };
    Html(template.render().unwrap_or_default()).into_response()
}

pub async fn login_submit(
    State(state): State<SharedState>,
    Form(req): Form<LoginRequest>,
) -> Result<Response, AppError> {
    match session::login(&state, &req).await {
        Ok(user) => start_session(&state, &user).await,
        Err(err) => {
            let status = failure_status(&err)?;
            let template = LoginTemplate {
                username: req.username,
                error: Some(err.to_string()),
            };
            Ok((status, Html(template.render().unwrap_or_default())).into_response())
        }
    }
}

pub async fn signup_page(auth: Option<AuthUser>) -> Response {
    if auth.is_some() {
        return Redirect::to("/home").into_response();
    }
    let template = SignupTemplate {
        form: SignupRequest::default(),
        error: None,
    };
    Html(template.render().unwrap_or_default()).into_response()
}

pub async fn signup_submit(
    State(state): State<SharedState>,
    Form(req): Form<SignupRequest>,
) -> Result<Response, AppError> {
    match session::signup(&state, &req).await {
        Ok(user) => start_session(&state, &user).await,
        Err(err) => {
            let status = failure_status(&err)?;
            // Passwords are never echoed back into the form
            let form = SignupRequest {
                password: String::new(),
                confirm_password: String::new(),
                ..req
            };
            let template = SignupTemplate {
                form,
                error: Some(err.to_string()),
            };
            Ok((status, Html(template.render().unwrap_or_default())).into_response())
        }
    }
}

pub async fn logout(
    State(state): State<SharedState>,
    auth: Option<AuthUser>,
) -> Result<Response, AppError> {
    if let Some(auth) = auth {
        session::end_session(&state, &auth).await?;
    }
    Ok((session::clear_session_cookie(), Redirect::to("/login")).into_response())
}

async fn start_session(state: &SharedState, user: &User) -> Result<Response, AppError> {
    let token = session::start_session(state, user).await?;
    let jar = session::session_cookie(&state.config, &token);
    Ok((jar, Redirect::to("/home")).into_response())
}

/// Status for a failure shown in place on the form. Store and hashing
/// failures are not user mistakes and go through `AppError`.
fn failure_status(err: &AuthError) -> Result<StatusCode, AppError> {
    match err {
        AuthError::MissingFields | AuthError::PasswordMismatch | AuthError::TermsNotAccepted => {
            Ok(StatusCode::BAD_REQUEST)
        }
        AuthError::IncorrectCredentials => Ok(StatusCode::UNAUTHORIZED),
        AuthError::UsernameTaken => Ok(StatusCode::CONFLICT),
        AuthError::Database(e) => Err(AppError::Internal(format!("Auth lookup failed: {e}"))),
        AuthError::Internal(e) => Err(AppError::Internal(e.clone())),
    }
}
