use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Appointment, User};
use crate::routes::appointments::visible_to;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    greeting: String,
    is_barber: bool,
    appointments: Vec<Appointment>,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    user: User,
}

#[derive(Template)]
#[template(path = "settings.html")]
struct SettingsTemplate;

pub fn greeting(auth: &AuthUser) -> String {
    if auth.is_barber {
        format!("Welcome Barber {}", auth.name)
    } else {
        format!("Welcome {}", auth.name)
    }
}

/// One read per visit; a booking made elsewhere shows up on the next visit.
pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = visible_to(&state, &auth).await?;

    let template = HomeTemplate {
        greeting: greeting(&auth),
        is_barber: auth.is_barber,
        appointments,
    };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn profile(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let template = ProfileTemplate { user };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn settings(_auth: AuthUser) -> impl IntoResponse {
    Html(SettingsTemplate.render().unwrap_or_default())
}
