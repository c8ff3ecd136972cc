use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::auth::extractor::AuthUser;
use crate::booking::{Wizard, WizardView};
use crate::catalog;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct HairDyeInfo {
    pub color: String,
    pub description: &'static str,
    pub prompt: String,
}

#[derive(Serialize)]
pub struct Prompt {
    pub service: &'static str,
    pub option: &'static str,
    pub message: String,
}

pub async fn list(_auth: AuthUser) -> Json<&'static [catalog::Service]> {
    Json(catalog::SERVICES)
}

pub async fn options(
    _auth: AuthUser,
    Path(service): Path<String>,
) -> Result<Json<catalog::Service>, AppError> {
    catalog::find_service(&service)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown service: {service}")))
}

pub async fn hair_dye(_auth: AuthUser, Path(color): Path<String>) -> Json<HairDyeInfo> {
    Json(HairDyeInfo {
        description: catalog::hair_dye_info(&color),
        prompt: catalog::reservation_prompt(catalog::HAIR_DYE, &color),
        color,
    })
}

pub async fn prompt(
    _auth: AuthUser,
    Path((service, option)): Path<(String, String)>,
) -> Result<Json<Prompt>, AppError> {
    let (service, option) = find_option(&service, &option)?;
    Ok(Json(Prompt {
        service,
        option,
        message: catalog::reservation_prompt(service, option),
    }))
}

/// Accepting the prompt: the wizard starts over with the option pre-filled.
pub async fn reserve(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((service, option)): Path<(String, String)>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let (service, option) = find_option(&service, &option)?;
    let wizard = Wizard::prefilled(vec![service.to_string()], option)?;
    let wizard = state.wizards.start(auth.user_id, wizard);
    Ok((StatusCode::CREATED, Json(WizardView::from(&wizard))))
}

fn find_option(service: &str, option: &str) -> Result<(&'static str, &'static str), AppError> {
    catalog::find_option(service, option)
        .ok_or_else(|| AppError::NotFound(format!("Unknown option '{option}' for {service}")))
}
