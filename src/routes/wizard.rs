use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::booking::{parse_date, parse_time, Wizard, WizardView};
use crate::db;
use crate::error::AppError;
use crate::models::Appointment;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct StartWizard {
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub specifications: String,
}

#[derive(Deserialize)]
pub struct SelectServices {
    pub services: Vec<String>,
    pub specifications: Option<String>,
}

#[derive(Deserialize)]
pub struct ChooseDateTime {
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Result of stepping back: `exited` means the draft is gone.
#[derive(Serialize)]
pub struct BackResponse {
    pub exited: bool,
    pub wizard: Option<WizardView>,
}

/// Writes the confirmed draft as one appointment and ends the flow. The draft
/// survives a failed insert.
pub async fn confirm_draft(state: &SharedState, auth: &AuthUser) -> Result<Appointment, AppError> {
    let draft = state.wizards.get(auth.user_id)?;
    let new_appointment = draft.confirm(auth.user_id, &auth.name)?;

    let appointment = db::appointments::create(&state.pool, &new_appointment).await?;
    state.wizards.discard(auth.user_id);

    tracing::info!(
        appointment_id = appointment.id,
        user_id = auth.user_id,
        service_type = %appointment.service_type,
        "Appointment booked"
    );
    Ok(appointment)
}

pub async fn start(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<StartWizard>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let wizard = Wizard::prefilled(req.services, req.specifications)?;
    let wizard = state.wizards.start(auth.user_id, wizard);
    Ok((StatusCode::CREATED, Json(WizardView::from(&wizard))))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<WizardView>, AppError> {
    let wizard = state.wizards.get(auth.user_id)?;
    Ok(Json(WizardView::from(&wizard)))
}

pub async fn select_services(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SelectServices>,
) -> Result<Json<WizardView>, AppError> {
    let wizard = state.wizards.update(auth.user_id, |w| {
        w.select_services(req.services)?;
        if let Some(specifications) = req.specifications {
            w.set_specifications(specifications)?;
        }
        Ok(())
    })?;
    Ok(Json(WizardView::from(&wizard)))
}

pub async fn choose_date_time(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ChooseDateTime>,
) -> Result<Json<WizardView>, AppError> {
    let date = req.date.as_deref().map(parse_date).transpose()?;
    let time = req.time.as_deref().map(parse_time).transpose()?;

    let wizard = state.wizards.update(auth.user_id, |w| {
        if let Some(date) = date {
            w.set_date(date)?;
        }
        if let Some(time) = time {
            w.set_time(time)?;
        }
        Ok(())
    })?;
    Ok(Json(WizardView::from(&wizard)))
}

pub async fn next(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<WizardView>, AppError> {
    let wizard = state
        .wizards
        .update(auth.user_id, |w| w.next().map(|_| ()))?;
    Ok(Json(WizardView::from(&wizard)))
}

pub async fn back(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<BackResponse>, AppError> {
    let mut exited = false;
    let wizard = state.wizards.update(auth.user_id, |w| {
        exited = w.back().is_none();
        Ok(())
    })?;

    if exited {
        state.wizards.discard(auth.user_id);
        return Ok(Json(BackResponse {
            exited: true,
            wizard: None,
        }));
    }
    Ok(Json(BackResponse {
        exited: false,
        wizard: Some(WizardView::from(&wizard)),
    }))
}

pub async fn confirm(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = confirm_draft(&state, &auth).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn cancel(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .wizards
        .discard(auth.user_id)
        .ok_or_else(|| AppError::NotFound("No appointment in progress".to_string()))?;
    Ok(Json(serde_json::json!({ "message": "Cancelled" })))
}
