use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::booking::{parse_date, parse_time, Wizard, WizardError, WizardStep};
use crate::catalog;
use crate::error::AppError;
use crate::routes::wizard::confirm_draft;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "wizard/create.html")]
struct WizardTemplate {
    step: u8,
    choices: Vec<ServiceChoice>,
    service_type: String,
    specifications: String,
    date: String,
    time: String,
    date_time: String,
    can_advance: bool,
    error: Option<String>,
}

struct ServiceChoice {
    name: &'static str,
    checked: bool,
}

impl WizardTemplate {
    fn new(wizard: &Wizard, error: Option<String>) -> Self {
        WizardTemplate {
            step: wizard.step().number(),
            choices: catalog::service_names()
                .into_iter()
                .map(|name| ServiceChoice {
                    name,
                    checked: wizard.services().iter().any(|s| s == name),
                })
                .collect(),
            service_type: wizard.service_type(),
            specifications: wizard.specifications().to_string(),
            date: wizard
                .date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            time: wizard
                .time()
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            date_time: wizard.date_time().unwrap_or_default(),
            can_advance: wizard.can_advance(),
            error,
        }
    }

    fn render_page(self, status: StatusCode) -> Response {
        (status, Html(self.render().unwrap_or_default())).into_response()
    }
}

/// Catalog links pass `selectedServices` (comma separated) and
/// `specifications` to start a pre-filled draft.
#[derive(Deserialize)]
pub struct Prefill {
    #[serde(rename = "selectedServices")]
    pub selected_services: Option<String>,
    pub specifications: Option<String>,
}

#[derive(Deserialize)]
pub struct WizardForm {
    pub action: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub specifications: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

pub async fn show(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(prefill): Query<Prefill>,
) -> Result<Response, AppError> {
    let wizard = match prefill.selected_services {
        Some(services) => {
            let services = services.split(',').map(str::to_string).collect();
            let wizard = Wizard::prefilled(services, prefill.specifications.unwrap_or_default())?;
            state.wizards.start(auth.user_id, wizard)
        }
        None => match state.wizards.get(auth.user_id) {
            Ok(wizard) => wizard,
            Err(_) => state.wizards.start(auth.user_id, Wizard::new()),
        },
    };
    Ok(WizardTemplate::new(&wizard, None).render_page(StatusCode::OK))
}

pub async fn submit(
    auth: AuthUser,
    State(state): State<SharedState>,
    Form(form): Form<WizardForm>,
) -> Result<Response, AppError> {
    let user_id = auth.user_id;

    let outcome = match form.action.as_str() {
        "select" | "datetime" => apply_inputs(&state, user_id, &form),
        "next" => apply_inputs(&state, user_id, &form)
            .and_then(|_| state.wizards.update(user_id, |w| w.next().map(|_| ()))),
        "back" => {
            let mut exited = false;
            let result = state.wizards.update(user_id, |w| {
                exited = w.back().is_none();
                Ok(())
            });
            if exited {
                state.wizards.discard(user_id);
                return Ok(Redirect::to("/home").into_response());
            }
            result
        }
        "confirm" => {
            return match confirm_draft(&state, &auth).await {
                Ok(_) => Ok(Redirect::to("/home").into_response()),
                Err(AppError::NotFound(_)) => {
                    Ok(Redirect::to("/create_appointment").into_response())
                }
                Err(AppError::BadRequest(msg)) => {
                    let wizard = state.wizards.get(user_id)?;
                    Ok(WizardTemplate::new(&wizard, Some(msg)).render_page(StatusCode::BAD_REQUEST))
                }
                Err(err) => Err(err),
            };
        }
        "cancel" => {
            state.wizards.discard(user_id);
            return Ok(Redirect::to("/home").into_response());
        }
        other => return Err(AppError::BadRequest(format!("Unknown action: {other}"))),
    };

    match outcome {
        Ok(wizard) => Ok(WizardTemplate::new(&wizard, None).render_page(StatusCode::OK)),
        Err(WizardError::NoDraft) => Ok(Redirect::to("/create_appointment").into_response()),
        Err(err) => {
            let wizard = state.wizards.get(user_id)?;
            Ok(WizardTemplate::new(&wizard, Some(err.to_string()))
                .render_page(StatusCode::BAD_REQUEST))
        }
    }
}

/// Saves whatever the current step's form carried. Inputs kept even when the
/// step transition that follows is refused.
fn apply_inputs(
    state: &SharedState,
    user_id: i64,
    form: &WizardForm,
) -> Result<Wizard, WizardError> {
    let current = state.wizards.get(user_id)?;
    match current.step() {
        WizardStep::ServiceSelection => state.wizards.update(user_id, |w| {
            w.select_services(form.services.clone())?;
            w.set_specifications(form.specifications.clone().unwrap_or_default())
        }),
        WizardStep::DateTimeSelection => {
            let date = form
                .date
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(parse_date)
                .transpose()?;
            let time = form
                .time
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(parse_time)
                .transpose()?;
            state.wizards.update(user_id, |w| {
                if let Some(date) = date {
                    w.set_date(date)?;
                }
                if let Some(time) = time {
                    w.set_time(time)?;
                }
                Ok(())
            })
        }
        WizardStep::Confirmation => Ok(current),
    }
}
