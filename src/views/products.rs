use askama::Template;
use axum::extract::{Path, Query};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::catalog;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "products/index.html")]
struct ProductsTemplate {
    services: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "products/service_details.html")]
struct ServiceDetailsTemplate {
    service: &'static str,
    options: &'static [&'static str],
    is_hair_dye: bool,
    prompt: Option<PromptView>,
}

#[derive(Template)]
#[template(path = "products/hair_dye_details.html")]
struct HairDyeTemplate {
    color: String,
    description: &'static str,
    prompt: Option<PromptView>,
}

/// Confirmation dialog. "Yes" opens the pre-filled wizard.
struct PromptView {
    service: String,
    option: String,
    message: String,
}

#[derive(Deserialize)]
pub struct OptionQuery {
    pub option: Option<String>,
}

#[derive(Deserialize)]
pub struct ReserveQuery {
    #[serde(default)]
    pub reserve: bool,
}

impl PromptView {
    fn new(service: &str, option: &str) -> Self {
        PromptView {
            service: service.to_string(),
            option: option.to_string(),
            message: catalog::reservation_prompt(service, option),
        }
    }
}

pub async fn index(_auth: AuthUser) -> impl IntoResponse {
    let template = ProductsTemplate {
        services: catalog::service_names(),
    };
    Html(template.render().unwrap_or_default())
}

pub async fn service_details(
    _auth: AuthUser,
    Path(name): Path<String>,
    Query(q): Query<OptionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = catalog::find_service(&name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown service: {name}")))?;

    let prompt = match q.option.as_deref() {
        Some(option) => {
            let (service, option) = catalog::find_option(service.name, option).ok_or_else(|| {
                AppError::NotFound(format!("Unknown option '{option}' for {}", service.name))
            })?;
            Some(PromptView::new(service, option))
        }
        None => None,
    };

    let template = ServiceDetailsTemplate {
        service: service.name,
        options: service.options,
        is_hair_dye: service.name == catalog::HAIR_DYE,
        prompt,
    };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn hair_dye_details(
    _auth: AuthUser,
    Path(color): Path<String>,
    Query(q): Query<ReserveQuery>,
) -> impl IntoResponse {
    let template = HairDyeTemplate {
        description: catalog::hair_dye_info(&color),
        prompt: q
            .reserve
            .then(|| PromptView::new(catalog::HAIR_DYE, &color)),
        color,
    };
    Html(template.render().unwrap_or_default())
}
