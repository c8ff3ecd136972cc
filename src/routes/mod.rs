pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod wizard;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/me", get(auth::me))
        // Appointments
        .route("/api/v1/appointments", get(appointments::list))
        .route(
            "/api/v1/appointments/{id}",
            get(appointments::get).delete(appointments::delete),
        )
        // Wizard
        .route(
            "/api/v1/wizard",
            get(wizard::get).post(wizard::start).delete(wizard::cancel),
        )
        .route("/api/v1/wizard/services", put(wizard::select_services))
        .route("/api/v1/wizard/datetime", put(wizard::choose_date_time))
        .route("/api/v1/wizard/next", post(wizard::next))
        .route("/api/v1/wizard/back", post(wizard::back))
        .route("/api/v1/wizard/confirm", post(wizard::confirm))
        // Catalog
        .route("/api/v1/catalog", get(catalog::list))
        .route("/api/v1/catalog/hair-dye/{color}", get(catalog::hair_dye))
        .route("/api/v1/catalog/{service}", get(catalog::options))
        .route("/api/v1/catalog/{service}/{option}/prompt", get(catalog::prompt))
        .route("/api/v1/catalog/{service}/{option}/reserve", post(catalog::reserve))
}

