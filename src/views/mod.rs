pub mod auth;
pub mod home;
pub mod products;
pub mod wizard;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

/// Pages reachable without a session.
pub fn public_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/signup", get(auth::signup_page).post(auth::signup_submit))
        .route("/logout", post(auth::logout))
}

/// Pages that need a session; a missing one redirects to `/login`.
pub fn session_routes() -> Router<SharedState> {
    Router::new()
        .route("/home", get(home::index))
        .route("/profile", get(home::profile))
        .route("/settings", get(home::settings))
        .route("/products", get(products::index))
        .route("/service_details/{name}", get(products::service_details))
        .route("/hair_dye_details/{color}", get(products::hair_dye_details))
        .route(
            "/create_appointment",
            get(wizard::show).post(wizard::submit),
        )
}
