use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contact_handlers::submit_contact;
use crate::handlers::translation_handlers::{get_languages, get_translations};

pub fn public_routes() -> Router {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/languages", get(get_languages))
        .route("/translations/{lang}", get(get_translations))
}
