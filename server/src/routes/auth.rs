use axum::{routing::post, Router};

use crate::handlers::auth_handlers::{login, logout};

pub fn auth_routes() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
