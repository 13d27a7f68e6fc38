use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user_handlers::{
    delete_user, get_users, update_user, upload_avatar, MAX_AVATAR_BYTES,
};
use crate::middleware::auth_middleware::auth_middleware;

pub fn admin_routes() -> Router {
    Router::new()
        .route("/get-users", get(get_users))
        .route("/update-user", post(update_user))
        .route("/delete-user", post(delete_user))
        .route(
            "/users/{userId}/avatar",
            post(upload_avatar)
                // leave room for the multipart framing so the handler's own
                // size check is the one that answers
                .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 16 * 1024)),
        )
        .layer(from_fn(auth_middleware))
}
