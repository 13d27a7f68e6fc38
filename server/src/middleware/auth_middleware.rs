use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use jsonwebtoken::errors::ErrorKind;
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::handlers::jwt::verify_token;
use crate::state::AppState;
use datastore_service_cli::{AdminUser, Collection};

pub const SESSION_COOKIE: &str = "nktoken";

/// Cookie -> JWT -> admin row. Only accounts present in the admin collection
/// get past this layer; the admin profile rides along as an extension.
pub async fn auth_middleware(
    Extension(state): Extension<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let cookies = match req.extensions().get::<Cookies>() {
        Some(c) => c.clone(),
        None => return (StatusCode::UNAUTHORIZED, "cookie layer missing").into_response(),
    };

    let cookie = match cookies.get(SESSION_COOKIE) {
        Some(c) => c,
        None => return (StatusCode::UNAUTHORIZED, "missing session token").into_response(),
    };
    let token = cookie.value().to_string();

    let data = match verify_token(&token) {
        Ok(d) => d,
        Err(e) => {
            let msg = match *e.kind() {
                ErrorKind::ExpiredSignature => "session expired",
                _ => "invalid session token",
            };
            return (StatusCode::UNAUTHORIZED, msg).into_response();
        }
    };

    let user_id = match Uuid::parse_str(&data.claims.sub) {
        Ok(u) => u.to_string(),
        Err(_) => return (StatusCode::UNAUTHORIZED, "malformed token subject").into_response(),
    };

    let row = match state.store.fetch_row(Collection::AdminUser, &user_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return (StatusCode::UNAUTHORIZED, "not an administrator").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "admin lookup failed");
            return (StatusCode::UNAUTHORIZED, "administrator lookup failed").into_response();
        }
    };

    let admin: AdminUser = match serde_json::from_value(row) {
        Ok(a) => a,
        Err(err) => {
            tracing::error!(error = %err, "malformed admin row");
            return (StatusCode::UNAUTHORIZED, "administrator lookup failed").into_response();
        }
    };

    req.extensions_mut().insert(admin);
    next.run(req).await
}
