use axum::{
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::handlers::jwt::generate_token;
use crate::i18n::{self, Language};
use crate::middleware::auth_middleware::SESSION_COOKIE;
use crate::state::AppState;
use datastore_service_cli::{AdminUser, Collection};

#[derive(Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    pub language: Option<String>,
}

/// Credential verification is the managed auth service's job; we only check
/// that the signed-in account is an administrator and hand out the session
/// cookie.
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let lang = payload
        .language
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or_default();
    let t = i18n::auth_translations(lang);

    let session = state
        .store
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(|err| {
            info!(error = %err, "sign-in rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": t.invalid_credentials })),
            )
        })?;

    let admin_row = state
        .store
        .fetch_row(Collection::AdminUser, &session.user.id)
        .await
        .map_err(|err| {
            error!(error = %err, "admin lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database error" })),
            )
        })?;

    let admin_row = match admin_row {
        Some(row) => row,
        None => {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "message": t.not_admin })),
            ))
        }
    };

    let admin: AdminUser = serde_json::from_value(admin_row).map_err(|err| {
        error!(error = %err, "malformed admin row");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Database error" })),
        )
    })?;

    let token = generate_token(&session.user.id).map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Token error" })),
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age=86400")
            .parse()
            .unwrap(),
    );

    let body = Json(json!({ "message": "Login successful", "user": admin }));

    Ok((headers, body).into_response())
}

pub async fn me(Extension(admin): Extension<AdminUser>) -> Json<AdminUser> {
    Json(admin)
}

pub async fn logout() -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::SET_COOKIE,
        format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0")
            .parse()
            .unwrap(),
    );

    let body = Json(json!({
        "message": "logged out successfully"
    }));

    Ok((headers, body).into_response())
}
