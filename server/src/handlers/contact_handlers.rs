use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::i18n::{self, Language};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub language: Option<String>,
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Mail delivery lives behind the data service's function endpoint; the
/// handler only validates and localizes.
pub async fn submit_contact(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let lang = payload
        .language
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or_default();
    let t = i18n::contact_translations(lang);

    let name = payload.name.trim();
    let email = payload.email.trim();
    let message = payload.message.trim();

    if name.is_empty() || message.is_empty() || !is_plausible_email(email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": t.error_message })),
        ));
    }

    let body = json!({
        "name": name,
        "email": email,
        "message": message,
        "language": lang.code(),
    });
    state
        .store
        .invoke_function("send-contact-email", &body)
        .await
        .map_err(|err| {
            error!(error = %err, "contact dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": t.error_message })),
            )
        })?;

    Ok((StatusCode::OK, Json(json!({ "message": t.success_message }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("anna@netieku.es"));
        assert!(!is_plausible_email("anna"));
        assert!(!is_plausible_email("@netieku.es"));
        assert!(!is_plausible_email("anna@netieku"));
        assert!(!is_plausible_email("anna@.es"));
    }
}
