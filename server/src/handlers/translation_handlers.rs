use axum::{extract::Path, http::StatusCode, Json};
use serde_json::json;

use crate::i18n::{self, Language, TranslationPack};

pub async fn get_languages() -> Json<serde_json::Value> {
    let languages: Vec<_> = Language::ALL
        .iter()
        .map(|l| json!({ "code": l.code(), "name": l.name() }))
        .collect();
    Json(json!({ "languages": languages }))
}

pub async fn get_translations(
    Path(code): Path<String>,
) -> Result<Json<TranslationPack>, (StatusCode, Json<serde_json::Value>)> {
    match Language::from_code(&code) {
        Some(lang) => Ok(Json(i18n::pack(lang))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("language '{code}' not available") })),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::routes::public::public_routes;

    #[tokio::test]
    async fn translation_pack_served_for_known_language() {
        let app = public_routes();
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/translations/lv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["contact"]["title"], "Kontaktinformācija");
        assert_eq!(body["users"]["deleteTitle"], "Dzēst lietotāju");
    }

    #[tokio::test]
    async fn unknown_language_is_not_found() {
        let app = public_routes();
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/translations/de")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn languages_endpoint_lists_all_three() {
        let app = public_routes();
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/languages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let codes: Vec<_> = body["languages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(codes, vec!["lv", "en", "ru"]);
    }
}
