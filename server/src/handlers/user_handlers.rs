use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::i18n::{self, Language};
use crate::models::user::UserSummary;
use crate::state::AppState;
use datastore_service_cli::{
    cache_busted_url, operations, Collection, OperationResult, RegisteredUser,
};

/// Columns the panel may change; anything else in an update payload is a
/// caller bug, not a store call.
const UPDATABLE_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "phone",
    "role",
    "status",
    "avatar_url",
];

const AVATAR_BUCKET: &str = "avatars";
pub(crate) const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

pub fn updatable(field: &str) -> bool {
    UPDATABLE_FIELDS.contains(&field)
}

fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[derive(Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    fn language(&self) -> Language {
        self.lang
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or_default()
    }
}

pub async fn get_users(
    Extension(state): Extension<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let rows = state
        .store
        .fetch_rows(Collection::RegisteredUsers)
        .await
        .map_err(|err| {
            error!(error = %err, "listing users failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database error" })),
            )
        })?;

    let t = i18n::users_translations(query.language());
    let users: Vec<UserSummary> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<RegisteredUser>(row) {
            Ok(user) => Some(UserSummary::from_user(user, t.not_specified)),
            Err(err) => {
                error!(error = %err, "skipping malformed user row");
                None
            }
        })
        .collect();

    Ok((StatusCode::OK, Json(json!({ "users": users }))))
}

#[derive(Deserialize)]
pub struct UpdateUserPayload {
    pub id: String,
    pub fields: Map<String, Value>,
    pub language: Option<String>,
}

pub async fn update_user(
    Extension(state): Extension<AppState>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let lang = payload
        .language
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or_default();
    let t = i18n::users_translations(lang);

    if payload.fields.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "No fields to update" })),
        ));
    }
    if let Some(bad) = payload.fields.keys().find(|k| !updatable(k)) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("Field '{bad}' cannot be updated") })),
        ));
    }

    if !state.begin_mutation(&payload.id) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": "Another change for this user is still running" })),
        ));
    }

    let result = operations::update_entity(
        &state.store,
        Collection::RegisteredUsers,
        &payload.id,
        payload.fields,
    )
    .await;
    state.finish_mutation(&payload.id, &result);

    if result.success {
        Ok((StatusCode::OK, Json(json!({ "message": t.update_success }))))
    } else {
        let message = result.error.unwrap_or_else(|| t.update_failed.to_string());
        Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": message })),
        ))
    }
}

#[derive(Deserialize)]
pub struct DeleteUserPayload {
    pub id: String,
    pub language: Option<String>,
}

pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DeleteUserPayload>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let lang = payload
        .language
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or_default();
    let t = i18n::users_translations(lang);

    if !state.begin_mutation(&payload.id) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": "Another change for this user is still running" })),
        ));
    }

    let result =
        operations::delete_entity(&state.store, Collection::RegisteredUsers, &payload.id).await;
    state.finish_mutation(&payload.id, &result);

    if result.success {
        Ok((StatusCode::OK, Json(json!({ "message": t.delete_success }))))
    } else {
        let message = result.error.unwrap_or_else(|| t.delete_failed.to_string());
        Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": message })),
        ))
    }
}

/// Multipart avatar upload: validate, push to the storage bucket, persist the
/// public URL on the user row, answer with a cache-busted URL so the SPA
/// refreshes the image immediately.
pub async fn upload_avatar(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<LangQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let lang = query.language();
    let t = i18n::profile_translations(lang);

    let mut file: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Malformed upload" })),
        )
    })? {
        let is_file = field.name() == Some("file");
        if !is_file {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Malformed upload" })),
            )
        })?;
        file = Some((bytes.to_vec(), content_type));
    }

    let (bytes, content_type) = file.ok_or((
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "No file provided" })),
    ))?;

    let ext = image_extension(&content_type).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": lang.pick(
                "Atļauti tikai attēlu faili",
                "Only image files are allowed",
                "Разрешены только файлы изображений",
            ) })),
        )
    })?;
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": lang.pick(
                "Attēls nedrīkst pārsniegt 2 MB",
                "The image must not exceed 2 MB",
                "Изображение не должно превышать 2 МБ",
            ) })),
        ));
    }

    // take the guard before touching storage, otherwise a refused request
    // would already have written an orphaned object
    if !state.begin_mutation(&user_id) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": "Another change for this user is still running" })),
        ));
    }

    let stamp = Utc::now().timestamp_millis();
    let object_path = format!("{user_id}/avatar-{stamp}.{ext}");
    let public_url = match state
        .store
        .upload_object(AVATAR_BUCKET, &object_path, bytes, &content_type)
        .await
    {
        Ok(url) => url,
        Err(err) => {
            error!(error = %err, user_id = %user_id, "avatar upload failed");
            state.finish_mutation(&user_id, &OperationResult::failed(err.to_string()));
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": t.upload_failed })),
            ));
        }
    };

    let mut fields = Map::new();
    fields.insert("avatar_url".to_string(), Value::String(public_url.clone()));
    let result =
        operations::update_entity(&state.store, Collection::RegisteredUsers, &user_id, fields)
            .await;
    state.finish_mutation(&user_id, &result);

    if result.success {
        Ok((
            StatusCode::OK,
            Json(json!({ "avatarUrl": cache_busted_url(&public_url, stamp) })),
        ))
    } else {
        // the row never took the new URL; drop the uploaded file again
        if let Err(err) = state.store.delete_object(AVATAR_BUCKET, &object_path).await {
            error!(error = %err, user_id = %user_id, "orphaned avatar cleanup failed");
        }
        let message = result.error.unwrap_or_else(|| t.upload_failed.to_string());
        Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": message })),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::state::MutationStatus;
    use datastore_service_cli::client::DatastoreClient;

    #[test]
    fn update_whitelist_is_closed() {
        for field in UPDATABLE_FIELDS {
            assert!(updatable(field));
        }
        assert!(!updatable("id"));
        assert!(!updatable("email"));
        assert!(!updatable("created_at"));
    }

    #[test]
    fn image_extensions_cover_allowed_types_only() {
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/webp"), Some("webp"));
        assert_eq!(image_extension("image/svg+xml"), None);
        assert_eq!(image_extension("application/pdf"), None);
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn state_for(base: &str) -> AppState {
        let store =
            DatastoreClient::new(Url::parse(base).unwrap(), "test-key".to_string()).unwrap();
        AppState::new(store)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn delete_user_reports_localized_success() {
        async fn one_row() -> Json<Value> {
            Json(json!([{ "id": "u1" }]))
        }
        let stub = Router::new().route(
            "/rest/v1/registered_users",
            axum::routing::delete(one_row),
        );
        let base = spawn_stub(stub).await;
        let state = state_for(&base);

        let app = Router::new()
            .route("/delete-user", post(delete_user))
            .layer(Extension(state.clone()));

        let res = app
            .oneshot(post_json("/delete-user", json!({ "id": "u1" })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        // default language is Latvian
        assert_eq!(body["message"], "Lietotājs veiksmīgi dzēsts");
        // successful mutations leave nothing behind in the guard map
        assert_eq!(state.mutation_status("u1"), None);
    }

    #[tokio::test]
    async fn concurrent_mutation_of_same_user_is_conflict() {
        let state = state_for("http://127.0.0.1:1");
        assert!(state.begin_mutation("u1"));

        let app = Router::new()
            .route("/delete-user", post(delete_user))
            .layer(Extension(state));

        let res = app
            .oneshot(post_json("/delete-user", json!({ "id": "u1" })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_with_forbidden_field_never_reaches_the_store() {
        // a store pointed at a dead port: reaching it would fail the request
        let state = state_for("http://127.0.0.1:1");

        let app = Router::new()
            .route("/update-user", post(update_user))
            .layer(Extension(state));

        let res = app
            .oneshot(post_json(
                "/update-user",
                json!({ "id": "u1", "fields": { "email": "x@y.z" } }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Field 'email' cannot be updated");
    }

    #[tokio::test]
    async fn store_error_is_surfaced_to_the_caller() {
        async fn reject() -> (StatusCode, Json<Value>) {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "permission denied for table registered_users" })),
            )
        }
        let stub = Router::new().route(
            "/rest/v1/registered_users",
            axum::routing::patch(reject),
        );
        let base = spawn_stub(stub).await;
        let state = state_for(&base);

        let app = Router::new()
            .route("/update-user", post(update_user))
            .layer(Extension(state.clone()));

        let res = app
            .oneshot(post_json(
                "/update-user",
                json!({ "id": "u1", "fields": { "role": "editor" } }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["message"],
            "permission denied for table registered_users"
        );
        assert!(matches!(
            state.mutation_status("u1"),
            Some(MutationStatus::Failed { .. })
        ));
    }

    fn multipart_avatar(uri: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let boundary = "avatar-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"avatar\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn counting_storage(
        axum::extract::State(counter): axum::extract::State<Arc<AtomicUsize>>,
    ) -> Json<Value> {
        counter.fetch_add(1, Ordering::SeqCst);
        Json(json!({ "Key": "avatars/u1/avatar" }))
    }

    /// Stub store with a counting storage endpoint and a row update that
    /// succeeds; returns (base url, upload counter).
    async fn avatar_stub() -> (String, Arc<AtomicUsize>) {
        async fn one_row() -> Json<Value> {
            Json(json!([{ "id": "u1" }]))
        }
        let uploads = Arc::new(AtomicUsize::new(0));
        let stub = Router::new()
            .route(
                "/storage/v1/object/avatars/{*path}",
                post(counting_storage),
            )
            .with_state(uploads.clone())
            .route(
                "/rest/v1/registered_users",
                axum::routing::patch(one_row),
            );
        let base = spawn_stub(stub).await;
        (base, uploads)
    }

    fn avatar_app(state: AppState) -> Router {
        Router::new()
            .route(
                "/users/{userId}/avatar",
                post(upload_avatar).layer(axum::extract::DefaultBodyLimit::max(
                    MAX_AVATAR_BYTES + 16 * 1024,
                )),
            )
            .layer(Extension(state))
    }

    #[tokio::test]
    async fn avatar_upload_persists_and_returns_cache_busted_url() {
        let (base, uploads) = avatar_stub().await;
        let state = state_for(&base);

        let res = avatar_app(state.clone())
            .oneshot(multipart_avatar(
                "/users/u1/avatar",
                "image/png",
                b"not really a png",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let url = body["avatarUrl"].as_str().unwrap();
        assert!(url.contains("/storage/v1/object/public/avatars/u1/avatar-"));
        assert!(url.contains(".png?t="));

        assert_eq!(uploads.load(Ordering::SeqCst), 1);
        assert_eq!(state.mutation_status("u1"), None);
    }

    #[tokio::test]
    async fn oversized_avatar_is_rejected_before_any_storage_call() {
        let (base, uploads) = avatar_stub().await;
        let state = state_for(&base);

        let data = vec![0u8; MAX_AVATAR_BYTES + 1];
        let res = avatar_app(state)
            .oneshot(multipart_avatar("/users/u1/avatar", "image/png", &data))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        // default language is Latvian
        assert_eq!(body["message"], "Attēls nedrīkst pārsniegt 2 MB");
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_image_avatar_is_rejected() {
        let (base, uploads) = avatar_stub().await;
        let state = state_for(&base);

        let res = avatar_app(state)
            .oneshot(multipart_avatar(
                "/users/u1/avatar",
                "application/pdf",
                b"%PDF-1.4",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn conflicting_avatar_upload_never_reaches_storage() {
        let (base, uploads) = avatar_stub().await;
        let state = state_for(&base);
        // another mutation of the same user is still running
        assert!(state.begin_mutation("u1"));

        let res = avatar_app(state)
            .oneshot(multipart_avatar(
                "/users/u1/avatar",
                "image/png",
                b"not really a png",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        // the refusal must not leave an orphaned object behind
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }
}
