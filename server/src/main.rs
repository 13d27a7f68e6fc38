mod handlers;
mod i18n;
mod middleware;
mod models;
mod routes;
mod state;
mod store;

use std::env;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use handlers::auth_handlers::me;
use middleware::auth_middleware::auth_middleware;
use routes::{admin::admin_routes, auth::auth_routes, public::public_routes};
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client_url = env::var("CLIENT_URL").expect("CLIENT_URL must be set");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let store = store::init_store().unwrap();
    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(client_url.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    let protected = Router::new()
        .route("/me", get(me))
        .layer(from_fn(auth_middleware));

    let app = Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", protected)
        .nest("/api", admin_routes())
        .nest("/api", public_routes())
        .layer(CookieManagerLayer::new())
        .layer(Extension(state))
        .layer(cors);

    tracing::info!(%bind_addr, "admin api listening");
    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
