//! Router construction and server startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::HeaderValue, response::IntoResponse, routing::get, Json, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::{AppConfig, ConfigError},
    routers::realtime,
};

/// Shared application state passed to Axum handlers. Read-only after
/// startup; the reqwest client pools connections internally and is cheap to
/// clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Result<Router, ConfigError> {
    let cors = cors_layer(&state.config)?;
    Ok(Router::new()
        .route("/session", get(realtime::create_session))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// CORS for the configured frontend origins. Credentials are allowed, so
/// methods and headers mirror the request instead of using wildcards,
/// which tower-http forbids alongside credentials.
fn cors_layer(config: &AppConfig) -> Result<CorsLayer, ConfigError> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;
    let app = build_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "session gateway listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
