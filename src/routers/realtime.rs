//! Handler for the Realtime API token brokering endpoint.
//!
//! The endpoint mints an ephemeral client token for browser-safe
//! authentication: one inbound `GET /session` becomes exactly one `POST` to
//! the provider's realtime sessions endpoint, authenticated with the
//! server-held credential, and the provider's reply is relayed verbatim.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::{routers::error::SessionError, server::AppState};

/// `GET /session` — mint an ephemeral realtime session token.
///
/// Consumes nothing from the inbound request; the session payload is fixed
/// at startup. The caller receives the provider's decoded response body
/// unmodified, so the ephemeral `client_secret` reaches the frontend while
/// the long-lived credential never does.
pub async fn create_session(State(state): State<AppState>) -> Response {
    match broker_session(&state).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                SessionError::Upstream { status, body, .. } => {
                    error!(%status, body = %body, "upstream rejected realtime session request");
                }
                other => {
                    error!(error = %other, "realtime session request failed");
                }
            }
            err.into_response()
        }
    }
}

/// One outbound call, mapped to a tagged outcome. No retries: every inbound
/// trigger produces at most one upstream request.
async fn broker_session(state: &AppState) -> Result<Response, SessionError> {
    let upstream_url = format!(
        "{}/v1/realtime/sessions",
        state.config.upstream_url.trim_end_matches('/')
    );
    debug!(upstream_url, model = %state.config.model, "Forwarding realtime session request");

    let response = state
        .client
        .post(&upstream_url)
        .bearer_auth(&state.config.openai_api_key)
        .json(&json!({ "model": state.config.model }))
        .send()
        .await
        .map_err(|e| SessionError::Unreachable {
            detail: e.to_string(),
        })?;

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    if !status.is_success() {
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let body = response
            .text()
            .await
            .map_err(|e| SessionError::Unreachable {
                detail: e.to_string(),
            })?;
        return Err(SessionError::Upstream {
            status,
            content_type,
            body,
        });
    }

    let session: Value = response.json().await.map_err(|e| SessionError::Decode {
        detail: e.to_string(),
    })?;

    Ok((status, Json(session)).into_response())
}
