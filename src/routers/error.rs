use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    error_type: &'static str,
    code: &'a str,
    message: &'a str,
}

pub const HEADER_X_SGW_ERROR_CODE: &str = "X-SGW-Error-Code";

/// Fixed message for every internal failure; upstream detail stays on the
/// diagnostic channel only.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Outcome of one brokered upstream call, short of success.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The provider answered with a non-success status. Status and body are
    /// relayed to the caller as-is.
    #[error("upstream returned {status}")]
    Upstream {
        status: StatusCode,
        content_type: String,
        body: String,
    },

    /// The call never produced a usable response (connect failure, timeout).
    #[error("upstream request failed: {detail}")]
    Unreachable { detail: String },

    /// The provider answered 2xx but the body was not decodable JSON.
    #[error("failed to decode upstream response: {detail}")]
    Decode { detail: String },
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            SessionError::Upstream {
                status,
                content_type,
                body,
            } => (status, [(http::header::CONTENT_TYPE, content_type)], body).into_response(),
            SessionError::Unreachable { .. } => internal_error("upstream_unreachable"),
            SessionError::Decode { .. } => internal_error("upstream_decode_error"),
        }
    }
}

pub fn internal_error(code: impl Into<String>) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, code, GENERIC_INTERNAL_MESSAGE)
}

pub fn create_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    let code_str = code.into();
    let message_str = message.into();

    let mut headers = HeaderMap::with_capacity(1);
    if let Ok(val) = HeaderValue::from_str(&code_str) {
        headers.insert(HEADER_X_SGW_ERROR_CODE, val);
    }

    (
        status,
        headers,
        Json(ErrorResponse {
            error: ErrorDetail {
                error_type: status_code_to_str(status),
                code: &code_str,
                message: &message_str,
            },
        }),
    )
        .into_response()
}

fn status_code_to_str(status_code: StatusCode) -> &'static str {
    status_code
        .canonical_reason()
        .unwrap_or("Unknown Status Code")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_body_is_fixed_and_generic() {
        let response = SessionError::Unreachable {
            detail: "connection refused from 10.0.1.5".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[HEADER_X_SGW_ERROR_CODE],
            "upstream_unreachable"
        );

        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], GENERIC_INTERNAL_MESSAGE);
        // The failure detail must not leak into the reply.
        assert!(!json.to_string().contains("10.0.1.5"));
    }

    #[tokio::test]
    async fn decode_error_maps_to_generic_500() {
        let response = SessionError::Decode {
            detail: "expected value at line 1".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "upstream_decode_error");
        assert_eq!(json["error"]["message"], GENERIC_INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn upstream_error_preserves_status_and_body() {
        let response = SessionError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            content_type: "application/json".to_string(),
            body: r#"{"error":{"message":"invalid key"}}"#.to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "invalid key");
    }
}
