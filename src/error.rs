// HTTP error surface for the gateway's own responses.
//
// The routing gate itself never surfaces errors to callers (every
// failure mode resolves to a redirect or a pass-through); this type
// covers the auth collaborator's rejections and the health endpoint.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

#[derive(Debug)]
pub enum GatewayError {
    // 401 Unauthorized
    Unauthorized(String),
    // 500 Internal Server Error
    InternalServerError(String),
    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Unauthorized(msg) => msg,
            GatewayError::InternalServerError(msg) => msg,
            GatewayError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized(_) => "UNAUTHORIZED",
            GatewayError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            GatewayError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        GatewayError::Unauthorized(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        GatewayError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        GatewayError::ServiceUnavailable(message.into())
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GatewayError {}

impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
