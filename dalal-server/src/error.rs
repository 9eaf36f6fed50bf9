use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dalal::DalalError;
use serde_json::json;

/// HTTP-facing wrapper around [`DalalError`]. Renders `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub DalalError);

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DalalError::InvalidArg(_) => StatusCode::BAD_REQUEST,
            DalalError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
            DalalError::Transient { .. }
            | DalalError::ProviderTimeout { .. }
            | DalalError::AllProvidersFailed(_) => StatusCode::BAD_GATEWAY,
            DalalError::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DalalError> for ApiError {
    fn from(e: DalalError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
