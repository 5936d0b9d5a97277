//! API error responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use truthlens_core::TruthLensError;
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable kind
    pub kind: String,
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400
    #[error("{0}")]
    InvalidInput(String),

    /// 502
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// 500
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<TruthLensError> for ApiError {
    fn from(err: TruthLensError) -> Self {
        match err {
            TruthLensError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            TruthLensError::UpstreamUnavailable { reason } => ApiError::UpstreamUnavailable(reason),
            // Publish failures are folded into the result before they get here.
            TruthLensError::PublishFailed(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            kind = self.kind(),
            status = status.as_u16(),
            message = %self,
            request_id,
            "API error"
        );

        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
            request_id,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_mapping() {
        let err: ApiError = TruthLensError::InvalidInput("Missing 'claim' field".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing 'claim' field");

        let err: ApiError = TruthLensError::upstream("LLM Connection Failed: timed out").into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), "upstream_unavailable");

        let err: ApiError = TruthLensError::PublishFailed("x".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
