//! API Handlers
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use truthlens_core::{VerificationResult, TRUTHLENS_VERSION};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub claim: Option<String>,
    #[serde(default, alias = "llmUrl", rename = "modelEndpoint")]
    pub model_endpoint: Option<String>,
}

pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        state.metrics.record_verify("invalid_input");
        ApiError::InvalidInput(rejection.body_text())
    })?;

    let claim = request.claim.unwrap_or_default();
    let config = state.config.verify_config(request.model_endpoint.as_deref());

    match state.orchestrator.run(&claim, &config).await {
        Ok(report) => {
            state.metrics.record_verify("ok");
            state.metrics.record_publish(report.publish.name());
            Ok(Json(report.result))
        }
        Err(e) => {
            state.metrics.record_verify(e.kind());
            Err(e.into())
        }
    }
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": TRUTHLENS_VERSION })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
