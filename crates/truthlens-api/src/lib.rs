//! TruthLens API: REST endpoints
//!
//! - `POST /verify`: `{ claim, modelEndpoint? }` → VerificationResult
//! - `GET /health`: liveness
//! - `GET /metrics`: prometheus text format
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use metrics::Metrics;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use truthlens_ledger::DkgHttpClient;
use truthlens_model::HttpModelClient;
use truthlens_pipeline::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub config: Arc<ServerConfig>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, config: ServerConfig, metrics: Metrics) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
            metrics,
        }
    }

    /// Wire the HTTP model client and the DKG node client from config.
    pub fn from_config(config: ServerConfig) -> anyhow::Result<Self> {
        let model = HttpModelClient::new()?;
        let ledger = DkgHttpClient::new(config.dkg.clone())?;
        let orchestrator = Orchestrator::new(Arc::new(model), Arc::new(ledger));
        Ok(Self::new(orchestrator, config, Metrics::new()?))
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.addr.clone();
    tracing::info!(
        addr,
        llm_url = %config.model.url,
        dkg_node = %config.dkg.base_url(),
        publish_mode = ?config.publish_mode,
        operating_mode = ?config.operating_mode,
        "starting TruthLens proxy"
    );

    let app = create_app(AppState::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TruthLens API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
