//! TruthLens Core: data model, error taxonomy and per-call configuration
//!
//! Everything the verification pipeline passes between its stages lives
//! here. The crate performs no I/O.

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod stage;

pub use config::{
    ModelEndpointConfig, OperatingMode, PublishMode, VerifyConfig, DEFAULT_MODEL_DEADLINE_SECS,
    DEFAULT_PUBLISH_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
pub use context::ExecutionContext;
pub use data_model::{
    Claim, LedgerId, Rating, RawModelOutput, Verdict, VerdictLabel, VerificationResult,
};
pub use error::TruthLensError;
pub use stage::PipelineState;

/// TruthLens engine version
pub const TRUTHLENS_VERSION: &str = env!("CARGO_PKG_VERSION");
