//! Execution Context: per-call state owned by one verification
use crate::config::VerifyConfig;

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub trace_id: String,
    pub config: VerifyConfig,
}

impl ExecutionContext {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            config,
        }
    }
}
