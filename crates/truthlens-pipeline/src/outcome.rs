//! Publish channel of a verification
use truthlens_core::LedgerId;

/// How the publish step ended. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Anchored on the ledger.
    Published(LedgerId),
    /// Demo mode; the identifier was synthesized.
    Demo(LedgerId),
    /// Publish failed or timed out. Carries the diagnostic.
    Failed(String),
}

impl PublishOutcome {
    pub fn ledger_id(&self) -> Option<&LedgerId> {
        match self {
            PublishOutcome::Published(id) | PublishOutcome::Demo(id) => Some(id),
            PublishOutcome::Failed(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            PublishOutcome::Failed(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    /// Metric label.
    pub fn name(&self) -> &'static str {
        match self {
            PublishOutcome::Published(_) => "published",
            PublishOutcome::Demo(_) => "demo",
            PublishOutcome::Failed(_) => "failed",
        }
    }
}
