//! TruthLens Pipeline: the verification orchestrator
//!
//! # Flow
//!
//! ```text
//! Claim → Querying → Extracting ─┬─ Publishing → PublishOutcome ─┐
//!           (model)   (extract)  │                                ├→ VerificationResult
//!                                └─ Verdict ──────────────────────┘
//! ```
//!
//! Failures before a verdict exists abort the call. Once the verdict
//! exists, the publish channel can only add a ledger id or a diagnostic;
//! it never turns the call into an error.

mod outcome;

pub use outcome::PublishOutcome;

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use truthlens_core::{
    Claim, ExecutionContext, OperatingMode, PipelineState, PublishMode, TruthLensError, Verdict,
    VerificationResult, VerifyConfig,
};
use truthlens_ledger::{
    ClaimReviewRecord, DemoLedger, LedgerClient, PublishError, PublishOptions,
};
use truthlens_model::ModelClient;

/// Everything one verification produced.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub trace_id: String,
    pub result: VerificationResult,
    pub publish: PublishOutcome,
}

pub struct Orchestrator {
    model: Arc<dyn ModelClient>,
    ledger: Arc<dyn LedgerClient>,
    options: PublishOptions,
}

impl Orchestrator {
    pub fn new(model: Arc<dyn ModelClient>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            model,
            ledger,
            options: PublishOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PublishOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn verify(
        &self,
        claim: &str,
        config: &VerifyConfig,
    ) -> Result<VerificationResult, TruthLensError> {
        self.run(claim, config).await.map(|report| report.result)
    }

    /// Like [`verify`](Self::verify), keeping the publish channel visible.
    pub async fn run(
        &self,
        claim: &str,
        config: &VerifyConfig,
    ) -> Result<VerifyReport, TruthLensError> {
        let claim = Claim::new(claim)?;
        let ctx = ExecutionContext::new(config.clone());
        let span = tracing::info_span!("verify", trace_id = %ctx.trace_id);

        self.run_in_context(claim, ctx).instrument(span).await
    }

    async fn run_in_context(
        &self,
        claim: Claim,
        ctx: ExecutionContext,
    ) -> Result<VerifyReport, TruthLensError> {
        let config = &ctx.config;
        let skip_publish = config.publish_mode == PublishMode::Demo;
        tracing::info!(
            claim = %claim.preview(50),
            model_url = %config.model.url,
            mode = ?config.publish_mode,
            "verifying claim"
        );

        // Querying
        let mut state = PipelineState::Querying;
        let started = Instant::now();
        let raw = match self.model.query(&config.model, &claim).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(state = %state, error = %e, "model query failed");
                return Err(e.into());
            }
        };
        log_transition(state, started);

        // Extracting
        state = state.next(skip_publish);
        let started = Instant::now();
        let extraction = truthlens_extract::extract_with_trace(raw);
        let verdict = extraction.verdict;
        tracing::info!(
            rating = verdict.rating.value(),
            strategy = extraction.strategy.name(),
            "verdict extracted"
        );
        log_transition(state, started);

        // Publishing, or the demo shortcut
        state = state.next(skip_publish);
        let publish = if skip_publish {
            let id = DemoLedger::generate_id();
            tracing::warn!(ual = %id, "demo mode: ledger publish bypassed");
            PublishOutcome::Demo(id)
        } else {
            let started = Instant::now();
            let outcome = self.publish(&claim, &verdict, config).await;
            log_transition(state, started);
            state = state.next(skip_publish);
            outcome
        };

        let result = merge(
            VerificationResult::from_verdict(claim.as_str(), verdict),
            &publish,
            config.operating_mode,
        );
        tracing::info!(
            state = %state,
            verdict = %result.verdict,
            publish = publish.name(),
            "verification complete"
        );

        Ok(VerifyReport {
            trace_id: ctx.trace_id.clone(),
            result,
            publish,
        })
    }

    async fn publish(
        &self,
        claim: &Claim,
        verdict: &Verdict,
        config: &VerifyConfig,
    ) -> PublishOutcome {
        let record = ClaimReviewRecord::from_verdict(claim.as_str(), verdict, Utc::now());
        tracing::debug!(fingerprint = %record.fingerprint(), "claim review record built");

        let attempt = tokio::time::timeout(
            config.publish_timeout,
            self.ledger.publish(&record, &self.options),
        )
        .await
        .unwrap_or_else(|_| {
            Err(PublishError::timed_out(format!(
                "Publish did not finish within {:?}",
                config.publish_timeout
            )))
        });

        match attempt {
            Ok(id) => {
                tracing::info!(ual = %id, "verdict anchored");
                PublishOutcome::Published(id)
            }
            Err(e) => {
                let diagnostic = e.diagnostic();
                tracing::error!(%diagnostic, "ledger publish failed");
                PublishOutcome::Failed(diagnostic)
            }
        }
    }
}

/// Fold the publish channel into the verdict channel.
pub fn merge(
    mut result: VerificationResult,
    publish: &PublishOutcome,
    mode: OperatingMode,
) -> VerificationResult {
    result.ledger_id = publish.ledger_id().cloned();
    result.diagnostic = publish
        .diagnostic()
        .filter(|_| mode.exposes_diagnostics())
        .map(str::to_string);
    result
}

fn log_transition(state: PipelineState, started: Instant) {
    tracing::info!(
        stage = %state,
        latency_ms = started.elapsed().as_millis() as u64,
        "stage finished"
    );
}
