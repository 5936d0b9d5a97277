//! Orchestrator behavior with fake model and ledger clients.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use truthlens_core::{
    Claim, LedgerId, ModelEndpointConfig, OperatingMode, PublishMode, RawModelOutput,
    TruthLensError, VerdictLabel, VerifyConfig,
};
use truthlens_ledger::{ClaimReviewRecord, LedgerClient, PublishError, PublishOptions};
use truthlens_model::{ModelClient, ModelError};
use truthlens_pipeline::{Orchestrator, PublishOutcome};

// ============================================================================
// Fakes
// ============================================================================

struct FakeModel {
    answer: Result<String, u16>,
    calls: AtomicUsize,
}

impl FakeModel {
    fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(status),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    async fn query(
        &self,
        _endpoint: &ModelEndpointConfig,
        _claim: &Claim,
    ) -> Result<RawModelOutput, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(text) => Ok(RawModelOutput::new(text.clone())),
            Err(status) => Err(ModelError::Status {
                status: *status,
                reason: "Service Unavailable".to_string(),
            }),
        }
    }
}

enum LedgerBehavior {
    Succeed(&'static str),
    Fail,
    Hang,
}

struct FakeLedger {
    behavior: LedgerBehavior,
    records: Mutex<Vec<(ClaimReviewRecord, PublishOptions)>>,
}

impl FakeLedger {
    fn new(behavior: LedgerBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            records: Mutex::new(Vec::new()),
        })
    }

    fn published(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn publish(
        &self,
        record: &ClaimReviewRecord,
        options: &PublishOptions,
    ) -> Result<LedgerId, PublishError> {
        self.records
            .lock()
            .unwrap()
            .push((record.clone(), options.clone()));
        match self.behavior {
            LedgerBehavior::Succeed(id) => Ok(LedgerId::new(id)),
            LedgerBehavior::Fail => Err(PublishError::new("Unable to reach DKG node")
                .with_cause("connection refused")
                .with_code("ECONNREFUSED")),
            LedgerBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(LedgerId::new("never"))
            }
        }
    }
}

fn config() -> VerifyConfig {
    VerifyConfig::new(ModelEndpointConfig::new(
        "http://localhost:11434/v1/chat/completions",
        "llama",
    ))
}

const FALSE_ANSWER: &str = r#"{"rating": 1, "explanation": "The Eiffel Tower is in Paris."}"#;

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_published_verdict_carries_ledger_id() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Succeed("did:dkg:otp:2043/0xabc/1"));
    let orchestrator = Orchestrator::new(model, ledger.clone());

    let result = orchestrator
        .verify("The Eiffel Tower is in Berlin", &config())
        .await
        .unwrap();

    assert_eq!(result.claim, "The Eiffel Tower is in Berlin");
    assert_eq!(result.rating.value(), 1);
    assert_eq!(result.verdict, VerdictLabel::VerifiedFalse);
    assert_eq!(result.explanation, "The Eiffel Tower is in Paris.");
    assert_eq!(
        result.ledger_id.as_ref().map(LedgerId::as_str),
        Some("did:dkg:otp:2043/0xabc/1")
    );
    assert_eq!(result.diagnostic, None);

    let records = ledger.records.lock().unwrap();
    let (record, options) = &records[0];
    assert_eq!(record.claim_reviewed, "The Eiffel Tower is in Berlin");
    assert_eq!(record.review_rating.alternate_name, "False");
    assert_eq!(options, &PublishOptions::default());
}

#[tokio::test]
async fn test_noisy_model_output_still_yields_verdict() {
    let model = FakeModel::answering(
        "<|channel|>analysis<|message|>Rating: 4\nExplanation: Matches public records<|end|>",
    );
    let ledger = FakeLedger::new(LedgerBehavior::Succeed("did:dkg:otp:2043/0x1/1"));
    let result = Orchestrator::new(model, ledger)
        .verify("claim", &config())
        .await
        .unwrap();

    assert_eq!(result.verdict, VerdictLabel::VerifiedTrue);
    assert!(!result.explanation.contains("<|"));
}

// ============================================================================
// Publish failures never abort
// ============================================================================

#[tokio::test]
async fn test_publish_failure_keeps_verdict_in_production() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Fail);
    let orchestrator = Orchestrator::new(model, ledger);

    let report = orchestrator.run("claim", &config()).await.unwrap();
    assert_eq!(report.result.rating.value(), 1);
    assert_eq!(report.result.ledger_id, None);
    assert_eq!(report.result.diagnostic, None);
    assert!(matches!(report.publish, PublishOutcome::Failed(_)));
}

#[tokio::test]
async fn test_publish_failure_exposes_diagnostic_in_development() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Fail);
    let config = config().with_operating_mode(OperatingMode::Development);

    let result = Orchestrator::new(model, ledger)
        .verify("claim", &config)
        .await
        .unwrap();

    assert_eq!(result.rating.value(), 1);
    assert_eq!(result.ledger_id, None);
    assert_eq!(
        result.diagnostic.as_deref(),
        Some("Unable to reach DKG node | Cause: connection refused | Code: ECONNREFUSED")
    );
}

#[tokio::test(start_paused = true)]
async fn test_publish_timeout_counts_as_failure() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Hang);
    let config = config()
        .with_operating_mode(OperatingMode::Development)
        .with_publish_timeout(Duration::from_secs(5));

    let report = Orchestrator::new(model, ledger)
        .run("claim", &config)
        .await
        .unwrap();

    assert_eq!(report.result.ledger_id, None);
    let diagnostic = report.result.diagnostic.unwrap();
    assert!(diagnostic.contains("Code: ETIMEDOUT"), "{}", diagnostic);
}

// ============================================================================
// Demo mode
// ============================================================================

#[tokio::test]
async fn test_demo_mode_skips_ledger_but_queries_model() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Fail);
    let config = config().with_publish_mode(PublishMode::Demo);

    let report = Orchestrator::new(model.clone(), ledger.clone())
        .run("claim", &config)
        .await
        .unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.published(), 0);
    assert_eq!(report.publish.name(), "demo");
    assert_eq!(report.result.rating.value(), 1);
    let ual = report.result.ledger_id.unwrap();
    assert!(ual.as_str().starts_with("did:dkg:otp:20430/0x"));
}

// ============================================================================
// Fatal errors
// ============================================================================

#[tokio::test]
async fn test_blank_claim_makes_no_upstream_call() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Succeed("x"));
    let orchestrator = Orchestrator::new(model.clone(), ledger.clone());

    for claim in ["", "   \n"] {
        let err = orchestrator.verify(claim, &config()).await.unwrap_err();
        assert!(matches!(err, TruthLensError::InvalidInput(_)));
    }
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    assert_eq!(ledger.published(), 0);
}

#[tokio::test]
async fn test_model_failure_aborts_before_publish() {
    let model = FakeModel::failing(503);
    let ledger = FakeLedger::new(LedgerBehavior::Succeed("x"));
    let err = Orchestrator::new(model, ledger.clone())
        .verify("claim", &config())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "upstream_unavailable");
    assert!(err.to_string().contains("503"));
    assert_eq!(ledger.published(), 0);
}

#[tokio::test]
async fn test_each_run_gets_its_own_trace_id() {
    let model = FakeModel::answering(FALSE_ANSWER);
    let ledger = FakeLedger::new(LedgerBehavior::Succeed("x"));
    let orchestrator = Orchestrator::new(model, ledger);

    let a = orchestrator.run("claim", &config()).await.unwrap();
    let b = orchestrator.run("claim", &config()).await.unwrap();
    assert_ne!(a.trace_id, b.trace_id);
}
