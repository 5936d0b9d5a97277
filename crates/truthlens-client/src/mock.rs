//! Offline mock verification. No model, no ledger, no network.
use rand::Rng;
use truthlens_core::{Rating, Verdict, VerificationResult};

pub const MOCK_TRUE_EXPLANATION: &str =
    "This claim is supported by multiple sources on the DKG. (MOCK DATA)";
pub const MOCK_FALSE_EXPLANATION: &str = "This claim contradicts known facts in the DKG. (MOCK DATA)";

pub fn mock_verify(claim: &str) -> VerificationResult {
    mock_verify_with(claim, &mut rand::thread_rng())
}

/// Coin flip between a 5/5 and a 1/5 canned verdict. Never carries a
/// ledger id.
pub fn mock_verify_with<R: Rng>(claim: &str, rng: &mut R) -> VerificationResult {
    let verdict = if rng.gen_bool(0.5) {
        Verdict::new(Rating::from_signal(5), MOCK_TRUE_EXPLANATION)
    } else {
        Verdict::new(Rating::from_signal(1), MOCK_FALSE_EXPLANATION)
    };
    VerificationResult::from_verdict(claim, verdict)
}
