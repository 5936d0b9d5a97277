//! Prometheus counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    verify_requests: IntCounterVec,
    ledger_publish: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let verify_requests = IntCounterVec::new(
            Opts::new("truthlens_verify_requests_total", "Verification requests by outcome"),
            &["outcome"],
        )?;
        let ledger_publish = IntCounterVec::new(
            Opts::new("truthlens_ledger_publish_total", "Ledger publish attempts by outcome"),
            &["outcome"],
        )?;

        registry.register(Box::new(verify_requests.clone()))?;
        registry.register(Box::new(ledger_publish.clone()))?;

        Ok(Self {
            registry,
            verify_requests,
            ledger_publish,
        })
    }

    /// `ok`, `invalid_input` or `upstream_unavailable`
    pub fn record_verify(&self, outcome: &str) {
        self.verify_requests.with_label_values(&[outcome]).inc();
    }

    /// `published`, `failed` or `demo`
    pub fn record_publish(&self, outcome: &str) {
        self.ledger_publish.with_label_values(&[outcome]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = Metrics::new().unwrap();
        metrics.record_verify("ok");
        metrics.record_verify("ok");
        metrics.record_publish("failed");

        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"truthlens_verify_requests_total{outcome="ok"} 2"#));
        assert!(text.contains(r#"truthlens_ledger_publish_total{outcome="failed"} 1"#));
    }
}
