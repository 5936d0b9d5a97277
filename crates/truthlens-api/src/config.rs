//! Process-wide server configuration, read once at startup
use std::time::Duration;
use truthlens_core::{
    ModelEndpointConfig, OperatingMode, PublishMode, VerifyConfig, DEFAULT_PUBLISH_TIMEOUT_SECS,
};
use truthlens_ledger::DkgConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LLM_URL: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub model: ModelEndpointConfig,
    pub publish_mode: PublishMode,
    pub operating_mode: OperatingMode,
    pub publish_timeout: Duration,
    pub dkg: DkgConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            model: ModelEndpointConfig::new(DEFAULT_LLM_URL, DEFAULT_LLM_MODEL),
            publish_mode: PublishMode::Ledger,
            operating_mode: OperatingMode::Production,
            publish_timeout: Duration::from_secs(DEFAULT_PUBLISH_TIMEOUT_SECS),
            dkg: DkgConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_or = |key: &str, default: u64| {
            get(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let model = ModelEndpointConfig::new(
            get("LLM_URL").unwrap_or_else(|| DEFAULT_LLM_URL.to_string()),
            get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
        );

        let publish_mode = match get("DEMO_MODE") {
            Some(v) if v.trim().eq_ignore_ascii_case("true") => PublishMode::Demo,
            _ => PublishMode::Ledger,
        };

        let operating_mode = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .map(|v| OperatingMode::parse(&v))
            .unwrap_or_default();

        let dkg = DkgConfig {
            hostname: get("OT_NODE_HOSTNAME").unwrap_or(defaults.dkg.hostname),
            port: get("DKG_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.dkg.port),
            blockchain: get("BLOCKCHAIN_ID").unwrap_or(defaults.dkg.blockchain),
            public_key: get("PUBLIC_KEY"),
            max_retries: get("DKG_MAX_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.dkg.max_retries),
            frequency: Duration::from_secs(parse_or(
                "DKG_FREQUENCY_SECS",
                defaults.dkg.frequency.as_secs(),
            )),
        };

        Self {
            addr: get("TRUTHLENS_ADDR").unwrap_or(defaults.addr),
            model,
            publish_mode,
            operating_mode,
            publish_timeout: Duration::from_secs(parse_or(
                "PUBLISH_TIMEOUT_SECS",
                DEFAULT_PUBLISH_TIMEOUT_SECS,
            )),
            dkg,
        }
    }

    /// Per-call configuration. A requested endpoint replaces the default
    /// URL only when it starts with `http`.
    pub fn verify_config(&self, model_endpoint: Option<&str>) -> VerifyConfig {
        let model = match model_endpoint.map(str::trim) {
            Some(url) if url.starts_with("http") => self.model.with_url(url),
            _ => self.model.clone(),
        };

        VerifyConfig::new(model)
            .with_publish_mode(self.publish_mode)
            .with_operating_mode(self.operating_mode)
            .with_publish_timeout(self.publish_timeout)
    }
}
