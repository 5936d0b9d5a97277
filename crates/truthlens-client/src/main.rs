//! TruthLens CLI
//!
//! - `truthlens verify <CLAIM>`: verify through the proxy (or `--mock`)
//! - `truthlens health`: is the proxy up
//! - `truthlens probe <LLM_URL>`: is the model endpoint reachable

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use truthlens_client::{mock_verify, probe_model, ProxyClient, DEFAULT_LLM_URL, DEFAULT_PROXY_URL};

#[derive(Parser)]
#[command(name = "truthlens")]
#[command(about = "Fact-check claims through a TruthLens proxy", long_about = None)]
#[command(version)]
struct Cli {
    /// Proxy base URL
    #[arg(long, global = true, env = "TRUTHLENS_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a claim
    Verify {
        claim: String,

        /// Model endpoint the proxy should query
        #[arg(long, env = "TRUTHLENS_LLM_URL", default_value = DEFAULT_LLM_URL)]
        llm_url: String,

        /// Answer offline with canned data
        #[arg(long)]
        mock: bool,
    },

    /// Check that the proxy is running
    Health,

    /// Check that a model endpoint is reachable
    Probe {
        llm_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let proxy = ProxyClient::new(&cli.proxy_url);

    match cli.command {
        Commands::Verify {
            claim,
            llm_url,
            mock,
        } => {
            let result = if mock {
                mock_verify(&claim)
            } else {
                proxy.verify(&claim, Some(&llm_url)).await?
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Health => {
            let connected = proxy.health().await;
            println!(
                "{}",
                json!({ "proxy": proxy.base_url(), "connected": connected })
            );
            if !connected {
                std::process::exit(1);
            }
        }
        Commands::Probe { llm_url } => {
            let available = probe_model(&llm_url).await;
            println!("{}", json!({ "url": llm_url, "available": available }));
            if !available {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
