//! Wardlink CLI
//!
//! Command-line interface for pulling compliance-gated data from the bridge

mod config;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use wardlink_core::RetrievalError;
use wardlink_egress::BridgeConnector;
use wardlink_retrieval::ComplianceGatedRetriever;

use config::WardlinkConfig;

/// Exit code for data withheld by the compliance gate
const EXIT_NON_COMPLIANT: u8 = 3;

#[derive(Parser)]
#[command(name = "wardlink")]
#[command(about = "Wardlink - Compliance-gated bridge retrieval client", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "~/.wardlink/config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull a host telemetry snapshot
    HostSnapshot {
        /// Host to query
        host_id: String,
    },
    /// Pull a session corridor envelope
    CorridorEnvelope {
        /// Session to query
        session_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Expand tilde in the config path
    let config_path = shellexpand::tilde(&cli.config.to_string_lossy()).to_string();
    let config = WardlinkConfig::load(Path::new(&config_path))?;

    let connector = BridgeConnector::new(config.bridge_config())?;
    let retriever = ComplianceGatedRetriever::new(connector).with_policy(config.policy);

    match cli.command {
        Commands::HostSnapshot { host_id } => {
            finish(retriever.fetch_host_snapshot(&host_id).await)
        }
        Commands::CorridorEnvelope { session_id } => {
            finish(retriever.fetch_corridor_envelope(&session_id).await)
        }
    }
}

/// Render the outcome of a fetch.
///
/// Non-compliance is the degraded-mode branch: the payload is withheld and
/// any simulated-data substitution is the caller's decision, so the CLI
/// only reports and exits with a dedicated code.
fn finish<T: serde::Serialize>(result: wardlink_core::Result<T>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(RetrievalError::NonCompliant { reason }) => {
            let reason = reason.unwrap_or_else(|| "unspecified".to_string());
            warn!(%reason, "Bridge withheld data");
            eprintln!("Data withheld by compliance gate: {}", reason);
            Ok(ExitCode::from(EXIT_NON_COMPLIANT))
        }
        Err(err) => Err(err.into()),
    }
}
