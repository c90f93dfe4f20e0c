use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rkcf::{CfProvider, NodeSettings, ProviderConfig, daemon};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rkcf", version, about = "Virtual kubelet provider backed by Cloud Foundry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Cloud Foundry and serve the provider API
    Start {
        /// TOML file with api, org, space and access_token
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, env = "RKCF_NODE_NAME", default_value = "rkcf")]
        node_name: String,
        #[arg(long, env = "RKCF_INTERNAL_IP", default_value = "127.0.0.1")]
        internal_ip: String,
        #[arg(short, long, default_value_t = 10250)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            config,
            node_name,
            internal_ip,
            port,
        } => {
            let cfg = match config {
                Some(path) => ProviderConfig::load(&path)?,
                None => ProviderConfig::default(),
            };
            let node = NodeSettings {
                node_name,
                internal_ip,
                daemon_endpoint_port: i32::from(port),
            };
            let provider = CfProvider::connect(cfg, node)
                .await
                .context("Failed to initialize the Cloud Foundry provider")?;
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            daemon::serve(addr, Arc::new(provider)).await?;
        }
    }

    Ok(())
}
