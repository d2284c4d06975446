#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the incident stats API server.
//!
//! Configuration comes from the environment (`BIND_ADDR`, `PORT`,
//! `DATASET_URL`, `DATASET_PATH`, `RUST_LOG`); command-line flags override it.

use std::path::PathBuf;

use clap::Parser;
use incident_stats_dataset::DatasetSource;
use incident_stats_server::ServerConfig;

#[derive(Parser)]
#[command(name = "incident_stats_server", about = "Incident statistics API server")]
struct Cli {
    /// Address to bind (overrides `BIND_ADDR`)
    #[arg(long)]
    bind_addr: Option<String>,

    /// Port to bind (overrides `PORT`)
    #[arg(long)]
    port: Option<u16>,

    /// Dataset CSV URL (overrides `DATASET_URL`)
    #[arg(long, conflicts_with = "dataset_path")]
    dataset_url: Option<String>,

    /// Local dataset CSV file (overrides `DATASET_PATH`)
    #[arg(long)]
    dataset_path: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind_addr) = self.bind_addr {
            config.bind_addr = bind_addr;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = self.dataset_url {
            config.source = DatasetSource::Url(url);
        }
        if let Some(path) = self.dataset_path {
            config.source = DatasetSource::Path(path);
        }
        config
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Cli::parse().apply(ServerConfig::from_env());
    incident_stats_server::run_server(config).await
}
