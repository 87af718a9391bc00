//! Vigia gateway daemon
//!
//! Forwards text to the classifier and answers with a publication decision.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vigiad::config::Config;

#[derive(Parser, Debug)]
#[command(name = "vigiad", version, about = "Vigia data-protection decision gateway")]
struct Args {
    /// Config file (default: /etc/vigia/config.toml, then /var/lib/vigia/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("[BOOT] vigiad v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    vigiad::server::run(config).await
}
