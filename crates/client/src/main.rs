//! DEI Quest client - unified composition root binary.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deiquest_client::infrastructure::{DesktopStorageProvider, DesktopTimeProvider};
use deiquest_client::ports::outbound::{StorageProvider, TimeProvider};
use deiquest_client::runner::{self, config::RunnerConfig, Cli, RunnerDeps};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deiquest_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Platform
    let storage: Arc<dyn StorageProvider> = Arc::new(DesktopStorageProvider::new());
    let time: Arc<dyn TimeProvider> = Arc::new(DesktopTimeProvider);

    let config = RunnerConfig::resolve(storage.as_ref());
    tracing::debug!(base_url = %config.base_url, "starting DEI Quest client");

    let deps = RunnerDeps::build(storage, time, &config)?;
    runner::run(deps, cli.command).await
}
