pub mod cli;
pub mod core;
pub mod providers;
pub mod scheduler;
pub mod store;

use crate::core::SystemClock;
use crate::core::config::AppConfig;
use crate::providers::fixer::FixerProvider;
use crate::store::SnapshotStore;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub enum AppCommand {
    Currencies,
    Convert {
        from: String,
        to: String,
        amount: f64,
    },
    Refresh,
    Watch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = FixerProvider::new(
        config.base_url(),
        Duration::from_secs(config.timeout_secs()),
    );
    let store = SnapshotStore::new(
        config.rates_path()?,
        Arc::new(provider),
        Arc::new(SystemClock),
    );

    match command {
        AppCommand::Currencies => cli::currencies::run(&store).await,
        AppCommand::Convert { from, to, amount } => {
            cli::convert::run(&store, &from, &to, amount).await
        }
        AppCommand::Refresh => cli::refresh::run(&store).await,
        AppCommand::Watch => {
            scheduler::run(&store, config.refresh_at()?).await;
            Ok(())
        }
    }
}
