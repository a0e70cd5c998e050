use std::sync::Arc;

use anyhow::{Context, Result};

use prospector_backend::config::{self, AppConfig};
use prospector_backend::model::neo::NeoWsClient;
use prospector_backend::module::renderer::ConsoleEmitter;
use prospector_backend::module::scheduled::RefreshScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = config::config_path();
    let config = AppConfig::load_or_default(&config_path)?;

    // Initialize logging
    let _logging_guard = prospector_backend::logging::init_logging(
        &config.log_dir,
        "prospector-backend",
        &config.log_level,
    )?;

    tracing::info!("Asteroid prospector starting...");
    if config_path.exists() {
        tracing::info!("Loaded configuration from {}", config_path.display());
    } else {
        tracing::warn!(
            "No configuration file at {}, using defaults",
            config_path.display()
        );
    }

    config.validate().context("Invalid configuration")?;
    let params = config.simulation.parameters()?;

    let asteroid_id = config.schedule.select_asteroid(&mut rand::thread_rng())?;
    tracing::info!("Tracking asteroid {}", asteroid_id);

    let client = NeoWsClient::new(&config.catalog)?;
    let scheduler = RefreshScheduler::new(
        asteroid_id,
        params,
        config.schedule.interval(),
        Arc::new(client),
        Arc::new(ConsoleEmitter),
    );

    let mut handle = scheduler.spawn();

    let finished = tokio::select! {
        result = handle.wait() => Some(result),
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            None
        }
    };

    let summary = match finished {
        Some(result) => result?,
        None => {
            tracing::info!("Shutdown requested, stopping after the current cycle");
            handle.stop();
            handle.join().await?
        }
    };

    tracing::info!(
        "Asteroid prospector stopped: {} cycles, {} reports",
        summary.cycles,
        summary.reports
    );

    Ok(())
}
