//! Simulation engine binary for Starforge.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `starforge-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Bootstrap the universe: home planet and generated agents
//! 4. Install a Ctrl-C handler that stops the run cleanly
//! 5. Run the simulation loop
//! 6. Log the result

mod error;
mod log_callback;

use std::path::{Path, PathBuf};

use chrono::Utc;
use starforge_core::config::{LoggingConfig, SimulationConfig};
use starforge_core::runner::{self, RunOptions, StopSignal};
use starforge_core::tick::SimulationState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "starforge-config.yaml";

/// Ticks between agent power reports.
const REPORT_EVERY_TICKS: u64 = 60;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        path = %config_path.display(),
        universe = config.world.name,
        seed = config.world.seed,
        speed = config.world.speed,
        tick_interval_ms = config.world.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Bootstrap.
    let mut state = SimulationState::from_config(&config, Utc::now()).map_err(EngineError::from)?;
    for agent in state.agents.iter() {
        info!(
            agent = %agent.name,
            difficulty = %agent.difficulty,
            strategy = %agent.strategy,
            planets = agent.planets.len(),
            "Agent ready"
        );
    }

    // 4. Stop on Ctrl-C.
    let stop = StopSignal::new();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping after the current tick");
                    stop.stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run the simulation.
    let mut callback = LogCallback::new(REPORT_EVERY_TICKS);
    let result = runner::run_simulation(&mut state, RunOptions::from_config(&config), &stop, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 6. Log results.
    runner::log_simulation_end(&result);
    info!(
        unlocked = state.player.achievements.unlocked_count(),
        play_time_seconds = state.player.stats.play_time_seconds,
        "starforge-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration, falling back to defaults (with
/// environment overrides) when the file does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        Ok(SimulationConfig::parse("{}")?)
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: format!("{e}"),
    })
}
