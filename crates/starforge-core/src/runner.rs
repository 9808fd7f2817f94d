//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`run_tick`] in a loop, paced in real time by a
//! tokio interval, until the tick limit is reached or a stop is requested.
//! The tick itself is synchronous; the runner only decides when to call it.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// A stop was requested through [`StopSignal`].
    Stopped,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Pacing and bounds for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after this many ticks (0 = unlimited).
    pub max_ticks: u64,
    /// Real time between ticks. Zero runs ticks back to back.
    pub tick_interval: Duration,
}

impl RunOptions {
    /// Options taken from the loaded configuration.
    pub const fn from_config(config: &SimulationConfig) -> Self {
        Self {
            max_ticks: config.simulation.max_ticks,
            tick_interval: Duration::from_millis(config.world.tick_interval_ms),
        }
    }

    /// Returns `true` if `max_ticks > 0` and `tick >= max_ticks`.
    pub const fn tick_limit_reached(&self, tick: u64) -> bool {
        self.max_ticks > 0 && tick >= self.max_ticks
    }
}

/// Cloneable flag that asks a running simulation to stop before its next
/// tick.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A signal that has not been raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Callback invoked after each tick completes.
///
/// Implementations can log summaries, forward actions to an executor, or
/// publish snapshots.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails.
pub async fn run_simulation(
    state: &mut SimulationState,
    options: RunOptions,
    stop: &StopSignal,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    let mut pacer = (!options.tick_interval.is_zero()).then(|| {
        let mut interval = tokio::time::interval(options.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    info!(
        max_ticks = options.max_ticks,
        tick_interval_ms = options.tick_interval.as_millis(),
        "Simulation starting"
    );

    loop {
        if let Some(interval) = pacer.as_mut() {
            interval.tick().await;
        } else {
            tokio::task::yield_now().await;
        }

        if stop.is_stopped() {
            info!("Stop requested");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Stopped,
                final_summary: last_summary,
                total_ticks,
            });
        }

        let summary = tick::run_tick(state)?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);

        if options.tick_limit_reached(summary.tick) {
            info!(tick = summary.tick, max_ticks = options.max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);
    }
}

/// Log the simulation end.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );
    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            metal = summary.player_stock.metal,
            crystal = summary.player_stock.crystal,
            deuterium = summary.player_stock.deuterium,
            agents = summary.agents,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
