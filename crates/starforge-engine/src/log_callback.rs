//! Tick callback that reports the simulation through `tracing`.
//!
//! Proposed agent actions are logged one per line as JSON so a downstream
//! executor (or a person tailing the log) can pick them up. Every
//! `report_every` ticks a power table of all agents is logged.

use starforge_agents::derive_power;
use starforge_core::runner::TickCallback;
use starforge_core::tick::{SimulationState, TickSummary};
use tracing::{debug, info, warn};

/// Callback that logs tick outcomes.
pub struct LogCallback {
    report_every: u64,
}

impl LogCallback {
    /// Log a power report every `report_every` ticks (0 disables it).
    pub const fn new(report_every: u64) -> Self {
        Self { report_every }
    }

    fn report_due(&self, tick: u64) -> bool {
        tick.checked_rem(self.report_every).is_some_and(|r| r == 0)
    }
}

impl TickCallback for LogCallback {
    fn on_tick(&mut self, summary: &TickSummary, sim: &SimulationState) {
        for action in &summary.actions {
            match serde_json::to_string(action) {
                Ok(json) => info!(
                    tick = summary.tick,
                    kind = action.kind.label(),
                    priority = action.priority,
                    action = %json,
                    "agent proposal"
                ),
                Err(e) => warn!(error = %e, "failed to serialize agent action"),
            }
        }

        for id in &summary.unlocked {
            if let Some(def) = sim.player.achievements.get(id) {
                info!(
                    tick = summary.tick,
                    achievement = %def.id,
                    name = %def.name,
                    "achievement unlocked"
                );
            }
        }

        if self.report_due(summary.tick) {
            for agent in sim.agents.iter() {
                let power = derive_power(agent);
                info!(
                    tick = summary.tick,
                    agent = %agent.name,
                    difficulty = %agent.difficulty,
                    strategy = %agent.strategy,
                    planets = agent.planets.len(),
                    fleet_power = power.fleet,
                    economy_power = power.economy,
                    "agent report"
                );
            }
        }

        debug!(
            tick = summary.tick,
            now = %summary.now,
            metal = summary.player_stock.metal,
            crystal = summary.player_stock.crystal,
            deuterium = summary.player_stock.deuterium,
            energy = summary.player_stock.energy,
            "player stock"
        );
    }
}
