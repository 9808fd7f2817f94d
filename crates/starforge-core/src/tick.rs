//! Tick cycle: the periodic driver that advances the Starforge universe.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Clock** -- advance the simulated clock by one step.
//! 2. **Production** -- advance every player planet to the new time, and
//!    accrue agent planets over the same whole seconds.
//! 3. **Observation** -- add play time, raise the stock maxima from each
//!    planet's stock, and raise the filled-planet maximum.
//! 4. **Achievements** -- on their cadence, unlock what the stats now
//!    satisfy and credit rewards to the home planet.
//! 5. **Agents** -- on their cadence, let every agent decide and collect
//!    the proposed actions.
//!
//! The cycle is deterministic given the same initial state, seed and
//! config.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use starforge_achievements::{AchievementTracker, PlayerStats, total_reward};
use starforge_agents::{AgentError, AgentRegistry};
use starforge_economy::{EconomyConfig, EconomyError, PurchaseOutcome};
use starforge_types::{AgentAction, BuildingKind, Planet, PlanetId, PlayerId, Resources};
use tracing::{debug, info};

use crate::clock::{Cadence, ClockError, SimClock, take_whole_seconds};
use crate::config::SimulationConfig;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A planet could not be advanced or modified.
    #[error("economy error for planet {planet_id}: {source}")]
    Economy {
        /// The planet being processed.
        planet_id: PlanetId,
        /// The underlying economy error.
        source: EconomyError,
    },

    /// Agent generation or decision failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// No player planet at the given index.
    #[error("player has no planet at index {index}")]
    NoSuchPlanet {
        /// The requested index.
        index: usize,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated time at this tick.
    pub now: DateTime<Utc>,
    /// Player stock summed over all planets, after rewards.
    pub player_stock: Resources,
    /// Ids of achievements unlocked this tick.
    pub unlocked: Vec<String>,
    /// Rewards credited to the home planet this tick.
    pub reward: Resources,
    /// Actions agents proposed this tick.
    pub actions: Vec<AgentAction>,
    /// Number of live agents.
    pub agents: usize,
}

/// The human player: planets, cumulative stats, and achievement state.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Owned planets; the first is the home planet.
    pub planets: Vec<Planet>,
    /// Cumulative statistics.
    pub stats: PlayerStats,
    /// Achievement unlock state.
    pub achievements: AchievementTracker,
}

impl PlayerState {
    /// Stock summed over every planet.
    pub fn total_stock(&self) -> Resources {
        self.planets
            .iter()
            .fold(Resources::ZERO, |acc, p| acc.saturating_add(&p.resources))
    }

    /// Planets with every field in use.
    pub fn filled_planets(&self) -> u64 {
        let count = self.planets.iter().filter(|p| p.fields.is_full()).count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// Simulated clock.
    pub clock: SimClock,
    /// Production multiplier.
    pub speed: Decimal,
    /// Planet geometry.
    pub economy: EconomyConfig,
    /// The human player.
    pub player: PlayerState,
    /// Every autonomous agent.
    pub agents: AgentRegistry,
    /// Source of all randomness after bootstrap.
    pub rng: StdRng,
    /// Gate for achievement evaluation.
    pub achievement_cadence: Cadence,
    /// Gate for agent decision passes.
    pub agent_cadence: Cadence,
    /// Time up to which agent planets and play time have been accrued.
    pub accrual_mark: DateTime<Utc>,
}

impl SimulationState {
    /// Build a fresh universe from `config`, starting at `start`.
    ///
    /// Creates the player's home planet and generates the configured number
    /// of agents from the seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] for a bad tick step or cadence and
    /// [`TickError::Agent`] if agent generation fails.
    pub fn from_config(config: &SimulationConfig, start: DateTime<Utc>) -> Result<Self, TickError> {
        let economy = config.economy_config();
        let mut rng = StdRng::seed_from_u64(config.world.seed);

        let home = starforge_economy::create_home_planet(
            &config.player.home_planet,
            config.player.home_coordinates,
            start,
            &economy,
        );
        let player = PlayerState {
            id: PlayerId::new(),
            name: config.player.name.clone(),
            planets: vec![home],
            stats: PlayerStats::default(),
            achievements: AchievementTracker::default(),
        };

        let mut agents = AgentRegistry::new(config.agent_config());
        agents.generate_universe(config.agents.initial_agents, config.agents.base_difficulty, start, &mut rng)?;

        info!(
            universe = %config.world.name,
            seed = config.world.seed,
            speed = config.world.speed,
            agents = agents.len(),
            "universe bootstrapped"
        );

        Ok(Self {
            clock: SimClock::new(start, config.world.tick_interval_ms)?,
            speed: config.speed(),
            economy,
            player,
            agents,
            rng,
            achievement_cadence: Cadence::new(config.simulation.achievement_interval_ms, start)?,
            agent_cadence: Cadence::new(config.simulation.agent_interval_ms, start)?,
            accrual_mark: start,
        })
    }

    /// Buy one level of `kind` on the player's planet at `index`.
    ///
    /// A successful purchase counts toward the player's build stats.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::NoSuchPlanet`] for a bad index or
    /// [`TickError::Economy`] if the planet has no free field.
    pub fn purchase_upgrade(&mut self, index: usize, kind: BuildingKind) -> Result<PurchaseOutcome, TickError> {
        let now = self.clock.now();
        let planet = self
            .player
            .planets
            .get_mut(index)
            .ok_or(TickError::NoSuchPlanet { index })?;
        let planet_id = planet.id;
        let outcome = starforge_economy::purchase_upgrade(planet, kind, &self.economy)
            .map_err(|source| TickError::Economy { planet_id, source })?;
        if matches!(outcome, PurchaseOutcome::Purchased { .. }) {
            self.player.stats.record_build(now);
        }
        Ok(outcome)
    }
}

/// Execute one tick.
///
/// # Errors
///
/// Returns [`TickError`] if the clock overflows, a planet cannot be
/// advanced, or an agent step fails. State already advanced in earlier
/// phases of the same tick is kept.
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    // --- Clock ---
    let tick = state.clock.advance()?;
    let now = state.clock.now();

    // --- Production ---
    for planet in &mut state.player.planets {
        let planet_id = planet.id;
        starforge_economy::advance_to(planet, now, state.speed)
            .map_err(|source| TickError::Economy { planet_id, source })?;
    }

    let elapsed = take_whole_seconds(&mut state.accrual_mark, now)?;
    if elapsed > 0 {
        accrue_agents(&mut state.agents, elapsed, state.speed)?;
    }

    // --- Observation ---
    let filled = state.player.filled_planets();
    let stats = &mut state.player.stats;
    stats.add_play_time(elapsed);
    for planet in &state.player.planets {
        stats.observe_stock(&planet.resources);
    }
    stats.observe_filled_planets(filled);

    // --- Achievements ---
    let mut unlocked = Vec::new();
    let mut reward = Resources::ZERO;
    if state.achievement_cadence.fire(now) {
        let newly = state.player.achievements.evaluate(&state.player.stats, now);
        reward = total_reward(&newly);
        if let Some(home) = state.player.planets.first_mut() {
            home.resources = home.resources.saturating_add(&reward);
        }
        unlocked = newly.into_iter().map(|a| a.id).collect();
        if !unlocked.is_empty() {
            info!(tick, player = %state.player.name, ?unlocked, "achievements unlocked");
        }
    }

    // --- Agents ---
    let actions = if state.agent_cadence.fire(now) {
        state.agents.step_all(now, &mut state.rng)?
    } else {
        Vec::new()
    };

    let summary = TickSummary {
        tick,
        now,
        player_stock: state.player.total_stock(),
        unlocked,
        reward,
        actions,
        agents: state.agents.len(),
    };

    debug!(
        tick,
        elapsed,
        metal = summary.player_stock.metal,
        crystal = summary.player_stock.crystal,
        deuterium = summary.player_stock.deuterium,
        actions = summary.actions.len(),
        "tick complete"
    );

    Ok(summary)
}

fn accrue_agents(agents: &mut AgentRegistry, elapsed: u64, speed: Decimal) -> Result<(), TickError> {
    for agent in agents.iter_mut() {
        for planet in &mut agent.planets {
            let step = starforge_economy::accrue_carried(
                &planet.resources,
                &planet.carry,
                &planet.buildings,
                elapsed,
                speed,
            )
            .map_err(|source| TickError::Economy {
                planet_id: planet.id,
                source,
            })?;
            planet.resources = step.resources;
            planet.carry = step.carry;
        }
    }
    Ok(())
}
