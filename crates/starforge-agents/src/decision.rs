//! Agent decision policy.
//!
//! Each agent idles until its action interval has elapsed since its last
//! decision. When it fires, it proposes actions by an ordered policy (first
//! match wins):
//!
//! 1. resource pressure > 0.7 and greed > 0.5: grow the economy
//! 2. aggression > 0.6 and a 30% roll: consider an attack
//! 3. expansion > 0.5 and a 20% roll: consider colonizing
//! 4. otherwise: grow the economy
//!
//! Rolls are drawn only when the trait condition holds. The policy only
//! proposes; it never spends resources or moves ships.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use starforge_types::{
    AgentAction, AgentActionKind, AgentPlanet, AgentPlayer, BuildingKind, Coordinates, ShipKind,
};
use tracing::debug;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::personality::unit_roll;

/// Pressure above which a greedy agent focuses on its economy.
const PRESSURE_THRESHOLD: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
/// Greed above which pressure matters.
const GREED_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Aggression above which attacks are considered.
const AGGRESSION_THRESHOLD: Decimal = Decimal::from_parts(6, 0, 0, false, 1);
/// Chance an aggressive agent considers attacking on a given decision.
const ATTACK_CHANCE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
/// Expansion above which colonizing is considered.
const EXPANSION_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Chance an expansive agent considers colonizing on a given decision.
const COLONIZE_CHANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
/// Ships the first planet must hold (strictly more than) to attack.
const ATTACK_MIN_SHIPS: u64 = 10;

/// Which policy branch fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Economy under resource pressure.
    Economy,
    /// Attack consideration.
    Attack,
    /// Colonize consideration.
    Colonize,
    /// Economy as the fallback.
    Fallback,
}

/// `1 - min(1, total_stock / (planet_count * ceiling))`.
///
/// An agent with no planets is under full pressure.
pub fn resource_pressure(agent: &AgentPlayer, config: &AgentConfig) -> Decimal {
    let capacity = u64::try_from(agent.planets.len())
        .unwrap_or(u64::MAX)
        .saturating_mul(config.stock_ceiling_per_planet);
    if capacity == 0 {
        return Decimal::ONE;
    }
    let ratio = Decimal::from(agent.total_stock())
        .checked_div(Decimal::from(capacity))
        .unwrap_or(Decimal::ONE)
        .min(Decimal::ONE);
    Decimal::ONE.saturating_sub(ratio)
}

/// Whether `agent` is due to decide at `now`.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the interval overflows.
pub fn is_due(agent: &AgentPlayer, now: DateTime<Utc>, config: &AgentConfig) -> Result<bool, AgentError> {
    let interval = config.action_interval(&agent.personality)?;
    Ok(now.signed_duration_since(agent.last_action) >= interval)
}

/// Run one decision for `agent` at `now`.
///
/// Before the interval elapses this returns an empty list and leaves the
/// agent untouched. Once it fires, `last_action` becomes `now` whether or
/// not any action was proposed.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the interval or a target
/// coordinate overflows.
pub fn step<R: Rng + ?Sized>(
    agent: &mut AgentPlayer,
    now: DateTime<Utc>,
    rng: &mut R,
    config: &AgentConfig,
) -> Result<Vec<AgentAction>, AgentError> {
    if !is_due(agent, now, config)? {
        return Ok(Vec::new());
    }

    let pressure = resource_pressure(agent, config);
    let branch = choose_branch(agent, pressure, rng);
    let actions = match branch {
        Branch::Economy | Branch::Fallback => economy_actions(agent, rng),
        Branch::Attack => attack_actions(agent, rng),
        Branch::Colonize => colonize_actions(agent, rng)?,
    };
    agent.last_action = now;

    debug!(
        agent_id = %agent.id,
        name = %agent.name,
        ?branch,
        %pressure,
        actions = actions.len(),
        "agent decided"
    );
    Ok(actions)
}

/// Pick the policy branch. Draws a roll only when the trait gate passes.
pub fn choose_branch<R: Rng + ?Sized>(agent: &AgentPlayer, pressure: Decimal, rng: &mut R) -> Branch {
    let p = &agent.personality;
    if pressure > PRESSURE_THRESHOLD && p.greed() > GREED_THRESHOLD {
        return Branch::Economy;
    }
    if p.aggression() > AGGRESSION_THRESHOLD && unit_roll(rng) < ATTACK_CHANCE {
        return Branch::Attack;
    }
    if p.expansion() > EXPANSION_THRESHOLD && unit_roll(rng) < COLONIZE_CHANCE {
        return Branch::Colonize;
    }
    Branch::Fallback
}

/// Per planet: metal mine below `tier * 5` (priority 1), crystal mine below
/// `tier * 4` (priority 2), and with probability `greed` one to five cargo
/// ships (priority 3).
pub fn economy_actions<R: Rng + ?Sized>(agent: &AgentPlayer, rng: &mut R) -> Vec<AgentAction> {
    let tier = agent.difficulty.tier();
    let metal_cap = tier.saturating_mul(5);
    let crystal_cap = tier.saturating_mul(4);
    let mut actions = Vec::new();

    for planet in &agent.planets {
        if planet.buildings.level(BuildingKind::MetalMine) < metal_cap {
            actions.push(action(agent, planet, build(BuildingKind::MetalMine), 1));
        }
        if planet.buildings.level(BuildingKind::CrystalMine) < crystal_cap {
            actions.push(action(agent, planet, build(BuildingKind::CrystalMine), 2));
        }
        if unit_roll(rng) < agent.personality.greed() {
            let count = rng.random_range(1..=5u64);
            let kind = AgentActionKind::BuildShip {
                ship: ShipKind::CargoShip,
                count,
            };
            actions.push(action(agent, planet, kind, 3));
        }
    }
    actions
}

/// Raid a random system from the first planet if it holds more than ten
/// ships. Nothing otherwise.
pub fn attack_actions<R: Rng + ?Sized>(agent: &AgentPlayer, rng: &mut R) -> Vec<AgentAction> {
    let Some(source) = agent.planets.first() else {
        return Vec::new();
    };
    if source.total_ships() <= ATTACK_MIN_SHIPS {
        return Vec::new();
    }
    let target = Coordinates::new(1, rng.random_range(0..500), 5);
    vec![action(agent, source, AgentActionKind::Attack { target }, 1)]
}

/// Colonize the next free system from the first planet, if any planet has a
/// colony ship and the agent owns fewer than `tier * 2` planets.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the target system
/// overflows.
pub fn colonize_actions<R: Rng + ?Sized>(
    agent: &AgentPlayer,
    rng: &mut R,
) -> Result<Vec<AgentAction>, AgentError> {
    let has_colony_ship = agent
        .planets
        .iter()
        .any(|p| p.ship_count(ShipKind::ColonyShip) > 0);
    let cap = usize::try_from(agent.difficulty.tier().saturating_mul(2)).unwrap_or(usize::MAX);
    let Some(source) = agent.planets.first() else {
        return Ok(Vec::new());
    };
    if !has_colony_ship || agent.planets.len() >= cap {
        return Ok(Vec::new());
    }

    let system = u32::try_from(agent.planets.len())
        .ok()
        .and_then(|n| n.checked_mul(50))
        .and_then(|v| v.checked_add(100))
        .ok_or(AgentError::overflow("colony target"))?;
    let target = Coordinates::new(1, system, rng.random_range(1..=15));
    Ok(vec![action(agent, source, AgentActionKind::Colonize { target }, 1)])
}

const fn build(building: BuildingKind) -> AgentActionKind {
    AgentActionKind::Build { building }
}

const fn action(agent: &AgentPlayer, planet: &AgentPlanet, kind: AgentActionKind, priority: u8) -> AgentAction {
    AgentAction {
        agent_id: agent.id,
        planet_id: planet.id,
        kind,
        priority,
    }
}
