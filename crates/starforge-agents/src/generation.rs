//! Agent construction and universe generation.
//!
//! A new agent gets a unique name, a jittered strategy personality, and
//! between one and three starting planets whose buildings, ships, and
//! stock scale with its difficulty tier.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use starforge_types::{
    AgentId, AgentPlanet, AgentPlayer, BuildingKind, Buildings, Coordinates, Difficulty,
    PlanetId, ProductionCarry, Resources, ShipKind, Strategy,
};
use tracing::info;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::names::{color_for, pick_unused_name};
use crate::personality::{blend, unit_roll};

/// Base figure for starting stock, scaled by tier multiplier and a roll.
const BASE_STOCK: u64 = 10_000;

/// Energy every starting planet holds.
const STARTING_ENERGY: u64 = 100;

/// Ship counts at multiplier 1.0.
const STARTING_SHIPS: [(ShipKind, u64); 6] = [
    (ShipKind::CargoShip, 10),
    (ShipKind::LightFighter, 20),
    (ShipKind::HeavyFighter, 10),
    (ShipKind::Cruiser, 5),
    (ShipKind::Battleship, 2),
    (ShipKind::EspionageProbe, 10),
];

/// Per-tier scaling applied to starting ships and stock.
pub fn difficulty_multiplier(difficulty: Difficulty) -> Decimal {
    match difficulty {
        Difficulty::Easy => Decimal::new(5, 1),
        Difficulty::Normal => Decimal::ONE,
        Difficulty::Hard => Decimal::new(15, 1),
        Difficulty::Insane => Decimal::new(25, 1),
    }
}

/// Create one agent whose name is not in `existing_names`.
///
/// The color is picked by `existing_names.len()`, so agents created in
/// sequence cycle through the palette.
///
/// # Errors
///
/// Returns [`AgentError::NamePoolExhausted`] if no name is free, or
/// [`AgentError::ArithmeticOverflow`] if starting values overflow.
pub fn create_agent<R: Rng + ?Sized>(
    difficulty: Difficulty,
    strategy: Strategy,
    existing_names: &BTreeSet<String>,
    now: DateTime<Utc>,
    rng: &mut R,
    config: &AgentConfig,
) -> Result<AgentPlayer, AgentError> {
    let name = pick_unused_name(rng, existing_names)?;
    let personality = blend(strategy, config.personality_jitter, rng);
    let planets = starting_planets(difficulty, rng)?;

    let agent = AgentPlayer {
        id: AgentId::new(),
        name,
        difficulty,
        strategy,
        personality,
        planets,
        color: color_for(existing_names.len()).to_owned(),
        last_action: now,
    };

    info!(
        agent_id = %agent.id,
        name = %agent.name,
        %difficulty,
        %strategy,
        planets = agent.planets.len(),
        "agent created"
    );
    Ok(agent)
}

/// Generate `count` agents with distinct names, each with a random tier
/// among easy, normal, and hard and a random strategy.
///
/// # Errors
///
/// Returns [`AgentError::NamePoolExhausted`] if `count` plus
/// `existing_names` exceeds the name pool.
pub fn generate_universe<R: Rng + ?Sized>(
    count: usize,
    existing_names: &BTreeSet<String>,
    now: DateTime<Utc>,
    rng: &mut R,
    config: &AgentConfig,
) -> Result<Vec<AgentPlayer>, AgentError> {
    const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];
    generate_batch(count, existing_names, now, rng, config, |rng| {
        let idx = rng.random_range(0..TIERS.len());
        TIERS.get(idx).copied().unwrap_or(Difficulty::Normal)
    })
}

/// Generate `count` agents at `base` difficulty, each with an even chance
/// of being one tier harder (capped at insane).
///
/// # Errors
///
/// Returns [`AgentError::NamePoolExhausted`] if `count` plus
/// `existing_names` exceeds the name pool.
pub fn generate_universe_with_difficulty<R: Rng + ?Sized>(
    count: usize,
    base: Difficulty,
    existing_names: &BTreeSet<String>,
    now: DateTime<Utc>,
    rng: &mut R,
    config: &AgentConfig,
) -> Result<Vec<AgentPlayer>, AgentError> {
    generate_batch(count, existing_names, now, rng, config, |rng| {
        if base < Difficulty::Insane && rng.random_bool(0.5) {
            base.harder()
        } else {
            base
        }
    })
}

fn generate_batch<R, F>(
    count: usize,
    existing_names: &BTreeSet<String>,
    now: DateTime<Utc>,
    rng: &mut R,
    config: &AgentConfig,
    mut pick_tier: F,
) -> Result<Vec<AgentPlayer>, AgentError>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Difficulty,
{
    let mut taken = existing_names.clone();
    let mut agents = Vec::with_capacity(count);
    for _ in 0..count {
        let difficulty = pick_tier(rng);
        let strategy = Strategy::ALL
            .get(rng.random_range(0..Strategy::ALL.len()))
            .copied()
            .unwrap_or(Strategy::Balanced);
        let agent = create_agent(difficulty, strategy, &taken, now, rng, config)?;
        taken.insert(agent.name.clone());
        agents.push(agent);
    }
    Ok(agents)
}

fn starting_planets<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<AgentPlanet>, AgentError> {
    let tier = difficulty.tier();
    let extra = rng.random_range(0..tier.min(3));
    let count = extra.saturating_add(1);
    let threat_level = tier.saturating_mul(10);

    (0..count)
        .map(|i| {
            let system = i
                .checked_mul(50)
                .and_then(|v| v.checked_add(100))
                .ok_or(AgentError::overflow("colony system"))?;
            Ok(AgentPlanet {
                id: PlanetId::new(),
                name: format!("Colony {}", i.saturating_add(1)),
                coordinates: Coordinates::new(1, system, rng.random_range(1..=15)),
                buildings: starting_buildings(difficulty, rng),
                ships: starting_ships(difficulty)?,
                defense: BTreeMap::new(),
                resources: starting_resources(difficulty, rng)?,
                threat_level,
                carry: ProductionCarry::ZERO,
            })
        })
        .collect()
}

/// Building levels for a starting planet, with `level = tier + 1`.
fn starting_buildings<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Buildings {
    let tier = difficulty.tier();
    let level = tier.saturating_add(1);
    let r3 = |rng: &mut R| rng.random_range(0..3u32);

    let metal = level.saturating_add(r3(rng));
    let crystal = level.saturating_sub(1).saturating_add(r3(rng)).max(1);
    let deuterium = level.saturating_sub(2).saturating_add(r3(rng)).max(1);
    let solar = level.saturating_add(rng.random_range(0..2u32));

    Buildings::new()
        .with(BuildingKind::MetalMine, metal)
        .with(BuildingKind::CrystalMine, crystal)
        .with(BuildingKind::DeuteriumSynthesizer, deuterium)
        .with(BuildingKind::SolarPlant, solar)
        .with(BuildingKind::FusionReactor, tier.checked_div(2).unwrap_or(0))
        .with(BuildingKind::RobotFactory, level.checked_div(2).unwrap_or(0))
        .with(BuildingKind::Shipyard, level.checked_div(2).unwrap_or(0))
        .with(BuildingKind::ResearchLab, level.checked_div(3).unwrap_or(0))
}

fn starting_ships(difficulty: Difficulty) -> Result<BTreeMap<ShipKind, u64>, AgentError> {
    let m = difficulty_multiplier(difficulty);
    let mut ships = BTreeMap::new();
    for (kind, base) in STARTING_SHIPS {
        let count = scale_floor(base, m, "starting ships")?;
        if count > 0 {
            ships.insert(kind, count);
        }
    }
    Ok(ships)
}

fn starting_resources<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Resources, AgentError> {
    let m = difficulty_multiplier(difficulty);
    let scaled = |offset: Decimal, spread: Decimal, roll: Decimal| {
        let factor = roll
            .checked_mul(spread)
            .and_then(|v| v.checked_add(offset))
            .and_then(|v| v.checked_mul(m))
            .ok_or(AgentError::overflow("starting stock"))?;
        scale_floor(BASE_STOCK, factor, "starting stock")
    };
    let d = |tenths: i64| Decimal::new(tenths, 1);

    Ok(Resources::new(
        scaled(d(5), Decimal::ONE, unit_roll(rng))?,
        scaled(d(3), d(5), unit_roll(rng))?,
        scaled(d(2), d(3), unit_roll(rng))?,
        STARTING_ENERGY,
    ))
}

fn scale_floor(value: u64, factor: Decimal, context: &'static str) -> Result<u64, AgentError> {
    Decimal::from(value)
        .checked_mul(factor)
        .map(|v| v.floor())
        .and_then(|v| v.to_u64())
        .ok_or(AgentError::overflow(context))
}
