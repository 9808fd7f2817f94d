//! Fleet and economy power, always recomputed from current state.

use starforge_economy::tables::ship_attack;
use starforge_types::{AgentPlanet, AgentPlayer, BuildingKind, PowerRating};

/// Economy weight per metal mine level.
const METAL_WEIGHT: u64 = 10;
/// Economy weight per crystal mine level.
const CRYSTAL_WEIGHT: u64 = 15;
/// Economy weight per deuterium synthesizer level.
const DEUTERIUM_WEIGHT: u64 = 20;

/// Power of `agent` summed over every planet it owns.
pub fn derive_power(agent: &AgentPlayer) -> PowerRating {
    agent
        .planets
        .iter()
        .fold(PowerRating::default(), |acc, planet| PowerRating {
            fleet: acc.fleet.saturating_add(fleet_power(planet)),
            economy: acc.economy.saturating_add(economy_power(planet)),
        })
}

/// Sum of attack value times count over the planet's ships.
pub fn fleet_power(planet: &AgentPlanet) -> u64 {
    planet.ships.iter().fold(0u64, |acc, (&kind, &count)| {
        acc.saturating_add(ship_attack(kind).saturating_mul(count))
    })
}

/// Weighted sum of mine levels on the planet.
pub fn economy_power(planet: &AgentPlanet) -> u64 {
    let weighted = |kind: BuildingKind, weight: u64| {
        u64::from(planet.buildings.level(kind)).saturating_mul(weight)
    };
    weighted(BuildingKind::MetalMine, METAL_WEIGHT)
        .saturating_add(weighted(BuildingKind::CrystalMine, CRYSTAL_WEIGHT))
        .saturating_add(weighted(BuildingKind::DeuteriumSynthesizer, DEUTERIUM_WEIGHT))
}
