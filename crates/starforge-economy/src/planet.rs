//! Starting planet for a newly registered human player.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use starforge_types::{
    BuildingKind, Buildings, Coordinates, Fields, Planet, PlanetId, ProductionCarry, ResourceRates,
    Resources,
};

use crate::config::EconomyConfig;

/// Stock a new home planet starts with.
pub const HOME_RESOURCES: Resources = Resources::new(500, 300, 100, 10);

/// Buildings a new home planet starts with, all at level 1.
pub const HOME_BUILDINGS: [BuildingKind; 7] = [
    BuildingKind::MetalMine,
    BuildingKind::CrystalMine,
    BuildingKind::DeuteriumSynthesizer,
    BuildingKind::SolarPlant,
    BuildingKind::RobotFactory,
    BuildingKind::Shipyard,
    BuildingKind::ResearchLab,
];

/// Create a fresh home planet whose clock starts at `now`.
pub fn create_home_planet(
    name: &str,
    coordinates: Coordinates,
    now: DateTime<Utc>,
    config: &EconomyConfig,
) -> Planet {
    let buildings = HOME_BUILDINGS
        .iter()
        .fold(Buildings::new(), |b, &kind| b.with(kind, 1));
    let used = u32::try_from(buildings.total_levels()).unwrap_or(u32::MAX);
    let max = config.max_fields(&buildings);

    Planet {
        id: PlanetId::new(),
        name: name.to_owned(),
        coordinates,
        fields: Fields { used, max },
        resources: HOME_RESOURCES,
        rates: ResourceRates::ZERO,
        buildings,
        defense: BTreeMap::new(),
        last_tick: now,
        carry: ProductionCarry::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_planet_defaults() {
        let now = Utc::now();
        let p = create_home_planet("Home World", Coordinates::new(1, 1, 1), now, &EconomyConfig::default());
        assert_eq!(p.resources, HOME_RESOURCES);
        assert_eq!(p.fields, Fields { used: 7, max: 163 });
        assert_eq!(p.buildings.level(BuildingKind::MetalMine), 1);
        assert_eq!(p.buildings.level(BuildingKind::FusionReactor), 0);
        assert_eq!(p.last_tick, now);
        assert_eq!(p.coordinates.to_string(), "1:1:1");
    }
}
