//! Building upgrades on a [`Planet`].
//!
//! Field capacity is checked before anything is mutated. Affordability is
//! an outcome, not an error: [`purchase_upgrade`] reports the shortfall and
//! leaves the planet untouched.

use starforge_types::{BuildingKind, Planet, Resources};

use crate::config::EconomyConfig;
use crate::cost::building_cost;
use crate::error::EconomyError;

/// Result of trying to buy a building upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The upgrade was paid for and applied.
    Purchased {
        /// Level after the upgrade.
        new_level: u32,
        /// What was deducted.
        cost: Resources,
    },
    /// The planet cannot pay. Nothing changed.
    Unaffordable {
        /// Full price of the upgrade.
        cost: Resources,
        /// How much is missing per channel.
        shortfall: Resources,
    },
}

/// Raise `kind` by one level without charging for it.
///
/// Occupies one field. A terraformer upgrade also grows the planet's field
/// capacity. Returns the new level.
///
/// # Errors
///
/// Returns [`EconomyError::FieldCapacityExceeded`] if every field is
/// already in use, or [`EconomyError::ArithmeticOverflow`] if the level
/// counter overflows. The planet is unchanged in both cases.
pub fn upgrade_building(
    planet: &mut Planet,
    kind: BuildingKind,
    config: &EconomyConfig,
) -> Result<u32, EconomyError> {
    ensure_free_field(planet)?;
    let new_level = planet
        .buildings
        .level(kind)
        .checked_add(1)
        .ok_or(EconomyError::overflow("building level"))?;
    let used = planet
        .fields
        .used
        .checked_add(1)
        .ok_or(EconomyError::overflow("fields used"))?;

    planet.buildings.set_level(kind, new_level);
    planet.fields.used = used;
    if kind == BuildingKind::Terraformer {
        planet.fields.max = config.max_fields(&planet.buildings);
    }
    Ok(new_level)
}

/// Pay for and apply one level of `kind`.
///
/// The price is [`building_cost`] at the current level.
///
/// # Errors
///
/// Returns [`EconomyError::FieldCapacityExceeded`] if the planet is full,
/// whether or not it could afford the upgrade, or
/// [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn purchase_upgrade(
    planet: &mut Planet,
    kind: BuildingKind,
    config: &EconomyConfig,
) -> Result<PurchaseOutcome, EconomyError> {
    ensure_free_field(planet)?;
    let cost = building_cost(kind, planet.buildings.level(kind))?;
    let Some(remaining) = planet.resources.checked_sub(&cost) else {
        return Ok(PurchaseOutcome::Unaffordable {
            cost,
            shortfall: planet.resources.shortfall(&cost),
        });
    };

    let new_level = upgrade_building(planet, kind, config)?;
    planet.resources = remaining;
    tracing::debug!(
        planet_id = %planet.id,
        building = %kind,
        new_level,
        metal = cost.metal,
        crystal = cost.crystal,
        deuterium = cost.deuterium,
        "building upgraded"
    );
    Ok(PurchaseOutcome::Purchased { new_level, cost })
}

const fn ensure_free_field(planet: &Planet) -> Result<(), EconomyError> {
    if planet.fields.is_full() {
        return Err(EconomyError::FieldCapacityExceeded {
            used: planet.fields.used,
            max: planet.fields.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use starforge_types::Coordinates;

    use super::*;
    use crate::planet::create_home_planet;

    fn home() -> Planet {
        create_home_planet("Home World", Coordinates::new(1, 1, 1), Utc::now(), &EconomyConfig::default())
    }

    #[test]
    fn purchase_deducts_and_levels_up() {
        let mut planet = home();
        planet.resources = Resources::new(1_000, 1_000, 1_000, 0);
        let used_before = planet.fields.used;

        let outcome = purchase_upgrade(&mut planet, BuildingKind::MetalMine, &EconomyConfig::default()).ok();
        // level 1 -> 2 costs 60*1.5, 15*1.5
        assert_eq!(
            outcome,
            Some(PurchaseOutcome::Purchased {
                new_level: 2,
                cost: Resources::new(90, 22, 0, 0),
            })
        );
        assert_eq!(planet.resources, Resources::new(910, 978, 1_000, 0));
        assert_eq!(planet.fields.used, used_before + 1);
    }

    #[test]
    fn unaffordable_leaves_planet_untouched() {
        let mut planet = home();
        planet.resources = Resources::new(10, 0, 0, 0);
        let before = planet.clone();

        let outcome = purchase_upgrade(&mut planet, BuildingKind::Shipyard, &EconomyConfig::default()).ok();
        // shipyard level 1: 600, 300, 150
        assert_eq!(
            outcome,
            Some(PurchaseOutcome::Unaffordable {
                cost: Resources::new(600, 300, 150, 0),
                shortfall: Resources::new(590, 300, 150, 0),
            })
        );
        assert_eq!(planet, before);
    }

    #[test]
    fn full_planet_rejects_before_mutation() {
        let mut planet = home();
        planet.fields.used = planet.fields.max;
        let before = planet.clone();

        let result = upgrade_building(&mut planet, BuildingKind::SolarPlant, &EconomyConfig::default());
        assert!(matches!(result, Err(EconomyError::FieldCapacityExceeded { .. })));
        assert_eq!(planet, before);
    }

    #[test]
    fn terraformer_grows_capacity() {
        let mut planet = home();
        let level = upgrade_building(&mut planet, BuildingKind::Terraformer, &EconomyConfig::default()).ok();
        assert_eq!(level, Some(1));
        assert_eq!(planet.fields.max, 168);
    }
}
