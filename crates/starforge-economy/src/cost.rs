//! Cost formulas.
//!
//! Buildings and research scale exponentially with level:
//! `floor(base * 1.5^level)` per channel. Ships and defenses scale linearly
//! with count. Multipliers are [`Decimal`] so the floor is exact rather
//! than subject to binary float rounding.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use starforge_types::{BuildingKind, DefenseKind, ResearchKind, Resources, ShipKind, UnknownKind};

use crate::error::EconomyError;
use crate::tables;

/// Per-level cost multiplier shared by buildings and research (1.5).
pub const COST_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Anything that can be paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buildable {
    /// A building, priced by level.
    Building(BuildingKind),
    /// A research technology, priced by level.
    Research(ResearchKind),
    /// A ship hull, priced by count.
    Ship(ShipKind),
    /// A defense installation, priced by count.
    Defense(DefenseKind),
}

impl core::fmt::Display for Buildable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let key = match self {
            Self::Building(k) => k.key(),
            Self::Research(k) => k.key(),
            Self::Ship(k) => k.key(),
            Self::Defense(k) => k.key(),
        };
        f.write_str(key)
    }
}

impl core::str::FromStr for Buildable {
    type Err = UnknownKind;

    /// Resolve a camelCase key against every kind table. Keys are unique
    /// across tables.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(k) = s.parse::<BuildingKind>() {
            return Ok(Self::Building(k));
        }
        if let Ok(k) = s.parse::<ResearchKind>() {
            return Ok(Self::Research(k));
        }
        if let Ok(k) = s.parse::<ShipKind>() {
            return Ok(Self::Ship(k));
        }
        if let Ok(k) = s.parse::<DefenseKind>() {
            return Ok(Self::Defense(k));
        }
        Err(UnknownKind {
            category: "buildable",
            name: s.to_owned(),
        })
    }
}

/// Cost of `item` at `level_or_count`.
///
/// For buildings and research this is the price of going from
/// `level_or_count` to the next level. For ships and defenses it is the
/// price of `level_or_count` units.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if the level does not fit a
/// `u32` or the scaled cost exceeds `u64`.
pub fn cost(item: Buildable, level_or_count: u64) -> Result<Resources, EconomyError> {
    match item {
        Buildable::Building(kind) => building_cost(kind, level_u32(level_or_count)?),
        Buildable::Research(kind) => research_cost(kind, level_u32(level_or_count)?),
        Buildable::Ship(kind) => ship_cost(kind, level_or_count),
        Buildable::Defense(kind) => defense_cost(kind, level_or_count),
    }
}

/// Cost of upgrading `kind` from `level` to `level + 1`.
///
/// The base energy figure is charged only at level 0.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn building_cost(kind: BuildingKind, level: u32) -> Result<Resources, EconomyError> {
    let base = tables::building_base_cost(kind);
    let mut scaled = scale_exponential(&base, level)?;
    scaled.energy = if level == 0 { base.energy } else { 0 };
    Ok(scaled)
}

/// Cost of researching `kind` from `level` to `level + 1`. Never costs energy.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn research_cost(kind: ResearchKind, level: u32) -> Result<Resources, EconomyError> {
    let base = tables::research_base_cost(kind);
    scale_exponential(&base, level)
}

/// Cost of `count` ships of `kind`.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn ship_cost(kind: ShipKind, count: u64) -> Result<Resources, EconomyError> {
    scale_linear(&tables::ship_unit_cost(kind), count)
}

/// Cost of `count` defense installations of `kind`.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn defense_cost(kind: DefenseKind, count: u64) -> Result<Resources, EconomyError> {
    scale_linear(&tables::defense_unit_cost(kind), count)
}

/// `base^exp` by repeated checked multiplication.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if the power exceeds the
/// range of [`Decimal`].
pub fn checked_pow(base: Decimal, exp: u32) -> Result<Decimal, EconomyError> {
    let mut acc = Decimal::ONE;
    for _ in 0..exp {
        acc = acc
            .checked_mul(base)
            .ok_or(EconomyError::overflow("decimal power"))?;
    }
    Ok(acc)
}

/// `floor(value * factor)` as a `u64`.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if the product does not fit.
pub fn floor_scaled(value: u64, factor: Decimal) -> Result<u64, EconomyError> {
    Decimal::from(value)
        .checked_mul(factor)
        .ok_or(EconomyError::overflow("cost scaling"))?
        .floor()
        .to_u64()
        .ok_or(EconomyError::overflow("cost scaling"))
}

fn scale_exponential(base: &Resources, level: u32) -> Result<Resources, EconomyError> {
    let factor = checked_pow(COST_MULTIPLIER, level)?;
    Ok(Resources::new(
        floor_scaled(base.metal, factor)?,
        floor_scaled(base.crystal, factor)?,
        floor_scaled(base.deuterium, factor)?,
        0,
    ))
}

fn scale_linear(unit: &Resources, count: u64) -> Result<Resources, EconomyError> {
    let mul = |v: u64| {
        v.checked_mul(count)
            .ok_or(EconomyError::overflow("linear cost"))
    };
    Ok(Resources::new(
        mul(unit.metal)?,
        mul(unit.crystal)?,
        mul(unit.deuterium)?,
        mul(unit.energy)?,
    ))
}

fn level_u32(level: u64) -> Result<u32, EconomyError> {
    u32::try_from(level).map_err(|_| EconomyError::overflow("level out of range"))
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn metal_mine_level_three() {
        // 60 * 3.375 = 202.5, 15 * 3.375 = 50.625
        let c = building_cost(BuildingKind::MetalMine, 3).ok();
        assert_eq!(c, Some(Resources::new(202, 50, 0, 0)));
    }

    #[test]
    fn level_zero_is_base_cost() {
        let c = building_cost(BuildingKind::FusionReactor, 0).ok();
        assert_eq!(c, Some(Resources::new(900, 360, 180, 0)));
    }

    #[test]
    fn research_scales_like_buildings() {
        // 800 * 1.5^2 = 1800, 400 * 2.25 = 900
        let c = research_cost(ResearchKind::EnergyTech, 2).ok();
        assert_eq!(c, Some(Resources::new(0, 1800, 900, 0)));
    }

    #[test]
    fn ships_scale_linearly() {
        let c = ship_cost(ShipKind::CargoShip, 5).ok();
        assert_eq!(c, Some(Resources::new(10_000, 10_000, 0, 0)));
        assert_eq!(ship_cost(ShipKind::Cruiser, 0).ok(), Some(Resources::ZERO));
    }

    #[test]
    fn defense_scales_linearly() {
        let c = defense_cost(DefenseKind::GaussCannon, 2).ok();
        assert_eq!(c, Some(Resources::new(70_000, 30_000, 10_000, 0)));
    }

    #[test]
    fn generic_cost_dispatches() {
        let item = Buildable::from_str("metalMine").ok();
        assert_eq!(item, Some(Buildable::Building(BuildingKind::MetalMine)));
        let c = item.and_then(|i| cost(i, 3).ok());
        assert_eq!(c, Some(Resources::new(202, 50, 0, 0)));

        let ship = Buildable::from_str("lightFighter").ok();
        let c = ship.and_then(|i| cost(i, 4).ok());
        assert_eq!(c, Some(Resources::new(12_000, 4_000, 0, 0)));
    }

    #[test]
    fn unknown_buildable_is_an_error() {
        let err = Buildable::from_str("warpGate");
        assert!(err.is_err());
    }

    #[test]
    fn ship_count_overflow_is_reported() {
        let result = ship_cost(ShipKind::Deathstar, u64::MAX);
        assert!(matches!(result, Err(EconomyError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn absurd_level_overflows_instead_of_panicking() {
        let result = building_cost(BuildingKind::SpaceDock, 500);
        assert!(result.is_err());
    }

    #[test]
    fn pow_matches_manual() {
        assert_eq!(checked_pow(dec!(1.5), 3).ok(), Some(dec!(3.375)));
        assert_eq!(checked_pow(dec!(1.1), 0).ok(), Some(Decimal::ONE));
    }
}
