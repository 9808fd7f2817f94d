//! Hourly production rates from building levels.
//!
//! - Mines yield `floor(base * 1.1^(level - 1) * speed)` of their resource
//!   (metal 30, crystal 20, deuterium 10) and are silent at level 0.
//! - Mines draw `floor(upkeep * level * speed)` energy (metal 10,
//!   crystal 10, deuterium 20).
//! - The solar plant yields `floor(20 * level * speed)` energy.
//! - The fusion reactor yields `floor(50 * level * speed)` energy and burns
//!   `floor(5 * level * speed)` deuterium.
//!
//! The energy channel of the result is the net balance and may be negative.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use starforge_types::{BuildingKind, Buildings, ResourceRates};

use crate::config::EconomyConfig;
use crate::cost::checked_pow;
use crate::error::EconomyError;

/// Per-level growth factor of mine output (1.1).
pub const MINE_GROWTH: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

const METAL_BASE: i64 = 30;
const CRYSTAL_BASE: i64 = 20;
const DEUTERIUM_BASE: i64 = 10;

const METAL_UPKEEP: i64 = 10;
const CRYSTAL_UPKEEP: i64 = 10;
const DEUTERIUM_UPKEEP: i64 = 20;

const SOLAR_OUTPUT: i64 = 20;
const FUSION_OUTPUT: i64 = 50;
const FUSION_BURN: i64 = 5;

/// Net production per hour for `buildings` at universe `speed`.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if a rate exceeds `i64`.
pub fn production(buildings: &Buildings, speed: Decimal) -> Result<ResourceRates, EconomyError> {
    let metal_lvl = buildings.level(BuildingKind::MetalMine);
    let crystal_lvl = buildings.level(BuildingKind::CrystalMine);
    let deut_lvl = buildings.level(BuildingKind::DeuteriumSynthesizer);
    let solar_lvl = buildings.level(BuildingKind::SolarPlant);
    let fusion_lvl = buildings.level(BuildingKind::FusionReactor);

    let metal = mine_output(METAL_BASE, metal_lvl, speed)?;
    let crystal = mine_output(CRYSTAL_BASE, crystal_lvl, speed)?;
    let deuterium = sub(
        mine_output(DEUTERIUM_BASE, deut_lvl, speed)?,
        linear(FUSION_BURN, fusion_lvl, speed)?,
    )?;

    let supply = add(
        linear(SOLAR_OUTPUT, solar_lvl, speed)?,
        linear(FUSION_OUTPUT, fusion_lvl, speed)?,
    )?;
    let upkeep = add(
        add(
            linear(METAL_UPKEEP, metal_lvl, speed)?,
            linear(CRYSTAL_UPKEEP, crystal_lvl, speed)?,
        )?,
        linear(DEUTERIUM_UPKEEP, deut_lvl, speed)?,
    )?;
    let energy = sub(supply, upkeep)?;

    Ok(ResourceRates {
        metal,
        crystal,
        deuterium,
        energy,
    })
}

/// Field capacity under the default geometry (163 + 5 per terraformer level).
pub fn max_fields(buildings: &Buildings) -> u32 {
    EconomyConfig::default().max_fields(buildings)
}

fn mine_output(base: i64, level: u32, speed: Decimal) -> Result<i64, EconomyError> {
    let Some(exp) = level.checked_sub(1) else {
        return Ok(0);
    };
    let growth = checked_pow(MINE_GROWTH, exp)?;
    floor_i64(
        Decimal::from(base)
            .checked_mul(growth)
            .and_then(|v| v.checked_mul(speed)),
    )
}

fn linear(per_level: i64, level: u32, speed: Decimal) -> Result<i64, EconomyError> {
    floor_i64(
        Decimal::from(per_level)
            .checked_mul(Decimal::from(level))
            .and_then(|v| v.checked_mul(speed)),
    )
}

fn floor_i64(value: Option<Decimal>) -> Result<i64, EconomyError> {
    value
        .map(|v| v.floor())
        .and_then(|v| v.to_i64())
        .ok_or(EconomyError::overflow("production rate"))
}

fn add(a: i64, b: i64) -> Result<i64, EconomyError> {
    a.checked_add(b).ok_or(EconomyError::overflow("production sum"))
}

fn sub(a: i64, b: i64) -> Result<i64, EconomyError> {
    a.checked_sub(b).ok_or(EconomyError::overflow("production sum"))
}
