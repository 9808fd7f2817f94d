//! Planet resource engine.
//!
//! Advances a stock by elapsed simulated time. Metal, crystal, and
//! deuterium integrate their hourly rate; energy does not integrate at all
//! and is overwritten with the live net balance, floored at zero.
//!
//! Each stock moves by `floor(rate * elapsed / 3600)`. The division floors
//! toward negative infinity so a draining channel never rounds in its own
//! favour, and the resulting stock floors at zero.
//!
//! [`tick`] is exact for any single span. A driver that steps in short
//! spans uses [`advance_to`] or [`accrue_carried`], which keep the
//! remainder of each division in a [`ProductionCarry`] so that a thousand
//! one-second steps credit the same amount as one long step.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use starforge_types::{Buildings, Planet, ProductionCarry, ResourceRates, Resources};

use crate::error::EconomyError;
use crate::production::production;

const SECONDS_PER_HOUR: i128 = 3_600;

/// Advance `planet` by `elapsed_seconds` at universe `speed`.
///
/// Pure: the result depends only on the planet's buildings, its current
/// stock, `elapsed_seconds`, and `speed`. Zero elapsed time returns the
/// planet unchanged. Neither `last_tick` nor the carry is read or touched;
/// see [`advance_to`].
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if a production rate
/// overflows.
pub fn tick(planet: &Planet, elapsed_seconds: u64, speed: Decimal) -> Result<Planet, EconomyError> {
    if elapsed_seconds == 0 {
        return Ok(planet.clone());
    }
    let (resources, rates) = accrue(&planet.resources, &planet.buildings, elapsed_seconds, speed)?;
    Ok(Planet {
        resources,
        rates,
        ..planet.clone()
    })
}

/// Apply one production step to a bare stock.
///
/// Returns the new stock and the rates it was computed with. Used for
/// planets that carry no [`Planet`] record, such as those owned by agents.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if a production rate
/// overflows.
pub fn accrue(
    resources: &Resources,
    buildings: &Buildings,
    elapsed_seconds: u64,
    speed: Decimal,
) -> Result<(Resources, ResourceRates), EconomyError> {
    let step = accrue_carried(resources, &ProductionCarry::ZERO, buildings, elapsed_seconds, speed)?;
    Ok((step.resources, step.rates))
}

/// Result of a carried production step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accrual {
    /// Stock after the step.
    pub resources: Resources,
    /// Remainder owed to the next step.
    pub carry: ProductionCarry,
    /// Rates the step was computed with.
    pub rates: ResourceRates,
}

/// Apply one production step, crediting `carry` first.
///
/// Each channel moves by `floor((carry + rate * elapsed) / 3600)` and the
/// remainder becomes the new carry. Starting from a zero carry, any split
/// of a span into steps credits exactly what one step over the whole span
/// would.
///
/// # Errors
///
/// Returns [`EconomyError::ArithmeticOverflow`] if a production rate
/// overflows.
pub fn accrue_carried(
    resources: &Resources,
    carry: &ProductionCarry,
    buildings: &Buildings,
    elapsed_seconds: u64,
    speed: Decimal,
) -> Result<Accrual, EconomyError> {
    let rates = production(buildings, speed)?;
    let (metal, metal_carry) = carried_delta(rates.metal, elapsed_seconds, carry.metal)?;
    let (crystal, crystal_carry) = carried_delta(rates.crystal, elapsed_seconds, carry.crystal)?;
    let (deuterium, deuterium_carry) =
        carried_delta(rates.deuterium, elapsed_seconds, carry.deuterium)?;
    Ok(Accrual {
        resources: Resources {
            metal: apply_delta(resources.metal, metal),
            crystal: apply_delta(resources.crystal, crystal),
            deuterium: apply_delta(resources.deuterium, deuterium),
            energy: u64::try_from(rates.energy.max(0)).unwrap_or(0),
        },
        carry: ProductionCarry {
            metal: metal_carry,
            crystal: crystal_carry,
            deuterium: deuterium_carry,
        },
        rates,
    })
}

/// Advance `planet` up to simulation time `now`.
///
/// Only whole seconds are consumed; the fractional second stays in the gap
/// between `last_tick` and `now` and is picked up by the next call.
/// Sub-unit production is kept in the planet's carry, so calling this once
/// per second credits the hourly rate exactly over an hour. Returns the
/// number of seconds applied.
///
/// # Errors
///
/// Returns [`EconomyError::ClockRegression`] if `now` is before the
/// planet's `last_tick`, leaving the planet untouched, or
/// [`EconomyError::ArithmeticOverflow`] on overflow.
pub fn advance_to(planet: &mut Planet, now: DateTime<Utc>, speed: Decimal) -> Result<u64, EconomyError> {
    if now < planet.last_tick {
        return Err(EconomyError::ClockRegression {
            last_tick: planet.last_tick,
            now,
        });
    }
    let elapsed = u64::try_from(now.signed_duration_since(planet.last_tick).num_seconds())
        .map_err(|_| EconomyError::overflow("elapsed seconds"))?;
    if elapsed == 0 {
        return Ok(0);
    }

    let consumed = i64::try_from(elapsed)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or(EconomyError::overflow("elapsed seconds"))?;
    let last_tick = planet
        .last_tick
        .checked_add_signed(consumed)
        .ok_or(EconomyError::overflow("last tick"))?;

    let step = accrue_carried(
        &planet.resources,
        &planet.carry,
        &planet.buildings,
        elapsed,
        speed,
    )?;
    planet.resources = step.resources;
    planet.carry = step.carry;
    planet.rates = step.rates;
    planet.last_tick = last_tick;

    tracing::trace!(
        planet_id = %planet.id,
        elapsed,
        metal = planet.resources.metal,
        crystal = planet.resources.crystal,
        deuterium = planet.resources.deuterium,
        energy = planet.resources.energy,
        "planet advanced"
    );
    Ok(elapsed)
}

/// `(carry + rate * elapsed)` split into whole units and a remainder in
/// `[0, 3600)`.
fn carried_delta(rate: i64, elapsed_seconds: u64, carry: u32) -> Result<(i128, u32), EconomyError> {
    let owed = i128::from(rate)
        .checked_mul(i128::from(elapsed_seconds))
        .and_then(|v| v.checked_add(i128::from(carry)))
        .ok_or(EconomyError::overflow("stock delta"))?;
    let whole = owed
        .checked_div_euclid(SECONDS_PER_HOUR)
        .ok_or(EconomyError::overflow("stock delta"))?;
    let rest = owed
        .checked_rem_euclid(SECONDS_PER_HOUR)
        .and_then(|r| u32::try_from(r).ok())
        .ok_or(EconomyError::overflow("production carry"))?;
    Ok((whole, rest))
}

fn apply_delta(stock: u64, delta: i128) -> u64 {
    let next = i128::from(stock).saturating_add(delta).max(0);
    u64::try_from(next).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeZone;
    use starforge_types::{BuildingKind, Coordinates, Fields, PlanetId};

    use super::*;

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default()
    }

    fn make_planet(buildings: Buildings, resources: Resources) -> Planet {
        Planet {
            id: PlanetId::new(),
            name: String::from("Test"),
            coordinates: Coordinates::new(1, 1, 1),
            fields: Fields { used: 0, max: 163 },
            resources,
            rates: ResourceRates::ZERO,
            buildings,
            defense: BTreeMap::new(),
            last_tick: epoch(),
            carry: ProductionCarry::ZERO,
        }
    }

    fn reference_planet() -> Planet {
        let b = Buildings::new()
            .with(BuildingKind::MetalMine, 5)
            .with(BuildingKind::CrystalMine, 4)
            .with(BuildingKind::DeuteriumSynthesizer, 3)
            .with(BuildingKind::SolarPlant, 5)
            .with(BuildingKind::FusionReactor, 1);
        make_planet(b, Resources::new(1_000, 1_000, 1_000, 999))
    }

    #[test]
    fn one_hour_adds_exactly_the_hourly_rate() {
        let planet = reference_planet();
        let after = tick(&planet, 3_600, Decimal::ONE).ok();
        let r = after.as_ref().map(|p| p.resources);
        assert_eq!(r, Some(Resources::new(1_043, 1_026, 1_007, 0)));
        assert_eq!(after.map(|p| p.rates.metal), Some(43));
    }

    #[test]
    fn zero_elapsed_is_noop() {
        let planet = reference_planet();
        let after = tick(&planet, 0, Decimal::ONE).ok();
        assert_eq!(after, Some(planet));
    }

    #[test]
    fn tick_is_pure() {
        let planet = reference_planet();
        let a = tick(&planet, 1_234, Decimal::ONE).ok();
        let b = tick(&planet, 1_234, Decimal::ONE).ok();
        assert_eq!(a, b);
    }

    #[test]
    fn draining_channel_floors_at_zero() {
        let b = Buildings::new().with(BuildingKind::FusionReactor, 10);
        let planet = make_planet(b, Resources::new(0, 0, 3, 0));
        let after = tick(&planet, 3_600, Decimal::ONE).ok();
        assert_eq!(after.map(|p| p.resources.deuterium), Some(0));
    }

    #[test]
    fn negative_delta_rounds_down() {
        // -5/h over 1s = -0.0014 -> floor -1, with 3595/3600 still owed
        assert_eq!(carried_delta(-5, 1, 0).ok(), Some((-1, 3_595)));
        assert_eq!(carried_delta(5, 1, 0).ok(), Some((0, 5)));
        assert_eq!(carried_delta(43, 3_600, 0).ok(), Some((43, 0)));
        assert_eq!(carried_delta(-5, 1, 3_595).ok(), Some((0, 3_590)));
    }

    #[test]
    fn energy_is_not_accumulated() {
        let b = Buildings::new().with(BuildingKind::SolarPlant, 3);
        let planet = make_planet(b, Resources::new(0, 0, 0, 0));
        let once = tick(&planet, 3_600, Decimal::ONE).ok();
        let twice = once.as_ref().and_then(|p| tick(p, 3_600, Decimal::ONE).ok());
        assert_eq!(once.map(|p| p.resources.energy), Some(60));
        assert_eq!(twice.map(|p| p.resources.energy), Some(60));
    }

    #[test]
    fn energy_deficit_clamps_to_zero() {
        let b = Buildings::new().with(BuildingKind::MetalMine, 3);
        let planet = make_planet(b, Resources::new(0, 0, 0, 50));
        let after = tick(&planet, 60, Decimal::ONE).ok();
        assert_eq!(after.map(|p| p.resources.energy), Some(0));
    }

    #[test]
    fn metal_and_crystal_never_decrease() {
        let planet = reference_planet();
        for secs in [1, 59, 600, 86_400] {
            let after = tick(&planet, secs, Decimal::ONE).ok();
            let r = after.map(|p| p.resources);
            assert!(r.is_some_and(|r| r.metal >= 1_000 && r.crystal >= 1_000));
        }
    }

    #[test]
    fn advance_to_moves_last_tick_by_whole_seconds() {
        let mut planet = reference_planet();
        let now = epoch() + TimeDelta::milliseconds(3_600_500);
        let applied = advance_to(&mut planet, now, Decimal::ONE).ok();
        assert_eq!(applied, Some(3_600));
        assert_eq!(planet.last_tick, epoch() + TimeDelta::seconds(3_600));
        assert_eq!(planet.resources.metal, 1_043);
    }

    #[test]
    fn advance_to_rejects_regression() {
        let mut planet = reference_planet();
        let before = planet.clone();
        let earlier = epoch() - TimeDelta::seconds(1);
        let result = advance_to(&mut planet, earlier, Decimal::ONE);
        assert!(matches!(result, Err(EconomyError::ClockRegression { .. })));
        assert_eq!(planet, before);
    }

    #[test]
    fn one_second_steps_add_exactly_the_hourly_rate() {
        let mut planet = reference_planet();
        for s in 1..=3_600 {
            let now = epoch() + TimeDelta::seconds(s);
            assert_eq!(advance_to(&mut planet, now, Decimal::ONE).ok(), Some(1));
        }
        let r = planet.resources;
        assert_eq!((r.metal, r.crystal, r.deuterium), (1_043, 1_026, 1_007));
        assert_eq!(planet.carry, ProductionCarry::ZERO);
    }

    #[test]
    fn one_second_steps_drain_at_the_hourly_rate() {
        // Fusion level 1 burns 5 deuterium per hour with nothing synthesizing.
        let b = Buildings::new()
            .with(BuildingKind::MetalMine, 5)
            .with(BuildingKind::FusionReactor, 1);
        let mut planet = make_planet(b, Resources::new(0, 0, 10_000, 0));
        let whole = tick(&planet, 3_600, Decimal::ONE).ok().map(|p| p.resources);
        for s in 1..=3_600 {
            let now = epoch() + TimeDelta::seconds(s);
            assert!(advance_to(&mut planet, now, Decimal::ONE).is_ok());
        }
        assert_eq!(whole.map(|r| (r.metal, r.deuterium)), Some((43, 9_995)));
        assert_eq!(planet.resources.metal, 43);
        assert_eq!(planet.resources.deuterium, 9_995);
    }

    #[test]
    fn uneven_steps_match_one_long_step() {
        let mut planet = reference_planet();
        let whole = tick(&planet, 5_000, Decimal::ONE).ok().map(|p| p.resources);
        let mut at = 0;
        for step in [7, 1, 13, 600, 1_379, 3_000] {
            at += step;
            assert!(advance_to(&mut planet, epoch() + TimeDelta::seconds(at), Decimal::ONE).is_ok());
        }
        assert_eq!(at, 5_000);
        assert_eq!(whole, Some(planet.resources));
    }

    #[test]
    fn carry_survives_a_rate_change() {
        let b = Buildings::new().with(BuildingKind::MetalMine, 1);
        // 30/h for 60s = 0.5 units owed.
        let half = accrue_carried(&Resources::ZERO, &ProductionCarry::ZERO, &b, 60, Decimal::ONE).ok();
        assert_eq!(half.map(|a| a.resources.metal), Some(0));
        assert_eq!(half.map(|a| a.carry.metal), Some(1_800));

        // Another half unit at a new rate completes the first unit.
        let faster = b.with(BuildingKind::MetalMine, 2);
        let carry = half.map(|a| a.carry).unwrap_or_default();
        let rate = production(&faster, Decimal::ONE).map(|r| r.metal).unwrap_or_default();
        let secs = u64::try_from(1_800 / rate + 1).unwrap_or_default();
        let next = accrue_carried(&Resources::ZERO, &carry, &faster, secs, Decimal::ONE).ok();
        assert_eq!(next.map(|a| a.resources.metal), Some(1));
    }

    #[test]
    fn accrue_on_bare_stock() {
        let b = Buildings::new().with(BuildingKind::MetalMine, 1);
        let (stock, rates) =
            accrue(&Resources::ZERO, &b, 7_200, Decimal::ONE).unwrap_or_default();
        assert_eq!(stock.metal, 60);
        assert_eq!(rates.metal, 30);
    }
}
