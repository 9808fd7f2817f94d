//! Core entity structs for the Starforge simulation.
//!
//! Covers resource stocks and rates, planet geometry, buildings, the
//! personality vector, and the simplified planets owned by autonomous agents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingKind, DefenseKind, Difficulty, ResourceKind, ShipKind, Strategy};
use crate::ids::{AgentId, PlanetId};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A non-negative stock (or cost) across the four resource channels.
///
/// Energy in a planet stock is a live balance, not an accumulation; in a
/// cost it is a one-off requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resources {
    /// Metal units.
    pub metal: u64,
    /// Crystal units.
    pub crystal: u64,
    /// Deuterium units.
    pub deuterium: u64,
    /// Energy units.
    pub energy: u64,
}

impl Resources {
    /// The empty stock.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Build a stock from its four channels.
    pub const fn new(metal: u64, crystal: u64, deuterium: u64, energy: u64) -> Self {
        Self {
            metal,
            crystal,
            deuterium,
            energy,
        }
    }

    /// Read a single channel.
    pub const fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Metal => self.metal,
            ResourceKind::Crystal => self.crystal,
            ResourceKind::Deuterium => self.deuterium,
            ResourceKind::Energy => self.energy,
        }
    }

    /// Metal + crystal + deuterium. Energy is not a stored material.
    pub const fn total_materials(&self) -> u64 {
        self.metal
            .saturating_add(self.crystal)
            .saturating_add(self.deuterium)
    }

    /// Whether this stock is at least `cost` in every channel.
    pub const fn covers(&self, cost: &Self) -> bool {
        self.metal >= cost.metal
            && self.crystal >= cost.crystal
            && self.deuterium >= cost.deuterium
            && self.energy >= cost.energy
    }

    /// Subtract `cost` channel by channel. `None` if any channel would go
    /// below zero.
    pub fn checked_sub(&self, cost: &Self) -> Option<Self> {
        Some(Self {
            metal: self.metal.checked_sub(cost.metal)?,
            crystal: self.crystal.checked_sub(cost.crystal)?,
            deuterium: self.deuterium.checked_sub(cost.deuterium)?,
            energy: self.energy.checked_sub(cost.energy)?,
        })
    }

    /// Add `other` channel by channel, saturating at `u64::MAX`.
    pub const fn saturating_add(&self, other: &Self) -> Self {
        Self {
            metal: self.metal.saturating_add(other.metal),
            crystal: self.crystal.saturating_add(other.crystal),
            deuterium: self.deuterium.saturating_add(other.deuterium),
            energy: self.energy.saturating_add(other.energy),
        }
    }

    /// How much is missing to cover `cost`. Zero in every channel that is
    /// already covered.
    pub const fn shortfall(&self, cost: &Self) -> Self {
        Self {
            metal: cost.metal.saturating_sub(self.metal),
            crystal: cost.crystal.saturating_sub(self.crystal),
            deuterium: cost.deuterium.saturating_sub(self.deuterium),
            energy: cost.energy.saturating_sub(self.energy),
        }
    }
}

/// Signed net production per hour. Negative values are drains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceRates {
    /// Metal per hour.
    pub metal: i64,
    /// Crystal per hour.
    pub crystal: i64,
    /// Deuterium per hour.
    pub deuterium: i64,
    /// Net energy balance.
    pub energy: i64,
}

impl ResourceRates {
    /// No production at all.
    pub const ZERO: Self = Self {
        metal: 0,
        crystal: 0,
        deuterium: 0,
        energy: 0,
    };
}

/// Production owed to a stock but not yet credited, per integrating channel.
///
/// Values are in 1/3600ths of a unit and stay below 3600. A driver that
/// advances in short steps keeps this between steps so that sub-unit
/// production is not lost to flooring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProductionCarry {
    /// Metal remainder.
    pub metal: u32,
    /// Crystal remainder.
    pub crystal: u32,
    /// Deuterium remainder.
    pub deuterium: u32,
}

impl ProductionCarry {
    /// Nothing owed.
    pub const ZERO: Self = Self {
        metal: 0,
        crystal: 0,
        deuterium: 0,
    };
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Position in the universe, rendered as `galaxy:system:slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinates {
    /// Galaxy number.
    pub galaxy: u32,
    /// Solar system within the galaxy.
    pub system: u32,
    /// Orbital slot within the system.
    pub slot: u32,
}

impl Coordinates {
    /// Build coordinates from their three parts.
    pub const fn new(galaxy: u32, system: u32, slot: u32) -> Self {
        Self {
            galaxy,
            system,
            slot,
        }
    }
}

impl core::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}:{}", self.galaxy, self.system, self.slot)
    }
}

/// A coordinate string that is not `galaxy:system:slot`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed coordinates: {0:?}")]
pub struct CoordinatesParseError(pub String);

impl core::str::FromStr for Coordinates {
    type Err = CoordinatesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinatesParseError(s.to_owned());
        let mut parts = s.split(':').map(str::trim).map(str::parse::<u32>);
        let galaxy = parts.next().and_then(Result::ok).ok_or_else(malformed)?;
        let system = parts.next().and_then(Result::ok).ok_or_else(malformed)?;
        let slot = parts.next().and_then(Result::ok).ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(Self::new(galaxy, system, slot))
    }
}

/// Building-slot occupancy of a planet. `used` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Fields {
    /// Slots taken by building levels.
    pub used: u32,
    /// Total slots available.
    pub max: u32,
}

impl Fields {
    /// Free slots left.
    pub const fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }

    /// Every slot is taken.
    pub const fn is_full(&self) -> bool {
        self.used >= self.max
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// Building levels on a planet. Missing entries are level 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Buildings {
    /// Level per building kind. Only non-zero levels are stored.
    pub levels: BTreeMap<BuildingKind, u32>,
}

impl Buildings {
    /// No buildings at all.
    pub const fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Current level of `kind`, 0 if never built.
    pub fn level(&self, kind: BuildingKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(0)
    }

    /// Set the level of `kind`. Level 0 removes the entry.
    pub fn set_level(&mut self, kind: BuildingKind, level: u32) {
        if level == 0 {
            self.levels.remove(&kind);
        } else {
            self.levels.insert(kind, level);
        }
    }

    /// Builder-style variant of [`Buildings::set_level`].
    #[must_use]
    pub fn with(mut self, kind: BuildingKind, level: u32) -> Self {
        self.set_level(kind, level);
        self
    }

    /// Sum of all levels, i.e. the fields these buildings occupy.
    pub fn total_levels(&self) -> u64 {
        self.levels
            .values()
            .fold(0u64, |acc, &lvl| acc.saturating_add(u64::from(lvl)))
    }
}

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

/// A human-owned planet with a full economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Planet {
    /// Unique identifier.
    pub id: PlanetId,
    /// Display name.
    pub name: String,
    /// Position in the universe.
    pub coordinates: Coordinates,
    /// Building-slot occupancy.
    pub fields: Fields,
    /// Current stock.
    pub resources: Resources,
    /// Net production per hour, recomputed on every tick.
    pub rates: ResourceRates,
    /// Building levels.
    pub buildings: Buildings,
    /// Defense installation counts.
    pub defense: BTreeMap<DefenseKind, u64>,
    /// Simulation time up to which resources have been accrued.
    pub last_tick: DateTime<Utc>,
    /// Sub-unit production carried between driver steps.
    #[serde(default)]
    pub carry: ProductionCarry,
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Behavioural profile of an autonomous agent.
///
/// Each trait is a [`Decimal`] in `[0, 1]`. Fields are private; every
/// constructor, setter, and deserialization clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Personality {
    #[ts(as = "String")]
    aggression: Decimal,
    #[ts(as = "String")]
    expansion: Decimal,
    #[ts(as = "String")]
    defense: Decimal,
    #[ts(as = "String")]
    patience: Decimal,
    #[ts(as = "String")]
    greed: Decimal,
}

/// Wire shape of [`Personality`] before clamping.
#[derive(Deserialize)]
struct RawPersonality {
    aggression: Decimal,
    expansion: Decimal,
    defense: Decimal,
    patience: Decimal,
    greed: Decimal,
}

impl<'de> Deserialize<'de> for Personality {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPersonality::deserialize(deserializer)?;
        Ok(Self::new(
            raw.aggression,
            raw.expansion,
            raw.defense,
            raw.patience,
            raw.greed,
        ))
    }
}

fn unit_clamp(v: Decimal) -> Decimal {
    v.clamp(Decimal::ZERO, Decimal::ONE)
}

impl Personality {
    /// Build a personality, clamping every trait into `[0, 1]`.
    pub fn new(
        aggression: Decimal,
        expansion: Decimal,
        defense: Decimal,
        patience: Decimal,
        greed: Decimal,
    ) -> Self {
        Self {
            aggression: unit_clamp(aggression),
            expansion: unit_clamp(expansion),
            defense: unit_clamp(defense),
            patience: unit_clamp(patience),
            greed: unit_clamp(greed),
        }
    }

    /// All traits at 0.5.
    pub fn neutral() -> Self {
        let half = Decimal::new(5, 1);
        Self::new(half, half, half, half, half)
    }

    /// Appetite for attacking other players.
    pub const fn aggression(&self) -> Decimal {
        self.aggression
    }

    /// Appetite for colonizing new planets.
    pub const fn expansion(&self) -> Decimal {
        self.expansion
    }

    /// Preference for fortifying over building fleets.
    pub const fn defense(&self) -> Decimal {
        self.defense
    }

    /// Sets decision cadence: the interval is `5s + (1 - patience) * 15s`.
    pub const fn patience(&self) -> Decimal {
        self.patience
    }

    /// Drive to hoard and grow the economy.
    pub const fn greed(&self) -> Decimal {
        self.greed
    }

    /// Set aggression, clamped.
    pub fn set_aggression(&mut self, value: Decimal) {
        self.aggression = unit_clamp(value);
    }

    /// Set expansion, clamped.
    pub fn set_expansion(&mut self, value: Decimal) {
        self.expansion = unit_clamp(value);
    }

    /// Set defense, clamped.
    pub fn set_defense(&mut self, value: Decimal) {
        self.defense = unit_clamp(value);
    }

    /// Set patience, clamped.
    pub fn set_patience(&mut self, value: Decimal) {
        self.patience = unit_clamp(value);
    }

    /// Set greed, clamped.
    pub fn set_greed(&mut self, value: Decimal) {
        self.greed = unit_clamp(value);
    }

    /// The five traits in declaration order.
    pub const fn traits(&self) -> [Decimal; 5] {
        [
            self.aggression,
            self.expansion,
            self.defense,
            self.patience,
            self.greed,
        ]
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// A simplified planet owned by an autonomous agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentPlanet {
    /// Unique identifier.
    pub id: PlanetId,
    /// Display name.
    pub name: String,
    /// Position in the universe.
    pub coordinates: Coordinates,
    /// Building levels.
    pub buildings: Buildings,
    /// Ship counts.
    pub ships: BTreeMap<ShipKind, u64>,
    /// Defense installation counts.
    pub defense: BTreeMap<DefenseKind, u64>,
    /// Current stock.
    pub resources: Resources,
    /// How dangerous this planet looks to raiders.
    pub threat_level: u32,
    /// Sub-unit production carried between driver steps.
    #[serde(default)]
    pub carry: ProductionCarry,
}

impl AgentPlanet {
    /// Number of ships of `kind` stationed here.
    pub fn ship_count(&self, kind: ShipKind) -> u64 {
        self.ships.get(&kind).copied().unwrap_or(0)
    }

    /// Total ships of every kind.
    pub fn total_ships(&self) -> u64 {
        self.ships
            .values()
            .fold(0u64, |acc, &n| acc.saturating_add(n))
    }
}

/// An autonomous opponent.
///
/// Fleet and economy power are not stored; derive them on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentPlayer {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name, unique among live agents.
    pub name: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Broad play style.
    pub strategy: Strategy,
    /// Behavioural profile.
    pub personality: Personality,
    /// Owned planets, home world first.
    pub planets: Vec<AgentPlanet>,
    /// UI color as a `#rrggbb` string.
    pub color: String,
    /// When the agent last made a decision.
    pub last_action: DateTime<Utc>,
}

impl AgentPlayer {
    /// Metal + crystal + deuterium across every planet.
    pub fn total_stock(&self) -> u64 {
        self.planets
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.resources.total_materials()))
    }
}

/// Derived strength of an agent. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PowerRating {
    /// Sum of ship attack values.
    pub fleet: u64,
    /// Weighted sum of mine levels.
    pub economy: u64,
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn resources_covers_and_sub() {
        let stock = Resources::new(100, 50, 10, 0);
        let cost = Resources::new(60, 15, 0, 0);
        assert!(stock.covers(&cost));
        assert_eq!(stock.checked_sub(&cost), Some(Resources::new(40, 35, 10, 0)));

        let too_much = Resources::new(101, 0, 0, 0);
        assert!(!stock.covers(&too_much));
        assert_eq!(stock.checked_sub(&too_much), None);
        assert_eq!(stock.shortfall(&too_much), Resources::new(1, 0, 0, 0));
    }

    #[test]
    fn total_materials_ignores_energy() {
        let stock = Resources::new(1, 2, 3, 1000);
        assert_eq!(stock.total_materials(), 6);
    }

    #[test]
    fn coordinates_display_and_parse() {
        let c = Coordinates::new(1, 250, 7);
        assert_eq!(c.to_string(), "1:250:7");
        assert_eq!(Coordinates::from_str("1:250:7").ok(), Some(c));
        assert!(Coordinates::from_str("1:250").is_err());
        assert!(Coordinates::from_str("1:2:3:4").is_err());
        assert!(Coordinates::from_str("a:b:c").is_err());
    }

    #[test]
    fn buildings_missing_is_zero() {
        let mut b = Buildings::new().with(BuildingKind::MetalMine, 3);
        assert_eq!(b.level(BuildingKind::MetalMine), 3);
        assert_eq!(b.level(BuildingKind::Terraformer), 0);
        b.set_level(BuildingKind::MetalMine, 0);
        assert!(b.levels.is_empty());
    }

    #[test]
    fn personality_is_clamped() {
        let p = Personality::new(dec!(1.4), dec!(-0.2), dec!(0.5), dec!(1), dec!(0));
        assert_eq!(p.aggression(), Decimal::ONE);
        assert_eq!(p.expansion(), Decimal::ZERO);
        assert_eq!(p.defense(), dec!(0.5));

        let mut q = Personality::neutral();
        q.set_greed(dec!(3));
        assert_eq!(q.greed(), Decimal::ONE);
        q.set_patience(dec!(-2));
        assert_eq!(q.patience(), Decimal::ZERO);
    }

    #[test]
    fn personality_clamps_on_deserialize() {
        let json = r#"{"aggression":"0.4","expansion":"-1","defense":"0.5","patience":"3","greed":"1"}"#;
        let p = serde_json::from_str::<Personality>(json).ok();
        assert_eq!(p.map(|p| p.patience()), Some(Decimal::ONE));
        assert_eq!(p.map(|p| p.expansion()), Some(Decimal::ZERO));
        assert_eq!(p.map(|p| p.aggression()), Some(dec!(0.4)));

        let again = p
            .and_then(|p| serde_json::to_string(&p).ok())
            .and_then(|s| serde_json::from_str::<Personality>(&s).ok());
        assert_eq!(again, p);
    }

    #[test]
    fn personality_rejects_missing_trait() {
        let json = r#"{"aggression":"0.4","expansion":"0.1","defense":"0.5","patience":"0.3"}"#;
        assert!(serde_json::from_str::<Personality>(json).is_err());
    }

    #[test]
    fn fields_remaining() {
        let f = Fields { used: 160, max: 163 };
        assert_eq!(f.remaining(), 3);
        assert!(!f.is_full());
        assert!(Fields { used: 163, max: 163 }.is_full());
    }
}
