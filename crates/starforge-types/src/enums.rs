//! Enumeration types for the Starforge simulation.
//!
//! Every buildable thing in the game is a closed enum. The camelCase key of
//! each variant (`metalMine`, `cargoShip`, ...) is its identity at the
//! string boundary: serde uses it, catalogs use it, and [`FromStr`] rejects
//! anything else with [`UnknownKind`] instead of guessing.
//!
//! [`FromStr`]: core::str::FromStr

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A kind name that does not belong to the enumerated set.
///
/// Returned when parsing a building, ship, research, defense, or resource
/// key from a string. Callers are expected to validate against the
/// enumerated set; this error is the loud failure when they do not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {category} kind: {name:?}")]
pub struct UnknownKind {
    /// Which enumeration was being parsed (e.g. `"building"`).
    pub category: &'static str,
    /// The offending input.
    pub name: String,
}

/// Generates a closed kind enum with a stable camelCase key per variant.
macro_rules! define_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $category:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(rename_all = "camelCase")]
        #[ts(export, export_to = "bindings/")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Stable camelCase key used by catalogs and serialized forms.
            pub const fn key(self) -> &'static str {
                match self {
                    $( Self::$variant => $key, )+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.key())
            }
        }

        impl core::str::FromStr for $name {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok(Self::$variant), )+
                    other => Err(UnknownKind {
                        category: $category,
                        name: other.to_owned(),
                    }),
                }
            }
        }
    };
}

define_kind! {
    /// One of the four resource channels held by a planet.
    ResourceKind, "resource" {
        /// Structural metal, produced by the metal mine.
        Metal => "metal",
        /// Crystal, produced by the crystal mine.
        Crystal => "crystal",
        /// Deuterium, produced by the synthesizer and burned by fusion.
        Deuterium => "deuterium",
        /// Energy, a live balance rather than an accumulated stock.
        Energy => "energy",
    }
}

define_kind! {
    /// A planetary building. Each level occupies one field.
    BuildingKind, "building" {
        /// Produces metal.
        MetalMine => "metalMine",
        /// Produces crystal.
        CrystalMine => "crystalMine",
        /// Produces deuterium.
        DeuteriumSynthesizer => "deuteriumSynthesizer",
        /// Produces energy.
        SolarPlant => "solarPlant",
        /// Produces energy while burning deuterium.
        FusionReactor => "fusionReactor",
        /// Speeds up construction.
        RobotFactory => "robotFactory",
        /// Builds ships and defenses.
        Shipyard => "shipyard",
        /// Hosts research.
        ResearchLab => "researchLab",
        /// Alliance coordination building.
        AllianceHub => "allianceHub",
        /// Stores missiles.
        MissileSilo => "missileSilo",
        /// Advanced construction accelerator.
        NaniteFactory => "naniteFactory",
        /// Adds fields to the planet.
        Terraformer => "terraformer",
        /// Repairs docked fleets.
        SpaceDock => "spaceDock",
    }
}

define_kind! {
    /// A research technology, levelled per player.
    ResearchKind, "research" {
        /// Energy technology.
        EnergyTech => "energyTech",
        /// Laser technology.
        LaserTech => "laserTech",
        /// Ion technology.
        IonTech => "ionTech",
        /// Hyperspace technology.
        HyperspaceTech => "hyperspaceTech",
        /// Plasma technology.
        PlasmaTech => "plasmaTech",
        /// Combustion drive.
        CombustionDrive => "combustionDrive",
        /// Impulse drive.
        ImpulseDrive => "impulseDrive",
        /// Hyperspace drive.
        HyperspaceDrive => "hyperspaceDrive",
        /// Espionage technology.
        EspionageTech => "espionageTech",
        /// Computer technology.
        ComputerTech => "computerTech",
        /// Astrophysics.
        Astrophysics => "astrophysics",
        /// Intergalactic research network.
        NetworkTech => "networkTech",
        /// Graviton technology.
        GravitonTech => "gravitonTech",
    }
}

define_kind! {
    /// A ship hull type. Ships are built in counts, not levels.
    ShipKind, "ship" {
        /// Light fighter.
        LightFighter => "lightFighter",
        /// Heavy fighter.
        HeavyFighter => "heavyFighter",
        /// Cruiser.
        Cruiser => "cruiser",
        /// Battleship.
        Battleship => "battleship",
        /// Interceptor.
        Interceptor => "interceptor",
        /// Bomber.
        Bomber => "bomber",
        /// Destroyer.
        Destroyer => "destroyer",
        /// Deathstar.
        Deathstar => "deathstar",
        /// Cargo ship.
        CargoShip => "cargoShip",
        /// Colony ship, required to attempt colonization.
        ColonyShip => "colonyShip",
        /// Recycler.
        Recycler => "recycler",
        /// Espionage probe.
        EspionageProbe => "espionageProbe",
        /// Solar satellite.
        SolarSatellite => "solarSatellite",
    }
}

define_kind! {
    /// A planetary defense installation, built in counts.
    DefenseKind, "defense" {
        /// Rocket launcher.
        RocketLauncher => "rocketLauncher",
        /// Light laser.
        LightLaser => "lightLaser",
        /// Heavy laser.
        HeavyLaser => "heavyLaser",
        /// Ion turret.
        IonTurret => "ionTurret",
        /// Gauss cannon.
        GaussCannon => "gaussCannon",
        /// Plasma turret.
        PlasmaTurret => "plasmaTurret",
        /// Shield dome.
        ShieldDome => "shieldDome",
        /// Missile defense.
        MissileDefense => "missileDefense",
    }
}

// ---------------------------------------------------------------------------
// Agent classification
// ---------------------------------------------------------------------------

/// Difficulty tier of an autonomous agent (ordinal 1 through 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Tier 1.
    Easy,
    /// Tier 2.
    Normal,
    /// Tier 3.
    Hard,
    /// Tier 4.
    Insane,
}

impl Difficulty {
    /// Every tier, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Insane];

    /// The ordinal tier (1--4) used by scaling formulas.
    pub const fn tier(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Hard => 3,
            Self::Insane => 4,
        }
    }

    /// Look up a tier by ordinal. Returns `None` outside 1--4.
    pub const fn from_tier(tier: u32) -> Option<Self> {
        match tier {
            1 => Some(Self::Easy),
            2 => Some(Self::Normal),
            3 => Some(Self::Hard),
            4 => Some(Self::Insane),
            _ => None,
        }
    }

    /// The next tier up, saturating at [`Difficulty::Insane`].
    pub const fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Normal,
            Self::Normal => Self::Hard,
            Self::Hard | Self::Insane => Self::Insane,
        }
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Insane => "insane",
        };
        f.write_str(label)
    }
}

/// Broad play style an agent is generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Strategy {
    /// Favors mines and cargo capacity.
    Economic,
    /// Favors fleets and raids.
    Military,
    /// No strong preference.
    Balanced,
}

impl Strategy {
    /// Every strategy.
    pub const ALL: [Self; 3] = [Self::Economic, Self::Military, Self::Balanced];
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Economic => "economic",
            Self::Military => "military",
            Self::Balanced => "balanced",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn building_keys_roundtrip() {
        for &kind in BuildingKind::ALL {
            assert_eq!(BuildingKind::from_str(kind.key()).ok(), Some(kind));
        }
        assert_eq!(BuildingKind::ALL.len(), 13);
    }

    #[test]
    fn unknown_key_fails_loudly() {
        let err = BuildingKind::from_str("goldMine");
        assert_eq!(
            err,
            Err(UnknownKind {
                category: "building",
                name: String::from("goldMine"),
            })
        );
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let json = serde_json::to_string(&ShipKind::CargoShip).ok();
        assert_eq!(json.as_deref(), Some("\"cargoShip\""));
        let parsed: Result<BuildingKind, _> = serde_json::from_str("\"deuteriumSynthesizer\"");
        assert_eq!(parsed.ok(), Some(BuildingKind::DeuteriumSynthesizer));
    }

    #[test]
    fn difficulty_tiers() {
        assert_eq!(Difficulty::Easy.tier(), 1);
        assert_eq!(Difficulty::Insane.tier(), 4);
        assert_eq!(Difficulty::from_tier(3), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_tier(0), None);
        assert_eq!(Difficulty::Hard.harder(), Difficulty::Insane);
        assert_eq!(Difficulty::Insane.harder(), Difficulty::Insane);
    }

    #[test]
    fn difficulty_deserializes_lowercase() {
        let parsed: Result<Difficulty, _> = serde_json::from_str("\"normal\"");
        assert_eq!(parsed.ok(), Some(Difficulty::Normal));
    }
}
