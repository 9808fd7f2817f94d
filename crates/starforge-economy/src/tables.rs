//! Static base costs and attack values.
//!
//! Every table is an exhaustive `const fn` match over a closed kind enum, so
//! a missing entry is a compile error rather than a silent zero cost.
//!
//! All values are whole numbers -- no floating point.

use starforge_types::{BuildingKind, DefenseKind, ResearchKind, Resources, ShipKind};

const fn res(metal: u64, crystal: u64, deuterium: u64) -> Resources {
    Resources::new(metal, crystal, deuterium, 0)
}

/// Level-0 cost of a building. Scaled by `1.5^level` for later levels.
pub const fn building_base_cost(kind: BuildingKind) -> Resources {
    match kind {
        BuildingKind::MetalMine => res(60, 15, 0),
        BuildingKind::CrystalMine => res(48, 24, 0),
        BuildingKind::DeuteriumSynthesizer => res(225, 75, 0),
        BuildingKind::SolarPlant => res(75, 30, 0),
        BuildingKind::FusionReactor => res(900, 360, 180),
        BuildingKind::RobotFactory => res(400, 120, 200),
        BuildingKind::Shipyard => res(400, 200, 100),
        BuildingKind::ResearchLab => res(200, 400, 200),
        BuildingKind::AllianceHub => res(10_000, 10_000, 10_000),
        BuildingKind::MissileSilo => res(2_000, 2_000, 1_000),
        BuildingKind::NaniteFactory => res(100_000, 50_000, 10_000),
        BuildingKind::Terraformer => res(50_000, 100_000, 50_000),
        BuildingKind::SpaceDock => res(500_000, 250_000, 100_000),
    }
}

/// Level-0 cost of a research technology.
pub const fn research_base_cost(kind: ResearchKind) -> Resources {
    match kind {
        ResearchKind::EnergyTech => res(0, 800, 400),
        ResearchKind::LaserTech => res(200, 600, 0),
        ResearchKind::IonTech | ResearchKind::ImpulseDrive => res(2_000, 4_000, 600),
        ResearchKind::HyperspaceTech | ResearchKind::HyperspaceDrive => {
            res(10_000, 20_000, 6_000)
        }
        ResearchKind::PlasmaTech => res(40_000, 80_000, 40_000),
        ResearchKind::CombustionDrive => res(400, 0, 600),
        ResearchKind::EspionageTech => res(1_000, 500, 500),
        ResearchKind::ComputerTech => res(0, 400, 600),
        ResearchKind::Astrophysics => res(8_000, 4_000, 4_000),
        ResearchKind::NetworkTech => res(100_000, 100_000, 10_000),
        ResearchKind::GravitonTech => res(0, 0, 0),
    }
}

/// Cost of a single ship.
pub const fn ship_unit_cost(kind: ShipKind) -> Resources {
    match kind {
        ShipKind::LightFighter => res(3_000, 1_000, 0),
        ShipKind::HeavyFighter => res(6_000, 4_000, 0),
        ShipKind::Cruiser => res(20_000, 7_000, 2_000),
        ShipKind::Battleship => res(45_000, 15_000, 5_000),
        ShipKind::Interceptor => res(60_000, 50_000, 15_000),
        ShipKind::Bomber => res(50_000, 25_000, 15_000),
        ShipKind::Destroyer => res(100_000, 60_000, 40_000),
        ShipKind::Deathstar => res(5_000_000, 4_000_000, 1_000_000),
        ShipKind::CargoShip => res(2_000, 2_000, 0),
        ShipKind::ColonyShip => res(10_000, 20_000, 10_000),
        ShipKind::Recycler => res(10_000, 6_000, 2_000),
        ShipKind::EspionageProbe => res(0, 1_000, 0),
        ShipKind::SolarSatellite => res(2_000, 500, 0),
    }
}

/// Cost of a single defense installation.
pub const fn defense_unit_cost(kind: DefenseKind) -> Resources {
    match kind {
        DefenseKind::RocketLauncher => res(2_000, 0, 0),
        DefenseKind::LightLaser => res(1_500, 500, 0),
        DefenseKind::HeavyLaser => res(6_000, 2_000, 0),
        DefenseKind::IonTurret => res(2_000, 6_000, 0),
        DefenseKind::GaussCannon => res(35_000, 15_000, 5_000),
        DefenseKind::PlasmaTurret => res(100_000, 50_000, 10_000),
        DefenseKind::ShieldDome => res(10_000, 10_000, 0),
        DefenseKind::MissileDefense => res(8_000, 0, 2_000),
    }
}

/// Attack value of a single ship, used for fleet power.
#[allow(clippy::match_same_arms)] // One row per hull keeps the table readable.
pub const fn ship_attack(kind: ShipKind) -> u64 {
    match kind {
        ShipKind::LightFighter => 100,
        ShipKind::HeavyFighter => 250,
        ShipKind::Cruiser => 400,
        ShipKind::Battleship => 1_000,
        ShipKind::Interceptor => 700,
        ShipKind::Bomber => 700,
        ShipKind::Destroyer => 2_000,
        ShipKind::Deathstar => 200_000,
        ShipKind::CargoShip => 5,
        ShipKind::ColonyShip => 50,
        ShipKind::Recycler => 1,
        ShipKind::EspionageProbe => 0,
        ShipKind::SolarSatellite => 0,
    }
}
