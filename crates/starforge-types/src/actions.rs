//! Intended actions proposed by autonomous agents.
//!
//! The decision engine only proposes; executing an action (and paying for
//! it) is the caller's business.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingKind, ShipKind};
use crate::ids::{AgentId, PlanetId};
use crate::structs::Coordinates;

/// One action an agent intends to take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentAction {
    /// The proposing agent.
    pub agent_id: AgentId,
    /// The planet the action originates from.
    pub planet_id: PlanetId,
    /// What to do.
    pub kind: AgentActionKind,
    /// Lower runs first.
    pub priority: u8,
}

/// The kind of an [`AgentAction`], with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum AgentActionKind {
    /// Upgrade a building by one level.
    Build {
        /// Building to upgrade.
        building: BuildingKind,
    },
    /// Queue ships at the shipyard.
    BuildShip {
        /// Hull type.
        ship: ShipKind,
        /// How many.
        count: u64,
    },
    /// Raid another position.
    Attack {
        /// Target position.
        target: Coordinates,
    },
    /// Settle a new planet.
    Colonize {
        /// Target position.
        target: Coordinates,
    },
}

impl AgentActionKind {
    /// Short label for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Build { .. } => "build",
            Self::BuildShip { .. } => "build_ship",
            Self::Attack { .. } => "attack",
            Self::Colonize { .. } => "colonize",
        }
    }
}
