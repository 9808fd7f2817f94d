//! Shared type definitions for the Starforge simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Starforge workspace. Types flow downstream to `TypeScript` via `ts-rs`
//! for a dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for planets, agents, and players
//! - [`enums`] -- Closed kind enums (resources, buildings, ships, research, defense)
//! - [`structs`] -- Resources, planets, personality, agent players
//! - [`actions`] -- Intended actions proposed by autonomous agents

pub mod actions;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{AgentAction, AgentActionKind};
pub use enums::{
    BuildingKind, DefenseKind, Difficulty, ResearchKind, ResourceKind, ShipKind, Strategy,
    UnknownKind,
};
pub use ids::{AgentId, PlanetId, PlayerId};
pub use structs::{
    AgentPlanet, AgentPlayer, Buildings, Coordinates, CoordinatesParseError, Fields, Personality,
    Planet, PowerRating, ProductionCarry, ResourceRates, Resources,
};
