//! Achievement tracking for Starforge players.
//!
//! - [`catalog`] -- Definitions and the built-in catalog
//! - [`stats`] -- Cumulative player statistics
//! - [`tracker`] -- Progress percentages and one-time unlocks

pub mod catalog;
pub mod stats;
pub mod tracker;

pub use catalog::{
    AchievementCategory, AchievementDefinition, Requirement, RequirementKind, default_catalog,
};
pub use stats::PlayerStats;
pub use tracker::{AchievementTracker, ProgressEntry, evaluate, observed, progress, total_reward};
