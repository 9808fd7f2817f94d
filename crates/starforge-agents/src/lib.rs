//! Autonomous opponents for the Starforge simulation.
//!
//! Agents are generated with a strategy-shaped personality, a difficulty
//! tier, and a set of starting planets. On each tick they may propose
//! actions; nothing here executes those proposals.
//!
//! # Modules
//!
//! - [`config`] -- Cadence and generation tunables ([`AgentConfig`])
//! - [`decision`] -- The per-agent decision policy
//! - [`error`] -- Error types ([`AgentError`])
//! - [`generation`] -- Agent and universe generation
//! - [`names`] -- Name pool and color palette
//! - [`personality`] -- Strategy presets and jitter
//! - [`power`] -- Derived fleet and economy power
//! - [`registry`] -- Live agents with unique names ([`AgentRegistry`])

pub mod config;
pub mod decision;
pub mod error;
pub mod generation;
pub mod names;
pub mod personality;
pub mod power;
pub mod registry;

pub use config::AgentConfig;
pub use decision::{resource_pressure, step};
pub use error::AgentError;
pub use generation::{create_agent, generate_universe, generate_universe_with_difficulty};
pub use power::derive_power;
pub use registry::AgentRegistry;
