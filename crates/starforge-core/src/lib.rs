//! Simulation clock, tick cycle, and orchestration for Starforge.
//!
//! This crate wires the stateless economy, achievement and agent crates
//! into a periodic driver.
//!
//! # Modules
//!
//! - [`clock`] -- Simulated clock and cadence gates.
//! - [`config`] -- Configuration loading from `starforge-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- The async loop that paces ticks.
//! - [`tick`] -- The tick cycle and [`SimulationState`].
//!
//! [`SimulationState`]: tick::SimulationState

pub mod clock;
pub mod config;
pub mod runner;
pub mod tick;
