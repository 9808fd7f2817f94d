//! Cost model and resource engine for the Starforge simulation.
//!
//! This crate is stateless: every function takes the data it needs and
//! returns a new value or mutates exactly the record it was handed.
//!
//! # Modules
//!
//! - [`tables`] -- Static base costs and attack values
//! - [`cost`] -- Exponential and linear cost formulas
//! - [`production`] -- Hourly production rates and field capacity
//! - [`resource`] -- Advancing planet stocks over elapsed time
//! - [`construction`] -- Field-checked building upgrades and purchases
//! - [`planet`] -- Starting home planet
//! - [`config`] -- Field geometry tunables
//! - [`error`] -- Error types

pub mod config;
pub mod construction;
pub mod cost;
pub mod error;
pub mod planet;
pub mod production;
pub mod resource;
pub mod tables;

pub use config::EconomyConfig;
pub use construction::{PurchaseOutcome, purchase_upgrade, upgrade_building};
pub use cost::{Buildable, building_cost, cost, defense_cost, research_cost, ship_cost};
pub use error::EconomyError;
pub use planet::create_home_planet;
pub use production::{max_fields, production};
pub use resource::{Accrual, accrue, accrue_carried, advance_to, tick};
