//! Configuration loading and typed config structures for the Starforge
//! simulation.
//!
//! The canonical configuration lives in `starforge-config.yaml` at the
//! project root. Every field has a default, so a partial (or empty) file is
//! valid. Environment variables can override a few values at load time.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use starforge_agents::AgentConfig;
use starforge_economy::EconomyConfig;
use starforge_types::{Coordinates, Difficulty};

/// Game speeds the production formulas are tuned for.
pub const ALLOWED_SPEEDS: [u32; 4] = [1, 2, 5, 10];

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `starforge-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Seed, speed, and tick pacing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Planet geometry.
    #[serde(default)]
    pub economy: EconomySection,

    /// Agent population and cadence.
    #[serde(default)]
    pub agents: AgentsSection,

    /// The human player's starting position.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Run bounds and evaluation cadences.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// Environment variables override YAML values:
    /// - `STARFORGE_SEED` overrides `world.seed`
    /// - `STARFORGE_SPEED` overrides `world.speed`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string, applying
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a set variable does not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("STARFORGE_SEED") {
            self.world.seed = parse_override("STARFORGE_SEED", &val)?;
        }
        if let Some(val) = lookup("STARFORGE_SPEED") {
            self.world.speed = parse_override("STARFORGE_SPEED", &val)?;
        }
        Ok(())
    }

    /// Reject values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ALLOWED_SPEEDS.contains(&self.world.speed) {
            return Err(invalid(format!(
                "world.speed must be one of {ALLOWED_SPEEDS:?}, got {}",
                self.world.speed
            )));
        }
        if self.world.tick_interval_ms == 0 {
            return Err(invalid("world.tick_interval_ms must be at least 1".to_owned()));
        }
        if self.simulation.achievement_interval_ms == 0 || self.simulation.agent_interval_ms == 0 {
            return Err(invalid("simulation cadences must be at least 1 ms".to_owned()));
        }
        if self.agents.personality_jitter < Decimal::ZERO || self.agents.personality_jitter > Decimal::ONE {
            return Err(invalid(format!(
                "agents.personality_jitter must be in [0, 1], got {}",
                self.agents.personality_jitter
            )));
        }
        if self.agents.stock_ceiling_per_planet == 0 {
            return Err(invalid("agents.stock_ceiling_per_planet must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Game speed as a production multiplier.
    pub fn speed(&self) -> Decimal {
        Decimal::from(self.world.speed)
    }

    /// Field geometry for the economy crate.
    pub const fn economy_config(&self) -> EconomyConfig {
        EconomyConfig {
            base_fields: self.economy.base_fields,
            fields_per_terraformer: self.economy.fields_per_terraformer,
        }
    }

    /// Cadence and generation tunables for the agents crate.
    pub const fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            base_action_interval_ms: self.agents.base_action_interval_ms,
            patience_span_ms: self.agents.patience_span_ms,
            stock_ceiling_per_planet: self.agents.stock_ceiling_per_planet,
            personality_jitter: self.agents.personality_jitter,
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable universe name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Game speed; one of 1, 2, 5, 10.
    #[serde(default = "default_speed")]
    pub speed: u32,

    /// Simulated (and real) milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            speed: default_speed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Planet geometry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomySection {
    /// Fields on every planet before terraforming.
    #[serde(default = "default_base_fields")]
    pub base_fields: u32,

    /// Fields added per terraformer level.
    #[serde(default = "default_fields_per_terraformer")]
    pub fields_per_terraformer: u32,
}

impl Default for EconomySection {
    fn default() -> Self {
        Self {
            base_fields: default_base_fields(),
            fields_per_terraformer: default_fields_per_terraformer(),
        }
    }
}

/// Agent population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentsSection {
    /// Agents generated at startup.
    #[serde(default = "default_initial_agents")]
    pub initial_agents: usize,

    /// Base tier for generation. Unset draws from easy, normal and hard.
    #[serde(default)]
    pub base_difficulty: Option<Difficulty>,

    /// Shortest interval between an agent's decisions, in milliseconds.
    #[serde(default = "default_base_action_interval_ms")]
    pub base_action_interval_ms: u64,

    /// Extra interval at zero patience, in milliseconds.
    #[serde(default = "default_patience_span_ms")]
    pub patience_span_ms: u64,

    /// Stock per planet at which resource pressure reaches zero.
    #[serde(default = "default_stock_ceiling_per_planet")]
    pub stock_ceiling_per_planet: u64,

    /// Maximum jitter applied to each personality trait.
    #[serde(default = "default_personality_jitter")]
    pub personality_jitter: Decimal,
}

impl Default for AgentsSection {
    fn default() -> Self {
        Self {
            initial_agents: default_initial_agents(),
            base_difficulty: None,
            base_action_interval_ms: default_base_action_interval_ms(),
            patience_span_ms: default_patience_span_ms(),
            stock_ceiling_per_planet: default_stock_ceiling_per_planet(),
            personality_jitter: default_personality_jitter(),
        }
    }
}

/// The human player's starting position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// Player display name.
    #[serde(default = "default_player_name")]
    pub name: String,

    /// Name of the home planet.
    #[serde(default = "default_home_planet_name")]
    pub home_planet: String,

    /// Home planet coordinates.
    #[serde(default = "default_home_coordinates")]
    pub home_coordinates: Coordinates,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
            home_planet: default_home_planet_name(),
            home_coordinates: default_home_coordinates(),
        }
    }
}

/// Run bounds and evaluation cadences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Simulated milliseconds between achievement evaluations.
    #[serde(default = "default_achievement_interval_ms")]
    pub achievement_interval_ms: u64,

    /// Simulated milliseconds between agent decision passes.
    #[serde(default = "default_agent_interval_ms")]
    pub agent_interval_ms: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            achievement_interval_ms: default_achievement_interval_ms(),
            agent_interval_ms: default_agent_interval_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

fn parse_override<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.trim()
        .parse()
        .map_err(|_| invalid(format!("{key} is not a valid number: {val:?}")))
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Starforge".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_speed() -> u32 {
    1
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

const fn default_base_fields() -> u32 {
    starforge_economy::config::BASE_FIELDS
}

const fn default_fields_per_terraformer() -> u32 {
    starforge_economy::config::FIELDS_PER_TERRAFORMER
}

const fn default_initial_agents() -> usize {
    5
}

const fn default_base_action_interval_ms() -> u64 {
    5_000
}

const fn default_patience_span_ms() -> u64 {
    15_000
}

const fn default_stock_ceiling_per_planet() -> u64 {
    100_000
}

const fn default_personality_jitter() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 1)
}

fn default_player_name() -> String {
    "Commander".to_owned()
}

fn default_home_planet_name() -> String {
    "Homeworld".to_owned()
}

const fn default_home_coordinates() -> Coordinates {
    Coordinates::new(1, 1, 1)
}

const fn default_achievement_interval_ms() -> u64 {
    5_000
}

const fn default_agent_interval_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_owned()
}
