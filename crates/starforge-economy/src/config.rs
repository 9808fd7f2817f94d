//! Tunables for planet geometry.
//!
//! The simulation config's `economy` section is mapped onto
//! [`EconomyConfig`] at startup; tests use [`EconomyConfig::default`].

use starforge_types::{BuildingKind, Buildings};

/// Base number of building fields on every planet.
pub const BASE_FIELDS: u32 = 163;

/// Extra fields granted per terraformer level.
pub const FIELDS_PER_TERRAFORMER: u32 = 5;

/// Configuration for field capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyConfig {
    /// Fields available before any terraforming (default: 163).
    pub base_fields: u32,

    /// Fields added per terraformer level (default: 5).
    pub fields_per_terraformer: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_fields: BASE_FIELDS,
            fields_per_terraformer: FIELDS_PER_TERRAFORMER,
        }
    }
}

impl EconomyConfig {
    /// Field capacity of a planet with the given buildings.
    ///
    /// `base_fields + terraformer_level * fields_per_terraformer`, saturating.
    pub fn max_fields(&self, buildings: &Buildings) -> u32 {
        let bonus = buildings
            .level(BuildingKind::Terraformer)
            .saturating_mul(self.fields_per_terraformer);
        self.base_fields.saturating_add(bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fields() {
        let config = EconomyConfig::default();
        assert_eq!(config.max_fields(&Buildings::new()), 163);
    }

    #[test]
    fn terraformer_adds_fields() {
        let config = EconomyConfig::default();
        let b = Buildings::new().with(BuildingKind::Terraformer, 4);
        assert_eq!(config.max_fields(&b), 183);
    }
}
