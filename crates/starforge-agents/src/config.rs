//! Configuration constants and defaults for agent behaviour.
//!
//! The [`AgentConfig`] struct bundles every tunable so that callers (tick
//! cycle, tests) can override defaults. The simulation config's `agents`
//! section is mapped onto it at startup.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use starforge_types::Personality;

use crate::error::AgentError;

/// Configuration for agent cadence and generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Shortest interval between decisions, in milliseconds (default: 5000).
    pub base_action_interval_ms: u64,

    /// Extra interval added at zero patience, in milliseconds (default: 15000).
    ///
    /// The full interval is `base + (1 - patience) * span`.
    pub patience_span_ms: u64,

    /// Stock per planet at which resource pressure reaches zero
    /// (default: 100000).
    pub stock_ceiling_per_planet: u64,

    /// Maximum absolute jitter applied to each strategy-preset trait
    /// (default: 0.1).
    pub personality_jitter: Decimal,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_action_interval_ms: 5_000,
            patience_span_ms: 15_000,
            stock_ceiling_per_planet: 100_000,
            personality_jitter: Decimal::new(1, 1),
        }
    }
}

impl AgentConfig {
    /// How long an agent with `personality` idles between decisions.
    ///
    /// `base_action_interval_ms + floor((1 - patience) * patience_span_ms)`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ArithmeticOverflow`] if the interval does not
    /// fit a [`TimeDelta`].
    pub fn action_interval(&self, personality: &Personality) -> Result<TimeDelta, AgentError> {
        let impatience = Decimal::ONE
            .checked_sub(personality.patience())
            .ok_or(AgentError::overflow("impatience"))?;
        let extra = impatience
            .checked_mul(Decimal::from(self.patience_span_ms))
            .ok_or(AgentError::overflow("action interval"))?
            .floor()
            .to_u64()
            .ok_or(AgentError::overflow("action interval"))?;
        let total = self
            .base_action_interval_ms
            .checked_add(extra)
            .ok_or(AgentError::overflow("action interval"))?;
        i64::try_from(total)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .ok_or(AgentError::overflow("action interval"))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn with_patience(p: Decimal) -> Personality {
        let mut personality = Personality::neutral();
        personality.set_patience(p);
        personality
    }

    #[test]
    fn interval_spans_five_to_twenty_seconds() {
        let config = AgentConfig::default();
        let fastest = config.action_interval(&with_patience(Decimal::ONE)).ok();
        let slowest = config.action_interval(&with_patience(Decimal::ZERO)).ok();
        assert_eq!(fastest, Some(TimeDelta::milliseconds(5_000)));
        assert_eq!(slowest, Some(TimeDelta::milliseconds(20_000)));
    }

    #[test]
    fn interval_floors_fractional_milliseconds() {
        let config = AgentConfig::default();
        // (1 - 0.33333) * 15000 = 10000.05
        let interval = config.action_interval(&with_patience(dec!(0.33333))).ok();
        assert_eq!(interval, Some(TimeDelta::milliseconds(15_000)));
    }

    #[test]
    fn out_of_range_patience_is_clamped_before_interval() {
        let config = AgentConfig::default();
        let over = config.action_interval(&with_patience(dec!(3))).ok();
        let under = config.action_interval(&with_patience(dec!(-4))).ok();
        assert_eq!(over, Some(TimeDelta::milliseconds(5_000)));
        assert_eq!(under, Some(TimeDelta::milliseconds(20_000)));
    }
}
