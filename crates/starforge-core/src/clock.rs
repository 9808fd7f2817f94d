//! Simulated time.
//!
//! The simulation never reads the wall clock inside a tick. [`SimClock`]
//! holds the tick counter and a simulated `now` that moves forward by a
//! fixed step per tick, so a run is reproducible from its start time, seed
//! and config. [`Cadence`] gates work that runs less often than every tick.

use chrono::{DateTime, TimeDelta, Utc};

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Simulated time would leave the representable range.
    #[error("simulated time overflow")]
    TimeOverflow,

    /// Invalid clock configuration (e.g. a zero tick step).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tick counter plus simulated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimClock {
    /// Ticks completed. Incremented at the start of each tick.
    tick: u64,
    /// Simulated time at the current tick.
    now: DateTime<Utc>,
    /// Simulated time added per tick.
    step: TimeDelta,
}

impl SimClock {
    /// A clock at tick 0 and time `start`, stepping `step_ms` per tick.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `step_ms` is 0 or too large.
    pub fn new(start: DateTime<Utc>, step_ms: u64) -> Result<Self, ClockError> {
        let step = millis(step_ms).ok_or_else(|| ClockError::InvalidConfig {
            reason: format!("tick step of {step_ms} ms is out of range"),
        })?;
        if step <= TimeDelta::zero() {
            return Err(ClockError::InvalidConfig {
                reason: "tick step must be at least 1 ms".to_owned(),
            });
        }
        Ok(Self {
            tick: 0,
            now: start,
            step,
        })
    }

    /// Advance by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] or [`ClockError::TimeOverflow`]
    /// without changing the clock.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        let tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        let now = self
            .now
            .checked_add_signed(self.step)
            .ok_or(ClockError::TimeOverflow)?;
        self.tick = tick;
        self.now = now;
        Ok(tick)
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Current simulated time.
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Simulated time per tick.
    pub const fn step(&self) -> TimeDelta {
        self.step
    }
}

/// Fires at most once per interval of simulated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    interval: TimeDelta,
    last: DateTime<Utc>,
}

impl Cadence {
    /// A cadence whose first firing is one interval after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `interval_ms` is out of
    /// range.
    pub fn new(interval_ms: u64, start: DateTime<Utc>) -> Result<Self, ClockError> {
        let interval = millis(interval_ms).ok_or_else(|| ClockError::InvalidConfig {
            reason: format!("cadence of {interval_ms} ms is out of range"),
        })?;
        Ok(Self { interval, last: start })
    }

    /// Whether the interval has elapsed by `now`. Records `now` as the last
    /// firing when it has.
    pub fn fire(&mut self, now: DateTime<Utc>) -> bool {
        if now.signed_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Whole seconds from `mark` to `now`; moves `mark` forward by exactly
/// that many seconds so the fractional remainder carries over.
///
/// A `now` before `mark` yields 0 and leaves `mark` alone.
///
/// # Errors
///
/// Returns [`ClockError::TimeOverflow`] if `mark` cannot be advanced.
pub fn take_whole_seconds(mark: &mut DateTime<Utc>, now: DateTime<Utc>) -> Result<u64, ClockError> {
    let seconds = now.signed_duration_since(*mark).num_seconds();
    if seconds <= 0 {
        return Ok(0);
    }
    let next = TimeDelta::try_seconds(seconds)
        .and_then(|d| mark.checked_add_signed(d))
        .ok_or(ClockError::TimeOverflow)?;
    *mark = next;
    u64::try_from(seconds).map_err(|_| ClockError::TimeOverflow)
}

fn millis(ms: u64) -> Option<TimeDelta> {
    i64::try_from(ms).ok().and_then(TimeDelta::try_milliseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn clock_steps_time_with_tick() {
        let clock = SimClock::new(epoch(), 1_000);
        assert!(clock.is_ok());
        let Ok(mut clock) = clock else { return };
        assert_eq!(clock.advance().ok(), Some(1));
        assert_eq!(clock.advance().ok(), Some(2));
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.now(), epoch() + TimeDelta::seconds(2));
    }

    #[test]
    fn zero_step_is_rejected() {
        assert!(matches!(
            SimClock::new(epoch(), 0),
            Err(ClockError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn cadence_fires_once_per_interval() {
        let cadence = Cadence::new(5_000, epoch());
        assert!(cadence.is_ok());
        let Ok(mut cadence) = cadence else { return };
        assert!(!cadence.fire(epoch() + TimeDelta::seconds(4)));
        assert!(cadence.fire(epoch() + TimeDelta::seconds(5)));
        assert!(!cadence.fire(epoch() + TimeDelta::seconds(9)));
        assert!(cadence.fire(epoch() + TimeDelta::seconds(10)));
    }

    #[test]
    fn whole_seconds_carry_fraction() {
        let mut mark = epoch();
        let now = epoch() + TimeDelta::milliseconds(2_500);
        assert_eq!(take_whole_seconds(&mut mark, now).ok(), Some(2));
        assert_eq!(mark, epoch() + TimeDelta::seconds(2));

        let later = epoch() + TimeDelta::milliseconds(3_000);
        assert_eq!(take_whole_seconds(&mut mark, later).ok(), Some(1));
        assert_eq!(mark, later);
    }

    #[test]
    fn whole_seconds_ignore_regression() {
        let mut mark = epoch() + TimeDelta::seconds(10);
        assert_eq!(take_whole_seconds(&mut mark, epoch()).ok(), Some(0));
        assert_eq!(mark, epoch() + TimeDelta::seconds(10));
    }
}
