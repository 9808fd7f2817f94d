//! Error types for the starforge-economy crate.
//!
//! Insufficient resources is deliberately absent: an unaffordable purchase
//! is an ordinary outcome (see [`crate::construction::PurchaseOutcome`]),
//! not a failure.

use chrono::{DateTime, Utc};
use starforge_types::UnknownKind;

/// Errors that can occur during economy computations.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    /// A checked arithmetic operation overflowed.
    #[error("arithmetic overflow in economy computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: &'static str,
    },

    /// An upgrade would occupy more fields than the planet has.
    #[error("field capacity exceeded: {used} of {max} fields already used")]
    FieldCapacityExceeded {
        /// Fields in use before the attempted upgrade.
        used: u32,
        /// Maximum fields on the planet.
        max: u32,
    },

    /// The requested time lies before the planet's last tick.
    #[error("clock regression: asked to advance to {now} but last tick was {last_tick}")]
    ClockRegression {
        /// When the planet was last ticked.
        last_tick: DateTime<Utc>,
        /// The earlier instant that was requested.
        now: DateTime<Utc>,
    },

    /// A kind name at the string boundary was not recognised.
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

impl EconomyError {
    /// Shorthand for [`EconomyError::ArithmeticOverflow`].
    pub const fn overflow(context: &'static str) -> Self {
        Self::ArithmeticOverflow { context }
    }
}
