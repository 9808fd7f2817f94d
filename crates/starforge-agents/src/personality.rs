//! Strategy presets and personality blending.
//!
//! A new agent starts from its strategy's preset and gets independent
//! uniform jitter on each trait, then the result is clamped to `[0, 1]`.

use rand::Rng;
use rust_decimal::Decimal;
use starforge_types::{Personality, Strategy};

/// Preset trait values for a strategy, before jitter.
pub fn preset(strategy: Strategy) -> Personality {
    let d = |tenths: i64| Decimal::new(tenths, 1);
    match strategy {
        Strategy::Economic => Personality::new(d(2), d(7), d(4), d(6), d(8)),
        Strategy::Military => Personality::new(d(9), d(6), d(3), d(3), d(3)),
        Strategy::Balanced => Personality::neutral(),
    }
}

/// Preset for `strategy` with uniform jitter in `[-jitter, +jitter]` on each
/// trait, clamped.
pub fn blend<R: Rng + ?Sized>(strategy: Strategy, jitter: Decimal, rng: &mut R) -> Personality {
    let base = preset(strategy);
    let mut jittered = |v: Decimal| v.saturating_add(signed_unit(rng).saturating_mul(jitter));
    Personality::new(
        jittered(base.aggression()),
        jittered(base.expansion()),
        jittered(base.defense()),
        jittered(base.patience()),
        jittered(base.greed()),
    )
}

/// A uniform draw in `[0, 1)` with four decimal places.
pub fn unit_roll<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let raw: i64 = rng.random_range(0..10_000);
    Decimal::new(raw, 4)
}

/// A uniform draw in `[-1, 1]` with three decimal places.
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let raw: i64 = rng.random_range(-1_000..=1_000);
    Decimal::new(raw, 3)
}
