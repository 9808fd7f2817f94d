//! Name pool and UI color palette for autonomous agents.

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::AgentError;

/// Names agents are drawn from. Each live agent holds a distinct one.
pub const NAME_POOL: &[&str] = &[
    "CyberX",
    "NovaPrime",
    "StarLord",
    "VoidWalker",
    "CosmosKing",
    "GalaxyEmperor",
    "NebulaLord",
    "PulsarMaster",
    "QuantumAce",
    "StellarKing",
    "DarkMatter",
    "SolarFlare",
    "LunarCommand",
    "OrbitalAce",
    "AstroKing",
    "IonStorm",
    "QuasarQueen",
    "EventHorizon",
    "RedGiant",
    "WhiteDwarf",
    "CometTail",
    "IronNebula",
    "WarpDrive",
    "ZeroPoint",
    "StarForger",
    "BlackHole",
    "Singularity",
    "PhotonBlade",
    "CrystalTide",
    "DeepSpace",
];

/// Colors assigned to agents in creation order, cycling.
pub const COLORS: &[&str] = &[
    "#ff6b6b", "#4ecdc4", "#ffe66d", "#95e1d3", "#f38181", "#aa96da", "#fcbad3", "#a8d8ea",
    "#ff9a3c", "#00d2d3",
];

/// Draw a name uniformly from the part of the pool not in `existing`.
///
/// # Errors
///
/// Returns [`AgentError::NamePoolExhausted`] if every pool name is taken.
pub fn pick_unused_name<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &BTreeSet<String>,
) -> Result<String, AgentError> {
    let available: Vec<&str> = NAME_POOL
        .iter()
        .filter(|&&n| !existing.contains(n))
        .copied()
        .collect();

    if available.is_empty() {
        return Err(AgentError::NamePoolExhausted {
            pool_size: NAME_POOL.len(),
        });
    }

    let idx = rng.random_range(0..available.len());
    available
        .get(idx)
        .map(|s| String::from(*s))
        .ok_or(AgentError::NamePoolExhausted {
            pool_size: NAME_POOL.len(),
        })
}

/// Color for the `index`-th agent created.
pub fn color_for(index: usize) -> &'static str {
    COLORS
        .get(index.checked_rem(COLORS.len()).unwrap_or(0))
        .copied()
        .unwrap_or("#ffffff")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn pool_names_are_unique() {
        let set: BTreeSet<&str> = NAME_POOL.iter().copied().collect();
        assert_eq!(set.len(), NAME_POOL.len());
    }

    #[test]
    fn picks_only_unused_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut taken = BTreeSet::new();
        for _ in 0..NAME_POOL.len() {
            let name = pick_unused_name(&mut rng, &taken);
            assert!(name.is_ok());
            if let Ok(n) = name {
                assert!(taken.insert(n));
            }
        }
        let exhausted = pick_unused_name(&mut rng, &taken);
        assert!(matches!(exhausted, Err(AgentError::NamePoolExhausted { pool_size: 30 })));
    }

    #[test]
    fn colors_cycle() {
        assert_eq!(color_for(0), "#ff6b6b");
        assert_eq!(color_for(10), "#ff6b6b");
        assert_eq!(color_for(13), "#95e1d3");
    }
}
