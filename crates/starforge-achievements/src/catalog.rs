//! Achievement definitions and the built-in catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starforge_types::Resources;

/// Grouping used by the achievements screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Battles and kills.
    Combat,
    /// Stockpiles and construction.
    Economy,
    /// Colonization.
    Exploration,
    /// Technologies.
    Research,
    /// Everything else.
    Special,
}

/// Which statistic a requirement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Attacks won.
    BattlesWon,
    /// Enemy ships destroyed.
    ShipsDestroyed,
    /// Defensive battles won.
    DefensesWon,
    /// Sum of the best metal, crystal, and deuterium stocks ever held.
    MaxResources,
    /// Building levels completed.
    BuildingsBuilt,
    /// Planets colonized.
    PlanetsColonized,
    /// Research levels completed.
    ResearchCompleted,
    /// Seconds played.
    PlayTime,
    /// Most builds completed within one UTC day.
    DailyBuilds,
    /// Planets with every field in use.
    MaxFields,
    /// A requirement this build does not know how to measure. Never
    /// progresses.
    #[serde(other)]
    Unknown,
}

/// Threshold on a single statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Statistic measured.
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Value at which the achievement unlocks.
    #[serde(rename = "value")]
    pub threshold: u64,
}

/// One achievement and its unlock state.
///
/// `unlocked` only ever goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Display icon.
    #[serde(default)]
    pub icon: String,
    /// Grouping.
    pub category: AchievementCategory,
    /// What must be reached.
    pub requirement: Requirement,
    /// Resources granted on unlock.
    #[serde(default)]
    pub reward: Option<Resources>,
    /// Whether the achievement has fired.
    #[serde(default)]
    pub unlocked: bool,
    /// When it fired.
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    category: AchievementCategory,
    kind: RequirementKind,
    threshold: u64,
    reward: (u64, u64, u64),
) -> AchievementDefinition {
    AchievementDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        category,
        requirement: Requirement { kind, threshold },
        reward: Some(Resources::new(reward.0, reward.1, reward.2, 0)),
        unlocked: false,
        unlocked_at: None,
    }
}

/// The built-in catalog, all locked.
#[rustfmt::skip]
pub fn default_catalog() -> Vec<AchievementDefinition> {
    use AchievementCategory::{Combat, Economy, Exploration, Research, Special};
    use RequirementKind as R;

    vec![
        entry("first_blood", "First Blood", "Win your first battle", "⚔️", Combat, R::BattlesWon, 1, (1_000, 500, 100)),
        entry("warrior", "Warrior", "Win 10 battles", "🗡️", Combat, R::BattlesWon, 10, (5_000, 2_500, 500)),
        entry("conqueror", "Conqueror", "Win 50 battles", "👑", Combat, R::BattlesWon, 50, (25_000, 12_500, 2_500)),
        entry("destroyer", "Destroyer", "Destroy 100 enemy ships", "💥", Combat, R::ShipsDestroyed, 100, (10_000, 5_000, 1_000)),
        entry("defender", "Defender", "Win 10 defensive battles", "🛡️", Combat, R::DefensesWon, 10, (5_000, 2_500, 500)),
        entry("rich", "Getting Rich", "Accumulate 100,000 resources", "💰", Economy, R::MaxResources, 100_000, (0, 0, 0)),
        entry("tycoon", "Tycoon", "Accumulate 1,000,000 resources", "💎", Economy, R::MaxResources, 1_000_000, (50_000, 25_000, 5_000)),
        entry("industrialist", "Industrialist", "Build 100 buildings", "🏭", Economy, R::BuildingsBuilt, 100, (10_000, 5_000, 1_000)),
        entry("explorer", "Explorer", "Colonize your first planet", "🧭", Exploration, R::PlanetsColonized, 1, (2_000, 1_000, 200)),
        entry("colonizer", "Colonizer", "Colonize 5 planets", "🏝️", Exploration, R::PlanetsColonized, 5, (10_000, 5_000, 1_000)),
        entry("empire", "Empire Builder", "Colonize 10 planets", "🌍", Exploration, R::PlanetsColonized, 10, (50_000, 25_000, 5_000)),
        entry("researcher", "Researcher", "Complete 10 research projects", "🔬", Research, R::ResearchCompleted, 10, (5_000, 2_500, 500)),
        entry("scientist", "Scientist", "Complete 25 research projects", "🧪", Research, R::ResearchCompleted, 25, (15_000, 7_500, 1_500)),
        entry("genius", "Genius", "Complete 50 research projects", "🧠", Research, R::ResearchCompleted, 50, (50_000, 25_000, 5_000)),
        entry("speed_demon", "Speed Demon", "Complete 10 builds in a single day", "⚡", Special, R::DailyBuilds, 10, (10_000, 5_000, 1_000)),
        entry("legend", "Legend", "Play for 100 hours", "🏆", Special, R::PlayTime, 360_000, (100_000, 50_000, 10_000)),
        entry("perfectionist", "Perfectionist", "Fill all building slots on a planet", "✨", Special, R::MaxFields, 1, (25_000, 12_500, 2_500)),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_unique_ids() {
        let catalog = default_catalog();
        let ids: BTreeSet<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(catalog.len(), 17);
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|a| !a.unlocked && a.unlocked_at.is_none()));
    }

    #[test]
    fn unknown_requirement_deserializes() {
        let json = r#"{
            "id": "fleet_admiral",
            "name": "Fleet Admiral",
            "description": "Own 1000 ships",
            "category": "combat",
            "requirement": {"type": "ships_owned", "value": 1000}
        }"#;
        let def: Result<AchievementDefinition, _> = serde_json::from_str(json);
        let kind = def.ok().map(|d| d.requirement.kind);
        assert_eq!(kind, Some(RequirementKind::Unknown));
    }
}
