//! Progress and unlock evaluation.
//!
//! [`evaluate`] is idempotent: once a definition is unlocked it is skipped,
//! so repeated calls with the same statistics return nothing new.

use chrono::{DateTime, Utc};
use starforge_types::Resources;

use crate::catalog::{AchievementDefinition, RequirementKind, default_catalog};
use crate::stats::PlayerStats;

/// Current value of the statistic `kind` measures, or `None` if this build
/// does not know how to measure it.
pub const fn observed(kind: RequirementKind, stats: &PlayerStats) -> Option<u64> {
    let value = match kind {
        RequirementKind::BattlesWon => stats.attacks_won,
        RequirementKind::ShipsDestroyed => stats.ships_destroyed,
        RequirementKind::DefensesWon => stats.defenses_won,
        RequirementKind::MaxResources => stats.max_resources(),
        RequirementKind::BuildingsBuilt => stats.buildings_built,
        RequirementKind::PlanetsColonized => stats.planets_colonized,
        RequirementKind::ResearchCompleted => stats.research_completed,
        RequirementKind::PlayTime => stats.play_time_seconds,
        RequirementKind::DailyBuilds => stats.best_daily_builds,
        RequirementKind::MaxFields => stats.filled_planets,
        RequirementKind::Unknown => return None,
    };
    Some(value)
}

/// Completion percentage, `min(100, floor(100 * observed / threshold))`.
///
/// A zero threshold is already complete. Unknown requirements stay at 0.
pub fn progress(definition: &AchievementDefinition, stats: &PlayerStats) -> u8 {
    let Some(value) = observed(definition.requirement.kind, stats) else {
        return 0;
    };
    let threshold = definition.requirement.threshold;
    if threshold == 0 {
        return 100;
    }
    let pct = u128::from(value)
        .saturating_mul(100)
        .checked_div(u128::from(threshold))
        .unwrap_or(100)
        .min(100);
    u8::try_from(pct).unwrap_or(100)
}

/// Unlock every locked definition whose requirement is met.
///
/// Sets `unlocked = true, unlocked_at = now` and returns clones of exactly
/// the definitions flipped by this call.
pub fn evaluate(
    stats: &PlayerStats,
    definitions: &mut [AchievementDefinition],
    now: DateTime<Utc>,
) -> Vec<AchievementDefinition> {
    let mut newly = Vec::new();
    for def in definitions.iter_mut().filter(|d| !d.unlocked) {
        let Some(value) = observed(def.requirement.kind, stats) else {
            continue;
        };
        if value >= def.requirement.threshold {
            def.unlocked = true;
            def.unlocked_at = Some(now);
            tracing::info!(
                achievement = %def.id,
                name = %def.name,
                value,
                threshold = def.requirement.threshold,
                "achievement unlocked"
            );
            newly.push(def.clone());
        }
    }
    newly
}

/// Sum of the rewards of `unlocked`. Callers decide where to credit it.
pub fn total_reward(unlocked: &[AchievementDefinition]) -> Resources {
    unlocked
        .iter()
        .filter_map(|d| d.reward.as_ref())
        .fold(Resources::ZERO, |acc, r| acc.saturating_add(r))
}

/// Progress of one achievement, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    /// Achievement identifier.
    pub id: String,
    /// Completion percentage, 0--100.
    pub percent: u8,
    /// Whether it has fired.
    pub unlocked: bool,
}

/// One player's achievement state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementTracker {
    definitions: Vec<AchievementDefinition>,
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl AchievementTracker {
    /// Track the given definitions.
    pub const fn new(definitions: Vec<AchievementDefinition>) -> Self {
        Self { definitions }
    }

    /// Unlock whatever `stats` now satisfies. See [`evaluate`].
    pub fn evaluate(&mut self, stats: &PlayerStats, now: DateTime<Utc>) -> Vec<AchievementDefinition> {
        evaluate(stats, &mut self.definitions, now)
    }

    /// Progress of every tracked achievement, in catalog order.
    pub fn progress_report(&self, stats: &PlayerStats) -> Vec<ProgressEntry> {
        self.definitions
            .iter()
            .map(|d| ProgressEntry {
                id: d.id.clone(),
                percent: if d.unlocked { 100 } else { progress(d, stats) },
                unlocked: d.unlocked,
            })
            .collect()
    }

    /// How many achievements have fired.
    pub fn unlocked_count(&self) -> usize {
        self.definitions.iter().filter(|d| d.unlocked).count()
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// All tracked definitions.
    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AchievementCategory, Requirement};

    fn def(kind: RequirementKind, threshold: u64) -> AchievementDefinition {
        AchievementDefinition {
            id: String::from("test"),
            name: String::from("Test"),
            description: String::new(),
            icon: String::new(),
            category: AchievementCategory::Special,
            requirement: Requirement { kind, threshold },
            reward: Some(Resources::new(10, 5, 1, 0)),
            unlocked: false,
            unlocked_at: None,
        }
    }

    #[test]
    fn progress_is_floored_and_capped() {
        let mut stats = PlayerStats::default();
        stats.attacks_won = 3;
        assert_eq!(progress(&def(RequirementKind::BattlesWon, 10), &stats), 30);
        assert_eq!(progress(&def(RequirementKind::BattlesWon, 7), &stats), 42);
        stats.attacks_won = 500;
        assert_eq!(progress(&def(RequirementKind::BattlesWon, 10), &stats), 100);
    }

    #[test]
    fn unknown_requirement_has_no_progress() {
        let mut stats = PlayerStats::default();
        stats.attacks_won = u64::MAX;
        assert_eq!(progress(&def(RequirementKind::Unknown, 1), &stats), 0);
        let mut defs = vec![def(RequirementKind::Unknown, 0)];
        assert!(evaluate(&stats, &mut defs, Utc::now()).is_empty());
    }

    #[test]
    fn zero_threshold_is_complete() {
        let stats = PlayerStats::default();
        assert_eq!(progress(&def(RequirementKind::BuildingsBuilt, 0), &stats), 100);
    }

    #[test]
    fn ten_wins_unlock_warrior_exactly_once() {
        let mut tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();
        for _ in 0..10 {
            stats.record_attack(true);
        }
        let now = Utc::now();

        let first = tracker.evaluate(&stats, now);
        let ids: Vec<&str> = first.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&"warrior"));
        assert!(ids.contains(&"first_blood"));
        assert!(!ids.contains(&"conqueror"));
        assert_eq!(tracker.get("warrior").and_then(|d| d.unlocked_at), Some(now));

        let second = tracker.evaluate(&stats, Utc::now());
        assert!(second.is_empty());
        assert_eq!(tracker.unlocked_count(), 2);
    }

    #[test]
    fn rewards_sum() {
        let mut tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();
        stats.record_attack(true);
        let unlocked = tracker.evaluate(&stats, Utc::now());
        assert_eq!(total_reward(&unlocked), Resources::new(1_000, 500, 100, 0));
    }

    #[test]
    fn colonization_and_research_unlock_their_tiers() {
        let mut tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();
        stats.record_colonization();
        for _ in 0..9 {
            stats.record_research();
        }

        let first = tracker.evaluate(&stats, Utc::now());
        let ids: Vec<&str> = first.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["explorer"]);
        assert_eq!(total_reward(&first), Resources::new(2_000, 1_000, 200, 0));
        let researcher = tracker.definitions().iter().find(|d| d.id == "researcher");
        assert_eq!(researcher.map(|d| progress(d, &stats)), Some(90));

        stats.record_research();
        let second = tracker.evaluate(&stats, Utc::now());
        let ids: Vec<&str> = second.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["researcher"]);
        assert!(tracker.evaluate(&stats, Utc::now()).is_empty());
    }

    #[test]
    fn defenses_and_kills_unlock_combat_tiers() {
        let mut tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();
        for _ in 0..10 {
            stats.record_defense_won();
        }
        stats.record_ships_destroyed(100);
        let ids: Vec<String> = tracker
            .evaluate(&stats, Utc::now())
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![String::from("destroyer"), String::from("defender")]);
    }

    #[test]
    fn report_covers_whole_catalog() {
        let tracker = AchievementTracker::default();
        let mut stats = PlayerStats::default();
        stats.observe_stock(&Resources::new(25_000, 20_000, 5_000, 0));
        let report = tracker.progress_report(&stats);
        assert_eq!(report.len(), 17);
        let rich = report.iter().find(|e| e.id == "rich").map(|e| e.percent);
        assert_eq!(rich, Some(50));
        assert!(report.iter().all(|e| e.percent <= 100));
    }
}
