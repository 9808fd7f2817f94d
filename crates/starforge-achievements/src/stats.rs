//! Cumulative player statistics.
//!
//! Counters only ever grow. Maxima only ever rise. Every recording method
//! saturates instead of wrapping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use starforge_types::Resources;

/// Everything achievements are measured against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Attacks launched.
    pub total_attacks: u64,
    /// Attacks won.
    pub attacks_won: u64,
    /// Attacks lost.
    pub attacks_lost: u64,
    /// Defensive battles won.
    pub defenses_won: u64,
    /// Enemy ships destroyed.
    pub ships_destroyed: u64,
    /// Ships built.
    pub ships_built: u64,
    /// Resources taken from others.
    pub resources_looted: u64,
    /// Resources taken by others.
    pub resources_lost: u64,
    /// Building levels completed.
    pub buildings_built: u64,
    /// Planets colonized.
    pub planets_colonized: u64,
    /// Research levels completed.
    pub research_completed: u64,
    /// Seconds of play.
    pub play_time_seconds: u64,
    /// Highest metal stock ever observed on one planet.
    pub max_metal: u64,
    /// Highest crystal stock ever observed on one planet.
    pub max_crystal: u64,
    /// Highest deuterium stock ever observed on one planet.
    pub max_deuterium: u64,
    /// Most builds completed in one UTC day.
    pub best_daily_builds: u64,
    /// Builds completed on `build_day`.
    pub builds_today: u64,
    /// UTC day the `builds_today` counter belongs to.
    pub build_day: Option<NaiveDate>,
    /// Most planets observed with every field in use.
    pub filled_planets: u64,
}

impl PlayerStats {
    /// Count one attack, won or lost.
    pub const fn record_attack(&mut self, won: bool) {
        self.total_attacks = self.total_attacks.saturating_add(1);
        if won {
            self.attacks_won = self.attacks_won.saturating_add(1);
        } else {
            self.attacks_lost = self.attacks_lost.saturating_add(1);
        }
    }

    /// Count one successful defense.
    pub const fn record_defense_won(&mut self) {
        self.defenses_won = self.defenses_won.saturating_add(1);
    }

    /// Count enemy ships destroyed.
    pub const fn record_ships_destroyed(&mut self, count: u64) {
        self.ships_destroyed = self.ships_destroyed.saturating_add(count);
    }

    /// Count ships built.
    pub const fn record_ships_built(&mut self, count: u64) {
        self.ships_built = self.ships_built.saturating_add(count);
    }

    /// Count resources looted.
    pub const fn record_loot(&mut self, loot: &Resources) {
        self.resources_looted = self.resources_looted.saturating_add(loot.total_materials());
    }

    /// Count resources lost to raids.
    pub const fn record_losses(&mut self, lost: &Resources) {
        self.resources_lost = self.resources_lost.saturating_add(lost.total_materials());
    }

    /// Count one completed building level at `at`.
    ///
    /// Rolls the daily counter over when `at` falls on a different UTC day.
    pub fn record_build(&mut self, at: DateTime<Utc>) {
        self.buildings_built = self.buildings_built.saturating_add(1);
        let day = at.date_naive();
        if self.build_day == Some(day) {
            self.builds_today = self.builds_today.saturating_add(1);
        } else {
            self.build_day = Some(day);
            self.builds_today = 1;
        }
        self.best_daily_builds = self.best_daily_builds.max(self.builds_today);
    }

    /// Count one colonized planet.
    pub const fn record_colonization(&mut self) {
        self.planets_colonized = self.planets_colonized.saturating_add(1);
    }

    /// Count one completed research level.
    pub const fn record_research(&mut self) {
        self.research_completed = self.research_completed.saturating_add(1);
    }

    /// Add seconds of play.
    pub const fn add_play_time(&mut self, seconds: u64) {
        self.play_time_seconds = self.play_time_seconds.saturating_add(seconds);
    }

    /// Raise the per-channel stock maxima to `stock` where it is higher.
    ///
    /// `stock` is one planet's stock; the driver calls this once per planet.
    pub fn observe_stock(&mut self, stock: &Resources) {
        self.max_metal = self.max_metal.max(stock.metal);
        self.max_crystal = self.max_crystal.max(stock.crystal);
        self.max_deuterium = self.max_deuterium.max(stock.deuterium);
    }

    /// Raise the filled-planet high-water mark.
    pub fn observe_filled_planets(&mut self, count: u64) {
        self.filled_planets = self.filled_planets.max(count);
    }

    /// Sum of the three per-channel maxima.
    pub const fn max_resources(&self) -> u64 {
        self.max_metal
            .saturating_add(self.max_crystal)
            .saturating_add(self.max_deuterium)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn attacks_split_by_outcome() {
        let mut s = PlayerStats::default();
        s.record_attack(true);
        s.record_attack(false);
        s.record_attack(true);
        assert_eq!((s.total_attacks, s.attacks_won, s.attacks_lost), (3, 2, 1));
    }

    #[test]
    fn single_counters_step_by_one() {
        let mut s = PlayerStats::default();
        s.record_defense_won();
        s.record_defense_won();
        s.record_colonization();
        for _ in 0..3 {
            s.record_research();
        }
        assert_eq!(s.defenses_won, 2);
        assert_eq!(s.planets_colonized, 1);
        assert_eq!(s.research_completed, 3);
        assert_eq!(s.total_attacks, 0);
    }

    #[test]
    fn ship_counters_add_counts() {
        let mut s = PlayerStats::default();
        s.record_ships_destroyed(12);
        s.record_ships_destroyed(0);
        s.record_ships_destroyed(3);
        s.record_ships_built(40);
        assert_eq!(s.ships_destroyed, 15);
        assert_eq!(s.ships_built, 40);
    }

    #[test]
    fn loot_and_losses_count_materials_only() {
        let mut s = PlayerStats::default();
        s.record_loot(&Resources::new(1_000, 500, 250, 9_999));
        s.record_loot(&Resources::new(1, 2, 3, 0));
        s.record_losses(&Resources::new(0, 0, 80, 40));
        assert_eq!(s.resources_looted, 1_756);
        assert_eq!(s.resources_lost, 80);
    }

    #[test]
    fn counters_saturate() {
        let mut s = PlayerStats {
            defenses_won: u64::MAX,
            ships_destroyed: u64::MAX - 1,
            ships_built: u64::MAX,
            planets_colonized: u64::MAX,
            research_completed: u64::MAX,
            play_time_seconds: u64::MAX - 5,
            ..PlayerStats::default()
        };
        s.record_defense_won();
        s.record_ships_destroyed(10);
        s.record_ships_built(1);
        s.record_colonization();
        s.record_research();
        s.add_play_time(60);
        assert_eq!(s.defenses_won, u64::MAX);
        assert_eq!(s.ships_destroyed, u64::MAX);
        assert_eq!(s.ships_built, u64::MAX);
        assert_eq!(s.planets_colonized, u64::MAX);
        assert_eq!(s.research_completed, u64::MAX);
        assert_eq!(s.play_time_seconds, u64::MAX);
    }

    #[test]
    fn loot_saturates_on_huge_hauls() {
        let mut s = PlayerStats::default();
        let haul = Resources::new(u64::MAX, u64::MAX, 1, 0);
        s.record_loot(&haul);
        assert_eq!(s.resources_looted, u64::MAX);
        s.record_loot(&Resources::new(1, 0, 0, 0));
        assert_eq!(s.resources_looted, u64::MAX);

        s.record_losses(&Resources::new(u64::MAX - 2, 1, 0, 0));
        s.record_losses(&Resources::new(5, 5, 5, 0));
        assert_eq!(s.resources_lost, u64::MAX);
    }

    #[test]
    fn daily_builds_roll_over() {
        let mut s = PlayerStats::default();
        for h in 0..4 {
            s.record_build(at(1, h));
        }
        s.record_build(at(2, 1));
        s.record_build(at(2, 2));
        assert_eq!(s.buildings_built, 6);
        assert_eq!(s.builds_today, 2);
        assert_eq!(s.best_daily_builds, 4);
    }

    #[test]
    fn stock_maxima_only_rise() {
        let mut s = PlayerStats::default();
        s.observe_stock(&Resources::new(100, 50, 10, 0));
        s.observe_stock(&Resources::new(20, 80, 5, 0));
        assert_eq!((s.max_metal, s.max_crystal, s.max_deuterium), (100, 80, 10));
        assert_eq!(s.max_resources(), 190);
    }

    #[test]
    fn filled_planets_is_a_high_water_mark() {
        let mut s = PlayerStats::default();
        s.observe_filled_planets(2);
        s.observe_filled_planets(1);
        assert_eq!(s.filled_planets, 2);
    }
}
