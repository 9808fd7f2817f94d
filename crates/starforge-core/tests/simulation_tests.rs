//! Integration tests for the tick cycle across the economy, achievement and
//! agent crates.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use starforge_agents::{AgentConfig, generate_universe, step};
use starforge_core::config::SimulationConfig;
use starforge_core::tick::{SimulationState, run_tick};
use starforge_types::{BuildingKind, Buildings, Resources};

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn state_with(yaml: &str) -> SimulationState {
    let config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
    config.validate().unwrap();
    SimulationState::from_config(&config, epoch()).unwrap()
}

/// Run the reference planet for one simulated hour split into `ticks`
/// ticks. Returns the stock before and after.
fn reference_hour(tick_interval_ms: u64, ticks: u64) -> (Resources, Resources) {
    let yaml = format!("world:\n  tick_interval_ms: {tick_interval_ms}\nagents:\n  initial_agents: 0\n");
    let mut state = state_with(&yaml);
    let home = state.player.planets.first_mut().unwrap();
    home.buildings = Buildings::new()
        .with(BuildingKind::MetalMine, 5)
        .with(BuildingKind::CrystalMine, 4)
        .with(BuildingKind::DeuteriumSynthesizer, 3)
        .with(BuildingKind::SolarPlant, 5)
        .with(BuildingKind::FusionReactor, 1);
    let before = home.resources;

    for _ in 0..ticks {
        let summary = run_tick(&mut state).unwrap();
        assert!(summary.unlocked.is_empty());
    }
    assert_eq!(state.player.stats.play_time_seconds, 3_600);
    (before, state.player.planets.first().unwrap().resources)
}

#[test]
fn hour_tick_matches_hourly_rates() {
    let (before, after) = reference_hour(3_600_000, 1);
    assert_eq!(after.metal, before.metal + 43);
    assert_eq!(after.crystal, before.crystal + 26);
    assert_eq!(after.deuterium, before.deuterium + 7);
    assert_eq!(after.energy, 0);
}

#[test]
fn one_second_ticks_match_hourly_rates() {
    let (before, after) = reference_hour(1_000, 3_600);
    assert_eq!(after.metal, before.metal + 43);
    assert_eq!(after.crystal, before.crystal + 26);
    assert_eq!(after.deuterium, before.deuterium + 7);
    assert_eq!(after.energy, 0);
}

#[test]
fn sub_second_ticks_match_hourly_rates() {
    let (before, after) = reference_hour(250, 14_400);
    assert_eq!(after.metal, before.metal + 43);
    assert_eq!(after.crystal, before.crystal + 26);
    assert_eq!(after.deuterium, before.deuterium + 7);
}

#[test]
fn achievements_unlock_once_and_credit_home() {
    let mut state = state_with("agents:\n  initial_agents: 0\n");
    state.player.stats.attacks_won = 10;
    state.player.stats.total_attacks = 10;

    let mut unlocked = Vec::new();
    let mut reward = Resources::ZERO;
    for _ in 0..20 {
        let summary = run_tick(&mut state).unwrap();
        unlocked.extend(summary.unlocked);
        reward = reward.saturating_add(&summary.reward);
    }

    unlocked.sort();
    assert_eq!(unlocked, vec!["first_blood".to_owned(), "warrior".to_owned()]);
    assert_eq!(reward, Resources::new(6_000, 3_000, 600, 0));
    assert_eq!(state.player.achievements.unlocked_count(), 2);
    assert!(state.player.planets.first().unwrap().resources.metal >= 6_500);
}

#[test]
fn agents_propose_actions_and_accrue() {
    let mut state = state_with("agents:\n  initial_agents: 6\n");
    let stock_before: u64 = state.agents.iter().map(|a| a.total_stock()).sum();

    let mut proposals = 0;
    for _ in 0..30 {
        proposals += run_tick(&mut state).unwrap().actions.len();
    }

    let stock_after: u64 = state.agents.iter().map(|a| a.total_stock()).sum();
    assert!(stock_after >= stock_before);
    assert!(proposals > 0);
    assert!(state.agents.iter().all(|a| a.last_action > epoch()));
}

#[test]
fn same_seed_same_universe() {
    let names = |seed: u64| {
        let yaml = format!("world:\n  seed: {seed}\nagents:\n  initial_agents: 8\n");
        let state = state_with(&yaml);
        state.agents.iter().map(|a| a.name.clone()).collect::<BTreeSet<_>>()
    };
    assert_eq!(names(11), names(11));
    assert_eq!(names(11).len(), 8);
}

#[test]
fn standalone_generation_and_cadence() {
    let mut rng = StdRng::seed_from_u64(21);
    let config = AgentConfig::default();
    let mut agents = generate_universe(10, &BTreeSet::new(), epoch(), &mut rng, &config).unwrap();

    let names: BTreeSet<_> = agents.iter().map(|a| a.name.clone()).collect();
    assert_eq!(names.len(), 10);

    let agent = agents.first_mut().unwrap();
    let snapshot = agent.clone();
    let early = step(agent, epoch() + TimeDelta::milliseconds(4_999), &mut rng, &config).unwrap();
    assert!(early.is_empty());
    assert_eq!(*agent, snapshot);

    let later = epoch() + TimeDelta::seconds(20);
    step(agent, later, &mut rng, &config).unwrap();
    assert_eq!(agent.last_action, later);
}
