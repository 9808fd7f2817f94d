//! The set of live agents.
//!
//! [`AgentRegistry`] owns every [`AgentPlayer`] in the universe and keeps
//! their names unique. Generation goes through it so that a fresh batch
//! never collides with agents already alive.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rand::Rng;
use starforge_types::{AgentAction, AgentId, AgentPlayer, Difficulty, Strategy};
use tracing::info;

use crate::config::AgentConfig;
use crate::decision;
use crate::error::AgentError;
use crate::generation;

/// Live agents keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, AgentPlayer>,
    config: AgentConfig,
}

impl AgentRegistry {
    /// An empty registry using `config` for generation and cadence.
    pub const fn new(config: AgentConfig) -> Self {
        Self {
            agents: BTreeMap::new(),
            config,
        }
    }

    /// The active agent configuration.
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Names of every live agent.
    pub fn names(&self) -> BTreeSet<String> {
        self.agents.values().map(|a| a.name.clone()).collect()
    }

    /// Create one agent with a fresh name and register it.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NamePoolExhausted`] if no name is free.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        strategy: Strategy,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<AgentId, AgentError> {
        let names = self.names();
        let agent = generation::create_agent(difficulty, strategy, &names, now, rng, &self.config)?;
        self.insert(agent)
    }

    /// Register an existing agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DuplicateName`] if a live agent already uses
    /// the name.
    pub fn insert(&mut self, agent: AgentPlayer) -> Result<AgentId, AgentError> {
        if self.agents.values().any(|a| a.name == agent.name) {
            return Err(AgentError::DuplicateName(agent.name));
        }
        let id = agent.id;
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Generate `count` agents and register them all.
    ///
    /// With `base` set, each agent is that tier or one harder. Without it,
    /// tiers are drawn from easy, normal and hard. Nothing is registered if
    /// generation fails.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NamePoolExhausted`] if `count` exceeds the free
    /// names.
    pub fn generate_universe<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        base: Option<Difficulty>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<AgentId>, AgentError> {
        let names = self.names();
        let batch = match base {
            Some(d) => generation::generate_universe_with_difficulty(count, d, &names, now, rng, &self.config)?,
            None => generation::generate_universe(count, &names, now, rng, &self.config)?,
        };
        let ids = batch.iter().map(|a| a.id).collect();
        for agent in batch {
            self.agents.insert(agent.id, agent);
        }
        info!(count, total = self.agents.len(), "universe generated");
        Ok(ids)
    }

    /// Look up an agent.
    pub fn get(&self, id: AgentId) -> Option<&AgentPlayer> {
        self.agents.get(&id)
    }

    /// Look up an agent for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown id.
    pub fn get_mut(&mut self, id: AgentId) -> Result<&mut AgentPlayer, AgentError> {
        self.agents.get_mut(&id).ok_or(AgentError::AgentNotFound(id))
    }

    /// Remove an agent, freeing its name.
    pub fn remove(&mut self, id: AgentId) -> Option<AgentPlayer> {
        self.agents.remove(&id)
    }

    /// Agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentPlayer> {
        self.agents.values()
    }

    /// Agents in id order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AgentPlayer> {
        self.agents.values_mut()
    }

    /// Run one decision step for every agent and collect the proposals.
    ///
    /// Agents are visited in id order, which is creation order for v7 ids.
    ///
    /// # Errors
    ///
    /// Propagates the first [`AgentError`] raised by a step.
    pub fn step_all<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<AgentAction>, AgentError> {
        let mut actions = Vec::new();
        for agent in self.agents.values_mut() {
            actions.extend(decision::step(agent, now, rng, &self.config)?);
        }
        Ok(actions)
    }

    /// Drop every agent.
    pub fn clear(&mut self) {
        self.agents.clear();
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are alive.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
