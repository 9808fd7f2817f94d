//! Error types for the starforge-agents crate.

use starforge_types::AgentId;

/// Errors that can occur while generating or managing agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Every name in the pool is already taken.
    ///
    /// This is a configuration error: the requested agent count exceeds the
    /// name pool.
    #[error("name pool exhausted: all {pool_size} names are in use")]
    NamePoolExhausted {
        /// Size of the name pool.
        pool_size: usize,
    },

    /// An arithmetic overflow occurred during agent generation or policy.
    #[error("arithmetic overflow in agent computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: &'static str,
    },

    /// Agent with the given ID was not found in the registry.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Agent name already exists in the registry.
    #[error("duplicate agent name: {0}")]
    DuplicateName(String),
}

impl AgentError {
    /// Shorthand for [`AgentError::ArithmeticOverflow`].
    pub const fn overflow(context: &'static str) -> Self {
        Self::ArithmeticOverflow { context }
    }
}
