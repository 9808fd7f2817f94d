//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run so
//! that `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: starforge_core::config::ConfigError,
    },

    /// Building the initial universe failed.
    #[error("bootstrap error: {source}")]
    Bootstrap {
        /// The underlying tick-state error.
        #[from]
        source: starforge_core::tick::TickError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: starforge_core::runner::RunnerError,
    },

    /// The log subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
