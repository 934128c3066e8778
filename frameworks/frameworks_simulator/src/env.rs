//! Environment Variable Module
//!
//! Reads the environment fallbacks for the simulator. Command-line values
//! always take precedence over anything read here.

use std::env;

/// Fallback for `--queues`
pub const QUEUES_VAR: &str = "MLQ_QUEUES";
/// Fallback for `--processes`
pub const PROCESSES_VAR: &str = "MLQ_PROCESSES";
/// Fallback for `--seed`
pub const SEED_VAR: &str = "MLQ_SEED";
/// Log level filter for the stderr logger
pub const LOG_VAR: &str = "MLQ_LOG";

/// Values read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub queues: Option<String>,
    pub processes: Option<String>,
    pub seed: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read through an arbitrary lookup function
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            queues: read(QUEUES_VAR),
            processes: read(PROCESSES_VAR),
            seed: read(SEED_VAR),
            log_level: read(LOG_VAR),
        }
    }
}
