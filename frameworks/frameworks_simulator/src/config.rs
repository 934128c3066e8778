//! Simulator Configuration
//!
//! Merges command-line arguments with environment fallbacks and validates the
//! result before any scheduler is built.

use std::fmt;
use std::path::PathBuf;

use usecases_scheduling::EventBudget;

use crate::args::SimulatorArgs;
use crate::env::{EnvOverrides, PROCESSES_VAR, QUEUES_VAR, SEED_VAR};

/// Validated simulator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub num_queues: usize,
    pub num_processes: usize,
    /// `None` draws the workload from the thread-local generator
    pub seed: Option<u64>,
    pub budget: EventBudget,
    pub time_quantum: i32,
    pub output: Option<PathBuf>,
    pub summary: bool,
}

impl SimulatorConfig {
    /// Build the configuration from arguments and environment
    ///
    /// Command-line values win over environment values. Without `--budget` or
    /// `--run-to-completion`, the event budget equals the process count.
    ///
    /// # Arguments
    /// * `args` - Parsed command-line arguments
    /// * `env` - Environment fallbacks
    ///
    /// # Returns
    /// * `Ok(SimulatorConfig)` - Validated configuration
    /// * `Err(ConfigError)` - First validation failure
    pub fn resolve(args: &SimulatorArgs, env: &EnvOverrides) -> Result<Self, ConfigError> {
        let queues = args
            .queues
            .as_deref()
            .or(env.queues.as_deref())
            .ok_or(ConfigError::MissingValue {
                flag: "--queues",
                var: QUEUES_VAR,
            })?;
        let processes = args
            .processes
            .as_deref()
            .or(env.processes.as_deref())
            .ok_or(ConfigError::MissingValue {
                flag: "--processes",
                var: PROCESSES_VAR,
            })?;

        let num_queues = parse_count(queues)?;
        let num_processes = parse_count(processes)?;
        if num_queues <= 0 || num_processes <= 0 {
            return Err(ConfigError::NonPositiveCounts);
        }
        let num_queues = usize::try_from(num_queues).map_err(|_| ConfigError::InvalidCounts)?;
        let num_processes =
            usize::try_from(num_processes).map_err(|_| ConfigError::InvalidCounts)?;

        let seed = match (args.seed, env.seed.as_deref()) {
            (Some(seed), _) => Some(seed),
            (None, Some(raw)) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))?,
            ),
            (None, None) => None,
        };

        let budget = if args.run_to_completion {
            EventBudget::RunToCompletion
        } else {
            match args.budget {
                Some(0) => return Err(ConfigError::InvalidBudget),
                Some(limit) => EventBudget::Capped(limit),
                None => EventBudget::Capped(num_processes),
            }
        };

        if args.quantum <= 0 {
            return Err(ConfigError::InvalidQuantum(args.quantum));
        }

        Ok(Self {
            num_queues,
            num_processes,
            seed,
            budget,
            time_quantum: args.quantum,
            output: args.output.clone(),
            summary: args.summary,
        })
    }
}

/// Counts share the 32-bit integer range of the interactive prompt
fn parse_count(raw: &str) -> Result<i32, ConfigError> {
    raw.trim().parse::<i32>().map_err(|_| ConfigError::InvalidCounts)
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A count was given neither on the command line nor in the environment
    MissingValue {
        flag: &'static str,
        var: &'static str,
    },
    /// A count is not an integer or does not fit in 32 bits
    InvalidCounts,
    /// A count is zero or negative
    NonPositiveCounts,
    /// MLQ_SEED is not an unsigned integer
    InvalidSeed(String),
    /// `--budget 0`
    InvalidBudget,
    /// Quantum is zero or negative
    InvalidQuantum(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue { flag, var } => {
                write!(f, "Missing value: pass {} or set {}", flag, var)
            }
            ConfigError::InvalidCounts => write!(
                f,
                "Invalid input. Please enter valid positive integers for the number of queues and processes."
            ),
            ConfigError::NonPositiveCounts => {
                write!(f, "Number of queues and processes must be positive integers.")
            }
            ConfigError::InvalidSeed(raw) => {
                write!(f, "Invalid {} value '{}': expected an unsigned integer", SEED_VAR, raw)
            }
            ConfigError::InvalidBudget => write!(f, "Event budget must be a positive integer."),
            ConfigError::InvalidQuantum(q) => {
                write!(f, "Time quantum must be a positive integer, got {}", q)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
