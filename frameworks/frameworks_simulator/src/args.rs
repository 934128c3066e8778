//! Command-Line Argument Parsing Module
//!
//! Uses clap for type-safe argument parsing. The queue and process counts are
//! kept as raw strings here so that the configuration layer can report the
//! same validation message for missing, malformed and non-positive values.

use std::path::PathBuf;

use clap::Parser;

use usecases_scheduling::DEFAULT_TIME_QUANTUM;

/// Multilevel queue simulator command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "mlq-sim")]
#[command(about = "Multilevel queue CPU scheduling simulator")]
pub struct SimulatorArgs {
    /// Number of priority queues (falls back to MLQ_QUEUES)
    #[arg(short = 'q', long, allow_hyphen_values = true)]
    pub queues: Option<String>,

    /// Number of processes to generate (falls back to MLQ_PROCESSES)
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub processes: Option<String>,

    /// Seed for reproducible workloads (falls back to MLQ_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of events to emit; defaults to the process count
    #[arg(long, conflicts_with = "run_to_completion")]
    pub budget: Option<usize>,

    /// Keep scheduling until every process has completed
    #[arg(long)]
    pub run_to_completion: bool,

    /// Burst time consumed per execution
    #[arg(long, default_value_t = DEFAULT_TIME_QUANTUM, allow_negative_numbers = true)]
    pub quantum: i32,

    /// Write events to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print a run summary after the events
    #[arg(long)]
    pub summary: bool,
}
