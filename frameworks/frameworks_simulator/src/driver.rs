//! Simulation Driver
//!
//! Builds the workload described by a [`SimulatorConfig`], runs it on the
//! scheduler thread and renders events as they arrive.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use entities_process::{RandomSource, SeededRandom, ThreadRandom};
use log::{debug, info, warn};
use usecases_scheduling::{
    build_workload, spawn_simulation, EventSink, ScheduleError, SimulationHandle,
    SimulationSummary,
};

use crate::config::{ConfigError, SimulatorConfig};
use crate::render::{format_summary, TextSink};

/// Run a simulation and write its event log to `writer`
///
/// # Arguments
/// * `config` - Validated configuration
/// * `writer` - Destination for event lines and the optional summary
///
/// # Returns
/// * `Ok(SimulationSummary)` - The run finished and every line was written
/// * `Err(SimulatorError)` - Workload, thread or write failure
pub fn run<W: Write>(
    config: &SimulatorConfig,
    writer: &mut W,
) -> Result<SimulationSummary, SimulatorError> {
    let mut rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            debug!("using seeded workload, seed {}", seed);
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    };
    let scheduler = build_workload(
        config.num_queues,
        config.num_processes,
        config.time_quantum,
        &mut *rng,
    )?;
    info!(
        "starting simulation: {} queues, {} processes, budget {:?}",
        config.num_queues, config.num_processes, config.budget
    );

    let handle = spawn_simulation(scheduler, config.budget).map_err(SimulatorError::Thread)?;
    let mut sink = TextSink::new(&mut *writer);
    let summary = stream_events(handle, &mut sink)?;

    if config.summary {
        sink.write_line(&format_summary(&summary));
    }
    sink.finish()?;

    info!("simulation ended: {}", summary.stop_reason);
    Ok(summary)
}

/// Forward events from a running simulation into `sink`
///
/// The simulation is cancelled as soon as the sink fails to write, and the
/// summary of the shortened run is returned. The write error itself stays in
/// the sink until [`TextSink::finish`].
pub fn stream_events<W: Write>(
    handle: SimulationHandle,
    sink: &mut TextSink<W>,
) -> Result<SimulationSummary, SimulatorError> {
    for event in handle.events().iter() {
        sink.emit(event);
        if sink.has_failed() {
            warn!("output failed, cancelling simulation");
            handle.cancel();
            break;
        }
    }
    let (_, summary) = handle.join().map_err(SimulatorError::Thread)?;
    Ok(summary)
}

/// Run a simulation, writing to `config.output` or stdout
pub fn run_to_configured_output(
    config: &SimulatorConfig,
) -> Result<SimulationSummary, SimulatorError> {
    match &config.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            run(config, &mut writer)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            run(config, &mut writer)
        }
    }
}

/// Driver errors
#[derive(Debug)]
pub enum SimulatorError {
    Config(ConfigError),
    Schedule(ScheduleError),
    Io(io::Error),
    /// Scheduler thread could not start or panicked
    Thread(String),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::Config(e) => write!(f, "{}", e),
            SimulatorError::Schedule(e) => write!(f, "{}", e),
            SimulatorError::Io(e) => write!(f, "I/O error: {}", e),
            SimulatorError::Thread(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Config(e) => Some(e),
            SimulatorError::Schedule(e) => Some(e),
            SimulatorError::Io(e) => Some(e),
            SimulatorError::Thread(_) => None,
        }
    }
}

impl From<ConfigError> for SimulatorError {
    fn from(e: ConfigError) -> Self {
        SimulatorError::Config(e)
    }
}

impl From<ScheduleError> for SimulatorError {
    fn from(e: ScheduleError) -> Self {
        SimulatorError::Schedule(e)
    }
}

impl From<io::Error> for SimulatorError {
    fn from(e: io::Error) -> Self {
        SimulatorError::Io(e)
    }
}
