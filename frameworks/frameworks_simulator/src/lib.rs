//! Frameworks Layer: Simulator Driver
//!
//! Command-line front end for the multilevel queue scheduler.
//!
//! ## Overview
//!
//! The `frameworks_simulator` crate is the outermost layer of the simulator.
//! It resolves the run configuration from arguments and environment, builds a
//! random workload, runs it through [`usecases_scheduling`] and renders the
//! resulting events as text.
//!
//! ## Modules
//!
//! - **[`args`](args/index.html)**: Command-line arguments (clap)
//! - **[`env`](env/index.html)**: Environment fallbacks
//! - **[`config`](config/index.html)**: Validation and merging into a [`SimulatorConfig`]
//! - **[`logger`](logger/index.html)**: stderr backend for the `log` facade
//! - **[`render`](render/index.html)**: Event and summary formatting
//! - **[`driver`](driver/index.html)**: Runs a configured simulation
//!
//! ## See Also
//!
//! - [`usecases_scheduling`](../usecases_scheduling/index.html): Scheduler and run loop
//! - [`entities_process`](../entities_process/index.html): Process and random sources

pub mod args;
pub mod config;
pub mod driver;
pub mod env;
pub mod logger;
pub mod render;

pub use args::SimulatorArgs;
pub use config::{ConfigError, SimulatorConfig};
pub use driver::{run, run_to_configured_output, stream_events, SimulatorError};
pub use env::EnvOverrides;
pub use render::{format_event, format_summary, TextSink};
