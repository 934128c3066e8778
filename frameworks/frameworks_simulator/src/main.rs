//! Multilevel Queue Simulator Binary Entry Point
//!
//! Parses arguments, installs the stderr logger, resolves the configuration
//! and runs one simulation. Event lines go to stdout (or `--output`),
//! diagnostics and errors to stderr.

use std::process;

use clap::Parser;

use frameworks_simulator::logger;
use frameworks_simulator::{run_to_configured_output, EnvOverrides, SimulatorArgs, SimulatorConfig};

fn main() {
    let args = SimulatorArgs::parse();
    let env = EnvOverrides::from_env();

    if let Err(e) = logger::init(logger::parse_level(env.log_level.as_deref())) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let config = match SimulatorConfig::resolve(&args, &env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_to_configured_output(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
