//! Integration tests for frameworks_simulator
//!
//! Drives the simulator from parsed arguments through configuration to the
//! rendered event log, including `--output` files.

use std::fs;

use clap::Parser;
use frameworks_simulator::{
    run, run_to_configured_output, ConfigError, EnvOverrides, SimulatorArgs, SimulatorConfig,
    SimulatorError,
};
use usecases_scheduling::{EventBudget, StopReason};

fn resolve(argv: &[&str], env: &EnvOverrides) -> Result<SimulatorConfig, ConfigError> {
    let mut full = vec!["mlq-sim"];
    full.extend_from_slice(argv);
    SimulatorConfig::resolve(&SimulatorArgs::parse_from(full), env)
}

#[test]
fn test_command_line_to_event_log() {
    let config = resolve(&["--queues", "3", "--processes", "4", "--seed", "9"], &EnvOverrides::default())
        .unwrap();
    assert_eq!(config.budget, EventBudget::Capped(4));

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.events_emitted, 4);
    assert_eq!(text.lines().count(), 4);
    assert!(text
        .lines()
        .all(|line| line.starts_with("Process ") && line.contains("Remaining burst time: ")));
}

#[test]
fn test_environment_only_configuration() {
    let env = EnvOverrides::from_lookup(|key| match key {
        "MLQ_QUEUES" => Some("2".to_string()),
        "MLQ_PROCESSES" => Some("3".to_string()),
        "MLQ_SEED" => Some("1".to_string()),
        _ => None,
    });
    let config = resolve(&["--run-to-completion"], &env).unwrap();
    assert_eq!(config.num_queues, 2);
    assert_eq!(config.num_processes, 3);
    assert_eq!(config.seed, Some(1));

    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap();
    assert_eq!(summary.stop_reason, StopReason::QueuesDrained);
    assert_eq!(summary.pending, 0);
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.log");
    let path_arg = path.to_string_lossy().to_string();

    let config = resolve(
        &["-q", "2", "-p", "5", "--seed", "3", "--summary", "-o", &path_arg],
        &EnvOverrides::default(),
    )
    .unwrap();
    let summary = run_to_configured_output(&config).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let event_lines = text.lines().filter(|line| line.starts_with("Process ")).count();
    assert_eq!(event_lines, summary.events_emitted);
    assert!(text.contains("Summary: 5 events"));
}

#[test]
fn test_output_file_matches_in_memory_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.txt");
    let path_arg = path.to_string_lossy().to_string();
    let env = EnvOverrides::default();

    let to_file = resolve(&["-q", "4", "-p", "6", "--seed", "21", "-o", &path_arg], &env).unwrap();
    run_to_configured_output(&to_file).unwrap();

    let in_memory = resolve(&["-q", "4", "-p", "6", "--seed", "21"], &env).unwrap();
    let mut out = Vec::new();
    run(&in_memory, &mut out).unwrap();

    assert_eq!(fs::read(&path).unwrap(), out);
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("events.log");
    let path_arg = path.to_string_lossy().to_string();

    let config = resolve(&["-q", "1", "-p", "1", "-o", &path_arg], &EnvOverrides::default()).unwrap();
    let err = run_to_configured_output(&config).unwrap_err();
    assert!(matches!(err, SimulatorError::Io(_)));
    assert!(err.to_string().starts_with("I/O error: "));
}

#[test]
fn test_invalid_input_messages() {
    let env = EnvOverrides::default();
    assert_eq!(
        resolve(&["-q", "x", "-p", "2"], &env).unwrap_err().to_string(),
        "Invalid input. Please enter valid positive integers for the number of queues and processes."
    );
    assert_eq!(
        resolve(&["-q", "0", "-p", "2"], &env).unwrap_err().to_string(),
        "Number of queues and processes must be positive integers."
    );
}

#[test]
fn test_single_queue_single_process() {
    let config = resolve(&["-q", "1", "-p", "1", "--seed", "5", "--run-to-completion"], &EnvOverrides::default())
        .unwrap();
    let mut out = Vec::new();
    let summary = run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.completed, vec![1]);
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("Process 1 executed at time "));
    assert!(last.ends_with(". Process completed."));
}
