//! Diagnostic Logger
//!
//! Implements the `log` crate interface and writes records to stderr, so that
//! diagnostics never mix with the event lines on stdout.
//!
//! Format:
//!
//! ```text
//! LEVEL [thread] [module::path] message
//! ```

use std::io::Write;
use std::thread;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Level used when MLQ_LOG is unset or unrecognised
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(
            record.level(),
            thread::current().name().unwrap_or("unnamed"),
            record.module_path().unwrap_or("unknown"),
            &record.args().to_string(),
        );
        // Nowhere left to report a failed diagnostic write.
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn format_record(level: Level, thread: &str, module: &str, message: &str) -> String {
    format!("{:>5} [{}] [{}] {}", level, thread, module, message)
}

/// Parse a level name such as `"info"` or `"TRACE"`
///
/// Returns [`DEFAULT_LEVEL`] for `None` or anything unrecognised.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
        Some("OFF") => LevelFilter::Off,
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        _ => DEFAULT_LEVEL,
    }
}

/// Install the stderr logger
///
/// # Errors
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
