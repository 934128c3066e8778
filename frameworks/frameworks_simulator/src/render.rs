//! Event Rendering
//!
//! Turns scheduling events and run summaries into the text the simulator
//! prints, one line per event.

use std::io::{self, Write};

use usecases_scheduling::{EventSink, SchedulingEvent, SimulationSummary};

/// Format one event as a log line (without trailing newline)
pub fn format_event(event: &SchedulingEvent) -> String {
    let mut line = format!(
        "Process {} executed at time {}. Remaining burst time: {}",
        event.process_id, event.time_of_execution, event.remaining_burst_time
    );
    if event.completed {
        line.push_str(". Process completed.");
    }
    line
}

/// Format the run summary block
pub fn format_summary(summary: &SimulationSummary) -> String {
    let completed = if summary.completed.is_empty() {
        "none".to_string()
    } else {
        summary
            .completed
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut text = format!(
        "Summary: {} events, final time {}, stopped: {}\nCompleted processes: {}\nProcesses still queued: {}",
        summary.events_emitted, summary.final_time, summary.stop_reason, completed, summary.pending
    );
    for (level, info) in summary.levels.iter().enumerate() {
        text.push_str(&format!(
            "\nQueue {}: {} quanta, peak length {}",
            level,
            info.quanta(),
            info.peak_len()
        ));
    }
    text
}

/// Event sink writing formatted lines to any writer
///
/// `emit` cannot fail, so the first write error is kept and reported by
/// [`TextSink::finish`]. Lines after a failed write are dropped.
pub struct TextSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Check if a write has failed
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Write a free-form line, such as the summary
    pub fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{}", line) {
            self.error = Some(e);
        }
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> EventSink for TextSink<W> {
    fn emit(&mut self, event: SchedulingEvent) {
        let line = format_event(&event);
        self.write_line(&line);
    }
}
