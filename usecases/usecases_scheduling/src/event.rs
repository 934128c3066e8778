//! Scheduling Events
//!
//! One event is produced per scheduling decision, in the order the decisions
//! are made. Sinks only receive events; nothing flows back into the scheduler.

use std::sync::mpsc::Sender;

use entities_process::{Priority, ProcessId};
use log::debug;

/// Record of one quantum executed by one process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingEvent {
    /// Process that ran
    pub process_id: ProcessId,
    /// Queue the process was taken from
    pub priority: Priority,
    /// Scheduler tick at which the quantum started
    pub time_of_execution: u64,
    /// Burst time left after the quantum
    pub remaining_burst_time: i32,
    /// Whether the process finished with this quantum
    pub completed: bool,
}

/// Consumer of scheduling events
pub trait EventSink {
    /// Receive the next event
    fn emit(&mut self, event: SchedulingEvent);
}

impl EventSink for Vec<SchedulingEvent> {
    fn emit(&mut self, event: SchedulingEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<SchedulingEvent> {
    fn emit(&mut self, event: SchedulingEvent) {
        if self.send(event).is_err() {
            // The receiver hung up; the run keeps going without an audience.
            debug!("event receiver dropped, discarding event for process {}", event.process_id);
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: SchedulingEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: SchedulingEvent) {
        (**self).emit(event);
    }
}
