//! Scheduler Functions
//!
//! Provides the multilevel queue scheduler and its simulation loop.
//!
//! Each iteration of the loop takes the head of the highest non-empty queue,
//! runs it for one quantum, puts it back at the tail of its own queue if it
//! still has burst time left, and emits one event. `current_time` advances by
//! one tick per scheduling decision, not per unit of burst time.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use entities_process::{Priority, Process, ProcessId};
use log::{debug, info, warn};

use crate::event::{EventSink, SchedulingEvent};
use crate::run_queue::{dequeue_process, enqueue_process, RunQueue, RunQueueInfo};

/// Burst time consumed by one execution slice
pub const DEFAULT_TIME_QUANTUM: i32 = 2;

/// Limit on the number of events a run may emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventBudget {
    /// Stop after this many events even if processes are still queued
    Capped(usize),
    /// Keep going until every queue is empty
    RunToCompletion,
}

impl EventBudget {
    /// Check whether another event may be emitted
    fn allows(self, emitted: usize) -> bool {
        match self {
            EventBudget::Capped(limit) => emitted < limit,
            EventBudget::RunToCompletion => true,
        }
    }
}

impl From<usize> for EventBudget {
    fn from(limit: usize) -> Self {
        EventBudget::Capped(limit)
    }
}

/// Why a simulation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every process completed
    QueuesDrained,
    /// The event budget was used up with processes still queued
    BudgetExhausted,
    /// The cancellation flag was raised
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::QueuesDrained => write!(f, "all processes completed"),
            StopReason::BudgetExhausted => write!(f, "event budget exhausted"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    /// Number of events emitted
    pub events_emitted: usize,
    /// Completed processes, in completion order
    pub completed: Vec<ProcessId>,
    /// Processes still queued when the run ended
    pub pending: usize,
    /// Value of the scheduler clock when the run ended
    pub final_time: u64,
    /// Why the run ended
    pub stop_reason: StopReason,
    /// Per-level statistics, lowest priority first
    pub levels: Vec<RunQueueInfo>,
}

/// Multilevel queue scheduler
///
/// Owns one FIFO per priority level. `num_queues` and the time quantum are
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Run queue holding every process that has not completed
    runq: RunQueue,
    /// Burst time consumed per execution
    time_quantum: i32,
}

impl Scheduler {
    /// Create a scheduler with `num_queues` empty queues and the default quantum
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidConfiguration`] if `num_queues` is zero.
    pub fn new(num_queues: usize) -> Result<Self, ScheduleError> {
        Self::with_quantum(num_queues, DEFAULT_TIME_QUANTUM)
    }

    /// Create a scheduler with a custom time quantum
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidConfiguration`] if `num_queues` is zero
    /// or `time_quantum` is not positive.
    pub fn with_quantum(num_queues: usize, time_quantum: i32) -> Result<Self, ScheduleError> {
        if num_queues == 0 {
            return Err(ScheduleError::InvalidConfiguration(
                "number of queues must be at least 1".to_string(),
            ));
        }
        if time_quantum <= 0 {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "time quantum must be positive, got {}",
                time_quantum
            )));
        }

        debug!(
            "created scheduler with {} queues, quantum {}",
            num_queues, time_quantum
        );
        Ok(Self {
            runq: RunQueue::new(num_queues),
            time_quantum,
        })
    }

    /// Get number of priority levels
    pub fn num_queues(&self) -> usize {
        self.runq.levels()
    }

    /// Get the time quantum
    pub fn time_quantum(&self) -> i32 {
        self.time_quantum
    }

    /// Get the run queue
    pub fn runq(&self) -> &RunQueue {
        &self.runq
    }

    /// Append a process to the tail of the queue for its priority
    ///
    /// # Errors
    /// No queue is modified on error, and the rejected process can be taken
    /// back with [`ScheduleError::into_process`].
    /// * [`ScheduleError::InvalidPriority`] - The priority is not below
    ///   [`num_queues`](Self::num_queues)
    /// * [`ScheduleError::CompletedProcess`] - The burst time is already used up
    pub fn enqueue(&mut self, process: Process) -> Result<(), ScheduleError> {
        enqueue_process(&mut self.runq, process)
    }

    /// Remove and return the head of the highest-priority non-empty queue
    pub fn dequeue_highest(&mut self) -> Option<Process> {
        dequeue_process(&mut self.runq)
    }

    /// Check if at least one queue holds a process
    pub fn has_pending_work(&self) -> bool {
        !self.runq.is_empty()
    }

    /// Run until the queues drain or `event_budget` events have been emitted
    ///
    /// A budget equal to the initial process count usually stops the run with
    /// processes still queued, since most need several quanta to finish.
    pub fn run_simulation<S: EventSink + ?Sized>(
        &mut self,
        event_budget: usize,
        sink: &mut S,
    ) -> SimulationSummary {
        self.run_loop(EventBudget::Capped(event_budget), sink, None)
    }

    /// Run until every process has completed
    pub fn run_to_completion<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> SimulationSummary {
        self.run_loop(EventBudget::RunToCompletion, sink, None)
    }

    /// Run with an explicit budget policy
    pub fn run_with_budget<S: EventSink + ?Sized>(
        &mut self,
        budget: EventBudget,
        sink: &mut S,
    ) -> SimulationSummary {
        self.run_loop(budget, sink, None)
    }

    /// Run with an external cancellation flag, checked once per iteration
    pub fn run_simulation_with_cancel<S: EventSink + ?Sized>(
        &mut self,
        budget: EventBudget,
        sink: &mut S,
        cancel: &AtomicBool,
    ) -> SimulationSummary {
        self.run_loop(budget, sink, Some(cancel))
    }

    fn run_loop<S: EventSink + ?Sized>(
        &mut self,
        budget: EventBudget,
        sink: &mut S,
        cancel: Option<&AtomicBool>,
    ) -> SimulationSummary {
        let mut current_time: u64 = 0;
        let mut events_emitted = 0;
        let mut completed = Vec::new();

        let stop_reason = loop {
            if !self.has_pending_work() {
                break StopReason::QueuesDrained;
            }
            if !budget.allows(events_emitted) {
                break StopReason::BudgetExhausted;
            }
            if cancel.is_some_and(|flag| flag.load(Ordering::Acquire)) {
                break StopReason::Cancelled;
            }

            let Some(mut process) = self.dequeue_highest() else {
                // Unreachable while this loop is the only owner of the queues.
                current_time += 1;
                continue;
            };

            let remaining = self.execute_process(&mut process);
            let event = SchedulingEvent {
                process_id: process.id(),
                priority: process.priority(),
                time_of_execution: current_time,
                remaining_burst_time: remaining,
                completed: remaining <= 0,
            };

            if event.completed {
                info!("Process {} completed.", event.process_id);
                completed.push(event.process_id);
            } else if let Err(err) = self.enqueue(process) {
                // Priority is fixed and the burst is positive here.
                warn!("dropping process {}: {}", event.process_id, err);
            }

            sink.emit(event);
            events_emitted += 1;
            current_time += 1;
        };

        let summary = SimulationSummary {
            events_emitted,
            completed,
            pending: self.runq.total_len(),
            final_time: current_time,
            stop_reason,
            levels: self.runq.infos(),
        };
        info!(
            "simulation stopped ({}) after {} events, {} processes pending",
            summary.stop_reason, summary.events_emitted, summary.pending
        );
        summary
    }

    /// Execute one quantum and return the remaining burst time
    fn execute_process(&mut self, process: &mut Process) -> i32 {
        self.runq.record_quantum(process.priority());
        let remaining = process.run_quantum(self.time_quantum);
        debug!(
            "process {} ran one quantum, {} burst time left",
            process.id(),
            remaining
        );
        remaining
    }
}

/// Scheduler error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Scheduler parameters are out of range
    InvalidConfiguration(String),
    /// Process priority has no matching queue
    InvalidPriority {
        /// Priority carried by the rejected process
        priority: Priority,
        /// Number of queues in the scheduler
        num_queues: usize,
        /// The rejected process, unchanged
        process: Process,
    },
    /// Process has already used up its burst time
    CompletedProcess {
        /// The rejected process, unchanged
        process: Process,
    },
}

impl ScheduleError {
    /// Take back the process an enqueue rejected, if any
    pub fn into_process(self) -> Option<Process> {
        match self {
            ScheduleError::InvalidConfiguration(_) => None,
            ScheduleError::InvalidPriority { process, .. }
            | ScheduleError::CompletedProcess { process } => Some(process),
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidConfiguration(reason) => {
                write!(f, "Invalid scheduler configuration: {}", reason)
            }
            ScheduleError::InvalidPriority {
                priority,
                num_queues,
                ..
            } => write!(
                f,
                "Invalid priority level {} (valid levels are 0..{})",
                priority, num_queues
            ),
            ScheduleError::CompletedProcess { process } => write!(
                f,
                "Process {} has already completed (burst time {})",
                process.id(),
                process.burst_time()
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(id: ProcessId, prio: usize, burst: i32) -> Process {
        Process::with_burst_time(id, Priority::new(prio), burst)
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = Scheduler::new(3).unwrap();
        assert_eq!(scheduler.num_queues(), 3);
        assert_eq!(scheduler.time_quantum(), DEFAULT_TIME_QUANTUM);
        assert!(!scheduler.has_pending_work());
        assert!(scheduler.runq().iter().all(|queue| queue.is_empty()));
    }

    #[test]
    fn test_zero_queues_rejected() {
        let err = Scheduler::new(0).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_non_positive_quantum_rejected() {
        assert!(matches!(
            Scheduler::with_quantum(2, 0),
            Err(ScheduleError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Scheduler::with_quantum(2, -3),
            Err(ScheduleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_enqueue_invalid_priority_leaves_state() {
        let mut scheduler = Scheduler::new(2).unwrap();
        scheduler.enqueue(process(1, 1, 4)).unwrap();

        let err = scheduler.enqueue(process(2, 5, 4)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidPriority {
                priority: Priority::new(5),
                num_queues: 2,
                process: process(2, 5, 4),
            }
        );
        assert_eq!(scheduler.runq().total_len(), 1);
    }

    #[test]
    fn test_rejected_process_is_handed_back() {
        let mut scheduler = Scheduler::new(2).unwrap();
        let rejected = scheduler
            .enqueue(process(77, 5, 9))
            .unwrap_err()
            .into_process()
            .unwrap();
        assert_eq!(rejected.id(), 77);
        assert_eq!(rejected.burst_time(), 9);
        assert_eq!(rejected.priority(), Priority::new(5));
        assert!(ScheduleError::InvalidConfiguration("x".into())
            .into_process()
            .is_none());
    }

    #[test]
    fn test_completed_process_is_not_scheduled() {
        let mut scheduler = Scheduler::new(1).unwrap();
        let err = scheduler.enqueue(process(1, 0, 0)).unwrap_err();
        assert!(matches!(err, ScheduleError::CompletedProcess { .. }));
        assert!(!scheduler.has_pending_work());

        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_simulation(5, &mut events);
        assert!(events.is_empty());
        assert_eq!(summary.stop_reason, StopReason::QueuesDrained);
    }

    #[test]
    fn test_single_process_runs_to_completion() {
        let mut scheduler = Scheduler::new(1).unwrap();
        scheduler.enqueue(process(1, 0, 5)).unwrap();

        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_simulation(10, &mut events);

        let remaining: Vec<i32> = events.iter().map(|e| e.remaining_burst_time).collect();
        let done: Vec<bool> = events.iter().map(|e| e.completed).collect();
        assert_eq!(remaining, vec![3, 1, -1]);
        assert_eq!(done, vec![false, false, true]);
        assert_eq!(summary.events_emitted, 3);
        assert_eq!(summary.stop_reason, StopReason::QueuesDrained);
        assert_eq!(summary.completed, vec![1]);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.final_time, 3);
    }

    #[test]
    fn test_round_robin_within_level() {
        let mut scheduler = Scheduler::new(1).unwrap();
        scheduler.enqueue(process(1, 0, 4)).unwrap();
        scheduler.enqueue(process(2, 0, 4)).unwrap();

        let mut events: Vec<SchedulingEvent> = Vec::new();
        scheduler.run_to_completion(&mut events);

        let ids: Vec<ProcessId> = events.iter().map(|e| e.process_id).collect();
        assert_eq!(ids, vec![1, 2, 1, 2]);
        let times: Vec<u64> = events.iter().map(|e| e.time_of_execution).collect();
        assert_eq!(times, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_budget_emits_nothing() {
        let mut scheduler = Scheduler::new(1).unwrap();
        scheduler.enqueue(process(1, 0, 4)).unwrap();

        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_simulation(0, &mut events);
        assert!(events.is_empty());
        assert_eq!(summary.stop_reason, StopReason::BudgetExhausted);
        assert_eq!(summary.pending, 1);
    }

    #[test]
    fn test_empty_scheduler_drains_immediately() {
        let mut scheduler = Scheduler::new(2).unwrap();
        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_simulation(5, &mut events);
        assert!(events.is_empty());
        assert_eq!(summary.stop_reason, StopReason::QueuesDrained);
        assert_eq!(summary.final_time, 0);
    }

    #[test]
    fn test_cancel_flag_stops_run() {
        let mut scheduler = Scheduler::new(1).unwrap();
        scheduler.enqueue(process(1, 0, 10)).unwrap();

        let cancel = AtomicBool::new(true);
        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_simulation_with_cancel(
            EventBudget::RunToCompletion,
            &mut events,
            &cancel,
        );
        assert!(events.is_empty());
        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert!(scheduler.has_pending_work());
    }

    #[test]
    fn test_quanta_recorded_per_level() {
        let mut scheduler = Scheduler::new(2).unwrap();
        scheduler.enqueue(process(1, 0, 3)).unwrap();
        scheduler.enqueue(process(2, 1, 1)).unwrap();

        let mut events: Vec<SchedulingEvent> = Vec::new();
        let summary = scheduler.run_to_completion(&mut events);
        let quanta: Vec<u64> = summary.levels.iter().map(RunQueueInfo::quanta).collect();
        assert_eq!(quanta, vec![2, 1]);
        assert!(summary.levels.iter().all(|info| info.peak_len() == 1));
    }

    #[test]
    fn test_schedule_error_display() {
        let err = ScheduleError::InvalidConfiguration("number of queues must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid scheduler configuration: number of queues must be at least 1"
        );

        let err = ScheduleError::InvalidPriority {
            priority: Priority::new(3),
            num_queues: 2,
            process: process(1, 3, 4),
        };
        assert_eq!(err.to_string(), "Invalid priority level 3 (valid levels are 0..2)");

        let err = ScheduleError::CompletedProcess {
            process: process(6, 0, -1),
        };
        assert_eq!(err.to_string(), "Process 6 has already completed (burst time -1)");
    }

    #[test]
    fn test_schedule_error_error_trait() {
        let error = ScheduleError::InvalidConfiguration("x".into());
        let error_ref: &dyn std::error::Error = &error;
        assert!(error_ref.source().is_none());
    }

    #[test]
    fn test_event_budget_from_usize() {
        assert_eq!(EventBudget::from(4), EventBudget::Capped(4));
        assert!(EventBudget::Capped(2).allows(1));
        assert!(!EventBudget::Capped(2).allows(2));
        assert!(EventBudget::RunToCompletion.allows(usize::MAX));
    }
}
