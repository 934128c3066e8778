//! Process Entity
//!
//! Provides the Process struct and related types for the scheduler simulator.
//!
//! Every process arrives at time 0 and carries a remaining burst time that the
//! scheduler lowers one quantum at a time. A process whose burst time reaches
//! zero or below has completed.

use std::fmt;

use crate::random_source::RandomSource;

/// Process ID type
pub type ProcessId = u64;

/// Smallest burst time drawn for a new process
pub const MIN_BURST_TIME: i32 = 1;

/// Largest burst time drawn for a new process
pub const MAX_BURST_TIME: i32 = 10;

/// Priority level of a process
///
/// The level is the index of the run queue that owns the process. Higher
/// indices are scheduled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(usize);

impl Priority {
    /// Create a priority for queue index `level`
    pub const fn new(level: usize) -> Self {
        Self(level)
    }

    /// Convert priority level to queue index
    pub fn as_index(self) -> usize {
        self.0
    }
}

impl From<usize> for Priority {
    fn from(level: usize) -> Self {
        Self(level)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated process
///
/// The priority is fixed for the whole lifetime of the process, so a process
/// always returns to the same queue after running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    /// Process identifier
    id: ProcessId,
    /// Arrival time (all processes arrive at the start of the run)
    arrival_time: u64,
    /// Remaining CPU time; zero or below once the process has completed
    burst_time: i32,
    /// Queue the process belongs to
    priority: Priority,
}

impl Process {
    /// Create a process with a random burst time in
    /// `[MIN_BURST_TIME, MAX_BURST_TIME]`
    ///
    /// # Arguments
    /// * `id` - Process identifier
    /// * `priority` - Queue the process belongs to
    /// * `rng` - Source of the burst time draw
    pub fn new<R: RandomSource + ?Sized>(id: ProcessId, priority: Priority, rng: &mut R) -> Self {
        let burst_time = rng.next_in_range(i64::from(MIN_BURST_TIME), i64::from(MAX_BURST_TIME));
        let burst_time = burst_time.clamp(i64::from(MIN_BURST_TIME), i64::from(MAX_BURST_TIME)) as i32;
        Self::with_burst_time(id, priority, burst_time)
    }

    /// Create a process with a fixed burst time
    pub fn with_burst_time(id: ProcessId, priority: Priority, burst_time: i32) -> Self {
        Self {
            id,
            arrival_time: 0,
            burst_time,
            priority,
        }
    }

    /// Get process ID
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Get arrival time
    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    /// Get remaining burst time
    pub fn burst_time(&self) -> i32 {
        self.burst_time
    }

    /// Get priority level
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Check whether the process has used up its burst time
    pub fn is_completed(&self) -> bool {
        self.burst_time <= 0
    }

    /// Execute one time quantum
    ///
    /// Lowers the remaining burst time by exactly `quantum`, even past zero,
    /// and returns the new remaining time. The result saturates at `i32::MIN`.
    pub fn run_quantum(&mut self, quantum: i32) -> i32 {
        self.burst_time = self.burst_time.saturating_sub(quantum);
        self.burst_time
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} (priority {}, burst {})",
            self.id, self.priority, self.burst_time
        )
    }
}
