//! Run Queue Management
//!
//! Provides run queue data structures and operations for scheduling processes.
//!
//! The run queue holds one FIFO per priority level. The number of levels is
//! fixed when the queue is created and priorities map directly to indices, so
//! the levels live in a `Vec` rather than a map.

use std::collections::VecDeque;

use entities_process::{Priority, Process};
use log::trace;

use crate::scheduler::ScheduleError;

/// Run queue information for a priority level
///
/// Tracks the longest length seen and the number of quanta executed for
/// processes at a priority level. The current length is the queue's own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunQueueInfo {
    /// Longest length observed since creation
    peak_len: usize,
    /// Quanta executed at this priority level
    quanta: u64,
}

impl RunQueueInfo {
    /// Get the longest length observed
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Get quanta executed at this level
    pub fn quanta(&self) -> u64 {
        self.quanta
    }

    fn observe_len(&mut self, len: usize) {
        self.peak_len = self.peak_len.max(len);
    }

    fn add_quantum(&mut self) {
        self.quanta += 1;
    }
}

/// FIFO queue for a single priority level
#[derive(Debug, Clone, Default)]
pub struct RunPrioQueue {
    /// Queue of processes (FIFO)
    queue: VecDeque<Process>,
    /// Statistics for this level
    info: RunQueueInfo,
}

impl RunPrioQueue {
    /// Create a new priority queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the length of the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Iterate over queued processes from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.queue.iter()
    }

    /// Get statistics for this level
    pub fn info(&self) -> &RunQueueInfo {
        &self.info
    }

    /// Enqueue a process at the end of the queue
    pub fn enqueue(&mut self, process: Process) {
        self.queue.push_back(process);
        self.info.observe_len(self.queue.len());
    }

    /// Dequeue a process from the front of the queue
    pub fn dequeue(&mut self) -> Option<Process> {
        self.queue.pop_front()
    }

    /// Record a quantum executed by a process from this level
    pub(crate) fn record_quantum(&mut self) {
        self.info.add_quantum();
    }
}

/// Run queue for a scheduler
///
/// Maintains one [`RunPrioQueue`] per priority level. Level 0 is the lowest
/// priority, the last level the highest.
#[derive(Debug, Clone)]
pub struct RunQueue {
    /// Priority queues, indexed by priority level
    prio_queues: Vec<RunPrioQueue>,
}

impl RunQueue {
    /// Create a new run queue with `levels` empty priority queues
    ///
    /// Callers validate `levels`; [`Scheduler::new`](crate::Scheduler::new)
    /// rejects zero.
    pub fn new(levels: usize) -> Self {
        Self {
            prio_queues: (0..levels).map(|_| RunPrioQueue::new()).collect(),
        }
    }

    /// Number of priority levels
    pub fn levels(&self) -> usize {
        self.prio_queues.len()
    }

    /// Total number of queued processes across all levels
    pub fn total_len(&self) -> usize {
        self.prio_queues.iter().map(RunPrioQueue::len).sum()
    }

    /// Check if every level is empty
    pub fn is_empty(&self) -> bool {
        self.prio_queues.iter().all(RunPrioQueue::is_empty)
    }

    /// Iterate over levels from lowest to highest priority
    pub fn iter(&self) -> impl Iterator<Item = &RunPrioQueue> {
        self.prio_queues.iter()
    }

    /// Statistics for every level, lowest priority first
    pub fn infos(&self) -> Vec<RunQueueInfo> {
        self.prio_queues.iter().map(|queue| *queue.info()).collect()
    }

    fn level_mut(&mut self, prio: Priority) -> Option<&mut RunPrioQueue> {
        self.prio_queues.get_mut(prio.as_index())
    }

    /// Record a quantum executed at `prio`
    pub(crate) fn record_quantum(&mut self, prio: Priority) {
        if let Some(queue) = self.level_mut(prio) {
            queue.record_quantum();
        }
    }
}

/// Enqueue a process into the queue matching its priority
///
/// # Arguments
/// * `runq` - Run queue to enqueue into
/// * `process` - Process to enqueue
///
/// # Errors
/// The run queue is left untouched and the process is returned inside the
/// error:
/// * [`ScheduleError::InvalidPriority`] - The priority has no matching level
/// * [`ScheduleError::CompletedProcess`] - The process has no burst time left
pub fn enqueue_process(runq: &mut RunQueue, process: Process) -> Result<(), ScheduleError> {
    let prio = process.priority();
    let levels = runq.levels();
    let Some(queue) = runq.level_mut(prio) else {
        return Err(ScheduleError::InvalidPriority {
            priority: prio,
            num_queues: levels,
            process,
        });
    };
    if process.is_completed() {
        return Err(ScheduleError::CompletedProcess { process });
    }

    trace!("enqueue process {} at priority {}", process.id(), prio);
    queue.enqueue(process);
    Ok(())
}

/// Dequeue the head of the highest-priority non-empty queue
///
/// Levels are scanned from the highest index down to 0. Within a level the
/// earliest enqueued process is returned first.
///
/// # Returns
/// * `Some(process)` - Process removed from the queue
/// * `None` - Every level is empty
pub fn dequeue_process(runq: &mut RunQueue) -> Option<Process> {
    let process = runq
        .prio_queues
        .iter_mut()
        .rev()
        .find(|queue| !queue.is_empty())
        .and_then(RunPrioQueue::dequeue)?;

    trace!("dequeue process {} from priority {}", process.id(), process.priority());
    Some(process)
}
