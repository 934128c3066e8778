//! Scheduler Thread Management
//!
//! Runs a simulation on a dedicated thread so the caller can render events
//! while they are produced. The scheduler is moved into the thread, and events
//! reach the caller through an `mpsc` channel in emission order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use log::debug;

use crate::event::SchedulingEvent;
use crate::scheduler::{EventBudget, Scheduler, SimulationSummary};

/// Handle to a simulation running on a worker thread
pub struct SimulationHandle {
    /// Events in emission order; closes when the run ends
    events: Receiver<SchedulingEvent>,
    /// Flag checked by the worker once per iteration
    cancel: Arc<AtomicBool>,
    /// Worker thread, returning the scheduler and the run summary
    handle: thread::JoinHandle<(Scheduler, SimulationSummary)>,
}

impl SimulationHandle {
    /// Get the event receiver
    pub fn events(&self) -> &Receiver<SchedulingEvent> {
        &self.events
    }

    /// Ask the worker to stop before its next scheduling decision
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Wait for the worker to finish
    ///
    /// # Returns
    /// * `Ok((scheduler, summary))` - The scheduler with any unfinished
    ///   processes still queued, and the run summary
    /// * `Err(String)` - The worker thread panicked
    pub fn join(self) -> Result<(Scheduler, SimulationSummary), String> {
        self.handle
            .join()
            .map_err(|_| "Scheduler thread panicked".to_string())
    }
}

/// Start a simulation on a new thread
///
/// # Arguments
/// * `scheduler` - Scheduler loaded with processes; moved into the thread
/// * `budget` - Event budget for the run
///
/// # Returns
/// * `Ok(SimulationHandle)` - Handle for reading events and joining
/// * `Err(String)` - The thread could not be spawned
pub fn spawn_simulation(
    scheduler: Scheduler,
    budget: EventBudget,
) -> Result<SimulationHandle, String> {
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_for_thread = Arc::clone(&cancel);

    let handle = thread::Builder::new()
        .name("mlq_sched".to_string())
        .spawn(move || {
            let mut scheduler = scheduler;
            let mut tx = tx;
            debug!("scheduler thread started");
            let summary =
                scheduler.run_simulation_with_cancel(budget, &mut tx, &cancel_for_thread);
            (scheduler, summary)
        })
        .map_err(|e| format!("Failed to create scheduler thread: {}", e))?;

    Ok(SimulationHandle {
        events: rx,
        cancel,
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::StopReason;
    use entities_process::{Priority, Process};

    #[test]
    fn test_threaded_run_matches_inline_run() {
        let mut inline = Scheduler::new(3).unwrap();
        for (id, prio, burst) in [(1, 0, 5), (2, 2, 3), (3, 1, 8), (4, 2, 1)] {
            inline
                .enqueue(Process::with_burst_time(id, Priority::new(prio), burst))
                .unwrap();
        }
        let threaded = inline.clone();

        let mut expected: Vec<SchedulingEvent> = Vec::new();
        let expected_summary = inline.run_to_completion(&mut expected);

        let handle = spawn_simulation(threaded, EventBudget::RunToCompletion).unwrap();
        let received: Vec<SchedulingEvent> = handle.events().iter().collect();
        let (scheduler, summary) = handle.join().unwrap();

        assert_eq!(received, expected);
        assert_eq!(summary, expected_summary);
        assert!(!scheduler.has_pending_work());
    }

    #[test]
    fn test_cancel_running_simulation() {
        let mut scheduler = Scheduler::new(1).unwrap();
        scheduler
            .enqueue(Process::with_burst_time(1, Priority::new(0), 10))
            .unwrap();

        // Cancel is raised after spawn, so the worker may run a few quanta first.
        let handle = spawn_simulation(scheduler, EventBudget::RunToCompletion).unwrap();
        handle.cancel();
        assert!(handle.is_cancelled());
        let received = handle.events().iter().count();
        let (_, summary) = handle.join().unwrap();

        assert_eq!(received, summary.events_emitted);
        assert!(matches!(
            summary.stop_reason,
            StopReason::Cancelled | StopReason::QueuesDrained
        ));
    }
}
