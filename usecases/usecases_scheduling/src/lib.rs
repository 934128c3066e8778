//! Use Cases Layer: Multilevel Queue Scheduling
//!
//! Provides the scheduling core of the simulator: a fixed set of FIFO run
//! queues indexed by priority, and a loop that repeatedly runs the head of the
//! highest non-empty queue for one time quantum.
//!
//! ## Overview
//!
//! Queues are numbered `0..num_queues`; a higher index means a higher
//! priority. Within a level, processes are served round-robin: a process that
//! still has burst time left after its quantum goes back to the tail of its own
//! queue. A process whose burst time reaches zero or below is discarded.
//!
//! Each scheduling decision emits one [`SchedulingEvent`] to an [`EventSink`]
//! supplied by the caller. The run stops when every queue is empty or when the
//! event budget is used up, whichever comes first.
//!
//! ## Modules
//!
//! - **[`run_queue`](run_queue/index.html)**: Per-level FIFO queues and their statistics
//!
//! - **[`scheduler`](scheduler/index.html)**: The scheduler, its error type and
//!   the simulation loop
//!
//! - **[`event`](event/index.html)**: Event records and sinks
//!
//! - **[`initialization`](initialization/index.html)**: Synthetic workload generation
//!
//! - **[`threads`](threads/index.html)**: Running a simulation on a worker
//!   thread with an ordered event channel
//!
//! ## Ownership
//!
//! The scheduler owns its queues and every queued process by value. No locks
//! are used in the core; the worker-thread runner moves the whole scheduler
//! into its thread and talks to the caller over a channel.

pub mod event;
pub mod initialization;
pub mod run_queue;
pub mod scheduler;
pub mod threads;

pub use event::{EventSink, SchedulingEvent};
pub use initialization::{build_workload, generate_processes, populate_scheduler};
pub use run_queue::{dequeue_process, enqueue_process, RunPrioQueue, RunQueue, RunQueueInfo};
pub use scheduler::{
    EventBudget, ScheduleError, Scheduler, SimulationSummary, StopReason, DEFAULT_TIME_QUANTUM,
};
pub use threads::{spawn_simulation, SimulationHandle};
