//! Entities Layer: Simulated Processes
//!
//! Provides the process record scheduled by the multilevel queue simulator,
//! together with the random sources used to give each process its burst time.
//!
//! A process is plain data. It is owned by exactly one run queue at a time, or
//! by the scheduler loop while it executes a quantum. The only mutation it
//! supports is [`Process::run_quantum`].
//!
//! Randomness is injected through the [`RandomSource`] trait so callers can
//! swap the thread RNG for a seeded or scripted source.

pub mod process;
pub mod random_source;

// Re-export main types for convenience
pub use process::{Priority, Process, ProcessId, MAX_BURST_TIME, MIN_BURST_TIME};
pub use random_source::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
