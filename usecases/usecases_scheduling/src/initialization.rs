//! Workload Initialization
//!
//! Builds the synthetic processes a simulation runs on and loads them into a
//! scheduler before the run starts.

use entities_process::{Priority, Process, ProcessId, RandomSource};
use log::debug;

use crate::scheduler::{ScheduleError, Scheduler};

/// Generate `num_processes` processes with ids `1..=num_processes`
///
/// For each process the priority is drawn first, uniformly in
/// `[0, num_queues)`, then the burst time.
///
/// # Errors
/// Returns [`ScheduleError::InvalidConfiguration`] if `num_queues` is zero.
pub fn generate_processes<R: RandomSource + ?Sized>(
    num_queues: usize,
    num_processes: usize,
    rng: &mut R,
) -> Result<Vec<Process>, ScheduleError> {
    if num_queues == 0 {
        return Err(ScheduleError::InvalidConfiguration(
            "number of queues must be at least 1".to_string(),
        ));
    }

    let highest = i64::try_from(num_queues - 1).unwrap_or(i64::MAX);
    let processes = (1..=num_processes as ProcessId)
        .map(|id| {
            let level = rng.next_in_range(0, highest);
            // A draw outside the range becomes a priority no queue accepts.
            let priority = Priority::new(usize::try_from(level).unwrap_or(usize::MAX));
            let process = Process::new(id, priority, &mut *rng);
            debug!("generated {}", process);
            process
        })
        .collect();

    Ok(processes)
}

/// Enqueue every process into `scheduler`
///
/// # Returns
/// * `Ok(count)` - Number of processes enqueued
/// * `Err(ScheduleError)` - First process whose priority has no queue;
///   processes before it stay enqueued
pub fn populate_scheduler<I>(scheduler: &mut Scheduler, processes: I) -> Result<usize, ScheduleError>
where
    I: IntoIterator<Item = Process>,
{
    let mut count = 0;
    for process in processes {
        scheduler.enqueue(process)?;
        count += 1;
    }
    Ok(count)
}

/// Create a scheduler and load it with a random workload
///
/// # Arguments
/// * `num_queues` - Number of priority levels
/// * `num_processes` - Number of processes to generate
/// * `time_quantum` - Burst time consumed per execution
/// * `rng` - Source of priorities and burst times
pub fn build_workload<R: RandomSource + ?Sized>(
    num_queues: usize,
    num_processes: usize,
    time_quantum: i32,
    rng: &mut R,
) -> Result<Scheduler, ScheduleError> {
    let mut scheduler = Scheduler::with_quantum(num_queues, time_quantum)?;
    let processes = generate_processes(num_queues, num_processes, rng)?;
    populate_scheduler(&mut scheduler, processes)?;
    Ok(scheduler)
}
