//! Simulation outcome model.
//!
//! An outcome is the final state of every process after a policy has run,
//! plus the execution timeline (the Gantt chart of CPU slices).

use serde::{Deserialize, Serialize};

use super::Process;

/// A contiguous execution interval of one process.
///
/// Covers `[start, end)` in simulated time units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Executing process ID.
    pub process_id: usize,
    /// First unit of the slice.
    pub start: i64,
    /// One past the last unit of the slice.
    pub end: i64,
    /// MLFQ queue level the slice ran at. `None` for single-queue policies.
    pub level: Option<usize>,
}

impl Slice {
    /// Creates a slice without a queue level.
    pub fn new(process_id: usize, start: i64, end: i64) -> Self {
        Self {
            process_id,
            start,
            end,
            level: None,
        }
    }

    /// Sets the queue level.
    pub fn at_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Slice length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Append-only execution timeline.
///
/// Adjacent slices of the same process at the same level are merged, so a
/// process running for several consecutive unit steps shows up once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an execution slice, merging it into the previous one when
    /// it directly continues it.
    pub fn record(&mut self, slice: Slice) {
        if slice.start >= slice.end {
            return;
        }
        if let Some(last) = self.slices.last_mut() {
            if last.process_id == slice.process_id
                && last.level == slice.level
                && last.end == slice.start
            {
                last.end = slice.end;
                return;
            }
        }
        self.slices.push(slice);
    }

    /// Recorded slices in chronological order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Consumes the timeline.
    pub fn into_slices(self) -> Vec<Slice> {
        self.slices
    }
}

/// Final result of one policy simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Name of the policy that produced this outcome.
    pub policy: String,
    /// Final process records, in input order.
    pub processes: Vec<Process>,
    /// Execution slices in chronological order.
    pub timeline: Vec<Slice>,
}

impl SimulationOutcome {
    /// Creates an outcome.
    pub fn new(policy: impl Into<String>, processes: Vec<Process>, timeline: Timeline) -> Self {
        Self {
            policy: policy.into(),
            processes,
            timeline: timeline.into_slices(),
        }
    }

    /// Waiting time per process, in input order.
    pub fn waiting_times(&self) -> Vec<i64> {
        self.processes.iter().map(|p| p.waiting_time).collect()
    }

    /// Turnaround time per process, in input order.
    pub fn turnaround_times(&self) -> Vec<i64> {
        self.processes.iter().map(|p| p.turnaround_time).collect()
    }

    /// The `(waiting_times, turnaround_times)` pair.
    pub fn times(&self) -> (Vec<i64>, Vec<i64>) {
        (self.waiting_times(), self.turnaround_times())
    }

    /// Looks up a process by its 1-based ID.
    pub fn process(&self, id: usize) -> Option<&Process> {
        id.checked_sub(1).and_then(|i| self.processes.get(i))
    }

    /// Slices executed by one process.
    pub fn slices_for(&self, id: usize) -> impl Iterator<Item = &Slice> {
        self.timeline.iter().filter(move |s| s.process_id == id)
    }

    /// Latest completion time (0 when nothing ran).
    pub fn makespan(&self) -> i64 {
        self.processes
            .iter()
            .filter_map(Process::finish_time)
            .max()
            .unwrap_or(0)
    }

    /// Whether every process completed.
    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(|p| p.completed)
    }
}
