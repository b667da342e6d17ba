//! Process (job) model.
//!
//! A process is a unit of CPU work with an arrival instant and a total
//! service demand. Every policy simulates on its own copy of the process
//! records and mutates only that copy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::validation::validate_workload;

/// Per-process simulation record.
///
/// # Time Representation
/// All times are integer simulated time units relative to t=0.
///
/// # Invariants
/// - `0 <= remaining_time <= service_time`
/// - once `completed`, `turnaround_time - waiting_time == service_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// 1-based identifier, equal to the input position + 1.
    pub id: usize,
    /// Instant at which the process becomes eligible.
    pub arrival_time: i64,
    /// Total CPU time required. Never mutated.
    pub service_time: i64,
    /// CPU time still required.
    pub remaining_time: i64,
    /// Time spent eligible but not executing.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
    /// Whether the process has finished.
    pub completed: bool,
    /// MLFQ queue level (0 = highest). `None` until first queued.
    pub priority_level: Option<usize>,
}

impl Process {
    /// Creates a fresh, unscheduled process without validation.
    ///
    /// Public callers go through [`Process::from_inputs`].
    pub(crate) fn new(id: usize, arrival_time: i64, service_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            service_time,
            remaining_time: service_time,
            waiting_time: 0,
            turnaround_time: 0,
            completed: false,
            priority_level: None,
        }
    }

    /// Builds process records from parallel input sequences.
    ///
    /// IDs are assigned 1..=n in input order; that order is the canonical
    /// ordering of every output sequence.
    ///
    /// # Errors
    /// `InvalidInput` if the lengths differ, the input is empty, an arrival
    /// is negative, or a service time is not positive.
    pub fn from_inputs(arrival_times: &[i64], service_times: &[i64]) -> Result<Vec<Self>> {
        validate_workload(arrival_times, service_times).map_err(SimulationError::InvalidInput)?;

        Ok(arrival_times
            .iter()
            .zip(service_times)
            .enumerate()
            .map(|(i, (&arrival, &service))| Self::new(i + 1, arrival, service))
            .collect())
    }

    /// Whether the process may be selected at `time`.
    #[inline]
    pub fn is_ready(&self, time: i64) -> bool {
        !self.completed && self.arrival_time <= time
    }

    /// Consumes up to `units` of CPU time. Returns the units actually used.
    pub fn execute(&mut self, units: i64) -> i64 {
        let used = units.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// Marks the process finished at `finish_time`.
    ///
    /// Turnaround is `finish - arrival`; waiting is derived from it so the
    /// `turnaround - waiting == service` identity holds by construction.
    pub fn complete(&mut self, finish_time: i64) {
        self.remaining_time = 0;
        self.turnaround_time = finish_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.service_time;
        self.completed = true;
    }

    /// Completion instant (`arrival + turnaround`), if finished.
    pub fn finish_time(&self) -> Option<i64> {
        self.completed
            .then_some(self.arrival_time + self.turnaround_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_from_inputs_ids_follow_input_order() {
        let procs = Process::from_inputs(&[3, 0, 1], &[2, 4, 6]).unwrap();
        assert_eq!(procs.len(), 3);
        assert_eq!(procs[0].id, 1);
        assert_eq!(procs[0].arrival_time, 3);
        assert_eq!(procs[2].id, 3);
        assert_eq!(procs[2].remaining_time, 6);
        assert!(procs.iter().all(|p| !p.completed && p.priority_level.is_none()));
    }

    #[test]
    fn test_from_inputs_rejects_bad_input() {
        let err = Process::from_inputs(&[0, 1], &[1]).unwrap_err();
        match err {
            SimulationError::InvalidInput(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::LengthMismatch)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(Process::from_inputs(&[], &[]).is_err());
        assert!(Process::from_inputs(&[0], &[0]).is_err());
        assert!(Process::from_inputs(&[-1], &[3]).is_err());
        assert!(Process::from_inputs(&[i64::MAX], &[1]).is_err());
    }

    #[test]
    fn test_execute_caps_at_remaining() {
        let mut p = Process::new(1, 0, 5);
        assert_eq!(p.execute(3), 3);
        assert_eq!(p.remaining_time, 2);
        assert_eq!(p.execute(7), 2);
        assert_eq!(p.remaining_time, 0);
    }

    #[test]
    fn test_complete_derives_waiting() {
        let mut p = Process::new(1, 4, 9);
        p.complete(33);
        assert!(p.completed);
        assert_eq!(p.turnaround_time, 29);
        assert_eq!(p.waiting_time, 20);
        assert_eq!(p.finish_time(), Some(33));
    }

    #[test]
    fn test_is_ready() {
        let mut p = Process::new(1, 5, 1);
        assert!(!p.is_ready(4));
        assert!(p.is_ready(5));
        p.complete(6);
        assert!(!p.is_ready(10));
    }
}
