//! CPU scheduling policies.
//!
//! Each policy is an independent simulator over its own copy of the
//! process records. Policies are plain values (`Send + Sync`), so separate
//! simulations can run on separate threads without coordination.
//!
//! # Usage
//!
//! ```
//! use u_procsim::models::Process;
//! use u_procsim::policies::{RoundRobin, SchedulingPolicy};
//!
//! let processes = Process::from_inputs(&[0, 1, 3], &[5, 2, 4]).unwrap();
//! let policy = RoundRobin::new(2).unwrap();
//! let outcome = policy.simulate(&processes);
//! assert!(outcome.all_completed());
//! ```
//!
//! # Tie-breaking
//!
//! Every selection is a linear scan in process-ID order that keeps the
//! first extremum found, so ties resolve to the lowest ID (APSA resolves
//! to the earliest ready-list position). Results are fully deterministic.
//!
//! # References
//!
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

mod apsa;
mod fcfs;
mod hrrn;
mod mlfq;
mod round_robin;
mod spn;
mod srt;

pub use apsa::Apsa;
pub use fcfs::Fcfs;
pub use hrrn::Hrrn;
pub use mlfq::Mlfq;
pub use round_robin::RoundRobin;
pub use spn::Spn;
pub use srt::Srt;

use std::fmt::Debug;

use crate::models::{Process, SimulationOutcome};

/// A CPU scheduling discipline.
///
/// # Contract
/// `simulate` receives validated, unscheduled process records (see
/// [`Process::from_inputs`]) and returns them completed, in the same
/// order, together with the execution timeline. It never mutates shared
/// state; calling it twice with the same input yields identical outcomes.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short policy name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Runs the simulation to completion.
    ///
    /// # Preconditions
    /// `processes` must come from [`Process::from_inputs`] (or
    /// [`Workload::processes`](crate::workload::Workload::processes)), which
    /// rejects empty workloads, negative arrivals, non-positive service times
    /// and clock overflow. Hand-built records are not re-validated here.
    fn simulate(&self, processes: &[Process]) -> SimulationOutcome;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Earliest arrival among processes that have not completed.
///
/// Used by the idle path: advancing straight to this instant is equivalent
/// to stepping one unit at a time until something becomes eligible.
pub(crate) fn next_arrival(procs: &[Process]) -> Option<i64> {
    procs
        .iter()
        .filter(|p| !p.completed)
        .map(|p| p.arrival_time)
        .min()
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::workload::WorkloadGenerator;

    pub const SAMPLE_ARRIVALS: [i64; 5] = [0, 1, 3, 4, 7];
    pub const SAMPLE_SERVICES: [i64; 5] = [10, 2, 5, 9, 7];

    pub fn sample() -> Vec<Process> {
        Process::from_inputs(&SAMPLE_ARRIVALS, &SAMPLE_SERVICES).unwrap()
    }

    pub fn procs(arrivals: &[i64], services: &[i64]) -> Vec<Process> {
        Process::from_inputs(arrivals, services).unwrap()
    }

    /// Checks the invariants every policy must uphold.
    pub fn assert_invariants(input: &[Process], outcome: &SimulationOutcome) {
        assert_eq!(outcome.processes.len(), input.len());
        for (orig, p) in input.iter().zip(&outcome.processes) {
            assert_eq!(orig.id, p.id);
            assert!(p.completed, "{}: P{} not completed", outcome.policy, p.id);
            assert_eq!(p.remaining_time, 0);
            assert_eq!(
                p.turnaround_time - p.waiting_time,
                p.service_time,
                "{}: P{}",
                outcome.policy,
                p.id
            );
            assert!(p.waiting_time >= 0, "{}: P{} waits {}", outcome.policy, p.id, p.waiting_time);
        }

        // Timeline: chronological, non-overlapping, never before arrival,
        // and each process receives exactly its service time.
        let mut cursor = i64::MIN;
        for slice in &outcome.timeline {
            assert!(slice.start >= cursor, "{}: overlapping slices", outcome.policy);
            let p = &input[slice.process_id - 1];
            assert!(slice.start >= p.arrival_time, "{}: P{} ran early", outcome.policy, p.id);
            cursor = slice.end;
        }
        for p in input {
            let ran: i64 = outcome.slices_for(p.id).map(|s| s.duration()).sum();
            assert_eq!(ran, p.service_time, "{}: P{} CPU time", outcome.policy, p.id);
        }
    }

    /// Runs `policy` over seeded random workloads and checks invariants.
    pub fn check_random_workloads(policy: &dyn SchedulingPolicy) {
        let mut rng = SmallRng::seed_from_u64(42);
        let generator = WorkloadGenerator::new(1..=12, 0..=30, 1..=15).unwrap();
        for _ in 0..50 {
            let workload = generator.generate(&mut rng);
            let input = workload.processes().unwrap();
            let outcome = policy.simulate(&input);
            assert_invariants(&input, &outcome);
            assert_eq!(policy.simulate(&input), outcome, "non-deterministic");
        }
    }
}
