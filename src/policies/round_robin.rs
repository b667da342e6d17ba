//! Round Robin.
//!
//! # Algorithm
//! 1. Pass over all processes in ID order.
//! 2. Every unfinished process runs for `min(quantum, remaining)` units.
//! 3. A process finishing inside its slice gets
//!    `waiting = clock - service - arrival`.
//! 4. Repeat until nothing remains.
//!
//! Rotation is not gated by arrival: every process takes part from the
//! first pass, and arrival only enters the waiting-time formula. The one
//! exception is a process whose arrival lies ahead of the clock when its
//! turn comes; the CPU idles up to that arrival first, otherwise the
//! formula would report negative waiting. That idle gap is taken even when
//! earlier processes in the rotation are still unfinished, so it can also
//! delay processes that are already ready.

use log::{debug, trace};

use super::SchedulingPolicy;
use crate::error::{Result, SimulationError};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};
use crate::validation::validate_quantum;

/// Round Robin policy with a fixed time quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a Round Robin policy.
    ///
    /// # Errors
    /// `InvalidParameter` if `quantum <= 0`.
    pub fn new(quantum: i64) -> Result<Self> {
        validate_quantum("quantum", quantum).map_err(SimulationError::InvalidParameter)?;
        Ok(Self { quantum })
    }

    /// The configured time quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut clock: i64 = 0;
        let mut round = 0usize;

        loop {
            let mut done = true;
            round += 1;

            for p in procs.iter_mut().filter(|p| p.remaining_time > 0) {
                done = false;
                if clock < p.arrival_time {
                    trace!("RR: idle {clock} -> {} for P{}", p.arrival_time, p.id);
                    clock = p.arrival_time;
                }

                let start = clock;
                clock += p.execute(self.quantum);
                timeline.record(Slice::new(p.id, start, clock));

                if p.remaining_time == 0 {
                    p.complete(clock);
                    debug!(
                        "RR: P{} finished at {clock} in round {round}, waiting {}",
                        p.id, p.waiting_time
                    );
                }
            }

            if done {
                break;
            }
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::test_support::*;
    use crate::policies::{Fcfs, SchedulingPolicy};

    #[test]
    fn test_rr_rejects_bad_quantum() {
        assert!(matches!(
            RoundRobin::new(0),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(RoundRobin::new(-3).is_err());
        assert_eq!(RoundRobin::new(4).unwrap().quantum(), 4);
    }

    #[test]
    fn test_rr_sample_quantum_7() {
        let input = sample();
        let outcome = RoundRobin::new(7).unwrap().simulate(&input);
        assert_eq!(outcome.waiting_times(), vec![21, 6, 6, 20, 14]);
        assert_eq!(outcome.turnaround_times(), vec![31, 8, 11, 29, 21]);
        let avg: f64 = outcome.waiting_times().iter().sum::<i64>() as f64 / 5.0;
        assert!((avg - 13.4).abs() < 1e-10);
        assert_invariants(&input, &outcome);
    }

    #[test]
    fn test_rr_slices_sample() {
        let outcome = RoundRobin::new(7).unwrap().simulate(&sample());
        let bars: Vec<(usize, i64, i64)> = outcome
            .timeline
            .iter()
            .map(|s| (s.process_id, s.start, s.end))
            .collect();
        assert_eq!(
            bars,
            vec![
                (1, 0, 7),
                (2, 7, 9),
                (3, 9, 14),
                (4, 14, 21),
                (5, 21, 28),
                (1, 28, 31),
                (4, 31, 33),
            ]
        );
    }

    #[test]
    fn test_rr_large_quantum_matches_fcfs() {
        let input = sample();
        let rr = RoundRobin::new(100).unwrap().simulate(&input);
        let fcfs = Fcfs.simulate(&input);
        assert_eq!(rr.times(), fcfs.times());
    }

    #[test]
    fn test_rr_idles_until_late_arrival() {
        let input = procs(&[0, 100], &[1, 1]);
        let outcome = RoundRobin::new(1).unwrap().simulate(&input);
        assert_eq!(outcome.waiting_times(), vec![0, 0]);
        assert_eq!(outcome.timeline[1], Slice::new(2, 100, 101));
    }

    #[test]
    fn test_rr_idle_delays_ready_process() {
        // P1 is ready from t=0 but the CPU idles 3..5 waiting for P2.
        let input = procs(&[0, 5], &[10, 1]);
        let outcome = RoundRobin::new(3).unwrap().simulate(&input);
        assert_eq!(outcome.timeline[1], Slice::new(2, 5, 6));
        assert_eq!(outcome.timeline[2].start, 6);
        assert_eq!(outcome.waiting_times(), vec![3, 0]);
        assert_invariants(&input, &outcome);
    }

    #[test]
    fn test_rr_rotation_ignores_arrival_otherwise() {
        // P2 (arrives 1) gets its turn at t=2 even though P1 is unfinished;
        // P1 then resumes at t=4.
        let input = procs(&[0, 1], &[4, 2]);
        let outcome = RoundRobin::new(2).unwrap().simulate(&input);
        assert_eq!(outcome.waiting_times(), vec![2, 1]);
        assert_eq!(outcome.turnaround_times(), vec![6, 3]);
    }

    #[test]
    fn test_rr_random_invariants() {
        check_random_workloads(&RoundRobin::new(3).unwrap());
        check_random_workloads(&RoundRobin::new(1).unwrap());
    }
}
