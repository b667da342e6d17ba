//! Adaptive Priority Scheduling Algorithm.
//!
//! # Algorithm
//! Every eligible process carries a dynamic priority, recomputed each unit:
//!
//! ```text
//! priority = 1 / (remaining + arrival / arrival_time_factor)
//!          + max(waiting * waiting_time_factor, 1)
//! ```
//!
//! The first term favors short and early jobs; the second is an aging
//! term driven by accumulated waiting time. Each unit the highest-priority
//! ready process runs for one unit and every other ready process accrues
//! one unit of waiting. Because the aging term grows without bound while
//! the first term is at most 1, a waiting process eventually outranks any
//! newcomer, which rules out starvation.
//!
//! # Ready list
//! Admission appends, in ID order, every arrived and unfinished process not
//! already listed. The selected process leaves the list while it runs and
//! is re-appended by the next admission pass. Ties go to the earliest list
//! position.

use log::{debug, trace};

use super::{next_arrival, SchedulingPolicy};
use crate::error::{Result, SimulationError};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};
use crate::validation::{collect, validate_factor};

/// Adaptive priority policy with waiting-time aging.
#[derive(Debug, Clone, Copy)]
pub struct Apsa {
    waiting_time_factor: f64,
    arrival_time_factor: f64,
}

impl Apsa {
    /// Creates an APSA policy.
    ///
    /// # Errors
    /// `InvalidParameter` if a factor is not a positive finite number.
    pub fn new(waiting_time_factor: f64, arrival_time_factor: f64) -> Result<Self> {
        collect([
            validate_factor("waiting_time_factor", waiting_time_factor),
            validate_factor("arrival_time_factor", arrival_time_factor),
        ])
        .map_err(SimulationError::InvalidParameter)?;

        Ok(Self {
            waiting_time_factor,
            arrival_time_factor,
        })
    }

    /// Current dynamic priority of `p` (higher runs first).
    ///
    /// Uses `p.waiting_time` as accumulated so far.
    pub fn priority(&self, p: &Process) -> f64 {
        let base = 1.0 / (p.remaining_time as f64 + p.arrival_time as f64 / self.arrival_time_factor);
        let aging = (p.waiting_time as f64 * self.waiting_time_factor).max(1.0);
        base + aging
    }

    /// Position in `ready` of the highest priority; first wins on ties.
    fn select(&self, procs: &[Process], ready: &[usize]) -> usize {
        let mut best = 0;
        let mut best_priority = f64::NEG_INFINITY;
        for (pos, &i) in ready.iter().enumerate() {
            let priority = self.priority(&procs[i]);
            if priority > best_priority {
                best = pos;
                best_priority = priority;
            }
        }
        best
    }
}

impl SchedulingPolicy for Apsa {
    fn name(&self) -> &'static str {
        "APSA"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut ready: Vec<usize> = Vec::new();
        let mut time: i64 = 0;

        while let Some(arrival) = next_arrival(&procs) {
            for (i, p) in procs.iter().enumerate() {
                if p.is_ready(time) && !ready.contains(&i) {
                    ready.push(i);
                }
            }

            if ready.is_empty() {
                trace!("APSA: idle {time} -> {arrival}");
                time = arrival;
                continue;
            }

            let idx = ready.remove(self.select(&procs, &ready));
            for &i in &ready {
                procs[i].waiting_time += 1;
            }

            let p = &mut procs[idx];
            trace!("APSA: P{} runs at {time}", p.id);
            p.execute(1);
            timeline.record(Slice::new(p.id, time, time + 1));
            time += 1;

            if p.remaining_time == 0 {
                let waited = p.waiting_time;
                p.complete(time);
                debug_assert_eq!(waited, p.waiting_time);
                debug!("APSA: P{} finished at {time}, waiting {waited}", p.id);
            }
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Adaptive Priority Scheduling Algorithm"
    }
}
