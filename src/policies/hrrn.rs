//! Highest Response Ratio Next (non-preemptive).
//!
//! # Algorithm
//! Response ratio of an eligible process at time `t`:
//!
//! ```text
//! R = ((t - arrival) + service) / service
//! ```
//!
//! The highest ratio runs to completion (ties: lowest ID). Waiting
//! processes age toward selection because `R` grows with `t`.
//!
//! Ratios are compared by cross-multiplication, so ties are exact rather
//! than subject to floating-point rounding.
//!
//! # Reference
//! Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems"

use std::cmp::Ordering;

use log::{debug, trace};

use super::{next_arrival, SchedulingPolicy};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};

/// Highest Response Ratio Next policy. Non-preemptive, no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hrrn;

impl Hrrn {
    /// Response ratio of `p` at `time`, as a float (for display).
    pub fn response_ratio(p: &Process, time: i64) -> f64 {
        ((time - p.arrival_time) + p.service_time) as f64 / p.service_time as f64
    }
}

/// Exact comparison of the response ratios of `a` and `b` at `time`.
fn compare_ratio(a: &Process, b: &Process, time: i64) -> Ordering {
    let lhs = i128::from(time - a.arrival_time + a.service_time) * i128::from(b.service_time);
    let rhs = i128::from(time - b.arrival_time + b.service_time) * i128::from(a.service_time);
    lhs.cmp(&rhs)
}

fn highest_ratio(procs: &[Process], time: i64) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in procs.iter().enumerate().filter(|(_, p)| p.is_ready(time)) {
        match best {
            Some(b) if compare_ratio(p, &procs[b], time) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

impl SchedulingPolicy for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut time: i64 = 0;

        while let Some(arrival) = next_arrival(&procs) {
            let Some(idx) = highest_ratio(&procs, time) else {
                trace!("HRRN: idle {time} -> {arrival}");
                time = arrival;
                continue;
            };

            trace!(
                "HRRN: P{} selected at {time}, ratio {:.3}",
                idx + 1,
                Hrrn::response_ratio(&procs[idx], time)
            );

            let p = &mut procs[idx];
            let start = time;
            let units = p.remaining_time;
            time += p.execute(units);
            p.complete(time);
            timeline.record(Slice::new(p.id, start, time));
            debug!("HRRN: P{} ran {start}..{time}, waiting {}", p.id, p.waiting_time);
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio Next"
    }
}
