//! Shortest Process Next (non-preemptive).
//!
//! # Algorithm
//! 1. Among arrived, unscheduled processes pick the shortest service time
//!    (ties: lowest ID).
//! 2. Run it to completion in one step.
//! 3. If nothing has arrived, advance the clock to the next arrival.
//!
//! # Complexity
//! O(n²), one linear scan per dispatch.

use log::{debug, trace};

use super::{next_arrival, SchedulingPolicy};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};

/// Shortest Process Next policy. Non-preemptive, no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spn;

/// Index of the eligible process with the least remaining work.
/// `min_by_key` keeps the first minimum, i.e. the lowest ID.
fn shortest_ready(procs: &[Process], time: i64) -> Option<usize> {
    procs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready(time))
        .min_by_key(|(_, p)| p.remaining_time)
        .map(|(i, _)| i)
}

impl SchedulingPolicy for Spn {
    fn name(&self) -> &'static str {
        "SPN"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut time: i64 = 0;

        while let Some(arrival) = next_arrival(&procs) {
            let Some(idx) = shortest_ready(&procs, time) else {
                trace!("SPN: idle {time} -> {arrival}");
                time = arrival;
                continue;
            };

            let p = &mut procs[idx];
            let start = time;
            let units = p.remaining_time;
            time += p.execute(units);
            p.complete(time);
            timeline.record(Slice::new(p.id, start, time));
            debug!("SPN: P{} ran {start}..{time}, waiting {}", p.id, p.waiting_time);
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Shortest Process Next"
    }
}
