//! Shortest Remaining Time (preemptive).
//!
//! # Algorithm
//! Time advances in unit steps. At every step the eligible process with
//! the least remaining work (ties: lowest ID) runs for one unit, so a newly
//! arrived shorter process displaces the running one at the next unit
//! boundary. A finishing process records
//! `waiting = finish - arrival - service`.
//!
//! # Complexity
//! O(n · total_service).

use log::{debug, trace};

use super::{next_arrival, SchedulingPolicy};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};

/// Shortest Remaining Time policy. Preemptive, no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srt;

impl SchedulingPolicy for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut time: i64 = 0;
        let mut last: Option<usize> = None;

        while let Some(arrival) = next_arrival(&procs) {
            let shortest = procs
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_ready(time))
                .min_by_key(|(_, p)| p.remaining_time)
                .map(|(i, _)| i);

            let Some(idx) = shortest else {
                trace!("SRT: idle {time} -> {arrival}");
                time = arrival;
                continue;
            };

            if let Some(prev) = last.filter(|&prev| prev != idx && !procs[prev].completed) {
                trace!("SRT: P{} preempts P{} at {time}", idx + 1, prev + 1);
            }
            last = Some(idx);

            let p = &mut procs[idx];
            p.execute(1);
            timeline.record(Slice::new(p.id, time, time + 1));
            time += 1;

            if p.remaining_time == 0 {
                p.complete(time);
                debug!("SRT: P{} finished at {time}, waiting {}", p.id, p.waiting_time);
            }
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}
