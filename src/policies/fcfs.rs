//! First-Come-First-Served.
//!
//! # Algorithm
//! Processes run to completion in input order. Input is assumed to be
//! arrival-sorted already; no re-sort happens, so an out-of-order input
//! is still served in input order.
//!
//! # Complexity
//! O(n), single pass.

use log::debug;

use super::SchedulingPolicy;
use crate::models::{Process, SimulationOutcome, Slice, Timeline};

/// First-Come-First-Served policy. Non-preemptive, no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut cursor: i64 = 0;

        for p in procs.iter_mut() {
            let start = cursor.max(p.arrival_time);
            let units = p.service_time;
            p.execute(units);
            cursor = start + p.service_time;
            p.complete(cursor);
            timeline.record(Slice::new(p.id, start, cursor));
            debug!("FCFS: P{} waits {} (start {start})", p.id, p.waiting_time);
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}
