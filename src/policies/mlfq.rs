//! Multilevel Feedback Queue.
//!
//! # Algorithm
//! Three strict-priority FIFO queues of process indices (level 0 highest).
//! Every time unit:
//!
//! 1. Newly arrived processes enter queue 0.
//! 2. If the CPU is free, or a queue above the running process's level is
//!    non-empty, the running process goes back to the tail of its own
//!    queue and the head of the highest non-empty queue is dispatched.
//! 3. The dispatched process runs one unit, consuming one unit of its
//!    level's quantum budget.
//! 4. A process that exhausts the level budget without finishing is
//!    demoted one level (level 2 is the floor and has no budget), and the
//!    level 0/1 budgets are refilled.
//!
//! Process state machine:
//!
//! ```text
//! unqueued -> queued@0 -> running -> completed
//!                            |
//!                            +-> demoted -> queued@(level+1) -> running -> ...
//! ```
//!
//! The quantum budget belongs to the level, not the process: processes
//! sharing a level draw from the same budget until the next refill. Only a
//! demotion refills: a budget that hits zero on the unit its process
//! completes stays spent and keeps counting down, so later processes at
//! that level are not demoted until some other demotion refills it.
//!
//! # Reference
//! Corbató et al. (1962), "An Experimental Time-Sharing System"

use std::collections::VecDeque;

use log::{debug, trace};

use super::{next_arrival, SchedulingPolicy};
use crate::error::{Result, SimulationError};
use crate::models::{Process, SimulationOutcome, Slice, Timeline};
use crate::validation::{collect, validate_quantum};

/// Number of feedback queues.
pub const LEVELS: usize = 3;

/// Lowest-priority (uncapped) level.
const BOTTOM: usize = LEVELS - 1;

/// Remaining quantum per capped level. Scoped to one simulation run.
#[derive(Debug, Clone, Copy)]
struct LevelBudget {
    quanta: [i64; BOTTOM],
    remaining: [i64; BOTTOM],
}

impl LevelBudget {
    fn new(quanta: [i64; BOTTOM]) -> Self {
        Self {
            quanta,
            remaining: quanta,
        }
    }

    /// Charges one unit to `level`. Returns `true` exactly when the budget
    /// reaches zero; it may go negative afterwards.
    fn charge(&mut self, level: usize) -> bool {
        match self.remaining.get_mut(level) {
            Some(left) => {
                *left -= 1;
                *left == 0
            }
            None => false,
        }
    }

    fn refill(&mut self) {
        self.remaining = self.quanta;
    }
}

/// Multilevel Feedback Queue policy.
///
/// `quantum_1` caps level 0, `quantum_2` caps level 1; level 2 runs
/// first-come-first-served until completion.
#[derive(Debug, Clone, Copy)]
pub struct Mlfq {
    quantum_1: i64,
    quantum_2: i64,
}

impl Mlfq {
    /// Creates an MLFQ policy.
    ///
    /// # Errors
    /// `InvalidParameter` if either quantum is not positive.
    pub fn new(quantum_1: i64, quantum_2: i64) -> Result<Self> {
        collect([
            validate_quantum("quantum_1", quantum_1),
            validate_quantum("quantum_2", quantum_2),
        ])
        .map_err(SimulationError::InvalidParameter)?;

        Ok(Self {
            quantum_1,
            quantum_2,
        })
    }

    /// Quantum for `level`, or `None` for the uncapped bottom level.
    pub fn quantum(&self, level: usize) -> Option<i64> {
        match level {
            0 => Some(self.quantum_1),
            1 => Some(self.quantum_2),
            _ => None,
        }
    }
}

impl SchedulingPolicy for Mlfq {
    fn name(&self) -> &'static str {
        "MLFQ"
    }

    fn simulate(&self, processes: &[Process]) -> SimulationOutcome {
        let mut procs = processes.to_vec();
        let mut timeline = Timeline::new();
        let mut queues: [VecDeque<usize>; LEVELS] = Default::default();
        let mut budget = LevelBudget::new([self.quantum_1, self.quantum_2]);
        let mut running: Option<usize> = None;
        let mut time: i64 = 0;

        while procs.iter().any(|p| !p.completed) {
            for (i, p) in procs.iter_mut().enumerate() {
                if p.priority_level.is_none() && p.arrival_time <= time {
                    p.priority_level = Some(0);
                    queues[0].push_back(i);
                    trace!("MLFQ: P{} admitted at {time}", p.id);
                }
            }

            let running_level = running
                .and_then(|i| procs[i].priority_level)
                .unwrap_or(LEVELS);
            if let Some(level) = (0..running_level).find(|&l| !queues[l].is_empty()) {
                if let Some(prev) = running.take() {
                    queues[running_level].push_back(prev);
                    trace!("MLFQ: P{} preempted at {time} by level {level}", prev + 1);
                }
                running = queues[level].pop_front();
            }

            let Some(idx) = running else {
                // Nothing queued: every unfinished process is still to arrive.
                time = next_arrival(&procs).map_or(time + 1, |a| a.max(time + 1));
                continue;
            };

            let p = &mut procs[idx];
            let level = p.priority_level.unwrap_or(0);
            p.execute(1);
            timeline.record(Slice::new(p.id, time, time + 1).at_level(level));
            let exhausted = budget.charge(level);
            time += 1;

            if p.remaining_time == 0 {
                p.complete(time);
                running = None;
                debug!(
                    "MLFQ: P{} finished at {time} on level {level}, waiting {}",
                    p.id, p.waiting_time
                );
            } else if exhausted {
                let next = (level + 1).min(BOTTOM);
                p.priority_level = Some(next);
                queues[next].push_back(idx);
                running = None;
                budget.refill();
                debug!("MLFQ: P{} demoted to level {next} at {time}", p.id);
            }
        }

        SimulationOutcome::new(self.name(), procs, timeline)
    }

    fn description(&self) -> &'static str {
        "Multilevel Feedback Queue"
    }
}
