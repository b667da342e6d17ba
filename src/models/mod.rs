//! Simulation domain models.
//!
//! Provides the data types shared by every scheduling policy: the
//! per-process state record and the outcome of a simulation run.
//!
//! # Domain Mappings
//!
//! | u-procsim | Textbook term | Output column |
//! |-----------|---------------|---------------|
//! | Process | Job / PCB | Process |
//! | Slice | Gantt chart bar | - |
//! | SimulationOutcome | Schedule | Waiting / Turnaround |

mod outcome;
mod process;

pub use outcome::{SimulationOutcome, Slice, Timeline};
pub use process::Process;
