//! Simulation driver and metrics aggregation.
//!
//! Provides a uniform entry point over all policies and the summary
//! statistics computed from their results.
//!
//! # Driver
//!
//! `Simulator` validates the workload, builds the selected policy from a
//! generic `PolicyParams` set, and runs it. Every policy then looks the
//! same to callers: arrival/service times in, waiting/turnaround times out.
//!
//! # Metrics
//!
//! `Metrics` computes average and maximum waiting/turnaround times;
//! `SimulationReport` adds the per-process table.

mod driver;
mod metrics;

pub use driver::{PolicyKind, PolicyParams, Simulator};
pub use metrics::{Metrics, ProcessRow, SimulationReport};
