//! CPU process-scheduling simulator.
//!
//! Simulates how a single CPU would schedule a batch of processes under
//! seven classic and adaptive policies, and reports per-process waiting and
//! turnaround times. Time is discrete: one unit is the smallest amount of
//! CPU a process can receive.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Slice`, `Timeline`, `SimulationOutcome`
//! - **`policies`**: `SchedulingPolicy` trait and the FCFS, RR, SPN, SRT,
//!   HRRN, MLFQ and APSA simulators
//! - **`simulator`**: Uniform driver (`Simulator`, `PolicyKind`, `PolicyParams`)
//!   and metrics (`Metrics`, `SimulationReport`)
//! - **`workload`**: Benchmark workloads, random generation, policy comparison
//! - **`config`**: JSON-loadable run configuration
//! - **`validation`**: Input and parameter checks
//! - **`error`**: `SimulationError`
//!
//! # Example
//!
//! ```
//! use u_procsim::simulator::{PolicyKind, Simulator};
//!
//! let report = Simulator::new(PolicyKind::Fcfs)
//!     .run(&[0, 1, 3, 4, 7], &[10, 2, 5, 9, 7])
//!     .unwrap();
//! assert_eq!(report.waiting_times(), vec![0, 9, 9, 13, 19]);
//! assert!((report.metrics.avg_turnaround - 16.6).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Stallings (2018), "Operating Systems: Internals and Design Principles"
//! - Silberschatz et al. (2018), "Operating System Concepts"

pub mod config;
pub mod error;
pub mod models;
pub mod policies;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use error::{Result, SimulationError};
