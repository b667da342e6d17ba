//! Workloads and policy comparison.
//!
//! A workload is a named pair of arrival/service sequences. This module
//! provides the standard benchmark sets, a seeded random generator, and a
//! runner that evaluates several policies across several workloads.
//!
//! Simulations share no state, so [`Comparison::run_parallel`] simply runs
//! one scoped thread per workload.

use std::fmt::Write as _;
use std::ops::RangeInclusive;
use std::thread;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::models::Process;
use crate::policies::SchedulingPolicy;
use crate::simulator::{Metrics, PolicyKind, PolicyParams};
use crate::validation::{collect, ValidationError, ValidationErrorKind, ValidationResult};

/// A named set of processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Display name.
    pub name: String,
    /// Arrival time per process.
    pub arrival_times: Vec<i64>,
    /// Service time per process.
    pub service_times: Vec<i64>,
}

impl Workload {
    /// Creates a workload.
    pub fn new(name: impl Into<String>, arrival_times: Vec<i64>, service_times: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            arrival_times,
            service_times,
        }
    }

    /// The five-process demo set used throughout the documentation.
    pub fn sample() -> Self {
        Self::new("Sample", vec![0, 1, 3, 4, 7], vec![10, 2, 5, 9, 7])
    }

    /// Standard benchmark sets covering short, mixed, heavy, sporadic, and
    /// staggered load.
    pub fn benchmark_suite() -> Vec<Self> {
        vec![
            Self::new("All Short Jobs", vec![0, 2, 4, 6, 8], vec![2, 3, 2, 4, 1]),
            Self::new("Mixed Job Lengths", vec![0, 1, 3, 5, 7], vec![1, 8, 2, 7, 3]),
            Self::new("Heavy Load", vec![0, 0, 0, 0, 0], vec![10, 2, 8, 6, 4]),
            Self::new(
                "Light Load With Sporadic Long Jobs",
                vec![0, 5, 10, 15, 20],
                vec![1, 12, 1, 12, 1],
            ),
            Self::new("Staggered Mix", vec![0, 3, 5, 8, 12], vec![8, 2, 10, 1, 5]),
        ]
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.arrival_times.len()
    }

    /// Whether the workload has no processes.
    pub fn is_empty(&self) -> bool {
        self.arrival_times.is_empty()
    }

    /// Validated process records.
    pub fn processes(&self) -> Result<Vec<Process>> {
        Process::from_inputs(&self.arrival_times, &self.service_times)
    }
}

/// Parameters used for benchmark comparisons (RR/MLFQ quanta 4 and 8,
/// APSA factors 0.5 and 10).
pub fn benchmark_params() -> PolicyParams {
    PolicyParams::new()
        .with_quantum(4)
        .with_quantum_2(8)
        .with_waiting_time_factor(0.5)
        .with_arrival_time_factor(10.0)
}

/// Random workload generator.
///
/// Arrivals are sorted so that input order is arrival order, which keeps
/// FCFS meaningful on generated data.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: RangeInclusive<usize>,
    arrival: RangeInclusive<i64>,
    service: RangeInclusive<i64>,
}

impl WorkloadGenerator {
    /// Creates a generator drawing the process count, arrival times, and
    /// service times uniformly from the given ranges.
    ///
    /// # Errors
    /// `InvalidParameter` if a range is empty or would produce an invalid
    /// workload (zero processes, negative arrivals, non-positive service).
    pub fn new(
        count: RangeInclusive<usize>,
        arrival: RangeInclusive<i64>,
        service: RangeInclusive<i64>,
    ) -> Result<Self> {
        collect([
            check_range(
                &count,
                *count.start() >= 1,
                ValidationErrorKind::EmptyInput,
                "count",
            ),
            check_range(
                &arrival,
                *arrival.start() >= 0,
                ValidationErrorKind::NegativeArrival,
                "arrival",
            ),
            check_range(
                &service,
                *service.start() >= 1,
                ValidationErrorKind::NonPositiveService,
                "service",
            ),
        ])
        .map_err(SimulationError::InvalidParameter)?;

        Ok(Self {
            count,
            arrival,
            service,
        })
    }

    /// Draws one workload.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Workload {
        let n = rng.random_range(self.count.clone());
        let mut arrival_times: Vec<i64> = (0..n)
            .map(|_| rng.random_range(self.arrival.clone()))
            .collect();
        arrival_times.sort_unstable();
        let service_times = (0..n)
            .map(|_| rng.random_range(self.service.clone()))
            .collect();

        Workload::new(format!("Random({n})"), arrival_times, service_times)
    }
}

fn check_range<T: PartialOrd + std::fmt::Debug>(
    range: &RangeInclusive<T>,
    lower_ok: bool,
    kind: ValidationErrorKind,
    name: &str,
) -> ValidationResult {
    if range.is_empty() || !lower_ok {
        Err(vec![ValidationError::new(
            kind,
            format!("Invalid {name} range {range:?}"),
        )])
    } else {
        Ok(())
    }
}

/// Averages of one policy on one workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Workload name.
    pub workload: String,
    /// Policy evaluated.
    pub policy: PolicyKind,
    /// Average waiting time.
    pub avg_waiting: f64,
    /// Average turnaround time.
    pub avg_turnaround: f64,
}

/// Runs a set of policies over a set of workloads.
///
/// Rows come back workload-major, policy-minor, in both sequential and
/// parallel modes.
#[derive(Debug, Clone)]
pub struct Comparison {
    policies: Vec<PolicyKind>,
    params: PolicyParams,
}

impl Comparison {
    /// Creates a comparison over `policies` sharing one parameter set.
    pub fn new(policies: impl Into<Vec<PolicyKind>>, params: PolicyParams) -> Self {
        Self {
            policies: policies.into(),
            params,
        }
    }

    /// All seven policies with [`benchmark_params`].
    pub fn all_policies() -> Self {
        Self::new(PolicyKind::ALL, benchmark_params())
    }

    /// Runs every workload on the current thread.
    pub fn run(&self, workloads: &[Workload]) -> Result<Vec<ComparisonRow>> {
        let policies = self.build()?;
        let mut rows = Vec::with_capacity(workloads.len() * policies.len());
        for workload in workloads {
            rows.extend(run_workload(workload, &policies)?);
        }
        Ok(rows)
    }

    /// Runs each workload on its own scoped thread.
    pub fn run_parallel(&self, workloads: &[Workload]) -> Result<Vec<ComparisonRow>> {
        let policies = self.build()?;
        let policies = &policies;

        let per_workload: Vec<Result<Vec<ComparisonRow>>> = thread::scope(|s| {
            let handles: Vec<_> = workloads
                .iter()
                .map(|w| s.spawn(move || run_workload(w, policies)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        let mut rows = Vec::with_capacity(workloads.len() * policies.len());
        for result in per_workload {
            rows.extend(result?);
        }
        Ok(rows)
    }

    fn build(&self) -> Result<Vec<(PolicyKind, Box<dyn SchedulingPolicy>)>> {
        self.policies
            .iter()
            .map(|&kind| Ok((kind, kind.build(&self.params)?)))
            .collect()
    }
}

fn run_workload(
    workload: &Workload,
    policies: &[(PolicyKind, Box<dyn SchedulingPolicy>)],
) -> Result<Vec<ComparisonRow>> {
    let processes = workload.processes()?;
    info!("Comparing {} policies on '{}'", policies.len(), workload.name);

    policies
        .iter()
        .map(|(kind, policy)| {
            let outcome = policy.simulate(&processes);
            let metrics = Metrics::from_times(&outcome.waiting_times(), &outcome.turnaround_times())?;
            Ok(ComparisonRow {
                workload: workload.name.clone(),
                policy: *kind,
                avg_waiting: metrics.avg_waiting,
                avg_turnaround: metrics.avg_turnaround,
            })
        })
        .collect()
}

/// Renders comparison rows as a fixed-width table.
pub fn format_rows(rows: &[ComparisonRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.workload.len())
        .max()
        .unwrap_or(0)
        .max("Input Set".len());

    let mut out = format!(
        "{:<name_width$}  {:<9}{:>16}{:>14}\n",
        "Input Set", "Algorithm", "Avg Turnaround", "Avg Waiting"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<9}{:>16.2}{:>14.2}",
            r.workload,
            r.policy.name(),
            r.avg_turnaround,
            r.avg_waiting
        );
    }
    out
}
