//! Simulation driver.
//!
//! Selects a policy, hands it exactly the parameters it declares, and
//! normalizes every policy to one call shape: arrival and service times
//! in, waiting and turnaround times out.
//!
//! # Parameters per policy
//!
//! | Policy | Required |
//! |--------|----------|
//! | FCFS, SPN, SRT, HRRN | - |
//! | RR | `quantum` |
//! | MLFQ | `quantum`, `quantum_2` |
//! | APSA | `waiting_time_factor`, `arrival_time_factor` |

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use super::SimulationReport;
use crate::error::{Result, SimulationError};
use crate::models::{Process, SimulationOutcome};
use crate::policies::{Apsa, Fcfs, Hrrn, Mlfq, RoundRobin, SchedulingPolicy, Spn, Srt};

/// Policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// First-Come-First-Served.
    #[serde(alias = "FCFS")]
    Fcfs,
    /// Round Robin.
    #[serde(alias = "rr", alias = "RR")]
    RoundRobin,
    /// Shortest Process Next.
    #[serde(alias = "SPN")]
    Spn,
    /// Shortest Remaining Time.
    #[serde(alias = "SRT")]
    Srt,
    /// Highest Response Ratio Next.
    #[serde(alias = "HRRN")]
    Hrrn,
    /// Multilevel Feedback Queue.
    #[serde(alias = "MLFQ", alias = "mfq", alias = "MFQ")]
    Mlfq,
    /// Adaptive Priority Scheduling Algorithm.
    #[serde(alias = "APSA")]
    Apsa,
}

impl PolicyKind {
    /// Every policy, in menu order.
    pub const ALL: [PolicyKind; 7] = [
        PolicyKind::Fcfs,
        PolicyKind::RoundRobin,
        PolicyKind::Spn,
        PolicyKind::Srt,
        PolicyKind::Hrrn,
        PolicyKind::Mlfq,
        PolicyKind::Apsa,
    ];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::RoundRobin => "RR",
            PolicyKind::Spn => "SPN",
            PolicyKind::Srt => "SRT",
            PolicyKind::Hrrn => "HRRN",
            PolicyKind::Mlfq => "MLFQ",
            PolicyKind::Apsa => "APSA",
        }
    }

    /// Parameters this policy cannot run without.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            PolicyKind::RoundRobin => &["quantum"],
            PolicyKind::Mlfq => &["quantum", "quantum_2"],
            PolicyKind::Apsa => &["waiting_time_factor", "arrival_time_factor"],
            _ => &[],
        }
    }

    /// Builds the policy from the generic parameter set.
    ///
    /// Parameters the policy does not declare are ignored.
    ///
    /// # Errors
    /// - `UnsupportedParameterCombination` if a required parameter is absent.
    /// - `InvalidParameter` if a supplied value is out of range.
    pub fn build(self, params: &PolicyParams) -> Result<Box<dyn SchedulingPolicy>> {
        let missing: Vec<&'static str> = self
            .required_params()
            .iter()
            .copied()
            .filter(|name| !params.has(name))
            .collect();
        if !missing.is_empty() {
            return Err(SimulationError::UnsupportedParameterCombination {
                policy: self.name(),
                missing,
            });
        }

        let policy: Box<dyn SchedulingPolicy> = match (self, params) {
            (PolicyKind::Fcfs, _) => Box::new(Fcfs),
            (PolicyKind::Spn, _) => Box::new(Spn),
            (PolicyKind::Srt, _) => Box::new(Srt),
            (PolicyKind::Hrrn, _) => Box::new(Hrrn),
            (
                PolicyKind::RoundRobin,
                PolicyParams {
                    quantum: Some(q), ..
                },
            ) => Box::new(RoundRobin::new(*q)?),
            (
                PolicyKind::Mlfq,
                PolicyParams {
                    quantum: Some(q1),
                    quantum_2: Some(q2),
                    ..
                },
            ) => Box::new(Mlfq::new(*q1, *q2)?),
            (
                PolicyKind::Apsa,
                PolicyParams {
                    waiting_time_factor: Some(wf),
                    arrival_time_factor: Some(af),
                    ..
                },
            ) => Box::new(Apsa::new(*wf, *af)?),
            // Unreachable: required parameters were checked above.
            (kind, _) => {
                return Err(SimulationError::UnsupportedParameterCombination {
                    policy: kind.name(),
                    missing: kind.required_params().to_vec(),
                })
            }
        };

        Ok(policy)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "fcfs" | "first_come_first_served" => Ok(PolicyKind::Fcfs),
            "rr" | "round_robin" => Ok(PolicyKind::RoundRobin),
            "spn" | "shortest_process_next" => Ok(PolicyKind::Spn),
            "srt" | "shortest_remaining_time" => Ok(PolicyKind::Srt),
            "hrrn" | "highest_response_ratio_next" => Ok(PolicyKind::Hrrn),
            "mlfq" | "mfq" | "multilevel_feedback_queue" => Ok(PolicyKind::Mlfq),
            "apsa" | "adaptive_priority" => Ok(PolicyKind::Apsa),
            _ => Err(SimulationError::Config(format!("Unknown policy '{s}'"))),
        }
    }
}

/// Generic parameter set shared by all policies.
///
/// For MLFQ, `quantum` is the level-0 quantum and `quantum_2` the level-1
/// quantum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    /// Round Robin quantum / MLFQ level-0 quantum.
    pub quantum: Option<i64>,
    /// MLFQ level-1 quantum.
    pub quantum_2: Option<i64>,
    /// APSA aging factor.
    pub waiting_time_factor: Option<f64>,
    /// APSA arrival scaling factor.
    pub arrival_time_factor: Option<f64>,
}

impl PolicyParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the (first) time quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the second-level time quantum.
    pub fn with_quantum_2(mut self, quantum: i64) -> Self {
        self.quantum_2 = Some(quantum);
        self
    }

    /// Sets the APSA waiting-time factor.
    pub fn with_waiting_time_factor(mut self, factor: f64) -> Self {
        self.waiting_time_factor = Some(factor);
        self
    }

    /// Sets the APSA arrival-time factor.
    pub fn with_arrival_time_factor(mut self, factor: f64) -> Self {
        self.arrival_time_factor = Some(factor);
        self
    }

    fn has(&self, name: &str) -> bool {
        match name {
            "quantum" => self.quantum.is_some(),
            "quantum_2" => self.quantum_2.is_some(),
            "waiting_time_factor" => self.waiting_time_factor.is_some(),
            "arrival_time_factor" => self.arrival_time_factor.is_some(),
            _ => false,
        }
    }
}

/// Runs one policy over one workload.
///
/// # Example
///
/// ```
/// use u_procsim::simulator::{PolicyKind, PolicyParams, Simulator};
///
/// let simulator = Simulator::new(PolicyKind::RoundRobin)
///     .with_params(PolicyParams::new().with_quantum(7));
/// let (waiting, turnaround) = simulator
///     .run_times(&[0, 1, 3, 4, 7], &[10, 2, 5, 9, 7])
///     .unwrap();
/// assert_eq!(waiting, vec![21, 6, 6, 20, 14]);
/// assert_eq!(turnaround, vec![31, 8, 11, 29, 21]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    kind: PolicyKind,
    params: PolicyParams,
    verbose: bool,
}

impl Simulator {
    /// Creates a simulator for `kind` with no parameters.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            params: PolicyParams::default(),
            verbose: false,
        }
    }

    /// Sets the policy parameters.
    pub fn with_params(mut self, params: PolicyParams) -> Self {
        self.params = params;
        self
    }

    /// Logs the rendered report after each run. Results are unaffected.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Selected policy.
    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Builds the configured policy.
    pub fn policy(&self) -> Result<Box<dyn SchedulingPolicy>> {
        self.kind.build(&self.params)
    }

    /// Validates input, runs the policy, and returns the raw outcome.
    pub fn simulate(&self, arrival_times: &[i64], service_times: &[i64]) -> Result<SimulationOutcome> {
        let processes = Process::from_inputs(arrival_times, service_times)?;
        let policy = self.policy()?;

        info!(
            "Simulating {} processes with {}",
            processes.len(),
            policy.description()
        );
        Ok(policy.simulate(&processes))
    }

    /// Runs the policy and aggregates the result into a report.
    pub fn run(&self, arrival_times: &[i64], service_times: &[i64]) -> Result<SimulationReport> {
        let outcome = self.simulate(arrival_times, service_times)?;
        let report = SimulationReport::from_outcome(outcome)?;

        if self.verbose {
            info!("\n{report}");
        }
        Ok(report)
    }

    /// Runs the policy and returns `(waiting_times, turnaround_times)`.
    pub fn run_times(
        &self,
        arrival_times: &[i64],
        service_times: &[i64],
    ) -> Result<(Vec<i64>, Vec<i64>)> {
        Ok(self.simulate(arrival_times, service_times)?.times())
    }
}
