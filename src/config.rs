//! Run configuration.
//!
//! A `SimulationConfig` bundles everything one simulation needs: the
//! policy, its parameters, and the workload. It is plain serde data, so
//! callers can load it from JSON or build it in code.
//!
//! ```json
//! {
//!   "policy": "mlfq",
//!   "quantum": 4,
//!   "quantum_2": 8,
//!   "arrival_times": [0, 16, 20],
//!   "service_times": [36, 20, 12],
//!   "verbose": true
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::simulator::{PolicyKind, PolicyParams, Simulator, SimulationReport};

/// Configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Policy to run.
    pub policy: PolicyKind,
    /// Policy parameters (flattened into the top-level object).
    #[serde(flatten)]
    pub params: PolicyParams,
    /// Arrival time per process.
    pub arrival_times: Vec<i64>,
    /// Service time per process.
    pub service_times: Vec<i64>,
    /// Log the rendered result table.
    #[serde(default)]
    pub verbose: bool,
}

impl SimulationConfig {
    /// Creates a configuration with no policy parameters.
    pub fn new(policy: PolicyKind, arrival_times: Vec<i64>, service_times: Vec<i64>) -> Self {
        Self {
            policy,
            params: PolicyParams::default(),
            arrival_times,
            service_times,
            verbose: false,
        }
    }

    /// Sets the policy parameters.
    pub fn with_params(mut self, params: PolicyParams) -> Self {
        self.params = params;
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Simulator described by this configuration.
    pub fn simulator(&self) -> Simulator {
        Simulator::new(self.policy)
            .with_params(self.params)
            .with_verbose(self.verbose)
    }

    /// Runs the configured simulation.
    pub fn run(&self) -> Result<SimulationReport> {
        self.simulator().run(&self.arrival_times, &self.service_times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mlfq_config() {
        let json = r#"{
            "policy": "mfq",
            "quantum": 8,
            "quantum_2": 16,
            "arrival_times": [0, 16, 20],
            "service_times": [36, 20, 12]
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.policy, PolicyKind::Mlfq);
        assert_eq!(config.params.quantum, Some(8));
        assert_eq!(config.params.quantum_2, Some(16));
        assert_eq!(config.params.waiting_time_factor, None);
        assert!(!config.verbose);

        let report = config.run().unwrap();
        assert_eq!(report.waiting_times(), vec![32, 24, 32]);
    }

    #[test]
    fn test_parse_apsa_config() {
        let json = r#"{
            "policy": "APSA",
            "waiting_time_factor": 0.5,
            "arrival_time_factor": 10,
            "arrival_times": [0, 1, 3, 4, 7],
            "service_times": [10, 2, 5, 9, 7],
            "verbose": true
        }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.params.arrival_time_factor, Some(10.0));
        let report = config.run().unwrap();
        assert_eq!(report.turnaround_times(), vec![22, 2, 12, 27, 26]);
    }

    #[test]
    fn test_config_missing_parameter() {
        let config = SimulationConfig::new(PolicyKind::RoundRobin, vec![0], vec![3]);
        assert!(matches!(
            config.run(),
            Err(SimulationError::UnsupportedParameterCombination { policy: "RR", .. })
        ));
    }

    #[test]
    fn test_config_bad_json() {
        assert!(matches!(
            SimulationConfig::from_json_str("{\"policy\": \"lottery\"}"),
            Err(SimulationError::Config(_))
        ));
        assert!(matches!(
            SimulationConfig::from_path("/nonexistent/u-procsim.json"),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = SimulationConfig::new(PolicyKind::RoundRobin, vec![0, 1], vec![4, 2])
            .with_params(PolicyParams::new().with_quantum(2));
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"policy\": \"round_robin\""));
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }
}
