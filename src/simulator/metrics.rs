//! Simulation metrics and reports.
//!
//! Aggregates per-process waiting and turnaround times into summary
//! statistics, and renders the per-process table.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | mean(turnaround - service) |
//! | Avg Turnaround | mean(completion - arrival) |
//! | Max Waiting | Longest single wait |
//! | Max Turnaround | Longest single turnaround |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::models::{SimulationOutcome, Slice};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Summary statistics over one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of processes aggregated.
    pub process_count: usize,
    /// Arithmetic mean of waiting times.
    pub avg_waiting: f64,
    /// Arithmetic mean of turnaround times.
    pub avg_turnaround: f64,
    /// Largest waiting time.
    pub max_waiting: i64,
    /// Largest turnaround time.
    pub max_turnaround: i64,
}

impl Metrics {
    /// Aggregates parallel waiting/turnaround sequences.
    ///
    /// # Errors
    /// - `InvalidInput` if the sequences differ in length.
    /// - `EmptyResultSet` if there are no processes.
    pub fn from_times(waiting_times: &[i64], turnaround_times: &[i64]) -> Result<Self> {
        if waiting_times.len() != turnaround_times.len() {
            return Err(SimulationError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::LengthMismatch,
                format!(
                    "{} waiting times but {} turnaround times",
                    waiting_times.len(),
                    turnaround_times.len()
                ),
            )]));
        }
        if waiting_times.is_empty() {
            return Err(SimulationError::EmptyResultSet);
        }

        let n = waiting_times.len() as f64;
        Ok(Self {
            process_count: waiting_times.len(),
            avg_waiting: mean(waiting_times, n),
            avg_turnaround: mean(turnaround_times, n),
            max_waiting: waiting_times.iter().copied().max().unwrap_or(0),
            max_turnaround: turnaround_times.iter().copied().max().unwrap_or(0),
        })
    }

    /// The `(avg_waiting, avg_turnaround)` pair.
    pub fn averages(&self) -> (f64, f64) {
        (self.avg_waiting, self.avg_turnaround)
    }
}

/// Sums in `f64` so that large valid times cannot overflow.
fn mean(values: &[i64], n: f64) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / n
}

/// One row of the per-process result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    /// Process ID (1-based).
    pub id: usize,
    /// Arrival time.
    pub arrival_time: i64,
    /// Service time.
    pub service_time: i64,
    /// Waiting time.
    pub waiting_time: i64,
    /// Turnaround time.
    pub turnaround_time: i64,
}

/// Per-process detail plus summary for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy short name.
    pub policy: String,
    /// Rows in input order.
    pub rows: Vec<ProcessRow>,
    /// Summary statistics.
    pub metrics: Metrics,
    /// Execution slices in chronological order.
    pub timeline: Vec<Slice>,
}

impl SimulationReport {
    /// Builds a report from a finished simulation.
    pub fn from_outcome(outcome: SimulationOutcome) -> Result<Self> {
        let (waiting, turnaround) = outcome.times();
        let metrics = Metrics::from_times(&waiting, &turnaround)?;
        let rows = outcome
            .processes
            .iter()
            .map(|p| ProcessRow {
                id: p.id,
                arrival_time: p.arrival_time,
                service_time: p.service_time,
                waiting_time: p.waiting_time,
                turnaround_time: p.turnaround_time,
            })
            .collect();

        Ok(Self {
            policy: outcome.policy,
            rows,
            metrics,
            timeline: outcome.timeline,
        })
    }

    /// Waiting time per process, in input order.
    pub fn waiting_times(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.waiting_time).collect()
    }

    /// Turnaround time per process, in input order.
    pub fn turnaround_times(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.turnaround_time).collect()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Scheduling", self.policy)?;
        writeln!(
            f,
            "{:<8}{:>8}{:>8}{:>8}{:>12}",
            "Process", "Arrival", "Service", "Waiting", "Turnaround"
        )?;
        for r in &self.rows {
            writeln!(
                f,
                "{:<8}{:>8}{:>8}{:>8}{:>12}",
                r.id, r.arrival_time, r.service_time, r.waiting_time, r.turnaround_time
            )?;
        }
        writeln!(f, "Average Waiting Time: {:.2}", self.metrics.avg_waiting)?;
        write!(f, "Average Turnaround Time: {:.2}", self.metrics.avg_turnaround)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, Timeline};

    #[test]
    fn test_metrics_basic() {
        let m = Metrics::from_times(&[0, 9, 9, 13, 19], &[10, 11, 14, 22, 26]).unwrap();
        assert_eq!(m.process_count, 5);
        assert!((m.avg_waiting - 10.0).abs() < 1e-10);
        assert!((m.avg_turnaround - 16.6).abs() < 1e-10);
        assert_eq!(m.max_waiting, 19);
        assert_eq!(m.max_turnaround, 26);
    }

    #[test]
    fn test_metrics_large_times() {
        let big = i64::MAX / 2;
        let m = Metrics::from_times(&[big, big, big], &[big, big, big]).unwrap();
        assert!(m.avg_waiting > 0.0);
        assert_eq!(m.max_waiting, big);
    }

    #[test]
    fn test_metrics_empty() {
        assert_eq!(
            Metrics::from_times(&[], &[]).unwrap_err(),
            SimulationError::EmptyResultSet
        );
    }

    #[test]
    fn test_metrics_length_mismatch() {
        assert!(matches!(
            Metrics::from_times(&[1, 2], &[3]),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_report_table() {
        let mut p1 = Process::new(1, 0, 3);
        p1.complete(3);
        let mut p2 = Process::new(2, 1, 2);
        p2.complete(5);
        let outcome = SimulationOutcome::new("FCFS", vec![p1, p2], Timeline::new());

        let report = SimulationReport::from_outcome(outcome).unwrap();
        assert_eq!(report.waiting_times(), vec![0, 2]);
        assert_eq!(report.turnaround_times(), vec![3, 4]);

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "FCFS Scheduling");
        assert!(lines[1].starts_with("Process"));
        assert_eq!(lines.len(), 6);
        assert!(text.contains("Average Waiting Time: 1.00"));
        assert!(text.contains("Average Turnaround Time: 3.50"));
    }
}
