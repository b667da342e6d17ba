//! Input validation for scheduling simulations.
//!
//! Checks the structural integrity of a workload and of policy
//! parameters before any simulation loop starts. Detects:
//! - Mismatched arrival/service sequence lengths
//! - Empty workloads
//! - Negative arrival times
//! - Non-positive service times
//! - Non-positive quanta and aging factors
//! - Workloads whose latest possible completion exceeds `i64::MAX`
//!
//! Every simulation loop relies on these checks to terminate: a zero
//! service time or quantum would let a loop spin without consuming work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Arrival and service sequences differ in length.
    LengthMismatch,
    /// No processes were supplied.
    EmptyInput,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires zero or negative CPU time.
    NonPositiveService,
    /// A time quantum is zero or negative.
    NonPositiveQuantum,
    /// An APSA factor is zero, negative, or not finite.
    NonPositiveFactor,
    /// The last arrival plus the total service time overflows `i64`.
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the arrival and service sequences of a workload.
///
/// Checks:
/// 1. Both sequences have the same length
/// 2. At least one process is present
/// 3. No arrival time is negative
/// 4. Every service time is strictly positive
/// 5. `max(arrival) + sum(service)` fits in `i64`, which bounds every
///    simulated clock value
///
/// Process numbers in messages are 1-based, matching process IDs.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(arrival_times: &[i64], service_times: &[i64]) -> ValidationResult {
    let mut errors = Vec::new();

    if arrival_times.len() != service_times.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "{} arrival times but {} service times",
                arrival_times.len(),
                service_times.len()
            ),
        ));
    }

    if arrival_times.is_empty() && service_times.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Workload has no processes",
        ));
    }

    for (i, &arrival) in arrival_times.iter().enumerate() {
        if arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {} has negative arrival time {arrival}", i + 1),
            ));
        }
    }

    for (i, &service) in service_times.iter().enumerate() {
        if service <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveService,
                format!("Process {} has non-positive service time {service}", i + 1),
            ));
        }
    }

    if errors.is_empty() {
        let last_arrival = arrival_times.iter().copied().max().unwrap_or(0);
        let horizon = service_times
            .iter()
            .try_fold(last_arrival, |acc, &service| acc.checked_add(service));
        if horizon.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::HorizonOverflow,
                format!("Latest arrival {last_arrival} plus total service time overflows i64"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a time quantum.
pub fn validate_quantum(name: &str, quantum: i64) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("{name} must be positive, got {quantum}"),
        )])
    }
}

/// Validates an aging/scaling factor (finite and strictly positive).
pub fn validate_factor(name: &str, factor: f64) -> ValidationResult {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveFactor,
            format!("{name} must be a positive finite number, got {factor}"),
        )])
    }
}

/// Merges several validation results, keeping every error.
pub(crate) fn collect(results: impl IntoIterator<Item = ValidationResult>) -> ValidationResult {
    let errors: Vec<ValidationError> = results
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_workload() {
        assert!(validate_workload(&[0, 1, 3, 4, 7], &[10, 2, 5, 9, 7]).is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let errors = validate_workload(&[0, 1], &[5]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LengthMismatch));
    }

    #[test]
    fn test_empty_workload() {
        let errors = validate_workload(&[], &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInput);
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_workload(&[0, -2], &[3, 3]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
        assert!(errors[0].message.contains("Process 2"));
    }

    #[test]
    fn test_zero_service() {
        let errors = validate_workload(&[0, 0, 0], &[0, 0, 1]).unwrap_err();
        let count = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::NonPositiveService)
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_multiple_errors() {
        // Mismatch + negative arrival + negative service
        let errors = validate_workload(&[-1, 0, 2], &[-4, 1]).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_horizon_overflow() {
        let errors = validate_workload(&[i64::MAX - 1], &[5]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);

        let errors = validate_workload(&[0, 0], &[i64::MAX, 1]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);

        // Exactly at the limit is still representable.
        assert!(validate_workload(&[i64::MAX - 5], &[5]).is_ok());
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum("quantum", 1).is_ok());
        let errors = validate_quantum("quantum", 0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveQuantum);
    }

    #[test]
    fn test_factor() {
        assert!(validate_factor("waiting_time_factor", 0.5).is_ok());
        assert!(validate_factor("waiting_time_factor", 0.0).is_err());
        assert!(validate_factor("waiting_time_factor", -1.0).is_err());
        assert!(validate_factor("arrival_time_factor", f64::NAN).is_err());
        assert!(validate_factor("arrival_time_factor", f64::INFINITY).is_err());
    }

    #[test]
    fn test_collect_keeps_all() {
        let merged = collect([
            validate_quantum("quantum_1", 0),
            validate_quantum("quantum_2", 4),
            validate_quantum("quantum_3", -1),
        ]);
        assert_eq!(merged.unwrap_err().len(), 2);
    }
}
