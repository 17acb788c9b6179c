//! Error taxonomy for process evaluation

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Which count of a record a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Tests,
    Fails,
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Tests => write!(f, "tests"),
            CountField::Fails => write!(f, "fails"),
        }
    }
}

/// Rejection of a single raw process record
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("invalid {field} count '{value}': {reason}")]
    #[diagnostic(
        code(sixsigma::validation::invalid_count),
        help("counts must be whole, non-negative numbers (e.g. 1500 or 1500.0)")
    )]
    InvalidCount {
        field: CountField,
        value: String,
        reason: String,
    },

    #[error("no tests performed: the total number of tests must be greater than 0")]
    #[diagnostic(code(sixsigma::validation::no_tests_performed))]
    NoTestsPerformed,

    #[error("the number of fails ({fails}) can't be greater than the total number of tests ({tests})")]
    #[diagnostic(code(sixsigma::validation::fails_exceed_tests))]
    FailsExceedTests { tests: u64, fails: u64 },
}

impl ValidationError {
    pub(crate) fn invalid_count(
        field: CountField,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidCount {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// First invalid record of a batch; the whole batch is rejected
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("process #{} rejected", .index + 1)]
#[diagnostic(
    code(sixsigma::validation::batch_rejected),
    help("fix the record and resubmit the whole list; partial batches are never evaluated")
)]
pub struct BatchError {
    /// Zero-based position of the offending record
    pub index: usize,

    #[source]
    #[diagnostic_source]
    pub error: ValidationError,
}

/// Inconsistent engine configuration
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ConfigError {
    #[error("{name} must be a finite number (got {value})")]
    #[diagnostic(code(sixsigma::config::not_finite))]
    NotFinite { name: &'static str, value: f64 },

    #[error("defect_rate_floor must lie strictly between 0 and 0.5 (got {0})")]
    #[diagnostic(
        code(sixsigma::config::defect_rate_floor),
        help("a typical floor is 1e-9, which bounds sigma to roughly 7.5")
    )]
    DefectRateFloor(f64),

    #[error("red_threshold ({red}) must be below yellow_threshold ({yellow})")]
    #[diagnostic(code(sixsigma::config::thresholds))]
    ThresholdOrder { red: f64, yellow: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_count_message_names_field() {
        let err = ValidationError::invalid_count(CountField::Fails, -3, "must not be negative");
        assert_eq!(
            err.to_string(),
            "invalid fails count '-3': must not be negative"
        );
    }

    #[test]
    fn test_batch_error_reports_one_based_position() {
        let err = BatchError {
            index: 2,
            error: ValidationError::NoTestsPerformed,
        };
        assert_eq!(err.to_string(), "process #3 rejected");
        assert_eq!(
            std::error::Error::source(&err).map(|e| e.to_string()),
            Some(ValidationError::NoTestsPerformed.to_string())
        );
    }
}
