//! Normalization and checking of raw process records

use serde::{Deserialize, Serialize};

use crate::engine::error::{CountField, ValidationError};
use crate::engine::input::{RawCount, RawProcessInput};

/// A record whose counts are whole, consistent numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidProcess {
    pub tests: u64,
    pub fails: u64,
    pub name: Option<String>,
}

/// Validator for raw records
///
/// Numeric strings are only coerced when the calling interface carries
/// counts as text (command-line arguments, CSV cells, query strings).
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    accept_numeric_strings: bool,
}

impl Validator {
    /// Validator that rejects textual counts
    pub fn strict() -> Self {
        Self {
            accept_numeric_strings: false,
        }
    }

    /// Validator that also parses numeric strings
    pub fn lenient() -> Self {
        Self {
            accept_numeric_strings: true,
        }
    }

    /// Validate one record
    ///
    /// `tests` is checked before `fails`, so a record with zero tests is
    /// always rejected as `NoTestsPerformed` whatever its fails value.
    pub fn validate(&self, raw: &RawProcessInput) -> Result<ValidProcess, ValidationError> {
        let tests = self.coerce_count(&raw.tests, CountField::Tests)?;
        if tests == 0 {
            return Err(ValidationError::NoTestsPerformed);
        }

        let fails = self.coerce_count(&raw.fails, CountField::Fails)?;
        if fails > tests {
            return Err(ValidationError::FailsExceedTests { tests, fails });
        }

        Ok(ValidProcess {
            tests,
            fails,
            name: raw.name.clone(),
        })
    }

    /// Convert a raw count into a non-negative whole number
    pub fn coerce_count(&self, value: &RawCount, field: CountField) -> Result<u64, ValidationError> {
        match value {
            RawCount::Integer(v) => u64::try_from(*v)
                .map_err(|_| ValidationError::invalid_count(field, v, "must not be negative")),
            RawCount::Float(v) => float_to_count(*v, field),
            RawCount::Text(s) if self.accept_numeric_strings => parse_count(s, field),
            RawCount::Text(s) => Err(ValidationError::invalid_count(
                field,
                s,
                "expected a number, not text",
            )),
        }
    }
}

fn float_to_count(v: f64, field: CountField) -> Result<u64, ValidationError> {
    if !v.is_finite() {
        return Err(ValidationError::invalid_count(field, v, "must be finite"));
    }
    if v < 0.0 {
        return Err(ValidationError::invalid_count(field, v, "must not be negative"));
    }
    if v.fract() != 0.0 {
        return Err(ValidationError::invalid_count(field, v, "must be a whole number"));
    }
    if v >= u64::MAX as f64 {
        return Err(ValidationError::invalid_count(field, v, "is too large"));
    }
    Ok(v as u64)
}

fn parse_count(text: &str, field: CountField) -> Result<u64, ValidationError> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Ok(v);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        // only negatives get here
        return Err(ValidationError::invalid_count(field, v, "must not be negative"));
    }
    match trimmed.parse::<f64>() {
        Ok(v) => float_to_count(v, field),
        Err(_) => Err(ValidationError::invalid_count(field, text, "not a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tests: impl Into<RawCount>, fails: impl Into<RawCount>) -> RawProcessInput {
        RawProcessInput::new(tests, fails)
    }

    #[test]
    fn test_valid_integer_record() {
        let valid = Validator::strict()
            .validate(&raw(1500, 256).with_name("Example process"))
            .unwrap();
        assert_eq!(valid.tests, 1500);
        assert_eq!(valid.fails, 256);
        assert_eq!(valid.name.as_deref(), Some("Example process"));
    }

    #[test]
    fn test_integral_float_behaves_like_integer() {
        let from_float = Validator::strict().validate(&raw(1500.0, 256.0)).unwrap();
        let from_int = Validator::strict().validate(&raw(1500, 256)).unwrap();
        assert_eq!(from_float, from_int);
    }

    #[test]
    fn test_fractional_float_rejected() {
        let err = Validator::strict().validate(&raw(1500.5, 2)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCount {
                field: CountField::Tests,
                ..
            }
        ));

        let err = Validator::strict().validate(&raw(10, 1.5)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCount {
                field: CountField::Fails,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_counts_rejected() {
        let err = Validator::strict().validate(&raw(-50, -25)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCount {
                field: CountField::Tests,
                ..
            }
        ));

        let err = Validator::strict().validate(&raw(50, -25)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCount {
                field: CountField::Fails,
                ..
            }
        ));

        let err = Validator::strict().validate(&raw(-1.0, 0)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCount { .. }));
    }

    #[test]
    fn test_zero_tests_regardless_of_fails() {
        for fails in [RawCount::from(0), RawCount::from(100), RawCount::from(-5), RawCount::from("x")] {
            let err = Validator::strict()
                .validate(&RawProcessInput {
                    tests: RawCount::Integer(0),
                    fails,
                    name: None,
                })
                .unwrap_err();
            assert_eq!(err, ValidationError::NoTestsPerformed);
        }
    }

    #[test]
    fn test_fails_exceed_tests() {
        let err = Validator::strict().validate(&raw(10, 11)).unwrap_err();
        assert_eq!(err, ValidationError::FailsExceedTests { tests: 10, fails: 11 });
    }

    #[test]
    fn test_fails_equal_tests_accepted() {
        let valid = Validator::strict().validate(&raw(10, 10)).unwrap();
        assert_eq!(valid.fails, 10);
    }

    #[test]
    fn test_strict_rejects_text() {
        let err = Validator::strict().validate(&raw("100", 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCount { .. }));
    }

    #[test]
    fn test_lenient_parses_numeric_text() {
        let v = Validator::lenient();
        let valid = v.validate(&raw(" 100 ", "1.0")).unwrap();
        assert_eq!((valid.tests, valid.fails), (100, 1));

        assert!(matches!(
            v.validate(&raw("abc", 1)).unwrap_err(),
            ValidationError::InvalidCount { .. }
        ));
        assert!(matches!(
            v.validate(&raw("-4", 1)).unwrap_err(),
            ValidationError::InvalidCount { .. }
        ));
        assert!(matches!(
            v.validate(&raw("12.5", 1)).unwrap_err(),
            ValidationError::InvalidCount { .. }
        ));
        assert!(matches!(
            v.validate(&raw("NaN", 1)).unwrap_err(),
            ValidationError::InvalidCount { .. }
        ));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Validator::strict().validate(&raw(bad, 0)).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidCount { .. }));
        }
    }
}
