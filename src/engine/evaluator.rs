//! Single-record and batch evaluation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::classifier::{Classifier, Label, Thresholds};
use crate::engine::error::{BatchError, ConfigError, ValidationError};
use crate::engine::input::RawProcessInput;
use crate::engine::sigma::{SigmaCalculator, SigmaConfig};
use crate::engine::validator::Validator;

/// Immutable settings bound into an [`Evaluator`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub sigma: SigmaConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sigma.validate()?;
        self.thresholds.validate()
    }
}

/// A validated process enriched with its evaluation
///
/// Field order is the serialized process list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedProcess {
    pub tests: u64,
    pub fails: u64,
    pub name: Option<String>,
    pub defect_rate: f64,
    pub sigma: f64,
    pub label: Label,
}

/// Validator, sigma calculator and classifier composed
///
/// Holds no mutable state and can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    validator: Validator,
    calculator: SigmaCalculator,
    classifier: Classifier,
}

impl Evaluator {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            validator: Validator::strict(),
            calculator: SigmaCalculator::new(config.sigma)?,
            classifier: Classifier::new(config.thresholds)?,
        })
    }

    /// Replace the validator, e.g. to accept counts carried as text
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Evaluate one record, failing on the first validation error
    pub fn evaluate(&self, raw: &RawProcessInput) -> Result<EvaluatedProcess, ValidationError> {
        let valid = self.validator.validate(raw)?;
        let result = self.calculator.calculate(&valid);
        let label = self.classifier.classify(result.sigma);

        debug!(
            tests = valid.tests,
            fails = valid.fails,
            defect_rate = result.defect_rate,
            sigma = result.sigma,
            %label,
            "evaluated process"
        );

        Ok(EvaluatedProcess {
            tests: valid.tests,
            fails: valid.fails,
            name: valid.name,
            defect_rate: result.defect_rate,
            sigma: result.sigma,
            label,
        })
    }

    /// Evaluate an ordered list of records
    ///
    /// All-or-nothing: the first invalid record aborts the call and no
    /// partial list is returned. Output order matches input order.
    pub fn evaluate_batch(
        &self,
        raw: &[RawProcessInput],
    ) -> Result<Vec<EvaluatedProcess>, BatchError> {
        debug!(count = raw.len(), "evaluating batch");
        raw.iter()
            .enumerate()
            .map(|(index, record)| {
                self.evaluate(record)
                    .map_err(|error| BatchError { index, error })
            })
            .collect()
    }
}
