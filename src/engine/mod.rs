//! Six Sigma evaluation engine
//!
//! Raw records flow through [`Validator`] → [`SigmaCalculator`] →
//! [`Classifier`]; [`Evaluator`] composes the three for single records and
//! ordered batches. Everything here is pure and stateless.

pub mod classifier;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod sigma;
pub mod validator;

pub use classifier::{Classifier, Label, Thresholds};
pub use error::{BatchError, ConfigError, CountField, ValidationError};
pub use evaluator::{EngineConfig, EvaluatedProcess, Evaluator};
pub use input::{RawCount, RawProcessInput};
pub use sigma::{SigmaCalculator, SigmaConfig, SigmaResult, DEFECT_RATE_FLOOR, LONG_TERM_SHIFT};
pub use validator::{ValidProcess, Validator};
