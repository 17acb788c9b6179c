//! sixsigma: Six Sigma process evaluation
//!
//! Turns counts of tests performed and tests failed into a defect rate, a
//! sigma level (with the conventional 1.5 sigma long-term shift) and a
//! RED / YELLOW / GREEN label.
//!
//! ```
//! use sixsigma::engine::{Evaluator, Label, RawProcessInput};
//!
//! let process = Evaluator::default()
//!     .evaluate(&RawProcessInput::new(1500, 256).with_name("Example process"))
//!     .unwrap();
//! assert_eq!(process.label, Label::Yellow);
//! assert!((process.sigma - 2.4515340671620525).abs() < 1e-6);
//! ```

pub mod cli;
pub mod core;
pub mod engine;
