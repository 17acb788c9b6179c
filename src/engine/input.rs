//! Raw process records as received from a calling layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// A count as it arrives from an external format, before coercion
///
/// JSON and YAML numbers land in `Integer` or `Float`; quoted values,
/// CSV cells and command-line arguments land in `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCount::Integer(v) => write!(f, "{}", v),
            RawCount::Float(v) => write!(f, "{}", v),
            RawCount::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RawCount {
    fn from(v: i64) -> Self {
        RawCount::Integer(v)
    }
}

impl From<i32> for RawCount {
    fn from(v: i32) -> Self {
        RawCount::Integer(i64::from(v))
    }
}

impl From<u64> for RawCount {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => RawCount::Integer(v),
            Err(_) => RawCount::Text(v.to_string()),
        }
    }
}

impl From<f64> for RawCount {
    fn from(v: f64) -> Self {
        RawCount::Float(v)
    }
}

impl From<&str> for RawCount {
    fn from(s: &str) -> Self {
        RawCount::Text(s.to_string())
    }
}

impl From<String> for RawCount {
    fn from(s: String) -> Self {
        RawCount::Text(s)
    }
}

/// An unvalidated process record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProcessInput {
    /// The total number of tests
    pub tests: RawCount,

    /// The number of tests qualified as failed
    pub fails: RawCount,

    /// The name of the process (optional)
    #[serde(default)]
    pub name: Option<String>,
}

impl RawProcessInput {
    pub fn new(tests: impl Into<RawCount>, fails: impl Into<RawCount>) -> Self {
        Self {
            tests: tests.into(),
            fails: fails.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
