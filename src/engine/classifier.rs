//! Threshold-based quality labels

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::error::ConfigError;

/// Qualitative class of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Red,
    Yellow,
    Green,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Red => "RED",
            Label::Yellow => "YELLOW",
            Label::Green => "GREEN",
        }
    }

    /// Terminal colour used when rendering the label
    pub fn color(&self) -> console::Color {
        match self {
            Label::Red => console::Color::Red,
            Label::Yellow => console::Color::Yellow,
            Label::Green => console::Color::Green,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band boundaries
///
/// Each value is the supremum of its band: RED never reaches `red`, which is
/// the lowest YELLOW sigma; YELLOW never reaches `yellow`, the lowest GREEN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub red: f64,
    pub yellow: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            red: 2.1,
            yellow: 4.1,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.red.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "red_threshold",
                value: self.red,
            });
        }
        if !self.yellow.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "yellow_threshold",
                value: self.yellow,
            });
        }
        if self.red >= self.yellow {
            return Err(ConfigError::ThresholdOrder {
                red: self.red,
                yellow: self.yellow,
            });
        }
        Ok(())
    }
}

/// Maps sigma levels to labels
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn classify(&self, sigma: f64) -> Label {
        if sigma < self.thresholds.red {
            Label::Red
        } else if sigma < self.thresholds.yellow {
            Label::Yellow
        } else {
            Label::Green
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let c = Classifier::default();
        assert_eq!(c.classify(-4.5), Label::Red);
        assert_eq!(c.classify(2.0999973523886952), Label::Red);
        assert_eq!(c.classify(2.1000003533655227), Label::Yellow);
        assert_eq!(c.classify(4.099940225647758), Label::Yellow);
        assert_eq!(c.classify(4.10001384285712), Label::Green);
        assert_eq!(c.classify(7.5), Label::Green);
    }

    #[test]
    fn test_boundaries_belong_to_upper_band() {
        let c = Classifier::default();
        assert_eq!(c.classify(2.1), Label::Yellow);
        assert_eq!(c.classify(4.1), Label::Green);
    }

    #[test]
    fn test_custom_thresholds() {
        let c = Classifier::new(Thresholds {
            red: 3.0,
            yellow: 6.0,
        })
        .unwrap();
        assert_eq!(c.classify(2.5), Label::Red);
        assert_eq!(c.classify(4.5), Label::Yellow);
        assert_eq!(c.classify(6.0), Label::Green);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = Classifier::new(Thresholds {
            red: 4.1,
            yellow: 2.1,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { .. }));
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&Label::Yellow).unwrap(), "\"YELLOW\"");
        let label: Label = serde_json::from_str("\"GREEN\"").unwrap();
        assert_eq!(label, Label::Green);
        assert_eq!(Label::Red.to_string(), "RED");
    }
}
