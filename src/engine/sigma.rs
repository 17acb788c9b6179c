//! Defect rate and sigma level computation
//!
//! The sigma level is the upper-tail standard normal quantile of the defect
//! rate plus the conventional 1.5 sigma long-term shift:
//!
//! ```text
//! sigma = Phi_inv(1 - defect_rate) + 1.5
//! ```

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc_inv;
use std::f64::consts::SQRT_2;

use crate::engine::error::ConfigError;
use crate::engine::validator::ValidProcess;

/// Conventional long-term process shift, in standard deviations
pub const LONG_TERM_SHIFT: f64 = 1.5;

/// Smallest defect rate fed into the quantile function
///
/// A process without fails would otherwise have an infinite sigma. With this
/// floor it tops out at about 7.4978, and a process where every test failed
/// bottoms out at about -4.4978.
pub const DEFECT_RATE_FLOOR: f64 = 1e-9;

/// Parameters of the sigma conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaConfig {
    /// Added to the normal quantile
    pub long_term_shift: f64,

    /// Defect rates are clamped to `[floor, 1 - floor]` before conversion
    pub defect_rate_floor: f64,
}

impl Default for SigmaConfig {
    fn default() -> Self {
        Self {
            long_term_shift: LONG_TERM_SHIFT,
            defect_rate_floor: DEFECT_RATE_FLOOR,
        }
    }
}

impl SigmaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.long_term_shift.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "long_term_shift",
                value: self.long_term_shift,
            });
        }
        let floor = self.defect_rate_floor;
        if !(floor > 0.0 && floor < 0.5) {
            return Err(ConfigError::DefectRateFloor(floor));
        }
        Ok(())
    }
}

/// Output of the calculator for one process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaResult {
    /// `fails / tests`, never clamped
    pub defect_rate: f64,
    pub sigma: f64,
}

/// Pure mapping from validated counts to defect rate and sigma level
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmaCalculator {
    config: SigmaConfig,
}

impl SigmaCalculator {
    pub fn new(config: SigmaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute defect rate and sigma for a validated record
    pub fn calculate(&self, process: &ValidProcess) -> SigmaResult {
        let defect_rate = process.fails as f64 / process.tests as f64;
        SigmaResult {
            defect_rate,
            sigma: self.sigma_for_rate(defect_rate),
        }
    }

    /// Sigma level for a defect rate in `[0, 1]`
    pub fn sigma_for_rate(&self, defect_rate: f64) -> f64 {
        let floor = self.config.defect_rate_floor;
        let rate = defect_rate.clamp(floor, 1.0 - floor);
        upper_tail_quantile(rate) + self.config.long_term_shift
    }

    /// Highest reachable sigma (no fails)
    pub fn ceiling(&self) -> f64 {
        self.sigma_for_rate(0.0)
    }

    /// Lowest reachable sigma (every test failed)
    pub fn floor(&self) -> f64 {
        self.sigma_for_rate(1.0)
    }
}

/// Standard normal `z` with `P(Z > z) = q`
///
/// Equal to `Phi_inv(1 - q)`, evaluated through `erfc_inv(2q)` so that small
/// tail probabilities keep full precision instead of cancelling in `1 - q`.
fn upper_tail_quantile(q: f64) -> f64 {
    SQRT_2 * erfc_inv(2.0 * q)
}
