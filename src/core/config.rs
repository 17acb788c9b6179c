//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::Project;
use crate::engine::{EngineConfig, SigmaConfig, Thresholds};

/// Maximum number of processes shown for one bulk request
pub const DEFAULT_MAX_PROCESSES: usize = 10;

/// Maximum number of characters of a process name shown in tables
pub const DEFAULT_NAME_DISPLAY_LIMIT: usize = 40;

/// Six Sigma configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format
    pub default_format: Option<String>,

    /// Sigma below which a process is RED
    pub red_threshold: Option<f64>,

    /// Sigma below which a process is YELLOW
    pub yellow_threshold: Option<f64>,

    /// Long-term shift added to the normal quantile
    pub long_term_shift: Option<f64>,

    /// Defect rate floor used for degenerate rates
    pub defect_rate_floor: Option<f64>,

    /// Maximum number of processes reported by `bulk`
    pub max_processes: Option<NonZeroUsize>,

    /// Maximum displayed length of a process name
    pub name_display_limit: Option<NonZeroUsize>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// The project is discovered from `project_root` when given, else from
    /// the current directory.
    pub fn load_from(project_root: Option<&Path>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sixsigma/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.sixsigma/config.yaml)
        let project = match project_root {
            Some(root) => Project::discover_from(root),
            None => Project::discover(),
        };
        if let Ok(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_path()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.merge(Self::from_env());

        config
    }

    /// Parse a single config file, skipping it when missing or malformed
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config file");
                return None;
            }
        };
        if contents.trim().is_empty() {
            return None;
        }
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config file");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn from_env() -> Config {
        fn parsed<T: std::str::FromStr>(var: &str) -> Option<T> {
            let value = std::env::var(var).ok()?;
            match value.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(var, value = %value, "ignoring unparsable environment variable");
                    None
                }
            }
        }

        Config {
            default_format: std::env::var("SIXSIGMA_DEFAULT_FORMAT").ok(),
            red_threshold: parsed("SIXSIGMA_RED_THRESHOLD"),
            yellow_threshold: parsed("SIXSIGMA_YELLOW_THRESHOLD"),
            max_processes: parsed("SIXSIGMA_MAX_PROCESSES"),
            ..Config::default()
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sixsigma")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.red_threshold.is_some() {
            self.red_threshold = other.red_threshold;
        }
        if other.yellow_threshold.is_some() {
            self.yellow_threshold = other.yellow_threshold;
        }
        if other.long_term_shift.is_some() {
            self.long_term_shift = other.long_term_shift;
        }
        if other.defect_rate_floor.is_some() {
            self.defect_rate_floor = other.defect_rate_floor;
        }
        if other.max_processes.is_some() {
            self.max_processes = other.max_processes;
        }
        if other.name_display_limit.is_some() {
            self.name_display_limit = other.name_display_limit;
        }
    }

    /// Engine settings with built-in defaults for unset keys
    pub fn engine_config(&self) -> EngineConfig {
        let sigma = SigmaConfig::default();
        let thresholds = Thresholds::default();
        EngineConfig {
            sigma: SigmaConfig {
                long_term_shift: self.long_term_shift.unwrap_or(sigma.long_term_shift),
                defect_rate_floor: self.defect_rate_floor.unwrap_or(sigma.defect_rate_floor),
            },
            thresholds: Thresholds {
                red: self.red_threshold.unwrap_or(thresholds.red),
                yellow: self.yellow_threshold.unwrap_or(thresholds.yellow),
            },
        }
    }

    pub fn max_processes(&self) -> usize {
        self.max_processes
            .map_or(DEFAULT_MAX_PROCESSES, NonZeroUsize::get)
    }

    pub fn name_display_limit(&self) -> usize {
        self.name_display_limit
            .map_or(DEFAULT_NAME_DISPLAY_LIMIT, NonZeroUsize::get)
    }
}
