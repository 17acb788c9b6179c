//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-project settings directory
pub const PROJECT_DIR: &str = ".sixsigma";

/// A directory tree carrying its own `.sixsigma/` settings
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .sixsigma/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create the `.sixsigma/` directory with a commented default config
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }
        Self::write_skeleton(root)
    }

    /// Initialize even if `.sixsigma/` exists, resetting its config
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_skeleton(root)
    }

    fn write_skeleton(root: PathBuf) -> Result<Self, ProjectError> {
        let project = Self { root };
        std::fs::create_dir_all(project.settings_dir())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(project.config_path(), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        Ok(project)
    }

    fn default_config() -> &'static str {
        r#"# Six Sigma Project Configuration

# Default output format (auto, table, yaml, json, csv, tsv, md)
# default_format: auto

# Sigma below which a process is labelled RED
# red_threshold: 2.1

# Sigma below which a process is labelled YELLOW (GREEN at or above)
# yellow_threshold: 4.1

# Long-term shift added to the normal quantile
# long_term_shift: 1.5

# Defect rates are clamped to [floor, 1 - floor] before the sigma conversion
# defect_rate_floor: 1.0e-9

# Maximum number of processes reported by `sixsigma bulk`
# max_processes: 10

# Maximum number of characters of a process name shown in tables
# name_display_limit: 40
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .sixsigma configuration directory
    pub fn settings_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Get the project config file path
    pub fn config_path(&self) -> PathBuf {
        self.settings_dir().join("config.yaml")
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a sixsigma project (searched from {searched_from:?}). Run 'sixsigma init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("sixsigma project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.settings_dir().is_dir());
        let config = std::fs::read_to_string(project.config_path()).unwrap();
        assert!(config.contains("red_threshold"));
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_init_force_resets_config() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(project.config_path(), "max_processes: 2\n").unwrap();

        let project = Project::init_force(tmp.path()).unwrap();
        let config = std::fs::read_to_string(project.config_path()).unwrap();
        assert!(config.contains("# max_processes: 10"));
    }

    #[test]
    fn test_project_discover_finds_settings_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_settings_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
