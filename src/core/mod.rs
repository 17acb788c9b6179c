//! Core module - configuration, project discovery and logging

pub mod config;
pub mod logging;
pub mod project;

pub use config::Config;
pub use project::{Project, ProjectError};
