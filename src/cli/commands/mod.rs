//! CLI command implementations

pub mod bulk;
pub mod completions;
pub mod config;
pub mod eval;
pub mod init;
