//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bulk::BulkArgs, completions::CompletionsArgs, config::ConfigCommands, eval::EvalArgs,
    init::InitArgs,
};
use crate::core::Config;

#[derive(Parser)]
#[command(name = "sixsigma")]
#[command(author, version, about = "Six Sigma process evaluation")]
#[command(long_about = "Evaluate test processes with the \"6 Sigma\" approach: defect rate, sigma level and a RED/YELLOW/GREEN label from the number of tests and fails.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .sixsigma/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

impl GlobalOpts {
    /// Load configuration honouring `--project`
    pub fn config(&self) -> Config {
        Config::load_from(self.project.as_deref())
    }

    /// Requested format, falling back to the configured default for `auto`
    pub fn resolved_format(&self, config: &Config) -> OutputFormat {
        if self.format != OutputFormat::Auto {
            return self.format;
        }
        config
            .default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a single process
    Eval(EvalArgs),

    /// Evaluate an ordered list of processes from a JSON, YAML or CSV file
    Bulk(BulkArgs),

    /// Create a .sixsigma/ project configuration
    Init(InitArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary for a single process, table for a list
    #[default]
    Auto,
    /// Aligned table
    Table,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON process list (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
    /// Markdown tables
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolved_format_uses_config_default() {
        let cli = Cli::parse_from(["sixsigma", "eval", "--tests", "10", "--fails", "1"]);
        let config = Config {
            default_format: Some("json".to_string()),
            ..Config::default()
        };
        assert_eq!(cli.global.resolved_format(&config), OutputFormat::Json);

        let cli = Cli::parse_from(["sixsigma", "-f", "csv", "eval", "--tests", "10", "--fails", "1"]);
        assert_eq!(cli.global.resolved_format(&config), OutputFormat::Csv);
    }

    #[test]
    fn test_unknown_default_format_falls_back_to_auto() {
        let cli = Cli::parse_from(["sixsigma", "eval", "--tests", "10", "--fails", "1"]);
        let config = Config {
            default_format: Some("pdf".to_string()),
            ..Config::default()
        };
        assert_eq!(cli.global.resolved_format(&config), OutputFormat::Auto);
    }
}
