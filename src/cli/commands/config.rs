//! `sixsigma config` command - Configuration management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::Config;
use crate::engine::Evaluator;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's effective value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., red_threshold, max_processes)
    pub key: String,

    /// Value to set
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("default_format", "Default output format (table, json, yaml, csv, tsv, md)"),
    ("red_threshold", "Sigma below which a process is RED (default 2.1)"),
    ("yellow_threshold", "Sigma below which a process is YELLOW (default 4.1)"),
    ("long_term_shift", "Shift added to the normal quantile (default 1.5)"),
    ("defect_rate_floor", "Clamp for zero/total defect rates (default 1e-9)"),
    ("max_processes", "Maximum processes reported by `bulk` (default 10)"),
    ("name_display_limit", "Maximum name length shown in tables (default 40)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();

    if let Some(key) = &args.key {
        ensure_valid_key(key)?;
        println!("{}", effective_value(&config, key));
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        let explicit = get_config_value(&config, key).is_some();
        let value = effective_value(&config, key);
        if explicit {
            println!("  {}: {}", style(key).cyan(), style(value).yellow());
        } else {
            println!(
                "  {}: {} {}",
                style(key).cyan(),
                value,
                style("(default)").dim()
            );
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (SIXSIGMA_RED_THRESHOLD, SIXSIGMA_YELLOW_THRESHOLD, SIXSIGMA_MAX_PROCESSES, SIXSIGMA_DEFAULT_FORMAT)");
    println!("  2. Project config (.sixsigma/config.yaml)");
    println!("  3. Global config (~/.config/sixsigma/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    ensure_valid_key(&args.key)?;

    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    let mut config_map = read_config_map(&config_path)?;
    if let serde_yml::Value::Mapping(map) = &mut config_map {
        map.insert(
            serde_yml::Value::String(args.key.clone()),
            scalar_value(&args.value),
        );
    }

    // Refuse values the loader or the engine would reject
    let candidate: Config = serde_yml::from_value(config_map.clone())
        .map_err(|e| miette::miette!("Invalid value for '{}': {}", args.key, e))?;
    Evaluator::new(candidate.engine_config())?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_config_map(&config_path)?;
    let removed = match &mut config_map {
        serde_yml::Value::Mapping(map) => {
            let key = serde_yml::Value::String(args.key.clone());
            map.remove(&key).is_some()
        }
        _ => false,
    };

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope
    );

    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = get_global_config_path()?;
    let project_path = get_project_config_path(global);

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    if global_path.exists() {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }

    println!();
    match project_path {
        Ok(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            if path.exists() {
                println!("          {}", style("(exists)").green());
            } else {
                println!("          {}", style("(not created)").dim());
            }
        }
        Err(_) => {
            println!(
                "  {} {}",
                style("Project:").cyan(),
                style("(not in a sixsigma project)").dim()
            );
        }
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'sixsigma config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn ensure_valid_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "run 'sixsigma config keys' to list the available keys",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn get_global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn get_project_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    let project = match &global.project {
        Some(root) => Project::discover_from(root),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;
    Ok(project.config_path())
}

fn read_config_map(path: &std::path::Path) -> Result<serde_yml::Value> {
    if !path.exists() {
        return Ok(serde_yml::Value::Mapping(Default::default()));
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    let parsed: serde_yml::Value =
        serde_yml::from_str(&content).unwrap_or(serde_yml::Value::Mapping(Default::default()));
    // An empty or comment-only file parses as null
    if parsed.is_mapping() {
        Ok(parsed)
    } else {
        Ok(serde_yml::Value::Mapping(Default::default()))
    }
}

/// Store numbers as numbers so the typed loader accepts them
fn scalar_value(value: &str) -> serde_yml::Value {
    match serde_yml::from_str::<serde_yml::Value>(value) {
        Ok(v @ serde_yml::Value::Number(_)) => v,
        _ => serde_yml::Value::String(value.to_string()),
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "default_format" => config.default_format.clone(),
        "red_threshold" => config.red_threshold.map(|v| v.to_string()),
        "yellow_threshold" => config.yellow_threshold.map(|v| v.to_string()),
        "long_term_shift" => config.long_term_shift.map(|v| v.to_string()),
        "defect_rate_floor" => config.defect_rate_floor.map(|v| v.to_string()),
        "max_processes" => config.max_processes.map(|v| v.to_string()),
        "name_display_limit" => config.name_display_limit.map(|v| v.to_string()),
        _ => None,
    }
}

fn effective_value(config: &Config, key: &str) -> String {
    if let Some(value) = get_config_value(config, key) {
        return value;
    }
    let engine = config.engine_config();
    match key {
        "default_format" => "auto".to_string(),
        "red_threshold" => engine.thresholds.red.to_string(),
        "yellow_threshold" => engine.thresholds.yellow.to_string(),
        "long_term_shift" => engine.sigma.long_term_shift.to_string(),
        "defect_rate_floor" => engine.sigma.defect_rate_floor.to_string(),
        "max_processes" => config.max_processes().to_string(),
        "name_display_limit" => config.name_display_limit().to_string(),
        _ => String::new(),
    }
}
