//! `sixsigma init` command - Create a project configuration

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Reset the configuration even if .sixsigma/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized sixsigma project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Evaluate a process",
                style("sixsigma eval --tests 1500 --fails 256").yellow()
            );
            println!(
                "  {} Tune the label thresholds",
                style("sixsigma config set red_threshold 2.1").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} sixsigma project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!("  Use {} to reset its configuration", style("--force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
