//! `sixsigma eval` command - Evaluate a single process

use miette::Result;

use crate::cli::output::{render_processes, render_summary, RenderOptions};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::engine::{Evaluator, RawCount, RawProcessInput, Validator};

#[derive(clap::Args, Debug)]
pub struct EvalArgs {
    /// The total number of tests
    #[arg(long, short = 't', allow_hyphen_values = true)]
    pub tests: String,

    /// The number of tests qualified as failed
    #[arg(long, allow_hyphen_values = true)]
    pub fails: String,

    /// The name of the process
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl EvalArgs {
    fn to_raw(&self) -> RawProcessInput {
        RawProcessInput {
            tests: RawCount::Text(self.tests.clone()),
            fails: RawCount::Text(self.fails.clone()),
            name: self.name.clone(),
        }
    }
}

pub fn run(args: EvalArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();
    // command-line values always arrive as text
    let evaluator = Evaluator::new(config.engine_config())?.with_validator(Validator::lenient());

    let process = evaluator.evaluate(&args.to_raw())?;

    match global.resolved_format(&config) {
        OutputFormat::Auto => print!("{}", render_summary(&process)),
        format => {
            let options = RenderOptions {
                name_limit: config.name_display_limit(),
                show_summary: false,
            };
            print!("{}", render_processes(&[process], format, options)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Label;

    #[test]
    fn test_args_become_textual_counts() {
        let args = EvalArgs {
            tests: "1500".to_string(),
            fails: "256".to_string(),
            name: Some("Example process".to_string()),
        };
        let raw = args.to_raw();
        assert_eq!(raw.tests, RawCount::Text("1500".to_string()));

        let evaluated = Evaluator::default()
            .with_validator(Validator::lenient())
            .evaluate(&raw)
            .unwrap();
        assert_eq!(evaluated.label, Label::Yellow);
    }
}
