//! Rendering of evaluated process lists
//!
//! The JSON rendering is the process list hand-off format: an ordered array
//! of `{tests, fails, name, defect_rate, sigma, label}` objects.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_tsv, format_percent, truncate_str};
use crate::cli::OutputFormat;
use crate::engine::{EvaluatedProcess, Label};

const HEADERS: [&str; 7] = ["#", "Name", "Tests", "Fails", "Defect rate", "Sigma", "Label"];

/// Options shared by all renderings
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Maximum displayed length of a process name (table formats only)
    pub name_limit: usize,
    /// Append a per-label summary line after tables
    pub show_summary: bool,
}

/// Render processes in the requested format (`Auto` renders a table)
pub fn render_processes(
    processes: &[EvaluatedProcess],
    format: OutputFormat,
    options: RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(processes).into_diagnostic()?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yml::to_string(processes).into_diagnostic(),
        OutputFormat::Csv => render_csv(processes),
        OutputFormat::Tsv => Ok(render_tsv(processes)),
        OutputFormat::Md => Ok(render_table(processes, true, options)),
        OutputFormat::Auto | OutputFormat::Table => Ok(render_table(processes, false, options)),
    }
}

/// Detailed, styled view of a single process
pub fn render_summary(process: &EvaluatedProcess) -> String {
    let mut out = String::new();
    if let Some(name) = &process.name {
        out.push_str(&format!("{}\n", style(name).bold()));
    }
    out.push_str(&format!("  Tests:        {}\n", process.tests));
    out.push_str(&format!("  Fails:        {}\n", process.fails));
    out.push_str(&format!(
        "  Defect rate:  {} {}\n",
        format_percent(process.defect_rate),
        style(format!("({})", process.defect_rate)).dim()
    ));
    out.push_str(&format!("  Sigma:        {:.3}\n", process.sigma));
    out.push_str(&format!(
        "  Label:        {}\n",
        style(process.label).fg(process.label.color()).bold()
    ));
    out
}

fn render_table(processes: &[EvaluatedProcess], markdown: bool, options: RenderOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADERS);

    for (i, p) in processes.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            truncate_str(p.name.as_deref().unwrap_or("-"), options.name_limit),
            p.tests.to_string(),
            p.fails.to_string(),
            format_percent(p.defect_rate),
            format!("{:.3}", p.sigma),
            p.label.to_string(),
        ]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    let mut out = table.to_string();
    out.push('\n');
    if options.show_summary {
        out.push_str(&label_summary(processes));
        out.push('\n');
    }
    out
}

fn render_csv(processes: &[EvaluatedProcess]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for p in processes {
        wtr.serialize(p).into_diagnostic()?;
    }
    if processes.is_empty() {
        wtr.write_record(["tests", "fails", "name", "defect_rate", "sigma", "label"])
            .into_diagnostic()?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| miette::miette!("Failed to write CSV: {}", e.error()))?;
    String::from_utf8(bytes).into_diagnostic()
}

fn render_tsv(processes: &[EvaluatedProcess]) -> String {
    let mut out = String::from("tests\tfails\tname\tdefect_rate\tsigma\tlabel\n");
    for p in processes {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            p.tests,
            p.fails,
            escape_tsv(p.name.as_deref().unwrap_or("")),
            p.defect_rate,
            p.sigma,
            p.label
        ));
    }
    out
}

/// e.g. "3 process(es) evaluated: 1 GREEN, 1 YELLOW, 1 RED"
fn label_summary(processes: &[EvaluatedProcess]) -> String {
    let count = |label: Label| processes.iter().filter(|p| p.label == label).count();
    let parts: Vec<String> = [Label::Green, Label::Yellow, Label::Red]
        .into_iter()
        .map(|label| {
            format!(
                "{} {}",
                count(label),
                style(label).fg(label.color())
            )
        })
        .collect();
    format!(
        "{} process(es) evaluated: {}",
        processes.len(),
        parts.join(", ")
    )
}
