//! `sixsigma bulk` command - Evaluate an ordered list of processes
//!
//! Input is a JSON or YAML list (a single object is accepted too) or a CSV
//! file with `tests`, `fails` and optional `name` columns. The whole list
//! is validated before anything is reported.

use clap::ValueEnum;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::helpers::write_output;
use crate::cli::output::{render_processes, RenderOptions};
use crate::cli::GlobalOpts;
use crate::engine::{Evaluator, RawCount, RawProcessInput, Validator};

#[derive(clap::Args, Debug)]
pub struct BulkArgs {
    /// Input file (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Input format (auto-detected from the file extension or content)
    #[arg(long, short = 'i', default_value = "auto")]
    pub input: InputFormat,

    /// Maximum number of processes to report (default: max_processes config)
    #[arg(long, short = 'l')]
    pub limit: Option<NonZeroUsize>,

    /// Reject counts given as quoted strings
    #[arg(long)]
    pub strict: bool,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Detect from extension, then content
    #[default]
    Auto,
    Json,
    Yaml,
    Csv,
}

pub fn run(args: BulkArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();

    let (content, source) = read_input(args.file.as_deref())?;
    let format = detect_format(args.input, args.file.as_deref(), &content);
    if args.strict && format == InputFormat::Csv {
        return Err(miette::miette!(
            help = "CSV cells are always text; drop --strict or convert the input to JSON",
            "--strict cannot be used with CSV input"
        ));
    }

    let raw = parse_records(&content, format)
        .map_err(|e| miette::miette!("Failed to parse {}: {}", source, e))?;
    debug!(count = raw.len(), ?format, %source, "parsed process records");

    let validator = if args.strict {
        Validator::strict()
    } else {
        Validator::lenient()
    };
    let evaluator = Evaluator::new(config.engine_config())?.with_validator(validator);

    let mut processes = evaluator.evaluate_batch(&raw)?;

    let limit = args
        .limit
        .map_or_else(|| config.max_processes(), NonZeroUsize::get);
    if processes.len() > limit {
        warn!(
            total = processes.len(),
            limit,
            "reporting only the first {} processes",
            limit
        );
        processes.truncate(limit);
    }

    let options = RenderOptions {
        name_limit: config.name_display_limit(),
        show_summary: !global.quiet,
    };
    let rendered = render_processes(&processes, global.resolved_format(&config), options)?;
    write_output(&rendered, args.output.as_deref())
}

fn read_input(file: Option<&Path>) -> Result<(String, String)> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let content = std::fs::read_to_string(path).into_diagnostic()?;
            Ok((content, path.display().to_string()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .into_diagnostic()?;
            Ok((content, "stdin".to_string()))
        }
    }
}

/// Resolve `Auto` from the file extension, then from the content
fn detect_format(requested: InputFormat, file: Option<&Path>, content: &str) -> InputFormat {
    if requested != InputFormat::Auto {
        return requested;
    }

    let ext = file
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => return InputFormat::Json,
        Some("yaml") | Some("yml") => return InputFormat::Yaml,
        Some("csv") => return InputFormat::Csv,
        _ => {}
    }

    let trimmed = content.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        InputFormat::Json
    } else if looks_like_csv_header(trimmed) {
        InputFormat::Csv
    } else {
        InputFormat::Yaml
    }
}

fn looks_like_csv_header(content: &str) -> bool {
    let first = content.lines().next().unwrap_or("");
    let columns: Vec<String> = first
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();
    columns.iter().any(|c| c == "tests") && columns.iter().any(|c| c == "fails")
}

fn parse_records(content: &str, format: InputFormat) -> Result<Vec<RawProcessInput>, String> {
    match format {
        InputFormat::Json => parse_json(content),
        InputFormat::Yaml | InputFormat::Auto => parse_yaml(content),
        InputFormat::Csv => parse_csv(content),
    }
}

/// A list of records, or a single record object
fn parse_json(content: &str) -> Result<Vec<RawProcessInput>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let records = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|one| vec![one])
    };
    records.map_err(|e| e.to_string())
}

fn parse_yaml(content: &str) -> Result<Vec<RawProcessInput>, String> {
    let value: serde_yml::Value = serde_yml::from_str(content).map_err(|e| e.to_string())?;
    let records = if value.is_sequence() {
        serde_yml::from_value(value)
    } else {
        serde_yml::from_value(value).map(|one| vec![one])
    };
    records.map_err(|e| e.to_string())
}

fn parse_csv(content: &str) -> Result<Vec<RawProcessInput>, String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr.headers().map_err(|e| e.to_string())?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_ascii_lowercase(), i))
        .collect();

    let column = |name: &str| {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| format!("missing required column '{}'", name))
    };
    let tests_col = column("tests")?;
    let fails_col = column("fails")?;
    let name_col = header_map.get("name").copied();

    let mut records = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        // header is row 1
        let row_num = row_idx + 2;
        let record = result.map_err(|e| format!("row {}: {}", row_num, e))?;
        let field = |col: usize| record.get(col).unwrap_or("").to_string();

        records.push(RawProcessInput {
            tests: RawCount::Text(field(tests_col)),
            fails: RawCount::Text(field(fails_col)),
            name: name_col.map(field).filter(|n| !n.is_empty()),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_list() {
        let raw = parse_records(
            r#"[{"tests": 100, "fails": 1, "name": "A"}, {"tests": 50.0, "fails": "2"}]"#,
            InputFormat::Json,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].name.as_deref(), Some("A"));
        assert_eq!(raw[1].fails, RawCount::Text("2".to_string()));
    }

    #[test]
    fn test_parse_single_json_object() {
        let raw = parse_records(r#"{"tests": 100, "fails": 1}"#, InputFormat::Json).unwrap();
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_parse_yaml_list() {
        let raw = parse_records(
            "- tests: 1500\n  fails: 256\n  name: Example process\n- tests: 10\n  fails: 0\n",
            InputFormat::Yaml,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].tests, RawCount::Integer(1500));
        assert_eq!(raw[1].name, None);
    }

    #[test]
    fn test_parse_csv_with_any_column_order() {
        let raw = parse_records(
            "Name,Fails,Tests\nLine 1,256,1500\n,0,10\n",
            InputFormat::Csv,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].tests, RawCount::Text("1500".to_string()));
        assert_eq!(raw[0].fails, RawCount::Text("256".to_string()));
        assert_eq!(raw[0].name.as_deref(), Some("Line 1"));
        assert_eq!(raw[1].name, None);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let err = parse_records("tests,name\n10,A\n", InputFormat::Csv).unwrap_err();
        assert!(err.contains("fails"));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(InputFormat::Auto, Some(Path::new("data.CSV")), ""),
            InputFormat::Csv
        );
        assert_eq!(
            detect_format(InputFormat::Auto, None, "  [{\"tests\": 1, \"fails\": 0}]"),
            InputFormat::Json
        );
        assert_eq!(
            detect_format(InputFormat::Auto, None, "tests,fails\n1,0\n"),
            InputFormat::Csv
        );
        assert_eq!(
            detect_format(InputFormat::Auto, None, "- tests: 1\n  fails: 0\n"),
            InputFormat::Yaml
        );
        assert_eq!(
            detect_format(InputFormat::Json, Some(Path::new("data.csv")), ""),
            InputFormat::Json
        );
    }
}
