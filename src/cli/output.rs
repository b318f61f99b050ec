//! Output formatting for evaluations

use clap::ValueEnum;
use console::style;
use miette::{miette, IntoDiagnostic, Result};
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, warn};

use crate::cli::helpers::{truncate_str, value_label};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::band::PriorityBand;
use crate::core::config::Config;
use crate::core::result::Evaluation;
use crate::report::{ranked_rows, ReportRenderer};

const COMMENT_WIDTH: usize = 60;

/// Resolve `auto` against the configured default
pub fn effective_format(format: OutputFormat, config: &Config) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            let configured = config.format.as_deref().and_then(|name| {
                match OutputFormat::from_str(name, true) {
                    Ok(f) => Some(f),
                    Err(_) => {
                        warn!(format = name, "ignoring unknown output format in config");
                        None
                    }
                }
            });
            match configured {
                Some(OutputFormat::Auto) | None => OutputFormat::Table,
                Some(f) => f,
            }
        }
        other => other,
    }
}

/// Print an evaluation and write the optional report file
pub fn print_evaluation(eval: &Evaluation, global: &GlobalOpts, config: &Config) -> Result<()> {
    let template = global.template.as_deref().or(config.report_template.as_deref());
    let format = effective_format(global.format, config);
    print!("{}", render(eval, format, template)?);

    if let Some(path) = &global.report {
        let markdown = ReportRenderer::load(template)?.render(eval)?;
        std::fs::write(path, markdown)
            .map_err(|e| miette!("Failed to write report {}: {}", path.display(), e))?;
        info!(path = %path.display(), "report written");
        eprintln!(
            "{} Report written to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

/// Render an evaluation in a concrete format
pub fn render(eval: &Evaluation, format: OutputFormat, template: Option<&Path>) -> Result<String> {
    match format {
        OutputFormat::Auto | OutputFormat::Table => Ok(table(eval)),
        OutputFormat::Tsv => delimited(eval, b'\t'),
        OutputFormat::Csv => delimited(eval, b','),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(eval).into_diagnostic()?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Yaml => serde_yml::to_string(eval).into_diagnostic(),
        OutputFormat::Md => Ok(ReportRenderer::load(template)?.render(eval)?),
    }
}

fn table(eval: &Evaluation) -> String {
    let mut out = format!("{}\n", style(eval.method.title()).bold());
    if eval.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Item", value_label(eval.method), "Band", "Comment"]);
    for row in ranked_rows(eval) {
        builder.push_record([
            row.rank.to_string(),
            row.name,
            row.value.to_string(),
            row.band.to_string(),
            truncate_str(&row.comment, COMMENT_WIDTH),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&band_footer(eval));

    for note in &eval.notes {
        out.push_str(&format!("{} {}\n", style("note:").dim(), note));
    }
    out
}

fn band_footer(eval: &Evaluation) -> String {
    let parts: Vec<String> = eval
        .band_counts()
        .iter()
        .map(|(band, count)| {
            let count = match band {
                PriorityBand::High => style(count).green().bold(),
                PriorityBand::Medium => style(count).yellow().bold(),
                PriorityBand::Low => style(count).red().bold(),
            };
            format!("{} {}", count, band)
        })
        .collect();
    format!("{}\n", parts.join(", "))
}

fn delimited(eval: &Evaluation, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer
        .write_record(["rank", "name", "value", "band", "comment"])
        .into_diagnostic()?;
    for row in ranked_rows(eval) {
        writer
            .write_record([
                row.rank.to_string(),
                row.name,
                row.value.to_string(),
                row.band.to_string(),
                row.comment,
            ])
            .into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}
