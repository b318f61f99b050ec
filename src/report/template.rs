//! Markdown report rendering with Tera

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use rust_embed::Embed;
use std::path::Path;
use tera::Tera;
use thiserror::Error;

use crate::core::result::Evaluation;
use crate::report::{partition, ranked_rows};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Name the report is registered under, embedded or custom
pub const REPORT_TEMPLATE: &str = "report.md.tera";

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("Failed to read template {path}: {source}")]
    #[diagnostic(code(prio::report::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template {name}: {message}")]
    #[diagnostic(
        code(prio::report::template),
        help("Check the Tera syntax of the report template")
    )]
    Template { name: String, message: String },

    #[error("Report rendering error: {0}")]
    #[diagnostic(code(prio::report::render))]
    Render(String),
}

/// Renders an [`Evaluation`] as a Markdown report
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Renderer with the embedded templates
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| ReportError::Template {
                            name: filename.to_string(),
                            message: tera_message(&e),
                        })?;
                }
            }
        }
        Ok(Self { tera })
    }

    /// Renderer whose report template is read from `path`
    pub fn with_template_file(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut renderer = Self::new()?;
        renderer
            .tera
            .add_raw_template(REPORT_TEMPLATE, &content)
            .map_err(|e| ReportError::Template {
                name: path.display().to_string(),
                message: tera_message(&e),
            })?;
        Ok(renderer)
    }

    /// Embedded renderer, or one using `custom` when given
    pub fn load(custom: Option<&Path>) -> Result<Self, ReportError> {
        match custom {
            Some(path) => Self::with_template_file(path),
            None => Self::new(),
        }
    }

    pub fn render(&self, eval: &Evaluation) -> Result<String, ReportError> {
        self.render_at(eval, Utc::now())
    }

    /// Render with a fixed generation timestamp
    pub fn render_at(&self, eval: &Evaluation, generated: DateTime<Utc>) -> Result<String, ReportError> {
        let thresholds = eval.method.thresholds();
        let mut context = tera::Context::new();
        context.insert("title", eval.method.title());
        context.insert("method", &eval.method);
        context.insert("classified_value", eval.method.classified_value());
        context.insert("high", &thresholds.high);
        context.insert("medium", &thresholds.medium);
        context.insert("high_inclusive", &thresholds.high_inclusive);
        context.insert("generated", &generated.format("%Y-%m-%d %H:%M UTC").to_string());
        context.insert("rows", &ranked_rows(eval));
        context.insert("sections", &partition(eval));
        context.insert("notes", &eval.notes);
        context.insert("total", &eval.len());

        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| ReportError::Render(tera_message(&e)))
    }
}

/// Tera keeps the useful part of a message in the error source chain
fn tera_message(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
