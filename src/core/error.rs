//! Error taxonomy shared by every scoring engine
//!
//! Parsers return [`JudgmentError`], which knows what went wrong but not
//! where. Engines attach a [`Location`] and surface an [`EngineError`].

use miette::Diagnostic;
use thiserror::Error;

/// Where in an input file a problem was found
///
/// Every part is optional; only the parts that can be determined are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub alternative: Option<String>,
    pub criterion: Option<String>,
    /// Stakeholder (MoSCoW/Kano) or expert (AHP/Delphi) identifier
    pub participant: Option<String>,
}

impl Location {
    pub fn in_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternative = Some(alternative.into());
        self
    }

    pub fn criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = Some(criterion.into());
        self
    }

    pub fn participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref file) = self.file {
            parts.push(file.clone());
        }
        if let Some(line) = self.line {
            parts.push(format!("line {}", line));
        }
        if let Some(ref alt) = self.alternative {
            parts.push(format!("alternative '{}'", alt));
        }
        if let Some(ref crit) = self.criterion {
            parts.push(format!("criterion '{}'", crit));
        }
        if let Some(ref who) = self.participant {
            parts.push(format!("participant '{}'", who));
        }
        if parts.is_empty() {
            write!(f, "<input>")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Failure of a single cell or value, before a location is known
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JudgmentError {
    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Range(String),

    #[error("{0}")]
    Consistency(String),
}

impl JudgmentError {
    /// Attach a location, producing the matching engine error kind
    pub fn at(self, location: Location) -> EngineError {
        match self {
            JudgmentError::Format(message) => EngineError::Format { location, message },
            JudgmentError::Range(message) => EngineError::Range { location, message },
            JudgmentError::Consistency(message) => EngineError::Consistency { location, message },
        }
    }
}

/// Errors raised while loading, validating or scoring an input file
///
/// Loading is all-or-nothing: the first error aborts the whole file.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(prio::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {message}")]
    #[diagnostic(
        code(prio::schema),
        help("The header row must use the exact column names of the input format")
    )]
    Schema { file: String, message: String },

    #[error("{location}: {message}")]
    #[diagnostic(code(prio::format))]
    Format { location: Location, message: String },

    #[error("{location}: {message}")]
    #[diagnostic(code(prio::range))]
    Range { location: Location, message: String },

    #[error("{location}: {message}")]
    #[diagnostic(
        code(prio::consistency),
        help("Fix the offending rows and run the computation again")
    )]
    Consistency { location: Location, message: String },
}

impl EngineError {
    /// Missing required columns, listed in the order they were requested
    pub fn missing_columns(file: &str, missing: &[&str]) -> Self {
        EngineError::Schema {
            file: file.to_string(),
            message: format!("missing required column(s): {}", missing.join(", ")),
        }
    }

    /// Short name of the error kind, used in summaries
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Io { .. } => "io",
            EngineError::Schema { .. } => "schema",
            EngineError::Format { .. } => "format",
            EngineError::Range { .. } => "range",
            EngineError::Consistency { .. } => "consistency",
        }
    }
}
