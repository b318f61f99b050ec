//! Shared helper functions for CLI commands

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::table::Sheet;

/// Read and parse an input file
pub fn load_sheet(path: &Path) -> Result<Sheet, EngineError> {
    let sheet = Sheet::from_path(path)?;
    debug!(
        file = %path.display(),
        columns = sheet.headers().len(),
        rows = sheet.rows().len(),
        "loaded input file"
    );
    Ok(sheet)
}

/// Parse an optional input file
pub fn load_optional_sheet(path: Option<&Path>) -> Result<Option<Sheet>, EngineError> {
    path.map(load_sheet).transpose()
}

/// Scale file to use: explicit flag first, then the configured default
///
/// `None` means the built-in scale applies.
pub fn scale_path(flag: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    let chosen = flag.or(configured).map(Path::to_path_buf);
    match &chosen {
        Some(path) => info!(scale = %path.display(), "using scale file"),
        None => info!("using built-in scale"),
    }
    chosen
}

/// Column heading for the ranked value of a method
pub fn value_label(method: Method) -> &'static str {
    match method {
        Method::Moscow | Method::Kano | Method::Topsis => "Score (%)",
        Method::FuzzyTopsis | Method::IfsTopsis => "Closeness",
        Method::AhpType1 => "Score",
        Method::AhpType2 => "Weight",
        Method::DelphiIt2 | Method::DelphiIfs => "Confidence",
    }
}

/// Truncate a string to `max_chars` characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
