//! Embedded default scale files

use rust_embed::Embed;

use crate::core::error::EngineError;
use crate::table::Sheet;

#[derive(Embed)]
#[folder = "scales/"]
struct EmbeddedScales;

/// Scale files shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinScale {
    /// Labels → trapezoids for `fuzzy-topsis`
    FuzzyTopsis,
    /// Labels → (μ, ν, π) for `ifs-topsis`
    IfsTopsis,
}

impl BuiltinScale {
    pub const ALL: [BuiltinScale; 2] = [BuiltinScale::FuzzyTopsis, BuiltinScale::IfsTopsis];

    pub fn file_name(&self) -> &'static str {
        match self {
            BuiltinScale::FuzzyTopsis => "fuzzy_topsis.csv",
            BuiltinScale::IfsTopsis => "ifs_topsis.csv",
        }
    }
}

/// Access to the embedded scale files
pub struct ScaleRegistry;

impl ScaleRegistry {
    /// Raw CSV text of a built-in scale
    pub fn content(scale: BuiltinScale) -> Option<String> {
        EmbeddedScales::get(scale.file_name())
            .and_then(|file| std::str::from_utf8(&file.data).ok().map(|s| s.to_string()))
    }

    /// Parsed sheet of a built-in scale
    pub fn sheet(scale: BuiltinScale) -> Result<Sheet, EngineError> {
        let name = format!("<built-in {}>", scale.file_name());
        let content = Self::content(scale).ok_or_else(|| EngineError::Schema {
            file: name.clone(),
            message: "built-in scale is missing from the binary".to_string(),
        })?;
        Sheet::parse(&name, &content)
    }
}
