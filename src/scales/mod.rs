//! Linguistic scales
//!
//! A scale maps an expert's label (e.g. `Высокая`) to a numeric encoding.
//! Scale files are user-supplied; [`registry`] embeds the defaults.

pub mod registry;

pub use registry::{BuiltinScale, ScaleRegistry};

use crate::core::error::{EngineError, JudgmentError};

/// Label → value lookup in file order
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticScale<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for LinguisticScale<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> LinguisticScale<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label; the label must not already be present
    pub fn insert(&mut self, label: impl Into<String>, value: T) -> Result<(), JudgmentError> {
        let label = label.into();
        if self.contains(&label) {
            return Err(JudgmentError::Consistency(format!(
                "label '{}' is defined more than once",
                label
            )));
        }
        self.entries.push((label, value));
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Value of a label, or a format error listing the accepted labels
    pub fn lookup(&self, label: &str) -> Result<&T, JudgmentError> {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                JudgmentError::Format(format!(
                    "unknown label '{}'; expected one of: {}",
                    label,
                    self.labels().join(", ")
                ))
            })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject an empty scale file
    pub fn ensure_not_empty(self, file: &str) -> Result<Self, EngineError> {
        if self.is_empty() {
            return Err(EngineError::Schema {
                file: file.to_string(),
                message: "scale file defines no labels".to_string(),
            });
        }
        Ok(self)
    }
}
