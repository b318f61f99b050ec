//! Stakeholder and expert weights
//!
//! Lookups return `Option<f64>`; callers that need a number must name a
//! [`WeightFallback`], so a default weight is always a visible decision.

use std::collections::BTreeMap;

use tracing::warn;

use crate::core::error::{EngineError, JudgmentError, Location};
use crate::core::judgment::parse_number;
use crate::core::numeric::within_tolerance;
use crate::table::Sheet;

/// Tolerance for expert weight tables that must sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// What a participant missing from the weight table counts as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightFallback {
    /// Relative weighting (MoSCoW): unknown stakeholders count fully, 1.0
    Unit,
    /// Normalized weighting (AHP): unknown experts are excluded, 0.0
    Zero,
}

impl WeightFallback {
    pub fn value(&self) -> f64 {
        match self {
            WeightFallback::Unit => 1.0,
            WeightFallback::Zero => 0.0,
        }
    }
}

/// Parse a weight cell: a finite, nonnegative number
pub fn parse_weight(raw: &str) -> Result<f64, JudgmentError> {
    let weight = parse_number(raw)?;
    if weight < 0.0 {
        return Err(JudgmentError::Range(format!(
            "weight must be nonnegative, got {}",
            weight
        )));
    }
    Ok(weight)
}

/// Reject a weight total that is not 1.0 within [`WEIGHT_SUM_TOLERANCE`]
pub fn ensure_unit_sum(total: f64, location: Location) -> Result<(), EngineError> {
    if within_tolerance(total, 1.0, WEIGHT_SUM_TOLERANCE) {
        Ok(())
    } else {
        Err(EngineError::Consistency {
            location,
            message: format!("expert weights must sum to 1.0 (got {:.2})", total),
        })
    }
}

/// Named weights loaded from a two-column table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `id_column` / `weight_column`; duplicate names are rejected
    pub fn from_sheet(
        sheet: &Sheet,
        id_column: &str,
        weight_column: &str,
    ) -> Result<Self, EngineError> {
        let [id_idx, weight_idx] = sheet.require([id_column, weight_column])?;
        let mut table = Self::new();

        for row in sheet.rows() {
            let id = row.get(id_idx);
            let location = sheet.location(row).participant(id);
            let weight = parse_weight(row.get(weight_idx)).map_err(|e| e.at(location.clone()))?;
            if table.weights.insert(id.to_string(), weight).is_some() {
                return Err(EngineError::Consistency {
                    location,
                    message: format!("'{}' is listed more than once", id),
                });
            }
        }

        Ok(table)
    }

    pub fn insert(&mut self, id: impl Into<String>, weight: f64) {
        self.weights.insert(id.into(), weight);
    }

    /// Explicit optional lookup
    pub fn get(&self, id: &str) -> Option<f64> {
        self.weights.get(id).copied()
    }

    /// Resolve a weight, applying `fallback` for unknown participants
    pub fn resolve(&self, id: &str, fallback: WeightFallback) -> f64 {
        match self.get(id) {
            Some(weight) => weight,
            None => {
                warn!(
                    participant = id,
                    fallback = fallback.value(),
                    "participant has no entry in the weight table"
                );
                fallback.value()
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Require the table to sum to 1.0 within tolerance
    pub fn ensure_normalized(&self, location: Location) -> Result<(), EngineError> {
        ensure_unit_sum(self.total(), location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(content: &str) -> Sheet {
        Sheet::parse("weights.csv", content).unwrap()
    }

    #[test]
    fn test_resolve_uses_named_fallback() {
        let mut table = WeightTable::new();
        table.insert("S1", 2.0);
        assert_eq!(table.get("S2"), None);
        assert_eq!(table.resolve("S1", WeightFallback::Zero), 2.0);
        assert_eq!(table.resolve("S2", WeightFallback::Unit), 1.0);
        assert_eq!(table.resolve("S2", WeightFallback::Zero), 0.0);
    }

    #[test]
    fn test_from_sheet_loads_weights() {
        let table = WeightTable::from_sheet(
            &sheet("Эксперт,Вес\nE1,0.6\nE2,0.4\n"),
            "Эксперт",
            "Вес",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.ensure_normalized(Location::default()).is_ok());
    }

    #[test]
    fn test_unit_sum_reports_total() {
        let err = ensure_unit_sum(0.5 + 0.4, Location::in_file("w.csv")).unwrap_err();
        assert!(matches!(err, EngineError::Consistency { .. }));
        assert!(err.to_string().contains("0.90"));
    }

    #[test]
    fn test_negative_and_duplicate_weights_rejected() {
        let err = WeightTable::from_sheet(&sheet("Эксперт,Вес\nE1,-1\n"), "Эксперт", "Вес")
            .unwrap_err();
        assert!(matches!(err, EngineError::Range { .. }));

        let err = WeightTable::from_sheet(
            &sheet("Эксперт,Вес\nE1,0.5\nE1,0.5\n"),
            "Эксперт",
            "Вес",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Consistency { .. }));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let err = WeightTable::from_sheet(&sheet("Имя,Вес\nE1,1\n"), "Эксперт", "Вес")
            .unwrap_err();
        assert!(matches!(err, EngineError::Schema { .. }));
    }
}
