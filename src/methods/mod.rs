//! Scoring engines
//!
//! One module per method. Every engine is a set of pure functions over
//! parsed [`Sheet`]s; nothing here touches the filesystem or keeps state
//! between calls.

pub mod ahp_type1;
pub mod ahp_type2;
pub mod delphi_ifs;
pub mod delphi_it2;
pub mod fuzzy_topsis;
pub mod ifs_topsis;
pub mod kano;
pub mod moscow;
pub mod topsis;

use std::collections::BTreeMap;

use crate::core::error::{EngineError, JudgmentError, Location};
use crate::core::weights::{ensure_unit_sum, parse_weight};
use crate::table::columns::{ALTERNATIVE, EXPERT, EXPERT_WEIGHT};
use crate::table::{Row, Sheet};

/// Non-empty identifier cell (alternative, criterion, stakeholder, expert)
pub(crate) fn identifier<'a>(
    sheet: &Sheet,
    row: &'a Row,
    idx: usize,
    column: &str,
) -> Result<&'a str, EngineError> {
    let value = row.get(idx);
    if value.is_empty() {
        return Err(EngineError::Format {
            location: sheet.location(row),
            message: format!("empty '{}' cell", column),
        });
    }
    Ok(value)
}

/// Weight cell of a row, located for error reporting
pub(crate) fn row_weight(sheet: &Sheet, row: &Row, idx: usize) -> Result<f64, EngineError> {
    parse_weight(row.get(idx)).map_err(|e| e.at(sheet.location(row)))
}

/// Rows of a one-row-per-alternative file, sorted by alternative name
///
/// Sorting makes floating-point accumulation independent of file order.
/// A repeated alternative is a consistency error.
pub(crate) fn rows_by_alternative<'a>(
    sheet: &'a Sheet,
    alt_idx: usize,
    column: &str,
) -> Result<BTreeMap<&'a str, &'a Row>, EngineError> {
    let mut rows = BTreeMap::new();
    for row in sheet.rows() {
        let alt = identifier(sheet, row, alt_idx, column)?;
        if rows.insert(alt, row).is_some() {
            return Err(EngineError::Consistency {
                location: sheet.location(row).alternative(alt),
                message: "alternative is listed more than once".to_string(),
            });
        }
    }
    Ok(rows)
}

/// Expert rows of a Delphi file grouped by alternative
///
/// alternative → expert → (weight, one judgment per criterion)
#[derive(Debug, Clone, PartialEq)]
pub struct ExpertPanels<T> {
    pub criteria: Vec<String>,
    pub panels: BTreeMap<String, BTreeMap<String, (f64, Vec<T>)>>,
}

/// Load `Альтернатива`, `Эксперт`, `Вес эксперта` plus criterion columns
///
/// Each alternative's expert weights must sum to 1.0.
pub(crate) fn load_expert_panels<T>(
    sheet: &Sheet,
    parse: impl Fn(&str) -> Result<T, JudgmentError>,
) -> Result<ExpertPanels<T>, EngineError> {
    let [alt_idx, expert_idx, weight_idx] = sheet.require([ALTERNATIVE, EXPERT, EXPERT_WEIGHT])?;
    let criteria = sheet.criteria_columns(&[ALTERNATIVE, EXPERT, EXPERT_WEIGHT])?;
    let mut panels: BTreeMap<String, BTreeMap<String, (f64, Vec<T>)>> = BTreeMap::new();

    for row in sheet.rows() {
        let alt = identifier(sheet, row, alt_idx, ALTERNATIVE)?;
        let expert = identifier(sheet, row, expert_idx, EXPERT)?;
        let location = sheet.location(row).alternative(alt).participant(expert);
        let weight = parse_weight(row.get(weight_idx)).map_err(|e| e.at(location.clone()))?;
        let values = criteria
            .iter()
            .map(|(col, name)| parse(row.get(*col)).map_err(|e| e.at(location.clone().criterion(name))))
            .collect::<Result<Vec<_>, _>>()?;
        let experts = panels.entry(alt.to_string()).or_default();
        if experts.insert(expert.to_string(), (weight, values)).is_some() {
            return Err(EngineError::Consistency {
                location,
                message: "expert has more than one row for this alternative".to_string(),
            });
        }
    }

    for (alt, experts) in &panels {
        let total: f64 = experts.values().map(|(w, _)| *w).sum();
        ensure_unit_sum(total, Location::in_file(sheet.name()).alternative(alt.as_str()))?;
    }

    Ok(ExpertPanels {
        criteria: criteria.into_iter().map(|(_, name)| name).collect(),
        panels,
    })
}
