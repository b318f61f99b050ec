//! Fuzzy TOPSIS over trapezoidal numbers
//!
//! Every criterion is treated as a benefit criterion: each column is
//! normalized by its largest `d` component. The distance between two
//! trapezoids is the RMS of the four component differences, and an
//! alternative's distance to an ideal is the Euclidean sum over criteria.

use tracing::debug;

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::core::judgment::Trapezoid;
use crate::core::numeric::{ratio_or_zero, round_to};
use crate::core::result::{Evaluation, MethodResult, ScoredResult};
use crate::methods::rows_by_alternative;
use crate::methods::topsis::Closeness;
use crate::scales::{BuiltinScale, LinguisticScale, ScaleRegistry};
use crate::table::columns::{ALTERNATIVE, EXPERT_LABEL, TRAPEZOID};
use crate::table::Sheet;

pub type TrapezoidScale = LinguisticScale<Trapezoid>;

/// Alternatives (sorted) × criteria matrix of trapezoids
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatrix {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub cells: Vec<Vec<[f64; 4]>>,
}

/// Load a scale file (`Оценка эксперта`, `Трапециевидное число`)
pub fn load_scale(sheet: &Sheet) -> Result<TrapezoidScale, EngineError> {
    let [label_idx, value_idx] = sheet.require([EXPERT_LABEL, TRAPEZOID])?;
    let mut scale = TrapezoidScale::new();
    for row in sheet.rows() {
        let label = row.get(label_idx);
        let location = sheet.location(row);
        let value = Trapezoid::parse(row.get(value_idx)).map_err(|e| e.at(location.clone()))?;
        scale.insert(label, value).map_err(|e| e.at(location))?;
    }
    scale.ensure_not_empty(sheet.name())
}

/// Scale shipped with the binary
pub fn default_scale() -> Result<TrapezoidScale, EngineError> {
    load_scale(&ScaleRegistry::sheet(BuiltinScale::FuzzyTopsis)?)
}

/// Map every label of the input file through the scale
pub fn load(sheet: &Sheet, scale: &TrapezoidScale) -> Result<FuzzyMatrix, EngineError> {
    let [alt_idx] = sheet.require([ALTERNATIVE])?;
    let criteria = sheet.criteria_columns(&[ALTERNATIVE])?;
    let rows = rows_by_alternative(sheet, alt_idx, ALTERNATIVE)?;

    let mut matrix = FuzzyMatrix {
        alternatives: Vec::with_capacity(rows.len()),
        criteria: criteria.iter().map(|(_, name)| name.clone()).collect(),
        cells: Vec::with_capacity(rows.len()),
    };
    for (alt, row) in rows {
        let values = criteria
            .iter()
            .map(|(col, name)| {
                scale
                    .lookup(row.get(*col))
                    .map(|t| t.to_array())
                    .map_err(|e| e.at(sheet.location(row).alternative(alt).criterion(name)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        matrix.alternatives.push(alt.to_string());
        matrix.cells.push(values);
    }
    Ok(matrix)
}

/// RMS distance between two trapezoids
pub fn fuzzy_distance(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    (sum / 4.0).sqrt()
}

/// Divide every component by the column's largest `d`
pub fn normalize(cells: &[Vec<[f64; 4]>]) -> Vec<Vec<[f64; 4]>> {
    let n_criteria = cells.first().map(|r| r.len()).unwrap_or(0);
    let column_max: Vec<f64> = (0..n_criteria)
        .map(|j| cells.iter().map(|r| r[j][3]).fold(f64::NEG_INFINITY, f64::max))
        .collect();
    cells
        .iter()
        .map(|row| {
            row.iter()
                .zip(&column_max)
                .map(|(cell, max)| cell.map(|v| ratio_or_zero(v, *max)))
                .collect()
        })
        .collect()
}

/// Element-wise max (`positive`) or min across a column of trapezoids
fn ideal(cells: &[Vec<[f64; 4]>], positive: bool) -> Vec<[f64; 4]> {
    let n_criteria = cells.first().map(|r| r.len()).unwrap_or(0);
    (0..n_criteria)
        .map(|j| {
            let start = if positive { f64::NEG_INFINITY } else { f64::INFINITY };
            let mut out = [start; 4];
            for row in cells {
                for (slot, v) in out.iter_mut().zip(row[j]) {
                    *slot = if positive { slot.max(v) } else { slot.min(v) };
                }
            }
            out
        })
        .collect()
}

pub fn closeness(matrix: &FuzzyMatrix) -> Vec<Closeness> {
    let normalized = normalize(&matrix.cells);
    let positive = ideal(&normalized, true);
    let negative = ideal(&normalized, false);
    debug!(?positive, ?negative, "fuzzy TOPSIS ideal solutions");

    let distance = |row: &Vec<[f64; 4]>, target: &[[f64; 4]]| -> f64 {
        row.iter()
            .zip(target)
            .map(|(cell, t)| fuzzy_distance(cell, t).powi(2))
            .sum::<f64>()
            .sqrt()
    };

    normalized
        .iter()
        .map(|row| Closeness::from_distances(distance(row, &positive), distance(row, &negative)))
        .collect()
}

/// Closeness coefficients classified, then rounded to 4 places for display
pub(crate) fn scored_evaluation(
    method: Method,
    alternatives: &[String],
    closeness: Vec<Closeness>,
) -> Evaluation {
    let results = alternatives
        .iter()
        .zip(closeness)
        .map(|(alt, c)| {
            let band = method.classify(c.coefficient);
            let score = round_to(c.coefficient, 4);
            let result = ScoredResult {
                score,
                band,
                comment: method.band_comment(band).unwrap_or_default().to_string(),
                breakdown: Some(c.breakdown()),
            };
            (alt.clone(), MethodResult::Scored(result))
        })
        .collect::<Vec<_>>();
    Evaluation::from_results(method, results)
}

pub fn evaluate(matrix: &FuzzyMatrix) -> Evaluation {
    scored_evaluation(Method::FuzzyTopsis, &matrix.alternatives, closeness(matrix))
}

/// Full pipeline; `scale` falls back to the built-in scale
pub fn run(sheet: &Sheet, scale: Option<&Sheet>) -> Result<Evaluation, EngineError> {
    let scale = match scale {
        Some(s) => load_scale(s)?,
        None => default_scale()?,
    };
    Ok(evaluate(&load(sheet, &scale)?))
}
