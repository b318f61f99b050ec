//! Fuzzy AHP with interval Type-2 comparisons
//!
//! One file: `Эксперт`, `Вес` and one column per comparison named
//! `A > B`. Each cell is a linguistic label mapped to a lower and an upper
//! trapezoid. The result is a weight per criterion rather than a score per
//! alternative.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use tracing::{debug, info};

use crate::core::band::Method;
use crate::core::error::{EngineError, JudgmentError, Location};
use crate::core::judgment::It2Trapezoid;
use crate::core::numeric::{mean, ratio_or_zero, round_to, weighted_mean};
use crate::core::result::{Evaluation, MethodResult, WeightResult};
use crate::core::weights::{ensure_unit_sum, parse_weight};
use crate::methods::identifier;
use crate::table::columns::{COMPARISON_SEPARATOR, EXPERT, WEIGHT};
use crate::table::Sheet;

/// Linguistic labels and their (lower, upper) trapezoids
pub const TYPE2_SCALE: [(&str, It2Trapezoid); 5] = [
    (
        "Одинаково",
        It2Trapezoid {
            lower: [1.0, 1.0, 1.0, 1.0],
            upper: [1.0, 1.0, 1.0, 1.0],
        },
    ),
    (
        "Слабо",
        It2Trapezoid {
            lower: [1.5, 2.0, 2.0, 2.5],
            upper: [1.3, 2.0, 2.0, 2.7],
        },
    ),
    (
        "Умеренно",
        It2Trapezoid {
            lower: [2.5, 3.0, 3.0, 3.5],
            upper: [2.2, 3.0, 3.0, 3.8],
        },
    ),
    (
        "Сильно",
        It2Trapezoid {
            lower: [4.5, 5.0, 5.0, 5.5],
            upper: [4.0, 5.0, 5.0, 6.0],
        },
    ),
    (
        "Абсолютно",
        It2Trapezoid {
            lower: [8.5, 9.0, 9.0, 9.5],
            upper: [8.0, 9.0, 9.0, 10.0],
        },
    ),
];

/// Saaty's random consistency index for n = 1..=10
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// First letter upper case, the rest lower case
fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Parse a comparison label, ignoring case
pub fn parse_label(raw: &str) -> Result<It2Trapezoid, JudgmentError> {
    let label = capitalize(raw.trim().trim_matches('"').trim());
    TYPE2_SCALE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            let accepted: Vec<&str> = TYPE2_SCALE.iter().map(|(name, _)| *name).collect();
            JudgmentError::Format(format!(
                "invalid comparison '{}'; expected one of: {}",
                label,
                accepted.join(", ")
            ))
        })
}

/// Asymmetric centroid: mean of lower[0,1,3] and upper[0,2,3], averaged
pub fn defuzzify(value: &It2Trapezoid) -> f64 {
    let c1 = mean(&[value.lower[0], value.lower[1], value.lower[3]]);
    let c2 = mean(&[value.upper[0], value.upper[2], value.upper[3]]);
    (c1 + c2) / 2.0
}

/// One `A > B` column
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub column: usize,
    pub left: String,
    pub right: String,
}

/// Parsed comparison file, experts sorted by name
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonInput {
    /// Sorted criterion names
    pub criteria: Vec<String>,
    pub comparisons: Vec<Comparison>,
    /// expert → (weight, one judgment per comparison)
    pub experts: BTreeMap<String, (f64, Vec<It2Trapezoid>)>,
}

/// Criterion weights with the consistency of the crisp matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaWeights {
    pub weights: BTreeMap<String, f64>,
    /// `None` when the random index is not tabulated for this size
    pub consistency_ratio: Option<f64>,
}

fn comparisons(sheet: &Sheet) -> Result<Vec<Comparison>, EngineError> {
    let columns = sheet.criteria_columns(&[EXPERT, WEIGHT])?;
    let mut out: Vec<Comparison> = Vec::with_capacity(columns.len());
    for (column, header) in columns {
        let parsed = header
            .split_once(COMPARISON_SEPARATOR)
            .map(|(l, r)| (l.trim().to_string(), r.trim().to_string()))
            .filter(|(l, r)| !l.is_empty() && !r.is_empty() && l != r);
        let Some((left, right)) = parsed else {
            return Err(EngineError::Schema {
                file: sheet.name().to_string(),
                message: format!("column '{}' is not a comparison of the form 'A > B'", header),
            });
        };
        let repeated = out.iter().any(|c| {
            (c.left == left && c.right == right) || (c.left == right && c.right == left)
        });
        if repeated {
            return Err(EngineError::Schema {
                file: sheet.name().to_string(),
                message: format!("criteria '{}' and '{}' are compared more than once", left, right),
            });
        }
        out.push(Comparison {
            column,
            left,
            right,
        });
    }
    Ok(out)
}

pub fn load(sheet: &Sheet) -> Result<ComparisonInput, EngineError> {
    let [expert_idx, weight_idx] = sheet.require([EXPERT, WEIGHT])?;
    let comparisons = comparisons(sheet)?;

    let mut experts = BTreeMap::new();
    for row in sheet.rows() {
        let expert = identifier(sheet, row, expert_idx, EXPERT)?;
        let location = sheet.location(row).participant(expert);
        let weight = parse_weight(row.get(weight_idx)).map_err(|e| e.at(location.clone()))?;
        let judgments = comparisons
            .iter()
            .map(|c| {
                parse_label(row.get(c.column)).map_err(|e| {
                    e.at(location
                        .clone()
                        .criterion(format!("{}{}{}", c.left, COMPARISON_SEPARATOR, c.right)))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if experts.insert(expert.to_string(), (weight, judgments)).is_some() {
            return Err(EngineError::Consistency {
                location,
                message: "expert is listed more than once".to_string(),
            });
        }
    }

    let total: f64 = experts.values().map(|(w, _)| *w).sum();
    ensure_unit_sum(total, Location::in_file(sheet.name()))?;

    let mut criteria: Vec<String> = comparisons
        .iter()
        .flat_map(|c| [c.left.clone(), c.right.clone()])
        .collect();
    criteria.sort();
    criteria.dedup();

    Ok(ComparisonInput {
        criteria,
        comparisons,
        experts,
    })
}

/// Reciprocal crisp comparison matrix over the sorted criteria
pub fn comparison_matrix(input: &ComparisonInput) -> DMatrix<f64> {
    let n = input.criteria.len();
    let index = |name: &str| input.criteria.iter().position(|c| c == name);
    let mut matrix = DMatrix::identity(n, n);

    for (k, comparison) in input.comparisons.iter().enumerate() {
        let items: Vec<([f64; 8], f64)> = input
            .experts
            .values()
            .map(|(weight, judgments)| (judgments[k].to_array(), *weight))
            .collect();
        let Some(aggregated) = weighted_mean(&items) else {
            continue;
        };
        let crisp = defuzzify(&It2Trapezoid::from_array(aggregated));
        if let (Some(i), Some(j)) = (index(&comparison.left), index(&comparison.right)) {
            matrix[(i, j)] = crisp;
            matrix[(j, i)] = ratio_or_zero(1.0, crisp);
        }
    }
    matrix
}

/// Column-normalize, average rows, renormalize
pub fn priority_vector(matrix: &DMatrix<f64>) -> DVector<f64> {
    let mut normalized = matrix.clone();
    for mut column in normalized.column_iter_mut() {
        let sum = column.sum();
        if sum != 0.0 {
            column /= sum;
        }
    }
    let mut weights = DVector::from_iterator(
        normalized.nrows(),
        normalized.row_iter().map(|row| row.mean()),
    );
    let total = weights.sum();
    if total != 0.0 {
        weights /= total;
    }
    weights
}

/// Saaty's consistency ratio, with λmax estimated as mean((A·w)ᵢ / wᵢ)
pub fn consistency_ratio(matrix: &DMatrix<f64>, weights: &DVector<f64>) -> Option<f64> {
    let n = matrix.nrows();
    if n <= 2 {
        return Some(0.0);
    }
    let random_index = *RANDOM_INDEX.get(n - 1)?;
    let product = matrix * weights;
    let ratios: Vec<f64> = product
        .iter()
        .zip(weights.iter())
        .map(|(aw, w)| ratio_or_zero(*aw, *w))
        .collect();
    let lambda_max = mean(&ratios);
    let index = (lambda_max - n as f64) / (n as f64 - 1.0);
    debug!(lambda_max, index, "AHP consistency");
    Some(ratio_or_zero(index, random_index))
}

pub fn criterion_weights(input: &ComparisonInput) -> CriteriaWeights {
    let matrix = comparison_matrix(input);
    let vector = priority_vector(&matrix);
    let consistency_ratio = consistency_ratio(&matrix, &vector);
    let weights = input
        .criteria
        .iter()
        .cloned()
        .zip(vector.iter().copied())
        .collect();
    CriteriaWeights {
        weights,
        consistency_ratio,
    }
}

pub fn evaluate(input: &ComparisonInput) -> Evaluation {
    let method = Method::AhpType2;
    let result = criterion_weights(input);
    let mut evaluation = Evaluation::from_results(
        method,
        result.weights.iter().map(|(name, weight)| {
            (
                name.clone(),
                MethodResult::Weight(WeightResult {
                    weight: *weight,
                    band: method.classify(*weight),
                }),
            )
        }),
    );
    match result.consistency_ratio {
        Some(cr) => {
            let verdict = if cr <= 0.1 { "acceptable" } else { "above 0.1, review the comparisons" };
            info!(consistency_ratio = cr, "AHP consistency ratio");
            evaluation = evaluation.with_note(format!(
                "consistency ratio: {} ({})",
                round_to(cr, 4),
                verdict
            ));
        }
        None => {
            evaluation = evaluation.with_note("consistency ratio: not tabulated for more than 10 criteria");
        }
    }
    evaluation
}

pub fn run(sheet: &Sheet) -> Result<Evaluation, EngineError> {
    Ok(evaluate(&load(sheet)?))
}
