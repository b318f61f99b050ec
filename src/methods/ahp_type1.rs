//! Fuzzy AHP with triangular numbers (Type-1)
//!
//! Three input files:
//! - criteria matrix: first column is a row label, remaining columns are
//!   criteria; cells are Saaty labels (`3`, `1/5`) or literal `(l, m, u)`
//! - alternatives: `Альтернатива`, `Эксперт` and one TFN column per criterion
//! - expert weights: `Эксперт`, `Вес`, summing to 1.0
//!
//! Criterion weights come from the row geometric mean of the comparison
//! matrix, centroid-defuzzified and normalized. Alternative values are the
//! expert-weighted mean TFN per criterion, centroid-defuzzified.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::core::band::Method;
use crate::core::error::{EngineError, JudgmentError, Location};
use crate::core::judgment::{extract_numbers, Tfn};
use crate::core::numeric::{ratio_or_zero, round_to, weighted_mean};
use crate::core::result::{Breakdown, Evaluation, MethodResult, ScoredResult};
use crate::core::weights::{WeightFallback, WeightTable};
use crate::methods::identifier;
use crate::table::columns::{ALTERNATIVE, EXPERT, WEIGHT};
use crate::table::Sheet;

/// Experts absent from the weight table are excluded from aggregation
pub const EXPERT_FALLBACK: WeightFallback = WeightFallback::Zero;

/// Saaty labels and their triangular numbers, in display order
pub const SAATY_SCALE: [(&str, Tfn); 11] = [
    ("1", Tfn::new_unchecked(1.0, 1.0, 1.0)),
    ("2", Tfn::new_unchecked(1.5, 2.0, 2.5)),
    ("3", Tfn::new_unchecked(2.5, 3.0, 3.5)),
    ("5", Tfn::new_unchecked(4.5, 5.0, 5.5)),
    ("7", Tfn::new_unchecked(6.5, 7.0, 7.5)),
    ("9", Tfn::new_unchecked(8.5, 9.0, 9.5)),
    ("1/2", Tfn::new_unchecked(0.4, 0.5, 0.6)),
    ("1/3", Tfn::new_unchecked(0.28, 0.33, 0.38)),
    ("1/5", Tfn::new_unchecked(0.17, 0.2, 0.25)),
    ("1/7", Tfn::new_unchecked(0.13, 0.14, 0.16)),
    ("1/9", Tfn::new_unchecked(0.1, 0.11, 0.12)),
];

static SAATY_LOOKUP: Lazy<HashMap<&'static str, Tfn>> =
    Lazy::new(|| SAATY_SCALE.iter().copied().collect());

/// Parse a Saaty label or a literal `(l, m, u)`
pub fn parse_tfn(raw: &str) -> Result<Tfn, JudgmentError> {
    let value = raw.trim().trim_matches('"').trim();
    if value.is_empty() {
        return Err(JudgmentError::Format("empty TFN cell".to_string()));
    }
    if let Some(tfn) = SAATY_LOOKUP.get(value) {
        return Ok(*tfn);
    }
    if value.starts_with('(') && value.ends_with(')') {
        if let [l, m, u] = extract_numbers(value)?.as_slice() {
            return Tfn::new(*l, *m, *u);
        }
    }
    Err(JudgmentError::Format(format!(
        "invalid TFN '{}'; use a Saaty label (1, 2, 3, 5, 7, 9, 1/2 … 1/9) or (l, m, u)",
        value
    )))
}

/// Parse a TFN that enters a geometric mean: all components must be positive
fn parse_positive_tfn(raw: &str) -> Result<Tfn, JudgmentError> {
    let tfn = parse_tfn(raw)?;
    if tfn.l <= 0.0 {
        return Err(JudgmentError::Range(format!(
            "comparison {} must be strictly positive",
            tfn
        )));
    }
    Ok(tfn)
}

/// Pairwise comparison matrix of criteria
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaMatrix {
    pub criteria: Vec<String>,
    pub cells: Vec<Vec<Tfn>>,
}

pub fn load_criteria(sheet: &Sheet) -> Result<CriteriaMatrix, EngineError> {
    let criteria: Vec<String> = sheet.headers().iter().skip(1).cloned().collect();
    if criteria.is_empty() {
        return Err(EngineError::Schema {
            file: sheet.name().to_string(),
            message: "criteria matrix has no criterion columns".to_string(),
        });
    }
    if sheet.rows().len() != criteria.len() {
        return Err(EngineError::Schema {
            file: sheet.name().to_string(),
            message: format!(
                "criteria matrix must be square: {} criteria but {} rows",
                criteria.len(),
                sheet.rows().len()
            ),
        });
    }

    let mut cells = Vec::with_capacity(criteria.len());
    for (row, row_criterion) in sheet.rows().iter().zip(&criteria) {
        let values = criteria
            .iter()
            .enumerate()
            .map(|(j, col_criterion)| {
                parse_positive_tfn(row.get(j + 1)).map_err(|e| {
                    e.at(sheet
                        .location(row)
                        .criterion(format!("{} / {}", row_criterion, col_criterion)))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        cells.push(values);
    }

    Ok(CriteriaMatrix { criteria, cells })
}

/// Element-wise geometric mean of a list of TFNs
pub fn geometric_mean(values: &[Tfn]) -> Tfn {
    let n = values.len().max(1) as f64;
    let component = |f: fn(&Tfn) -> f64| (values.iter().map(|t| f(t).ln()).sum::<f64>() / n).exp();
    Tfn::from_array([component(|t| t.l), component(|t| t.m), component(|t| t.u)])
}

/// Normalized crisp criterion weights
pub fn criterion_weights(matrix: &CriteriaMatrix) -> BTreeMap<String, f64> {
    let crisp: Vec<f64> = matrix
        .cells
        .iter()
        .map(|row| geometric_mean(row).centroid())
        .collect();
    let total: f64 = crisp.iter().sum();
    let weights: BTreeMap<String, f64> = matrix
        .criteria
        .iter()
        .zip(crisp)
        .map(|(name, value)| (name.clone(), ratio_or_zero(value, total)))
        .collect();
    debug!(?weights, "AHP criterion weights");
    weights
}

/// alternative → expert → TFN per criterion (criterion order of the file)
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeJudgments {
    pub criteria: Vec<String>,
    pub judgments: BTreeMap<String, BTreeMap<String, Vec<Tfn>>>,
}

pub fn load_alternatives(sheet: &Sheet) -> Result<AlternativeJudgments, EngineError> {
    let [alt_idx, expert_idx] = sheet.require([ALTERNATIVE, EXPERT])?;
    let criteria = sheet.criteria_columns(&[ALTERNATIVE, EXPERT])?;
    let mut judgments: BTreeMap<String, BTreeMap<String, Vec<Tfn>>> = BTreeMap::new();

    for row in sheet.rows() {
        let alt = identifier(sheet, row, alt_idx, ALTERNATIVE)?;
        let expert = identifier(sheet, row, expert_idx, EXPERT)?;
        let location = sheet.location(row).alternative(alt).participant(expert);
        let values = criteria
            .iter()
            .map(|(col, name)| {
                parse_tfn(row.get(*col)).map_err(|e| e.at(location.clone().criterion(name)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let experts = judgments.entry(alt.to_string()).or_default();
        if experts.insert(expert.to_string(), values).is_some() {
            return Err(EngineError::Consistency {
                location,
                message: "expert has more than one row for this alternative".to_string(),
            });
        }
    }

    Ok(AlternativeJudgments {
        criteria: criteria.into_iter().map(|(_, name)| name).collect(),
        judgments,
    })
}

/// Load expert weights and require them to sum to 1.0
pub fn load_weights(sheet: &Sheet) -> Result<WeightTable, EngineError> {
    let table = WeightTable::from_sheet(sheet, EXPERT, WEIGHT)?;
    table.ensure_normalized(Location::in_file(sheet.name()))?;
    Ok(table)
}

/// Criteria of the alternatives file must be exactly the matrix criteria
fn check_criteria(
    matrix: &CriteriaMatrix,
    alternatives: &AlternativeJudgments,
    file: &str,
) -> Result<(), EngineError> {
    let unknown: Vec<&str> = alternatives
        .criteria
        .iter()
        .filter(|c| !matrix.criteria.contains(c))
        .map(|c| c.as_str())
        .collect();
    if !unknown.is_empty() {
        return Err(EngineError::Schema {
            file: file.to_string(),
            message: format!("criteria not in the comparison matrix: {}", unknown.join(", ")),
        });
    }
    let missing: Vec<&str> = matrix
        .criteria
        .iter()
        .filter(|c| !alternatives.criteria.contains(c))
        .map(|c| c.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::missing_columns(file, &missing));
    }
    Ok(())
}

/// Defuzzified expert-weighted value of each criterion for one alternative
pub fn criterion_values(
    criteria: &[String],
    experts: &BTreeMap<String, Vec<Tfn>>,
    weights: &WeightTable,
) -> BTreeMap<String, f64> {
    criteria
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let items: Vec<([f64; 3], f64)> = experts
                .iter()
                .map(|(expert, values)| {
                    (values[j].to_array(), weights.resolve(expert, EXPERT_FALLBACK))
                })
                .collect();
            let value = match weighted_mean(&items) {
                Some(mean) => Tfn::from_array(mean).centroid(),
                None => {
                    warn!(criterion = %name, "no weighted expert judgments; value is 0");
                    0.0
                }
            };
            (name.clone(), value)
        })
        .collect()
}

pub fn evaluate(
    matrix: &CriteriaMatrix,
    alternatives: &AlternativeJudgments,
    weights: &WeightTable,
) -> Evaluation {
    let method = Method::AhpType1;
    let criterion_weights = criterion_weights(matrix);

    let results = alternatives
        .judgments
        .iter()
        .map(|(alt, experts)| {
            let values = criterion_values(&alternatives.criteria, experts, weights);
            let total: f64 = values
                .iter()
                .map(|(name, value)| criterion_weights.get(name).copied().unwrap_or(0.0) * value)
                .sum();
            let score = round_to(total, 4);
            let result = ScoredResult {
                score,
                band: method.classify(score),
                comment: format!("Итоговый приоритет: {}", score),
                breakdown: Some(Breakdown::Criteria(
                    values.into_iter().map(|(k, v)| (k, round_to(v, 4))).collect(),
                )),
            };
            (alt.clone(), MethodResult::Scored(result))
        })
        .collect::<Vec<_>>();

    let summary: Vec<String> = criterion_weights
        .iter()
        .map(|(name, w)| format!("{} = {}", name, round_to(*w, 4)))
        .collect();
    Evaluation::from_results(method, results)
        .with_note(format!("criterion weights: {}", summary.join(", ")))
}

pub fn run(criteria: &Sheet, alternatives: &Sheet, weights: &Sheet) -> Result<Evaluation, EngineError> {
    let weights = load_weights(weights)?;
    let matrix = load_criteria(criteria)?;
    let judgments = load_alternatives(alternatives)?;
    check_criteria(&matrix, &judgments, alternatives.name())?;
    Ok(evaluate(&matrix, &judgments, &weights))
}
