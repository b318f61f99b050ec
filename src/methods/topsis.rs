//! Crisp TOPSIS engine
//!
//! Ranks alternatives by their relative closeness to the positive ideal
//! solution. Weighting is per row (one weight per alternative, taken from
//! the `Вес стейкхолдера` column), not per criterion column.
//!
//! Steps:
//! 1. Euclidean-normalize each criterion column
//! 2. Multiply each normalized row by its row weight
//! 3. PIS = column max, NIS = column min
//! 4. C = d⁻ / (d⁺ + d⁻), rounded to 3 decimals; score = 100·C

use nalgebra::{DMatrix, DVector, RowDVector};
use tracing::debug;

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::core::judgment::parse_number;
use crate::core::numeric::{ratio_or_zero, round_to};
use crate::core::result::{Breakdown, Evaluation, MethodResult, ScoredResult};
use crate::methods::{row_weight, rows_by_alternative};
use crate::table::columns::{ALTERNATIVE, STAKEHOLDER_WEIGHT};
use crate::table::Sheet;

/// Decision matrix: one row per alternative, one column per criterion
pub type DecisionMatrix = DMatrix<f64>;

/// Validated TOPSIS input, rows sorted by alternative name
#[derive(Debug, Clone, PartialEq)]
pub struct TopsisInput {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub values: DecisionMatrix,
    pub row_weights: DVector<f64>,
}

/// Distances and closeness of one alternative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Closeness {
    pub to_positive: f64,
    pub to_negative: f64,
    pub coefficient: f64,
}

impl Closeness {
    /// Closeness from both distances; zero when both distances vanish
    pub fn from_distances(to_positive: f64, to_negative: f64) -> Self {
        Self {
            to_positive,
            to_negative,
            coefficient: ratio_or_zero(to_negative, to_positive + to_negative),
        }
    }

    pub fn breakdown(&self) -> Breakdown {
        Breakdown::Distances {
            distance_to_positive: round_to(self.to_positive, 4),
            distance_to_negative: round_to(self.to_negative, 4),
        }
    }
}

pub fn load(sheet: &Sheet) -> Result<TopsisInput, EngineError> {
    let [alt_idx, weight_idx] = sheet.require([ALTERNATIVE, STAKEHOLDER_WEIGHT])?;
    let criteria = sheet.criteria_columns(&[ALTERNATIVE, STAKEHOLDER_WEIGHT])?;
    let rows = rows_by_alternative(sheet, alt_idx, ALTERNATIVE)?;

    let mut values = DMatrix::zeros(rows.len(), criteria.len());
    let mut row_weights = DVector::zeros(rows.len());
    let mut alternatives = Vec::with_capacity(rows.len());

    for (i, (alt, row)) in rows.iter().enumerate() {
        row_weights[i] = row_weight(sheet, row, weight_idx)?;
        for (j, (col, name)) in criteria.iter().enumerate() {
            values[(i, j)] = parse_number(row.get(*col))
                .map_err(|e| e.at(sheet.location(row).alternative(*alt).criterion(name)))?;
        }
        alternatives.push(alt.to_string());
    }

    Ok(TopsisInput {
        alternatives,
        criteria: criteria.into_iter().map(|(_, name)| name).collect(),
        values,
        row_weights,
    })
}

/// Divide each column by its Euclidean norm; zero columns stay zero
pub fn normalize_columns(values: &DecisionMatrix) -> DecisionMatrix {
    let mut normalized = values.clone();
    for mut column in normalized.column_iter_mut() {
        let norm = column.norm();
        if norm > 0.0 {
            column /= norm;
        }
    }
    normalized
}

/// Closeness of every row of `input`, in row order
pub fn closeness(input: &TopsisInput) -> Vec<Closeness> {
    if input.values.nrows() == 0 {
        return Vec::new();
    }
    let mut weighted = normalize_columns(&input.values);
    for (i, mut row) in weighted.row_iter_mut().enumerate() {
        row *= input.row_weights[i];
    }

    let positive: RowDVector<f64> = RowDVector::from_iterator(
        weighted.ncols(),
        weighted.column_iter().map(|c| c.max()),
    );
    let negative: RowDVector<f64> = RowDVector::from_iterator(
        weighted.ncols(),
        weighted.column_iter().map(|c| c.min()),
    );
    debug!(?positive, ?negative, "TOPSIS ideal solutions");

    weighted
        .row_iter()
        .map(|row| Closeness::from_distances((row - &positive).norm(), (row - &negative).norm()))
        .collect()
}

pub fn evaluate(input: &TopsisInput) -> Evaluation {
    let method = Method::Topsis;
    let results = input
        .alternatives
        .iter()
        .zip(closeness(input))
        .map(|(alt, c)| {
            let coefficient = round_to(c.coefficient, 3);
            let band = method.classify(coefficient);
            let result = ScoredResult {
                score: round_to(coefficient * 100.0, 2),
                band,
                comment: method.band_comment(band).unwrap_or_default().to_string(),
                breakdown: Some(c.breakdown()),
            };
            (alt.clone(), MethodResult::Scored(result))
        })
        .collect::<Vec<_>>();
    Evaluation::from_results(method, results)
}

pub fn run(sheet: &Sheet) -> Result<Evaluation, EngineError> {
    Ok(evaluate(&load(sheet)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::band::PriorityBand;

    fn scored(eval: &Evaluation, alt: &str) -> ScoredResult {
        match &eval.results[alt] {
            MethodResult::Scored(r) => r.clone(),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_two_alternatives_extremes() {
        let sheet = Sheet::parse(
            "topsis.csv",
            "Альтернатива,Вес стейкхолдера,Польза\nA,1.0,10\nB,1.0,0\n",
        )
        .unwrap();
        let eval = run(&sheet).unwrap();

        let a = scored(&eval, "A");
        assert_eq!(a.score, 100.0);
        assert_eq!(a.band, PriorityBand::High);
        assert_eq!(
            a.breakdown,
            Some(Breakdown::Distances {
                distance_to_positive: 0.0,
                distance_to_negative: 1.0
            })
        );
        let b = scored(&eval, "B");
        assert_eq!(b.score, 0.0);
        assert_eq!(b.band, PriorityBand::Low);
        assert_eq!(b.comment, "Низкий приоритет (может быть отложен)");
    }

    #[test]
    fn test_row_weight_scales_whole_row() {
        let sheet = Sheet::parse(
            "topsis.csv",
            "Альтернатива,Вес стейкхолдера,X,Y\nA,0.5,3,4\nB,1.0,3,4\n",
        )
        .unwrap();
        let input = load(&sheet).unwrap();
        let c = closeness(&input);
        // Identical rows; only the weight differs, so B is the ideal and A the anti-ideal
        assert!((c[1].coefficient - 1.0).abs() < 1e-12);
        assert!(c[0].coefficient.abs() < 1e-12);
    }

    #[test]
    fn test_identical_rows_fall_back_to_zero() {
        let sheet = Sheet::parse(
            "topsis.csv",
            "Альтернатива,Вес стейкхолдера,X\nA,1,5\nB,1,5\n",
        )
        .unwrap();
        let eval = run(&sheet).unwrap();
        assert_eq!(scored(&eval, "A").score, 0.0);
    }

    #[test]
    fn test_medium_band_boundaries() {
        // C = 0.5 exactly for the middle row
        let sheet = Sheet::parse(
            "topsis.csv",
            "Альтернатива,Вес стейкхолдера,X\nA,1,0\nB,1,1\nC,1,2\n",
        )
        .unwrap();
        let eval = run(&sheet).unwrap();
        let b = scored(&eval, "B");
        assert_eq!(b.score, 50.0);
        assert_eq!(b.band, PriorityBand::Medium);
    }

    #[test]
    fn test_non_numeric_cell_names_criterion() {
        let sheet = Sheet::parse(
            "topsis.csv",
            "Альтернатива,Вес стейкхолдера,Цена\nA,1,дорого\n",
        )
        .unwrap();
        let err = run(&sheet).unwrap_err();
        assert!(matches!(err, EngineError::Format { .. }));
        assert!(err.to_string().contains("criterion 'Цена'"));
    }

    #[test]
    fn test_requires_a_criterion() {
        let sheet = Sheet::parse("topsis.csv", "Альтернатива,Вес стейкхолдера\nA,1\n").unwrap();
        assert!(matches!(run(&sheet), Err(EngineError::Schema { .. })));
    }
}
