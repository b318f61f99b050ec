//! Intuitionistic fuzzy TOPSIS
//!
//! Ideals per criterion: PIS = (max μ, min ν, min π), NIS = (min μ, max ν,
//! max π). Hesitation π follows ν, not μ.

use tracing::debug;

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::core::judgment::{parse_number, Ifs};
use crate::core::result::Evaluation;
use crate::methods::fuzzy_topsis::scored_evaluation;
use crate::methods::rows_by_alternative;
use crate::methods::topsis::Closeness;
use crate::scales::{BuiltinScale, LinguisticScale, ScaleRegistry};
use crate::table::columns::{ALTERNATIVE, EXPERT_LABEL, HESITATION, MEMBERSHIP, NON_MEMBERSHIP};
use crate::table::Sheet;

/// Sum tolerance for scale triples
pub const SCALE_TOLERANCE: f64 = 0.1;

pub type IfsScale = LinguisticScale<Ifs>;

/// Alternatives (sorted) × criteria matrix of IFS triples
#[derive(Debug, Clone, PartialEq)]
pub struct IfsMatrix {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    pub cells: Vec<Vec<Ifs>>,
}

/// Per-criterion ideal triple
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ideal {
    mu: f64,
    nu: f64,
    pi: f64,
}

pub fn load_scale(sheet: &Sheet) -> Result<IfsScale, EngineError> {
    let [label_idx, mu_idx, nu_idx, pi_idx] =
        sheet.require([EXPERT_LABEL, MEMBERSHIP, NON_MEMBERSHIP, HESITATION])?;
    let mut scale = IfsScale::new();
    for row in sheet.rows() {
        let label = row.get(label_idx);
        let location = sheet.location(row);
        let parse = |idx: usize| parse_number(row.get(idx)).map_err(|e| e.at(location.clone()));
        let value = Ifs::new(parse(mu_idx)?, parse(nu_idx)?, parse(pi_idx)?, SCALE_TOLERANCE)
            .map_err(|e| e.at(location.clone()))?;
        scale.insert(label, value).map_err(|e| e.at(location.clone()))?;
    }
    scale.ensure_not_empty(sheet.name())
}

pub fn default_scale() -> Result<IfsScale, EngineError> {
    load_scale(&ScaleRegistry::sheet(BuiltinScale::IfsTopsis)?)
}

pub fn load(sheet: &Sheet, scale: &IfsScale) -> Result<IfsMatrix, EngineError> {
    let [alt_idx] = sheet.require([ALTERNATIVE])?;
    let criteria = sheet.criteria_columns(&[ALTERNATIVE])?;
    let rows = rows_by_alternative(sheet, alt_idx, ALTERNATIVE)?;

    let mut matrix = IfsMatrix {
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
                    .copied()
                    .map_err(|e| e.at(sheet.location(row).alternative(alt).criterion(name)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        matrix.alternatives.push(alt.to_string());
        matrix.cells.push(values);
    }
    Ok(matrix)
}

fn ideals(cells: &[Vec<Ifs>]) -> (Vec<Ideal>, Vec<Ideal>) {
    let n_criteria = cells.first().map(|r| r.len()).unwrap_or(0);
    let mut positive = vec![
        Ideal {
            mu: f64::NEG_INFINITY,
            nu: f64::INFINITY,
            pi: f64::INFINITY,
        };
        n_criteria
    ];
    let mut negative = vec![
        Ideal {
            mu: f64::INFINITY,
            nu: f64::NEG_INFINITY,
            pi: f64::NEG_INFINITY,
        };
        n_criteria
    ];
    for row in cells {
        for (j, v) in row.iter().enumerate() {
            let (pos, neg) = (&mut positive[j], &mut negative[j]);
            pos.mu = pos.mu.max(v.mu);
            pos.nu = pos.nu.min(v.nu);
            pos.pi = pos.pi.min(v.pi);
            neg.mu = neg.mu.min(v.mu);
            neg.nu = neg.nu.max(v.nu);
            neg.pi = neg.pi.max(v.pi);
        }
    }
    (positive, negative)
}

fn distance(row: &[Ifs], ideal: &[Ideal]) -> f64 {
    row.iter()
        .zip(ideal)
        .map(|(v, i)| (v.mu - i.mu).powi(2) + (v.nu - i.nu).powi(2) + (v.pi - i.pi).powi(2))
        .sum::<f64>()
        .sqrt()
}

pub fn closeness(matrix: &IfsMatrix) -> Vec<Closeness> {
    let (positive, negative) = ideals(&matrix.cells);
    debug!(?positive, ?negative, "IFS TOPSIS ideal solutions");
    matrix
        .cells
        .iter()
        .map(|row| Closeness::from_distances(distance(row, &positive), distance(row, &negative)))
        .collect()
}

pub fn evaluate(matrix: &IfsMatrix) -> Evaluation {
    scored_evaluation(Method::IfsTopsis, &matrix.alternatives, closeness(matrix))
}

pub fn run(sheet: &Sheet, scale: Option<&Sheet>) -> Result<Evaluation, EngineError> {
    let scale = match scale {
        Some(s) => load_scale(s)?,
        None => default_scale()?,
    };
    Ok(evaluate(&load(sheet, &scale)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::band::PriorityBand;

    fn sheet(body: &str) -> Sheet {
        Sheet::parse("ifs.csv", body).unwrap()
    }

    #[test]
    fn test_dominance_gives_extremes() {
        let eval = run(
            &sheet("Альтернатива,Польза,Риск\nA,Очень высокая,Высокая\nB,Низкая,Очень низкая\n"),
            None,
        )
        .unwrap();
        assert_eq!(eval.results["A"].value(), 1.0);
        assert_eq!(eval.results["A"].band(), PriorityBand::High);
        assert_eq!(eval.results["B"].value(), 0.0);
    }

    #[test]
    fn test_hesitation_follows_non_membership() {
        // Same μ and ν; only π differs. Lower π is closer to the positive ideal.
        let scale = load_scale(&sheet(
            "Оценка эксперта,Степень принадлежности,Степень непринадлежности,Степень неопределённости\n\
             Уверенно,0.5,0.4,0.1\n\
             Сомнительно,0.5,0.4,0.15\n",
        ))
        .unwrap();
        let matrix = load(&sheet("Альтернатива,X\nA,Уверенно\nB,Сомнительно\n"), &scale).unwrap();
        let c = closeness(&matrix);
        assert_eq!(c[0].coefficient, 1.0);
        assert_eq!(c[1].coefficient, 0.0);
    }

    #[test]
    fn test_medium_band() {
        let scale = load_scale(&sheet(
            "Оценка эксперта,Степень принадлежности,Степень непринадлежности,Степень неопределённости\n\
             Низ,0.0,1.0,0.0\nСред,0.5,0.5,0.0\nВерх,1.0,0.0,0.0\n",
        ))
        .unwrap();
        let eval = evaluate(
            &load(&sheet("Альтернатива,X\nA,Низ\nB,Сред\nC,Верх\n"), &scale).unwrap(),
        );
        assert_eq!(eval.results["B"].value(), 0.5);
        assert_eq!(eval.results["B"].band(), PriorityBand::Medium);
        assert_eq!(eval.results["B"].comment(), "Средний приоритет");
    }

    #[test]
    fn test_scale_validation() {
        let header = "Оценка эксперта,Степень принадлежности,Степень непринадлежности,Степень неопределённости\n";
        let err = load_scale(&sheet(&format!("{}X,1.2,0,0\n", header))).unwrap_err();
        assert!(matches!(err, EngineError::Range { .. }));

        let err = load_scale(&sheet(&format!("{}X,0.5,0.2,0.1\n", header))).unwrap_err();
        assert!(matches!(err, EngineError::Consistency { .. }));

        // Within the looser scale tolerance
        assert!(load_scale(&sheet(&format!("{}X,0.5,0.3,0.15\n", header))).is_ok());
    }
}
