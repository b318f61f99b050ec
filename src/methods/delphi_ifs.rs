//! Intuitionistic fuzzy Delphi
//!
//! Cells are `(μ, ν, π)` triples. μ and ν are aggregated by expert-weighted
//! mean; uncertainty is the spread of π across experts (max − min), not a
//! property of the aggregated triple.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::band::Method;
use crate::core::error::{EngineError, JudgmentError};
use crate::core::judgment::Ifs;
use crate::core::numeric::{mean, round_to, weighted_mean};
use crate::core::result::{CriterionSummary, DelphiResult, Evaluation, MethodResult};
use crate::methods::{load_expert_panels, ExpertPanels};
use crate::table::Sheet;

/// Sum tolerance for judgment triples
pub const TRIPLE_TOLERANCE: f64 = 0.01;

pub fn parse_cell(raw: &str) -> Result<Ifs, JudgmentError> {
    if raw.trim().is_empty() {
        return Err(JudgmentError::Format("empty judgment".to_string()));
    }
    Ifs::parse(raw, TRIPLE_TOLERANCE)
}

/// Weighted μ and ν with the π range of one criterion, rounded to 3 places
pub fn summarize(judgments: &[(Ifs, f64)]) -> CriterionSummary {
    let items: Vec<([f64; 2], f64)> = judgments
        .iter()
        .map(|(v, w)| ([v.mu, v.nu], *w))
        .collect();
    let [mu, nu] = weighted_mean(&items).unwrap_or([0.0; 2]);
    let pis: Vec<f64> = judgments.iter().map(|(v, _)| v.pi).collect();
    let pi_range = if pis.is_empty() {
        0.0
    } else {
        let max = pis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = pis.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    };
    CriterionSummary::Intuitionistic {
        mu: round_to(mu, 3),
        nu: round_to(nu, 3),
        pi_range: round_to(pi_range, 3),
    }
}

pub fn consensus(criteria: &[String], experts: &BTreeMap<String, (f64, Vec<Ifs>)>) -> DelphiResult {
    let summaries: BTreeMap<String, CriterionSummary> = criteria
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let judgments: Vec<(Ifs, f64)> =
                experts.values().map(|(w, values)| (values[j], *w)).collect();
            (name.clone(), summarize(&judgments))
        })
        .collect();
    let ranges: Vec<f64> = summaries.values().map(|s| s.fou()).collect();
    let confidence_index = round_to(1.0 - mean(&ranges), 3);
    DelphiResult {
        criteria: summaries,
        confidence_index,
        band: Method::DelphiIfs.classify(confidence_index),
    }
}

pub fn load(sheet: &Sheet) -> Result<ExpertPanels<Ifs>, EngineError> {
    load_expert_panels(sheet, parse_cell)
}

pub fn evaluate(input: &ExpertPanels<Ifs>) -> Evaluation {
    Evaluation::from_results(
        Method::DelphiIfs,
        input.panels.iter().map(|(alt, experts)| {
            let result = consensus(&input.criteria, experts);
            debug!(
                alternative = %alt,
                experts = experts.len(),
                confidence_index = result.confidence_index,
                "IFS consensus"
            );
            (alt.clone(), MethodResult::Delphi(result))
        }),
    )
}

pub fn run(sheet: &Sheet) -> Result<Evaluation, EngineError> {
    Ok(evaluate(&load(sheet)?))
}
