//! Fuzzy Delphi with interval Type-2 judgments
//!
//! Cells read `<confidence> – <level>` (en dash), e.g.
//! `Высокая уверенность – Высокая`. The level selects a base band and the
//! confidence widens it: lower bounds move down and upper bounds move up by
//! a fixed delta, clamped to [0, 1].

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::core::band::Method;
use crate::core::error::{EngineError, JudgmentError};
use crate::core::judgment::It2Interval;
use crate::core::numeric::{mean, round_to, weighted_mean};
use crate::core::result::{CriterionSummary, DelphiResult, Evaluation, MethodResult};
use crate::methods::{load_expert_panels, ExpertPanels};
use crate::table::Sheet;

/// Separator between confidence and level
pub const CELL_SEPARATOR: char = '–';

/// Linguistic levels and their base bands, in display order
pub const LEVELS: [(&str, [f64; 4]); 5] = [
    ("Очень низкая", [0.0, 0.1, 0.1, 0.2]),
    ("Низкая", [0.2, 0.3, 0.3, 0.4]),
    ("Средняя", [0.3, 0.5, 0.5, 0.7]),
    ("Высокая", [0.5, 0.7, 0.7, 0.9]),
    ("Очень высокая", [0.8, 0.9, 0.9, 1.0]),
];

/// Confidence levels and how far they widen the band
pub const CONFIDENCE_DELTAS: [(&str, f64); 4] = [
    ("Очень высокая уверенность", 0.05),
    ("Высокая уверенность", 0.1),
    ("Средняя уверенность", 0.2),
    ("Низкая уверенность", 0.3),
];

static LEVEL_LOOKUP: Lazy<HashMap<&'static str, [f64; 4]>> =
    Lazy::new(|| LEVELS.iter().copied().collect());

static DELTA_LOOKUP: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| CONFIDENCE_DELTAS.iter().copied().collect());

/// Widen a base band by `delta`
pub fn widen(base: [f64; 4], delta: f64) -> It2Interval {
    It2Interval {
        lower_lo: (base[0] - delta).max(0.0),
        lower_hi: (base[1] - delta).max(0.0),
        upper_lo: (base[2] + delta).min(1.0),
        upper_hi: (base[3] + delta).min(1.0),
    }
}

/// Parse `<confidence> – <level>`
pub fn parse_cell(raw: &str) -> Result<It2Interval, JudgmentError> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        return Err(JudgmentError::Format("empty judgment".to_string()));
    }
    let parts: Vec<&str> = cleaned
        .split(CELL_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let [confidence, level] = parts.as_slice() else {
        return Err(JudgmentError::Format(format!(
            "expected '<confidence> {} <level>', got '{}'",
            CELL_SEPARATOR, cleaned
        )));
    };
    let delta = DELTA_LOOKUP.get(*confidence).ok_or_else(|| {
        JudgmentError::Format(format!("unknown confidence level '{}'", confidence))
    })?;
    let base = LEVEL_LOOKUP
        .get(*level)
        .ok_or_else(|| JudgmentError::Format(format!("unknown linguistic level '{}'", level)))?;
    Ok(widen(*base, *delta))
}

/// Weighted band and FOU of one criterion, both rounded to 3 places
pub fn summarize(judgments: &[(It2Interval, f64)]) -> CriterionSummary {
    let items: Vec<([f64; 4], f64)> = judgments.iter().map(|(v, w)| (v.to_array(), *w)).collect();
    let aggregated = It2Interval::from_array(weighted_mean(&items).unwrap_or([0.0; 4]));
    CriterionSummary::Interval {
        mean: aggregated.to_array().map(|v| round_to(v, 3)),
        fou: round_to(aggregated.footprint(), 3),
    }
}

/// Criterion summaries and confidence index of one alternative
pub fn consensus(criteria: &[String], experts: &BTreeMap<String, (f64, Vec<It2Interval>)>) -> DelphiResult {
    let summaries: BTreeMap<String, CriterionSummary> = criteria
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let judgments: Vec<(It2Interval, f64)> =
                experts.values().map(|(w, values)| (values[j], *w)).collect();
            (name.clone(), summarize(&judgments))
        })
        .collect();
    let fous: Vec<f64> = summaries.values().map(|s| s.fou()).collect();
    let confidence_index = round_to(1.0 - mean(&fous), 3);
    DelphiResult {
        criteria: summaries,
        confidence_index,
        band: Method::DelphiIt2.classify(confidence_index),
    }
}

pub fn load(sheet: &Sheet) -> Result<ExpertPanels<It2Interval>, EngineError> {
    load_expert_panels(sheet, parse_cell)
}

pub fn evaluate(input: &ExpertPanels<It2Interval>) -> Evaluation {
    Evaluation::from_results(
        Method::DelphiIt2,
        input.panels.iter().map(|(alt, experts)| {
            let result = consensus(&input.criteria, experts);
            debug!(
                alternative = %alt,
                experts = experts.len(),
                confidence_index = result.confidence_index,
                "IT2 consensus"
            );
            (alt.clone(), MethodResult::Delphi(result))
        }),
    )
}

pub fn run(sheet: &Sheet) -> Result<Evaluation, EngineError> {
    Ok(evaluate(&load(sheet)?))
}
