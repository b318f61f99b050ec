//! Ranking and band partitioning of an [`Evaluation`]
//!
//! Bands are never recomputed here. Every result already carries the band
//! its engine assigned, so the report only sorts and groups.

pub mod template;

pub use template::{ReportError, ReportRenderer};

use serde::Serialize;

use crate::core::band::PriorityBand;
use crate::core::result::{Evaluation, MethodResult};

/// One ranked line of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub name: String,
    pub value: f64,
    pub band: PriorityBand,
    pub comment: String,
}

impl ReportRow {
    fn new(rank: usize, name: &str, result: &MethodResult) -> Self {
        Self {
            rank,
            name: name.to_string(),
            value: result.value(),
            band: result.band(),
            comment: result.comment(),
        }
    }
}

/// Rows of one priority band, in rank order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSection {
    pub band: PriorityBand,
    pub rows: Vec<ReportRow>,
}

/// All results ranked by value descending
pub fn ranked_rows(eval: &Evaluation) -> Vec<ReportRow> {
    eval.ranked()
        .into_iter()
        .enumerate()
        .map(|(i, (name, result))| ReportRow::new(i + 1, name, result))
        .collect()
}

/// High, Medium and Low sections; empty bands are kept
pub fn partition(eval: &Evaluation) -> Vec<BandSection> {
    let rows = ranked_rows(eval);
    PriorityBand::ALL
        .iter()
        .map(|band| BandSection {
            band: *band,
            rows: rows.iter().filter(|r| r.band == *band).cloned().collect(),
        })
        .collect()
}
