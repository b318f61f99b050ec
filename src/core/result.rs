//! Engine results handed to the reporting layer
//!
//! [`MethodResult`] is a tagged union so consumers pattern-match on what an
//! engine produced instead of inspecting the shape of a value.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::band::{Method, PriorityBand};
use crate::core::judgment::KanoCategory;

/// Optional per-alternative detail
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Breakdown {
    /// Distances to the positive and negative ideal solutions
    Distances {
        distance_to_positive: f64,
        distance_to_negative: f64,
    },
    /// Crisp value per criterion
    Criteria(BTreeMap<String, f64>),
}

/// `{score, comment}` record of the score-producing engines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub score: f64,
    pub band: PriorityBand,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

/// Kano score with the weighted category distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanoResult {
    pub distribution: BTreeMap<KanoCategory, f64>,
    pub score: f64,
    pub band: PriorityBand,
    pub comment: String,
}

/// Aggregated Delphi judgment for one criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CriterionSummary {
    /// Weighted IT2 band and its footprint of uncertainty
    Interval { mean: [f64; 4], fou: f64 },
    /// Weighted μ and ν with the spread of expert hesitation
    Intuitionistic { mu: f64, nu: f64, pi_range: f64 },
}

impl CriterionSummary {
    pub fn fou(&self) -> f64 {
        match self {
            CriterionSummary::Interval { fou, .. } => *fou,
            CriterionSummary::Intuitionistic { pi_range, .. } => *pi_range,
        }
    }
}

/// Delphi consensus record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelphiResult {
    pub criteria: BTreeMap<String, CriterionSummary>,
    pub confidence_index: f64,
    pub band: PriorityBand,
}

/// Criterion weight from pairwise comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightResult {
    pub weight: f64,
    pub band: PriorityBand,
}

/// What an engine produced for one alternative (or criterion)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodResult {
    Scored(ScoredResult),
    Kano(KanoResult),
    Delphi(DelphiResult),
    Weight(WeightResult),
}

impl MethodResult {
    /// Value used for ranking
    pub fn value(&self) -> f64 {
        match self {
            MethodResult::Scored(r) => r.score,
            MethodResult::Kano(r) => r.score,
            MethodResult::Delphi(r) => r.confidence_index,
            MethodResult::Weight(r) => r.weight,
        }
    }

    pub fn band(&self) -> PriorityBand {
        match self {
            MethodResult::Scored(r) => r.band,
            MethodResult::Kano(r) => r.band,
            MethodResult::Delphi(r) => r.band,
            MethodResult::Weight(r) => r.band,
        }
    }

    pub fn comment(&self) -> String {
        match self {
            MethodResult::Scored(r) => r.comment.clone(),
            MethodResult::Kano(r) => r.comment.clone(),
            MethodResult::Delphi(r) => format!("Индекс уверенности: {}", r.confidence_index),
            MethodResult::Weight(_) => String::new(),
        }
    }
}

/// Complete output of one engine run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub method: Method,
    pub results: BTreeMap<String, MethodResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Evaluation {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            results: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    pub fn from_results<I>(method: Method, results: I) -> Self
    where
        I: IntoIterator<Item = (String, MethodResult)>,
    {
        Self {
            method,
            results: results.into_iter().collect(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Results sorted by value descending, ties broken by name
    pub fn ranked(&self) -> Vec<(&str, &MethodResult)> {
        let mut items: Vec<(&str, &MethodResult)> =
            self.results.iter().map(|(k, v)| (k.as_str(), v)).collect();
        items.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Number of results in each band, in High, Medium, Low order
    pub fn band_counts(&self) -> [(PriorityBand, usize); 3] {
        PriorityBand::ALL.map(|band| {
            (
                band,
                self.results.values().filter(|r| r.band() == band).count(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
