//! Core module - shared domain types and utilities

pub mod band;
pub mod config;
pub mod error;
pub mod judgment;
pub mod numeric;
pub mod result;
pub mod weights;

pub use band::{Method, PriorityBand, Thresholds};
pub use config::Config;
pub use error::{EngineError, JudgmentError, Location};
pub use judgment::{
    Ifs, It2Interval, It2Trapezoid, Judgment, KanoAnswer, KanoCategory, KanoPair,
    MoscowCategory, MoscowMixture, Tfn, Trapezoid,
};
pub use result::{
    Breakdown, CriterionSummary, DelphiResult, Evaluation, KanoResult, MethodResult,
    ScoredResult, WeightResult,
};
pub use weights::{WeightFallback, WeightTable};
