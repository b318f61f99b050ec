//! prio: requirement prioritization engines
//!
//! MoSCoW, Kano, crisp and fuzzy TOPSIS, fuzzy AHP and fuzzy Delphi over
//! plain CSV input files. Every engine is a pure function from parsed
//! sheets to an [`core::Evaluation`]; the `prio` binary adds formatting and
//! reports on top.

pub mod cli;
pub mod core;
pub mod methods;
pub mod report;
pub mod scales;
pub mod table;
