//! CLI command implementations

pub mod ahp;
pub mod completions;
pub mod delphi;
pub mod inspect;
pub mod kano;
pub mod moscow;
pub mod scale;
pub mod topsis;
