//! CSV input format: literal column names and the sheet reader

pub mod columns;
pub mod reader;

pub use reader::{Row, Sheet};
