//! Header names of the input files
//!
//! Existing data files use these exact strings; they are part of the wire
//! format and must not be translated or normalized.

pub const ALTERNATIVE: &str = "Альтернатива";
pub const STAKEHOLDER: &str = "Стейкхолдер";
pub const CRITERION: &str = "Критерий";
pub const SCORE: &str = "Оценка";
pub const WEIGHT: &str = "Вес";
pub const EXPERT: &str = "Эксперт";
pub const EXPERT_WEIGHT: &str = "Вес эксперта";
pub const STAKEHOLDER_WEIGHT: &str = "Вес стейкхолдера";
pub const FUNCTIONAL: &str = "Функциональный";
pub const DYSFUNCTIONAL: &str = "Дисфункциональный";

// Scale files
pub const EXPERT_LABEL: &str = "Оценка эксперта";
pub const TRAPEZOID: &str = "Трапециевидное число";
pub const MEMBERSHIP: &str = "Степень принадлежности";
pub const NON_MEMBERSHIP: &str = "Степень непринадлежности";
pub const HESITATION: &str = "Степень неопределённости";

/// Separator inside Type-2 AHP comparison headers (`A > B`)
pub const COMPARISON_SEPARATOR: &str = " > ";
