//! Scoring methods and their fixed priority bands
//!
//! Thresholds live here and nowhere else. Engines classify with
//! [`Method::classify`] and the report layer partitions by the stored band.

use serde::Serialize;

/// Discrete priority band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const ALL: [PriorityBand; 3] = [PriorityBand::High, PriorityBand::Medium, PriorityBand::Low];
}

impl std::fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityBand::High => write!(f, "high"),
            PriorityBand::Medium => write!(f, "medium"),
            PriorityBand::Low => write!(f, "low"),
        }
    }
}

/// Lower bounds of the High and Medium bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub medium: f64,
    /// Whether a value equal to `high` is already High
    pub high_inclusive: bool,
}

impl Thresholds {
    const fn inclusive(high: f64, medium: f64) -> Self {
        Self {
            high,
            medium,
            high_inclusive: true,
        }
    }

    pub fn classify(&self, value: f64) -> PriorityBand {
        let is_high = if self.high_inclusive {
            value >= self.high
        } else {
            value > self.high
        };
        if is_high {
            PriorityBand::High
        } else if value >= self.medium {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }
}

/// Prioritization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Moscow,
    Kano,
    Topsis,
    FuzzyTopsis,
    IfsTopsis,
    AhpType1,
    AhpType2,
    DelphiIt2,
    DelphiIfs,
}

impl Method {
    /// Band thresholds, applied to the value named by [`Method::classified_value`]
    pub fn thresholds(&self) -> Thresholds {
        match self {
            Method::Moscow | Method::Kano => Thresholds::inclusive(80.0, 50.0),
            Method::Topsis => Thresholds {
                high: 0.65,
                medium: 0.40,
                high_inclusive: false,
            },
            Method::FuzzyTopsis | Method::IfsTopsis => Thresholds::inclusive(0.7, 0.4),
            Method::AhpType1 | Method::AhpType2 => Thresholds::inclusive(0.6, 0.4),
            Method::DelphiIt2 | Method::DelphiIfs => Thresholds::inclusive(0.6, 0.4),
        }
    }

    pub fn classify(&self, value: f64) -> PriorityBand {
        self.thresholds().classify(value)
    }

    /// Which quantity the thresholds apply to
    pub fn classified_value(&self) -> &'static str {
        match self {
            Method::Moscow | Method::Kano => "score (%)",
            Method::Topsis => "closeness coefficient C (before scaling to %)",
            Method::FuzzyTopsis | Method::IfsTopsis => "closeness coefficient C",
            Method::AhpType1 => "priority score",
            Method::AhpType2 => "criterion weight",
            Method::DelphiIt2 | Method::DelphiIfs => "confidence index",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Method::Moscow => "MoSCoW",
            Method::Kano => "Kano",
            Method::Topsis => "TOPSIS",
            Method::FuzzyTopsis => "Fuzzy TOPSIS (trapezoidal)",
            Method::IfsTopsis => "Intuitionistic fuzzy TOPSIS",
            Method::AhpType1 => "Fuzzy AHP (Type-1)",
            Method::AhpType2 => "Fuzzy AHP (interval Type-2)",
            Method::DelphiIt2 => "Fuzzy Delphi (interval Type-2)",
            Method::DelphiIfs => "Intuitionistic fuzzy Delphi",
        }
    }

    /// Fixed comment attached to a band, where the method uses one
    pub fn band_comment(&self, band: PriorityBand) -> Option<&'static str> {
        match (self, band) {
            (Method::Moscow, PriorityBand::High) => {
                Some("Высокий приоритет — реализовать в первую очередь")
            }
            (Method::Moscow, PriorityBand::Medium) => {
                Some("Средний приоритет — желательно реализовать")
            }
            (Method::Moscow, PriorityBand::Low) => Some("Низкий приоритет — можно отложить"),
            (Method::Topsis, PriorityBand::High) => {
                Some("Высокий приоритет (реализовать в первую очередь)")
            }
            (Method::Topsis, PriorityBand::Medium) => {
                Some("Средний приоритет (возможна реализация при наличии ресурсов)")
            }
            (Method::Topsis, PriorityBand::Low) => Some("Низкий приоритет (может быть отложен)"),
            (Method::FuzzyTopsis | Method::IfsTopsis, PriorityBand::High) => {
                Some("Высокий приоритет")
            }
            (Method::FuzzyTopsis | Method::IfsTopsis, PriorityBand::Medium) => {
                Some("Средний приоритет")
            }
            (Method::FuzzyTopsis | Method::IfsTopsis, PriorityBand::Low) => {
                Some("Низкий приоритет")
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moscow_and_kano_bands() {
        for m in [Method::Moscow, Method::Kano] {
            assert_eq!(m.classify(80.0), PriorityBand::High);
            assert_eq!(m.classify(79.9), PriorityBand::Medium);
            assert_eq!(m.classify(50.0), PriorityBand::Medium);
            assert_eq!(m.classify(49.9), PriorityBand::Low);
        }
    }

    #[test]
    fn test_topsis_high_bound_is_exclusive() {
        assert_eq!(Method::Topsis.classify(0.65), PriorityBand::Medium);
        assert_eq!(Method::Topsis.classify(0.651), PriorityBand::High);
        assert_eq!(Method::Topsis.classify(0.40), PriorityBand::Medium);
        assert_eq!(Method::Topsis.classify(0.399), PriorityBand::Low);
    }

    #[test]
    fn test_fuzzy_and_delphi_bands() {
        assert_eq!(Method::FuzzyTopsis.classify(0.7), PriorityBand::High);
        assert_eq!(Method::IfsTopsis.classify(0.69), PriorityBand::Medium);
        assert_eq!(Method::DelphiIt2.classify(0.6), PriorityBand::High);
        assert_eq!(Method::DelphiIfs.classify(0.4), PriorityBand::Medium);
        assert_eq!(Method::AhpType1.classify(0.39), PriorityBand::Low);
    }

    #[test]
    fn test_band_comments() {
        assert_eq!(
            Method::Moscow.band_comment(PriorityBand::Low),
            Some("Низкий приоритет — можно отложить")
        );
        assert_eq!(Method::Kano.band_comment(PriorityBand::High), None);
    }
}
