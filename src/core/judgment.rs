//! Typed judgment encodings
//!
//! Every engine ingests one of these encodings. Values are immutable once
//! parsed; constructors validate domain and ordering constraints.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::error::JudgmentError;
use crate::core::numeric::within_tolerance;

/// Decimal number inside a tuple cell such as `(0.2, 0.5, 0.8)`
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-+]?\d*\.?\d+").expect("valid regex"));

/// Extract every number from a tuple-like cell
///
/// Anything besides numbers, brackets, quotes and separators is rejected.
pub fn extract_numbers(raw: &str) -> Result<Vec<f64>, JudgmentError> {
    let leftover = NUMBER.replace_all(raw, "");
    if let Some(bad) = leftover
        .chars()
        .find(|c| !matches!(c, '(' | ')' | '[' | ']' | '"' | '\'' | ',' | ';' | ' ' | '\t'))
    {
        return Err(JudgmentError::Format(format!(
            "unexpected character '{}' in '{}'",
            bad, raw
        )));
    }
    NUMBER
        .find_iter(raw)
        .map(|m| {
            m.as_str()
                .parse::<f64>()
                .map_err(|e| JudgmentError::Format(format!("bad number '{}': {}", m.as_str(), e)))
        })
        .collect()
}

/// Parse a plain real number cell
pub fn parse_number(raw: &str) -> Result<f64, JudgmentError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| JudgmentError::Format(format!("expected a number, got '{}'", raw)))?;
    if !value.is_finite() {
        return Err(JudgmentError::Range(format!("value '{}' is not finite", raw)));
    }
    Ok(value)
}

// ============================================================================
// MoSCoW
// ============================================================================

/// MoSCoW category symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MoscowCategory {
    #[serde(rename = "M")]
    Must,
    #[serde(rename = "S")]
    Should,
    #[serde(rename = "C")]
    Could,
    #[serde(rename = "W")]
    Wont,
}

impl MoscowCategory {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "M" => Some(MoscowCategory::Must),
            "S" => Some(MoscowCategory::Should),
            "C" => Some(MoscowCategory::Could),
            "W" => Some(MoscowCategory::Wont),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MoscowCategory::Must => "M",
            MoscowCategory::Should => "S",
            MoscowCategory::Could => "C",
            MoscowCategory::Wont => "W",
        }
    }

    /// Points contributed by a full (100%) vote: 3M + 2S + 1C + 0W
    pub fn points(&self) -> f64 {
        match self {
            MoscowCategory::Must => 3.0,
            MoscowCategory::Should => 2.0,
            MoscowCategory::Could => 1.0,
            MoscowCategory::Wont => 0.0,
        }
    }
}

/// Category sets a mixture may use (sorted in M, S, C, W order)
pub const MOSCOW_COMBINATIONS: &[&[MoscowCategory]] = &[
    &[MoscowCategory::Must],
    &[MoscowCategory::Should],
    &[MoscowCategory::Could],
    &[MoscowCategory::Wont],
    &[MoscowCategory::Should, MoscowCategory::Could],
    &[MoscowCategory::Must, MoscowCategory::Should],
    &[MoscowCategory::Could, MoscowCategory::Wont],
];

/// Percentage tolerance for a mixture sum
pub const MOSCOW_SUM_TOLERANCE: f64 = 0.01;

/// Fraction mixture such as `60% M, 40% S`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoscowMixture {
    fractions: BTreeMap<MoscowCategory, f64>,
}

impl MoscowMixture {
    /// Parse and validate a mixture cell
    pub fn parse(raw: &str) -> Result<Self, JudgmentError> {
        let cleaned = raw.trim().trim_matches('"').trim();
        let mut fractions: BTreeMap<MoscowCategory, f64> = BTreeMap::new();

        for part in cleaned.split(',') {
            let part = part.trim();
            let (percent, symbol) = part.split_once('%').ok_or_else(|| {
                JudgmentError::Format(format!("invalid MoSCoW term '{}'", part))
            })?;
            let percent: f64 = percent.trim().parse().map_err(|_| {
                JudgmentError::Format(format!("invalid percentage in '{}'", part))
            })?;
            let category = MoscowCategory::from_symbol(symbol.trim()).ok_or_else(|| {
                JudgmentError::Format(format!("invalid MoSCoW term '{}'", part))
            })?;
            if percent < 0.0 {
                return Err(JudgmentError::Range(format!(
                    "negative percentage in '{}'",
                    part
                )));
            }
            *fractions.entry(category).or_insert(0.0) += percent / 100.0;
        }

        Self::from_fractions(fractions)
    }

    /// Build from fractions, enforcing the sum and combination rules
    pub fn from_fractions(fractions: BTreeMap<MoscowCategory, f64>) -> Result<Self, JudgmentError> {
        let total: f64 = fractions.values().sum();
        if !within_tolerance(total, 1.0, MOSCOW_SUM_TOLERANCE) {
            return Err(JudgmentError::Consistency(format!(
                "percentages must sum to 100%, not {:.1}%",
                total * 100.0
            )));
        }

        let present: Vec<MoscowCategory> = fractions.keys().copied().collect();
        if !MOSCOW_COMBINATIONS.iter().any(|allowed| *allowed == present.as_slice()) {
            let symbols: Vec<&str> = present.iter().map(|c| c.symbol()).collect();
            return Err(JudgmentError::Consistency(format!(
                "category combination [{}] is not allowed; use M/S, S/C, C/W or a single category",
                symbols.join(", ")
            )));
        }

        Ok(Self { fractions })
    }

    pub fn fraction(&self, category: MoscowCategory) -> f64 {
        self.fractions.get(&category).copied().unwrap_or(0.0)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&MoscowCategory, &f64)> {
        self.fractions.iter()
    }

    /// Fraction-weighted score: 3·M + 2·S + 1·C + 0·W
    pub fn score(&self) -> f64 {
        self.fractions
            .iter()
            .map(|(cat, fraction)| cat.points() * fraction)
            .sum()
    }
}

impl std::fmt::Display for MoscowMixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms: Vec<String> = self
            .fractions
            .iter()
            .map(|(cat, fraction)| format!("{}% {}", (fraction * 100.0).round(), cat.symbol()))
            .collect();
        write!(f, "{}", terms.join(", "))
    }
}

// ============================================================================
// Kano
// ============================================================================

/// Answer to a functional or dysfunctional Kano question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KanoAnswer {
    Attractive,
    #[serde(rename = "Must-be")]
    MustBe,
    Indifferent,
    Reverse,
}

impl KanoAnswer {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Attractive" => Some(KanoAnswer::Attractive),
            "Must-be" => Some(KanoAnswer::MustBe),
            "Indifferent" => Some(KanoAnswer::Indifferent),
            "Reverse" => Some(KanoAnswer::Reverse),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KanoAnswer::Attractive => "Attractive",
            KanoAnswer::MustBe => "Must-be",
            KanoAnswer::Indifferent => "Indifferent",
            KanoAnswer::Reverse => "Reverse",
        }
    }
}

/// Resulting Kano category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum KanoCategory {
    #[serde(rename = "Must-be")]
    MustBe,
    #[serde(rename = "One-dimensional")]
    OneDimensional,
    Attractive,
    Indifferent,
    Reverse,
    Questionable,
}

impl KanoCategory {
    pub const ALL: [KanoCategory; 6] = [
        KanoCategory::MustBe,
        KanoCategory::OneDimensional,
        KanoCategory::Attractive,
        KanoCategory::Indifferent,
        KanoCategory::Reverse,
        KanoCategory::Questionable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KanoCategory::MustBe => "Must-be",
            KanoCategory::OneDimensional => "One-dimensional",
            KanoCategory::Attractive => "Attractive",
            KanoCategory::Indifferent => "Indifferent",
            KanoCategory::Reverse => "Reverse",
            KanoCategory::Questionable => "Questionable",
        }
    }

    /// Contribution of one unit of vote weight to the priority
    pub fn weight(&self) -> f64 {
        match self {
            KanoCategory::MustBe => 1.0,
            KanoCategory::OneDimensional => 0.8,
            KanoCategory::Attractive => 0.6,
            KanoCategory::Indifferent => 0.3,
            KanoCategory::Reverse => 0.1,
            KanoCategory::Questionable => 0.0,
        }
    }
}

impl std::fmt::Display for KanoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw (functional, dysfunctional) answer pair
///
/// Labels are kept as written; a label outside the four known answers
/// classifies as Questionable rather than failing the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanoPair {
    pub functional: String,
    pub dysfunctional: String,
}

impl KanoPair {
    pub fn new(functional: &str, dysfunctional: &str) -> Self {
        Self {
            functional: functional.trim().to_string(),
            dysfunctional: dysfunctional.trim().to_string(),
        }
    }

    pub fn answers(&self) -> Option<(KanoAnswer, KanoAnswer)> {
        Some((
            KanoAnswer::parse(&self.functional)?,
            KanoAnswer::parse(&self.dysfunctional)?,
        ))
    }
}

// ============================================================================
// Fuzzy numbers
// ============================================================================

/// Triangular fuzzy number (l, m, u)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tfn {
    pub l: f64,
    pub m: f64,
    pub u: f64,
}

impl Tfn {
    pub const fn new_unchecked(l: f64, m: f64, u: f64) -> Self {
        Self { l, m, u }
    }

    pub fn new(l: f64, m: f64, u: f64) -> Result<Self, JudgmentError> {
        if !(l <= m && m <= u) {
            return Err(JudgmentError::Range(format!(
                "triangular number ({}, {}, {}) must satisfy l <= m <= u",
                l, m, u
            )));
        }
        Ok(Self { l, m, u })
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self {
            l: values[0],
            m: values[1],
            u: values[2],
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.l, self.m, self.u]
    }

    /// Centroid defuzzification: arithmetic mean of the three components
    pub fn centroid(&self) -> f64 {
        (self.l + self.m + self.u) / 3.0
    }
}

impl std::fmt::Display for Tfn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.l, self.m, self.u)
    }
}

/// Trapezoidal fuzzy number (a, b, c, d)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trapezoid {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Trapezoid {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self, JudgmentError> {
        if !(a <= b && b <= c && c <= d) {
            return Err(JudgmentError::Range(format!(
                "trapezoid ({}, {}, {}, {}) must satisfy a <= b <= c <= d",
                a, b, c, d
            )));
        }
        Ok(Self { a, b, c, d })
    }

    /// Parse `(a,b,c,d)`; a single number `x` expands to `(x,x,x,x)`
    pub fn parse(raw: &str) -> Result<Self, JudgmentError> {
        let numbers = extract_numbers(raw)?;
        match numbers.as_slice() {
            [x] => Self::new(*x, *x, *x, *x),
            [a, b, c, d] => Self::new(*a, *b, *c, *d),
            _ => Err(JudgmentError::Format(format!(
                "expected 4 numbers in trapezoid '{}', got {}",
                raw,
                numbers.len()
            ))),
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            a: values[0],
            b: values[1],
            c: values[2],
            d: values[3],
        }
    }
}

impl std::fmt::Display for Trapezoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.a, self.b, self.c, self.d)
    }
}

/// Interval Type-2 value as a band (lower-lo, lower-hi, upper-lo, upper-hi)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct It2Interval {
    pub lower_lo: f64,
    pub lower_hi: f64,
    pub upper_lo: f64,
    pub upper_hi: f64,
}

impl It2Interval {
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            lower_lo: values[0],
            lower_hi: values[1],
            upper_lo: values[2],
            upper_hi: values[3],
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.lower_lo, self.lower_hi, self.upper_lo, self.upper_hi]
    }

    /// Footprint of uncertainty: upper-hi minus lower-lo
    pub fn footprint(&self) -> f64 {
        self.upper_hi - self.lower_lo
    }
}

impl std::fmt::Display for It2Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.lower_lo, self.lower_hi, self.upper_lo, self.upper_hi
        )
    }
}

/// Interval Type-2 comparison: lower and upper membership trapezoids
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct It2Trapezoid {
    pub lower: [f64; 4],
    pub upper: [f64; 4],
}

impl It2Trapezoid {
    pub fn to_array(self) -> [f64; 8] {
        let mut out = [0.0; 8];
        out[..4].copy_from_slice(&self.lower);
        out[4..].copy_from_slice(&self.upper);
        out
    }

    pub fn from_array(values: [f64; 8]) -> Self {
        let mut lower = [0.0; 4];
        let mut upper = [0.0; 4];
        lower.copy_from_slice(&values[..4]);
        upper.copy_from_slice(&values[4..]);
        Self { lower, upper }
    }
}

impl std::fmt::Display for It2Trapezoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lower {:?}, upper {:?}", self.lower, self.upper)
    }
}

/// Intuitionistic fuzzy value (μ, ν, π)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ifs {
    pub mu: f64,
    pub nu: f64,
    pub pi: f64,
}

impl Ifs {
    /// Validate components in [0, 1] with μ+ν+π within `tolerance` of 1
    pub fn new(mu: f64, nu: f64, pi: f64, tolerance: f64) -> Result<Self, JudgmentError> {
        for (name, v) in [("μ", mu), ("ν", nu), ("π", pi)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(JudgmentError::Range(format!(
                    "{} = {} is outside [0, 1]",
                    name, v
                )));
            }
        }
        let sum = mu + nu + pi;
        if !within_tolerance(sum, 1.0, tolerance) {
            return Err(JudgmentError::Consistency(format!(
                "μ+ν+π must be ~1.0 (got {})",
                sum
            )));
        }
        Ok(Self { mu, nu, pi })
    }

    /// Parse `(μ, ν, π)`
    pub fn parse(raw: &str, tolerance: f64) -> Result<Self, JudgmentError> {
        let numbers = extract_numbers(raw)?;
        match numbers.as_slice() {
            [mu, nu, pi] => Self::new(*mu, *nu, *pi, tolerance),
            _ => Err(JudgmentError::Format(format!(
                "expected 3 numbers in '{}', got {}",
                raw,
                numbers.len()
            ))),
        }
    }
}

impl std::fmt::Display for Ifs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(μ={}, ν={}, π={})", self.mu, self.nu, self.pi)
    }
}

// ============================================================================
// Tagged variant
// ============================================================================

/// One parsed judgment in any of the supported encodings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Judgment {
    Moscow(MoscowMixture),
    Kano {
        pair: KanoPair,
        category: KanoCategory,
    },
    Crisp(f64),
    Triangular(Tfn),
    Trapezoidal(Trapezoid),
    IntervalType2(It2Interval),
    IntervalComparison(It2Trapezoid),
    Intuitionistic(Ifs),
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Judgment::Moscow(m) => write!(f, "MoSCoW mixture {} (score {})", m, m.score()),
            Judgment::Kano { pair, category } => write!(
                f,
                "Kano pair ({}, {}) -> {}",
                pair.functional, pair.dysfunctional, category
            ),
            Judgment::Crisp(v) => write!(f, "crisp {}", v),
            Judgment::Triangular(t) => write!(f, "TFN {} (centroid {})", t, t.centroid()),
            Judgment::Trapezoidal(t) => write!(f, "trapezoid {}", t),
            Judgment::IntervalType2(i) => {
                write!(f, "IT2 band {} (FOU {})", i, i.footprint())
            }
            Judgment::IntervalComparison(c) => write!(f, "IT2 comparison {}", c),
            Judgment::Intuitionistic(i) => write!(f, "IFS {}", i),
        }
    }
}
