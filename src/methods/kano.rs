//! Kano engine
//!
//! Each stakeholder answers a functional and a dysfunctional question per
//! alternative. The answer pair is classified through a fixed matrix and the
//! vote weight is tallied into the resulting category.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::warn;

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::core::judgment::{KanoAnswer, KanoCategory, KanoPair};
use crate::core::numeric::{ratio_or_zero, round_to};
use crate::core::result::{Evaluation, KanoResult, MethodResult};
use crate::core::weights::parse_weight;
use crate::methods::identifier;
use crate::table::columns::{ALTERNATIVE, DYSFUNCTIONAL, FUNCTIONAL, STAKEHOLDER, WEIGHT};
use crate::table::Sheet;

/// (functional, dysfunctional) → category; pairs not listed are Questionable
pub static KANO_MATRIX: Lazy<HashMap<(KanoAnswer, KanoAnswer), KanoCategory>> = Lazy::new(|| {
    use KanoAnswer as A;
    use KanoCategory as C;
    HashMap::from([
        ((A::Attractive, A::MustBe), C::OneDimensional),
        ((A::Attractive, A::Indifferent), C::Attractive),
        ((A::Attractive, A::Reverse), C::Questionable),
        ((A::Attractive, A::Attractive), C::Attractive),
        ((A::MustBe, A::MustBe), C::MustBe),
        ((A::MustBe, A::Indifferent), C::MustBe),
        ((A::MustBe, A::Reverse), C::Reverse),
        ((A::Indifferent, A::MustBe), C::OneDimensional),
        ((A::Indifferent, A::Indifferent), C::Indifferent),
        ((A::Indifferent, A::Reverse), C::Reverse),
        ((A::Reverse, A::MustBe), C::Questionable),
        ((A::Reverse, A::Indifferent), C::Reverse),
        ((A::Reverse, A::Reverse), C::Reverse),
    ])
});

/// One stakeholder's answer pair with its vote weight
#[derive(Debug, Clone, PartialEq)]
pub struct KanoVote {
    pub stakeholder: String,
    pub pair: KanoPair,
    pub weight: f64,
}

/// Classify an answer pair
pub fn classify(pair: &KanoPair) -> KanoCategory {
    match pair.answers() {
        Some(answers) => KANO_MATRIX
            .get(&answers)
            .copied()
            .unwrap_or(KanoCategory::Questionable),
        None => {
            warn!(
                functional = %pair.functional,
                dysfunctional = %pair.dysfunctional,
                "unknown Kano answer; classified as Questionable"
            );
            KanoCategory::Questionable
        }
    }
}

/// Load votes grouped by alternative
pub fn load_votes(sheet: &Sheet) -> Result<BTreeMap<String, Vec<KanoVote>>, EngineError> {
    let [alt_idx, who_idx, func_idx, dysf_idx, weight_idx] =
        sheet.require([ALTERNATIVE, STAKEHOLDER, FUNCTIONAL, DYSFUNCTIONAL, WEIGHT])?;
    let mut votes: BTreeMap<String, Vec<KanoVote>> = BTreeMap::new();

    for row in sheet.rows() {
        let alt = identifier(sheet, row, alt_idx, ALTERNATIVE)?;
        let who = identifier(sheet, row, who_idx, STAKEHOLDER)?;
        let weight = parse_weight(row.get(weight_idx))
            .map_err(|e| e.at(sheet.location(row).alternative(alt).participant(who)))?;
        votes.entry(alt.to_string()).or_default().push(KanoVote {
            stakeholder: who.to_string(),
            pair: KanoPair::new(row.get(func_idx), row.get(dysf_idx)),
            weight,
        });
    }

    Ok(votes)
}

/// Weighted category tally and score for one alternative
pub fn score_votes(votes: &[KanoVote]) -> KanoResult {
    // Fixed accumulation order regardless of row order
    let mut ordered: Vec<&KanoVote> = votes.iter().collect();
    ordered.sort_by(|a, b| {
        a.stakeholder
            .cmp(&b.stakeholder)
            .then_with(|| a.pair.functional.cmp(&b.pair.functional))
            .then_with(|| a.pair.dysfunctional.cmp(&b.pair.dysfunctional))
            .then_with(|| a.weight.total_cmp(&b.weight))
    });

    let mut distribution: BTreeMap<KanoCategory, f64> = BTreeMap::new();
    let mut total_weight = 0.0;
    for vote in ordered {
        if vote.weight > 0.0 {
            *distribution.entry(classify(&vote.pair)).or_insert(0.0) += vote.weight;
            total_weight += vote.weight;
        }
    }

    let weighted_priority: f64 = distribution
        .iter()
        .map(|(category, weight)| category.weight() * weight)
        .sum();
    let score = round_to(100.0 * ratio_or_zero(weighted_priority, total_weight), 2);

    KanoResult {
        distribution,
        score,
        band: Method::Kano.classify(score),
        comment: format!("Итоговая значимость по шкале Кано: {:?}%", score),
    }
}

pub fn evaluate(votes: &BTreeMap<String, Vec<KanoVote>>) -> Evaluation {
    Evaluation::from_results(
        Method::Kano,
        votes
            .iter()
            .map(|(alt, v)| (alt.clone(), MethodResult::Kano(score_votes(v)))),
    )
}

pub fn run(sheet: &Sheet) -> Result<Evaluation, EngineError> {
    Ok(evaluate(&load_votes(sheet)?))
}
