//! MoSCoW engine
//!
//! Each (alternative, criterion, stakeholder) judgment is a fraction mixture
//! scored 3·M + 2·S + 1·C + 0·W. An alternative's total is the
//! stakeholder-weighted average of its judgments, reported as a percentage
//! of the best alternative.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::band::Method;
use crate::core::error::EngineError;
use crate::core::judgment::MoscowMixture;
use crate::core::numeric::{ratio_or_zero, round_to};
use crate::core::result::{Evaluation, MethodResult, ScoredResult};
use crate::core::weights::{WeightFallback, WeightTable};
use crate::methods::identifier;
use crate::table::columns::{ALTERNATIVE, CRITERION, SCORE, STAKEHOLDER, WEIGHT};
use crate::table::Sheet;

/// alternative → criterion → stakeholder → mixture
pub type MoscowJudgments = BTreeMap<String, BTreeMap<String, BTreeMap<String, MoscowMixture>>>;

/// Stakeholders absent from the weight table count with weight 1.0
pub const STAKEHOLDER_FALLBACK: WeightFallback = WeightFallback::Unit;

/// Load and validate the requirements file
pub fn load_requirements(sheet: &Sheet) -> Result<MoscowJudgments, EngineError> {
    let [alt_idx, crit_idx, who_idx, score_idx] =
        sheet.require([ALTERNATIVE, CRITERION, STAKEHOLDER, SCORE])?;
    let mut data = MoscowJudgments::new();

    for row in sheet.rows() {
        let alt = identifier(sheet, row, alt_idx, ALTERNATIVE)?;
        let crit = identifier(sheet, row, crit_idx, CRITERION)?;
        let who = identifier(sheet, row, who_idx, STAKEHOLDER)?;
        let location = sheet
            .location(row)
            .alternative(alt)
            .criterion(crit)
            .participant(who);

        let mixture = MoscowMixture::parse(row.get(score_idx)).map_err(|e| e.at(location.clone()))?;

        let slot = data
            .entry(alt.to_string())
            .or_default()
            .entry(crit.to_string())
            .or_default();
        if slot.insert(who.to_string(), mixture).is_some() {
            return Err(EngineError::Consistency {
                location,
                message: "duplicate judgment for this alternative, criterion and stakeholder"
                    .to_string(),
            });
        }
    }

    Ok(data)
}

/// Load the stakeholder weight file (`Стейкхолдер`, `Вес`)
pub fn load_weights(sheet: &Sheet) -> Result<WeightTable, EngineError> {
    WeightTable::from_sheet(sheet, STAKEHOLDER, WEIGHT)
}

/// Stakeholder-weighted average of every judgment belonging to an alternative
pub fn weighted_average(
    criteria: &BTreeMap<String, BTreeMap<String, MoscowMixture>>,
    weights: &WeightTable,
) -> f64 {
    let mut total = 0.0;
    let mut weight_total = 0.0;
    for stakeholders in criteria.values() {
        for (who, mixture) in stakeholders {
            let weight = weights.resolve(who, STAKEHOLDER_FALLBACK);
            total += mixture.score() * weight;
            weight_total += weight;
        }
    }
    ratio_or_zero(total, weight_total)
}

/// Score every alternative relative to the best one
pub fn evaluate(judgments: &MoscowJudgments, weights: &WeightTable) -> Evaluation {
    let raw: BTreeMap<&str, f64> = judgments
        .iter()
        .map(|(alt, criteria)| (alt.as_str(), weighted_average(criteria, weights)))
        .collect();
    let max = raw.values().copied().fold(0.0f64, f64::max);
    debug!(max, "MoSCoW raw maximum");

    let method = Method::Moscow;
    let results = raw.into_iter().map(|(alt, avg)| {
        let score = if max > 0.0 {
            round_to(avg / max * 100.0, 1)
        } else {
            0.0
        };
        let band = method.classify(score);
        let result = ScoredResult {
            score,
            band,
            comment: method.band_comment(band).unwrap_or_default().to_string(),
            breakdown: None,
        };
        (alt.to_string(), MethodResult::Scored(result))
    });

    Evaluation::from_results(method, results)
}

/// Full pipeline: requirements file plus optional stakeholder weight file
pub fn run(requirements: &Sheet, weights: Option<&Sheet>) -> Result<Evaluation, EngineError> {
    let weights = match weights {
        Some(sheet) => load_weights(sheet)?,
        None => WeightTable::new(),
    };
    let judgments = load_requirements(requirements)?;
    Ok(evaluate(&judgments, &weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::band::PriorityBand;

    fn requirements(body: &str) -> Sheet {
        Sheet::parse(
            "req.csv",
            &format!("Альтернатива,Критерий,Стейкхолдер,Оценка\n{}", body),
        )
        .unwrap()
    }

    fn scored(eval: &Evaluation, alt: &str) -> ScoredResult {
        match &eval.results[alt] {
            MethodResult::Scored(r) => r.clone(),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_must_versus_wont() {
        let sheet = requirements("A,C1,S1,100% M\nB,C1,S1,100% W\n");
        let eval = run(&sheet, None).unwrap();

        let a = scored(&eval, "A");
        assert_eq!(a.score, 100.0);
        assert_eq!(a.band, PriorityBand::High);
        let b = scored(&eval, "B");
        assert_eq!(b.score, 0.0);
        assert_eq!(b.band, PriorityBand::Low);
        assert_eq!(b.comment, "Низкий приоритет — можно отложить");
    }

    #[test]
    fn test_stakeholder_weights_shift_average() {
        let sheet = requirements(
            "A,C1,S1,100% M\nA,C1,S2,100% C\nB,C1,S1,\"50% M, 50% S\"\n",
        );
        let weights = Sheet::parse("w.csv", "Стейкхолдер,Вес\nS1,1.0\nS2,3.0\n").unwrap();
        let eval = run(&sheet, Some(&weights)).unwrap();

        // A: (3·1 + 1·3) / 4 = 1.5; B: 2.5 → A = 60.0%
        assert_eq!(scored(&eval, "B").score, 100.0);
        assert_eq!(scored(&eval, "A").score, 60.0);
        assert_eq!(scored(&eval, "A").band, PriorityBand::Medium);
    }

    #[test]
    fn test_unknown_stakeholder_counts_fully() {
        let judgments =
            load_requirements(&requirements("A,C1,S1,100% M\nA,C1,S9,100% W\n")).unwrap();
        let mut weights = WeightTable::new();
        weights.insert("S1", 1.0);
        assert!((weighted_average(&judgments["A"], &weights) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_scores() {
        let eval = run(&requirements("A,C1,S1,100% W\nB,C1,S1,100% W\n"), None).unwrap();
        assert_eq!(scored(&eval, "A").score, 0.0);
        assert_eq!(scored(&eval, "B").score, 0.0);
    }

    #[test]
    fn test_invalid_mixture_names_location() {
        let err = run(&requirements("A,C1,S1,100% M\nB,Цена,S2,\"50% M, 50% W\"\n"), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Consistency { .. }));
        let msg = err.to_string();
        assert!(msg.contains("alternative 'B'"));
        assert!(msg.contains("criterion 'Цена'"));
        assert!(msg.contains("participant 'S2'"));
    }

    #[test]
    fn test_duplicate_judgment_rejected() {
        let err = load_requirements(&requirements("A,C1,S1,100% M\nA,C1,S1,100% S\n"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Consistency { .. }));
    }

    #[test]
    fn test_missing_columns() {
        let sheet = Sheet::parse("req.csv", "Альтернатива,Оценка\nA,100% M\n").unwrap();
        assert!(matches!(
            load_requirements(&sheet),
            Err(EngineError::Schema { .. })
        ));
    }
}
