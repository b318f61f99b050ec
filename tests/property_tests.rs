//! Invariants that must hold for any valid input

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use prio::core::judgment::{MoscowMixture, MOSCOW_COMBINATIONS};
use prio::core::result::{Evaluation, MethodResult};
use prio::methods::{delphi_ifs, fuzzy_topsis, ifs_topsis, kano, moscow, topsis};
use prio::table::Sheet;

const LABELS: [&str; 5] = ["Очень низкая", "Низкая", "Средняя", "Высокая", "Очень высокая"];
const KANO_LABELS: [&str; 4] = ["Attractive", "Must-be", "Indifferent", "Reverse"];

fn topsis_csv(rows: &[(f64, Vec<f64>)]) -> String {
    let width = rows.first().map(|(_, v)| v.len()).unwrap_or(0);
    let mut csv = String::from("Альтернатива,Вес стейкхолдера");
    for j in 0..width {
        csv.push_str(&format!(",K{}", j));
    }
    csv.push('\n');
    for (i, (weight, values)) in rows.iter().enumerate() {
        csv.push_str(&format!("A{},{}", i, weight));
        for v in values.iter().take(width) {
            csv.push_str(&format!(",{}", v));
        }
        for _ in values.len()..width {
            csv.push_str(",0");
        }
        csv.push('\n');
    }
    csv
}

fn linguistic_csv(rows: &[Vec<usize>]) -> String {
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut csv = String::from("Альтернатива");
    for j in 0..width {
        csv.push_str(&format!(",K{}", j));
    }
    csv.push('\n');
    for (i, labels) in rows.iter().enumerate() {
        csv.push_str(&format!("A{}", i));
        for j in 0..width {
            let label = labels.get(j).copied().unwrap_or(0);
            csv.push_str(&format!(",{}", LABELS[label]));
        }
        csv.push('\n');
    }
    csv
}

fn shuffled(sheet: &Sheet, seed: u64) -> Sheet {
    let mut rows = sheet.rows().to_vec();
    rows.shuffle(&mut StdRng::seed_from_u64(seed));
    sheet.with_rows(rows)
}

fn assert_in_unit_interval(eval: &Evaluation) {
    for (name, result) in &eval.results {
        let c = result.value();
        assert!((0.0..=1.0).contains(&c), "{} has closeness {}", name, c);
    }
}

proptest! {
    #[test]
    fn topsis_scores_stay_in_range(
        rows in prop::collection::vec(
            (0.1f64..5.0, prop::collection::vec(0.0f64..100.0, 1..5)),
            1..8,
        )
    ) {
        let sheet = Sheet::parse("topsis.csv", &topsis_csv(&rows)).unwrap();
        let eval = topsis::run(&sheet).unwrap();
        prop_assert_eq!(eval.len(), rows.len());
        for result in eval.results.values() {
            prop_assert!((0.0..=100.0).contains(&result.value()));
        }
    }

    #[test]
    fn fuzzy_topsis_closeness_in_unit_interval(
        rows in prop::collection::vec(prop::collection::vec(0usize..5, 1..5), 1..8)
    ) {
        let sheet = Sheet::parse("fuzzy.csv", &linguistic_csv(&rows)).unwrap();
        assert_in_unit_interval(&fuzzy_topsis::run(&sheet, None).unwrap());
    }

    #[test]
    fn ifs_topsis_closeness_in_unit_interval(
        rows in prop::collection::vec(prop::collection::vec(0usize..5, 1..5), 1..8)
    ) {
        let sheet = Sheet::parse("ifs.csv", &linguistic_csv(&rows)).unwrap();
        assert_in_unit_interval(&ifs_topsis::run(&sheet, None).unwrap());
    }

    #[test]
    fn kano_distribution_conserves_vote_weight(
        votes in prop::collection::vec((0usize..4, 0usize..4, 0u32..10), 1..20)
    ) {
        let mut csv = String::from("Альтернатива,Стейкхолдер,Функциональный,Дисфункциональный,Вес\n");
        for (i, (f, d, w)) in votes.iter().enumerate() {
            csv.push_str(&format!("R,S{},{},{},{}\n", i, KANO_LABELS[*f], KANO_LABELS[*d], w));
        }
        let sheet = Sheet::parse("kano.csv", &csv).unwrap();
        let eval = kano::run(&sheet).unwrap();
        let total: f64 = votes.iter().map(|(_, _, w)| f64::from(*w)).sum();
        match &eval.results["R"] {
            MethodResult::Kano(r) => {
                let tallied: f64 = r.distribution.values().sum();
                prop_assert!((tallied - total).abs() < 1e-9);
                prop_assert!((0.0..=100.0).contains(&r.score));
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn moscow_listed_combinations_accept_any_split(
        combo in 0..MOSCOW_COMBINATIONS.len(),
        percent in 1u32..100,
    ) {
        let categories = MOSCOW_COMBINATIONS[combo];
        let cell = match categories {
            [only] => format!("100% {}", only.symbol()),
            [first, second] => format!(
                "{}% {}, {}% {}",
                percent,
                first.symbol(),
                100 - percent,
                second.symbol()
            ),
            _ => unreachable!("combinations have one or two categories"),
        };
        let mixture = MoscowMixture::parse(&cell).unwrap();
        prop_assert!((0.0..=3.0).contains(&mixture.score()));
    }

    #[test]
    fn moscow_rejects_sums_outside_tolerance(percent in 0u32..98) {
        let cell = format!("{}% M", percent);
        prop_assert!(MoscowMixture::parse(&cell).is_err());
    }
}

#[test]
fn test_row_order_does_not_change_results() {
    let moscow_sheet = Sheet::parse(
        "req.csv",
        "Альтернатива,Критерий,Стейкхолдер,Оценка\n\
         A,C1,S1,\"60% M, 40% S\"\n\
         A,C2,S2,\"30% S, 70% C\"\n\
         B,C1,S1,100% C\n\
         B,C1,S2,\"10% M, 90% S\"\n\
         C,C2,S3,100% W\n",
    )
    .unwrap();
    let weights = Sheet::parse("w.csv", "Стейкхолдер,Вес\nS1,0.3\nS2,0.7\n").unwrap();
    let kano_sheet = Sheet::parse(
        "kano.csv",
        "Альтернатива,Стейкхолдер,Функциональный,Дисфункциональный,Вес\n\
         A,S1,Attractive,Must-be,0.1\n\
         A,S2,Must-be,Indifferent,0.2\n\
         A,S3,Indifferent,Reverse,0.3\n\
         B,S1,Reverse,Reverse,0.7\n\
         B,S2,Attractive,Attractive,0.3\n",
    )
    .unwrap();
    let topsis_sheet = Sheet::parse(
        "topsis.csv",
        "Альтернатива,Вес стейкхолдера,X,Y\nA,0.3,1.5,7\nB,0.9,2.25,3\nC,0.6,9,0.1\nD,1,4,4\n",
    )
    .unwrap();
    let delphi_sheet = Sheet::parse(
        "delphi.csv",
        "Альтернатива,Эксперт,Вес эксперта,X\n\
         A,E1,0.1,\"(0.7, 0.2, 0.1)\"\n\
         A,E2,0.2,\"(0.3, 0.3, 0.4)\"\n\
         A,E3,0.7,\"(0.6, 0.3, 0.1)\"\n\
         B,E1,0.3,\"(0.1, 0.8, 0.1)\"\n\
         B,E2,0.7,\"(0.45, 0.45, 0.1)\"\n",
    )
    .unwrap();

    let moscow_base = moscow::run(&moscow_sheet, Some(&weights)).unwrap();
    let kano_base = kano::run(&kano_sheet).unwrap();
    let topsis_base = topsis::run(&topsis_sheet).unwrap();
    let delphi_base = delphi_ifs::run(&delphi_sheet).unwrap();

    for seed in 0..16 {
        assert_eq!(
            moscow::run(&shuffled(&moscow_sheet, seed), Some(&shuffled(&weights, seed))).unwrap(),
            moscow_base
        );
        assert_eq!(kano::run(&shuffled(&kano_sheet, seed)).unwrap(), kano_base);
        assert_eq!(topsis::run(&shuffled(&topsis_sheet, seed)).unwrap(), topsis_base);
        assert_eq!(delphi_ifs::run(&shuffled(&delphi_sheet, seed)).unwrap(), delphi_base);
    }
}
