//! Command-line surface: formats, configuration, reports and helper commands

mod common;

use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_help_lists_methods() {
    prio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("moscow"))
        .stdout(predicate::str::contains("fuzzy-topsis"))
        .stdout(predicate::str::contains("delphi"));
}

#[test]
fn test_version() {
    prio()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_table_output_is_ranked_with_footer() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);

    let output = ws.prio().arg("topsis").arg(&matrix).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TOPSIS"));
    assert!(stdout.contains("Score (%)"));
    let c = stdout.find("│ C ").unwrap();
    let b = stdout.find("│ B ").unwrap();
    let a = stdout.find("│ A ").unwrap();
    assert!(c < b && b < a);
    assert!(stdout.contains("1 high, 1 medium, 1 low"));
}

#[test]
fn test_csv_output() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);

    ws.prio()
        .args(["-f", "csv", "topsis"])
        .arg(&matrix)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank,name,value,band,comment\n1,C,100,high,"));
}

#[test]
fn test_tsv_output() {
    let ws = Workspace::new();
    let survey = ws.write("kano.csv", KANO_SURVEY);

    ws.prio()
        .arg("kano")
        .arg(&survey)
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tПоиск\t82.5\thigh\t"));
}

#[test]
fn test_yaml_output() {
    let ws = Workspace::new();
    let file = ws.write("delphi.csv", DELPHI_IT2);

    ws.prio()
        .args(["delphi", "it2"])
        .arg(&file)
        .args(["-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("method: delphi-it2"))
        .stdout(predicate::str::contains("confidence_index: 0.4"));
}

#[test]
fn test_markdown_output() {
    let ws = Workspace::new();
    let req = ws.write("req.csv", MOSCOW_REQUIREMENTS);

    ws.prio()
        .args(["moscow", "-r"])
        .arg(&req)
        .args(["-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# MoSCoW prioritization report"))
        .stdout(predicate::str::contains("## High"))
        .stdout(predicate::str::contains("| 1 | REQ-2 |"));
}

#[test]
fn test_report_file_written_alongside_output() {
    let ws = Workspace::new();
    let survey = ws.write("kano.csv", KANO_SURVEY);
    let report = ws.path("out/report.md");
    fs::create_dir_all(ws.path("out")).unwrap();

    ws.prio()
        .arg("kano")
        .arg(&survey)
        .arg("--report")
        .arg(&report)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank,name"))
        .stderr(predicate::str::contains("Report written"));

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("# Kano prioritization report"));
    assert!(content.contains("Поиск"));
}

#[test]
fn test_custom_template_flag() {
    let ws = Workspace::new();
    let survey = ws.write("kano.csv", KANO_SURVEY);
    let template = ws.write(
        "brief.md.tera",
        "{{ title }}:{% for row in rows %} {{ row.name }}={{ row.band }}{% endfor %}\n",
    );

    ws.prio()
        .arg("kano")
        .arg(&survey)
        .args(["-f", "md", "--template"])
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kano: Поиск=high Экспорт=medium"));
}

#[test]
fn test_project_config_sets_default_format() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);
    ws.write(".prio.yaml", "format: csv\n");

    ws.prio()
        .arg("topsis")
        .arg(&matrix)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank,name,value,band,comment"));

    // An explicit flag still wins
    ws.prio()
        .arg("topsis")
        .arg(&matrix)
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_env_format_overrides_config() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);
    ws.write(".prio.yaml", "format: csv\n");

    ws.prio()
        .env("PRIO_FORMAT", "json")
        .arg("topsis")
        .arg(&matrix)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_config_scale_used_when_flag_absent() {
    let ws = Workspace::new();
    let ratings = ws.write("ratings.csv", "Альтернатива,X\nA,Да\nB,Нет\n");
    ws.write(
        "scales/yes_no.csv",
        "Оценка эксперта,Трапециевидное число\nДа,1\nНет,0\n",
    );
    ws.write(".prio.yaml", "fuzzy_topsis_scale: scales/yes_no.csv\n");

    ws.prio()
        .arg("fuzzy-topsis")
        .arg(&ratings)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,A,1,high,"));
}

#[test]
fn test_invalid_config_is_ignored() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);
    ws.write(".prio.yaml", "format: [not, a, string\n");

    ws.prio()
        .arg("topsis")
        .arg(&matrix)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score (%)"))
        .stderr(predicate::str::contains("ignoring invalid config file"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let ws = Workspace::new();
    let matrix = ws.write("topsis.csv", TOPSIS_MATRIX);

    ws.prio()
        .arg("topsis")
        .arg(&matrix)
        .args(["-vv", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank,name"))
        .stderr(predicate::str::contains("loaded input file"));
}

#[test]
fn test_scale_kano_matrix() {
    prio()
        .args(["scale", "kano-matrix", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attractive,Must-be,One-dimensional"))
        .stdout(predicate::str::contains("Must-be,Reverse,Reverse"));
}

#[test]
fn test_scale_builtin_file_as_json() {
    let output = prio()
        .args(["scale", "ifs-topsis", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["headers"][0], "Оценка эксперта");
    assert_eq!(json["rows"].as_array().unwrap().len(), 5);
}

#[test]
fn test_scale_saaty_table() {
    prio()
        .args(["scale", "saaty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/9"))
        .stdout(predicate::str::contains("Centroid"));
}

#[test]
fn test_inspect_valid_cells() {
    prio()
        .args(["inspect", "moscow", "60% M, 40% S"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MoSCoW mixture 60% M, 40% S"));

    prio()
        .args(["inspect", "delphi-it2", "Высокая уверенность – Высокая", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"interval_type2\""))
        .stdout(predicate::str::contains("\"upper_hi\""));
}

#[test]
fn test_inspect_invalid_cell_fails() {
    prio()
        .args(["inspect", "ifs", "(1.2, 0.0, 0.0)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prio::range"));

    prio()
        .args(["inspect", "tfn", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prio::format"));
}

#[test]
fn test_completions_bash() {
    prio()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prio"))
        .stdout(predicate::str::contains("fuzzy-topsis"));
}

#[test]
fn test_unknown_format_rejected() {
    prio()
        .args(["scale", "saaty", "-f", "xml"])
        .assert()
        .failure();
}
