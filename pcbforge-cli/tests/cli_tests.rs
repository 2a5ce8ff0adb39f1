//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn request_json() -> &'static str {
    r#"{
        "project_name": "cli_test",
        "requirements": "status LED with current limiting",
        "board_params": {"width": 60, "height": 40, "layers": 2},
        "components": [
            {"type": "LED", "name": "D1"},
            {"type": "resistor", "name": "R1"}
        ]
    }"#
}

#[test]
fn test_generate_produces_output_tree() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    std::fs::write(&request_path, request_json()).unwrap();
    let out_dir = dir.path().join("out");

    Command::cargo_bin("pcbforge")
        .unwrap()
        .arg("generate")
        .arg(&request_path)
        .arg("--output")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("60mm × 40mm"));

    assert!(out_dir.join("gerber").join("F.Cu.GTL").exists());
    assert!(out_dir.join("gerber").join("board.drl").exists());
    assert!(out_dir.join("preview.png").exists());
    assert!(out_dir.join("cli_test_gerber.zip").exists());
}

#[test]
fn test_generate_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    std::fs::write(&request_path, request_json()).unwrap();

    Command::cargo_bin("pcbforge")
        .unwrap()
        .arg("generate")
        .arg(&request_path)
        .arg("--output")
        .arg(dir.path().join("out"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gerber_zip\""));
}

#[test]
fn test_generate_rejects_invalid_board() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    std::fs::write(
        &request_path,
        r#"{"board_params": {"width": 0, "height": 40, "layers": 2}}"#,
    )
    .unwrap();

    Command::cargo_bin("pcbforge")
        .unwrap()
        .arg("generate")
        .arg(&request_path)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation error"));
}

#[test]
fn test_generate_missing_request_file() {
    Command::cargo_bin("pcbforge")
        .unwrap()
        .arg("generate")
        .arg("does_not_exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_components_lists_builtin_families() {
    Command::cargo_bin("pcbforge")
        .unwrap()
        .arg("components")
        .assert()
        .success()
        .stdout(predicate::str::contains("microcontroller"))
        .stdout(predicate::str::contains("LQFP-32_7x7mm_P0.8mm"));
}
