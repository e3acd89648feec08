//! End-to-end tests for the herbarium binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn herbarium() -> Command {
    Command::cargo_bin("herbarium").unwrap()
}

#[test]
fn test_extract_reads_labeled_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plant.txt");
    fs::write(&input, "Height: 1-2 ft.\nHardy in Zone 3-5.\n").unwrap();

    herbarium()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"height\""))
        .stdout(predicate::str::contains("24.0"))
        .stdout(predicate::str::contains("\"unit\": \"inches\""))
        .stdout(predicate::str::contains("\"hardinessZones\""))
        .stdout(predicate::str::contains("\"spread\"").not());
}

#[test]
fn test_extract_text_format_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plant.txt");
    let output = dir.path().join("plant.out");
    fs::write(&input, "Grows 2-3 ft. tall. Perennial.").unwrap();

    herbarium()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Height: 24-36 in."));
    assert!(text.contains("Duration: perennial"));
}

#[test]
fn test_extract_missing_input_fails() {
    herbarium()
        .arg("extract")
        .arg("no-such-file.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_distribution_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dist.csv");
    fs::write(
        &input,
        "Country,State FIP,County FIP\n\
         United States,48,453\n\
         United States,48,\n\
         United States,40,\n\
         Canada,,\n",
    )
    .unwrap();

    herbarium()
        .arg("distribution")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 states"));

    let json = fs::read_to_string(dir.path().join("dist.json")).unwrap();
    assert!(json.contains("\"statesFips\""));
    assert!(json.contains("48453"));
}

#[test]
fn test_batch_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "Height: 1-2 ft.").unwrap();
    fs::write(dir.path().join("b.txt"), "Blooms May-July.").unwrap();
    let out = dir.path().join("out");

    herbarium()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(out.join("summary.csv").exists());
}

#[test]
fn test_guide_parses_header_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.txt");
    fs::write(&input, "BUTTERFLY MILKWEED\nAsclepias tuberosa (ASTU)\n").unwrap();

    herbarium()
        .arg("guide")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"commonName\": \"Butterfly Milkweed\"",
        ))
        .stdout(predicate::str::contains("\"symbol\": \"ASTU\""));
}

#[test]
fn test_config_path_runs() {
    herbarium()
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
