use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const ITEMS: &str = r#"[
  {"id": "title", "text": "Population, total", "width": 160, "height": 40},
  {"id": "axis", "text": "GDP per capita growth (annual %)", "width": 60, "height": 60, "font_resize": true},
  {"id": "skip"}
]"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("labelfit").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("labelfit"));
}

#[test]
fn fit_prints_json_layouts() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("items.json");
    fs::write(&input, ITEMS).unwrap();

    let mut cmd = Command::cargo_bin("labelfit").unwrap();
    cmd.args(["fit", "--input"]).arg(&input).args(["--stats"]);
    let out = cmd.assert().success().stderr(predicate::str::contains("items=2"));
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], "title");
    assert_eq!(arr[0]["lines"][0], "Population, total");
    assert_eq!(arr[1]["id"], "axis");
}

#[test]
fn fit_writes_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("items.json");
    let out = dir.path().join("layouts.csv");
    fs::write(&input, ITEMS).unwrap();

    let mut cmd = Command::cargo_bin("labelfit").unwrap();
    cmd.args(["fit", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--vertical-align", "middle", "--text-anchor", "end"]);
    cmd.assert().success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("id,index,font_family"));
    assert!(csv.contains("title"));
    assert!(csv.contains("middle"));
    assert!(csv.contains("end"));
}

#[test]
fn invalid_alignment_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("items.json");
    fs::write(&input, ITEMS).unwrap();

    let mut cmd = Command::cargo_bin("labelfit").unwrap();
    cmd.args(["fit", "--input"])
        .arg(&input)
        .args(["--vertical-align", "center"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("vertical-align"));
}

#[test]
fn missing_input_fails() {
    let mut cmd = Command::cargo_bin("labelfit").unwrap();
    cmd.args(["fit", "--input", "/nonexistent/items.json"]);
    cmd.assert().failure();
}
