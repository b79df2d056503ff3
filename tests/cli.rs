use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("wdgt").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wdgt"));
}

#[test]
fn cli_lists_kinds() {
    let mut cmd = Command::cargo_bin("wdgt").unwrap();
    cmd.arg("kinds");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Leaderboard").and(predicate::str::contains("LDRBRD")));
}

#[test]
fn cli_renders_conversation_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("conv.json");
    fs::write(
        &input,
        r#"[
          {"kind":"Card","title":"Revenue","data":{"records":[{"label":"Total","data":1234567}]},
           "nextSuggestions":["Break down by month"]},
          {"kind":"Funnel","title":"Pipeline","data":{"labels":["A"]}}
        ]"#,
    )
    .unwrap();
    let json_out = dir.path().join("out.json");

    let mut cmd = Command::cargo_bin("wdgt").unwrap();
    cmd.arg("render")
        .arg(&input)
        .arg("--locale")
        .arg("de")
        .arg("--json")
        .arg(&json_out);
    cmd.assert().success().stdout(
        predicate::str::contains("1.234.567")
            .and(predicate::str::contains("-> Break down by month"))
            .and(predicate::str::contains("Unsupported chart type: Funnel")),
    );
    assert!(json_out.exists());
}

#[test]
fn cli_rejects_empty_palette() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one.json");
    fs::write(&input, r#"{"kind":"Card","data":{"records":[]}}"#).unwrap();
    let mut cmd = Command::cargo_bin("wdgt").unwrap();
    cmd.arg("render").arg(&input).arg("--palette").arg(",");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("palette"));
}
