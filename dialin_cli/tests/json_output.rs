use assert_cmd::prelude::*;
use rstest::rstest;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is one JSON document")
}

#[rstest]
fn calibrate_json_carries_grind_decision() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[grinder]\ntype = \"clicks\"\n").unwrap();

    let v = stdout_json(
        Command::cargo_bin("dialin")
            .unwrap()
            .arg("--config")
            .arg(&cfg)
            .args(["--json", "calibrate", "--taste", "10"]),
    );

    assert_eq!(v["band"], "sour");
    assert_eq!(v["grind_adjustment"], "Turn right 3 clicks");
    assert_eq!(v["grind_decision"]["direction"], "finer");
    assert_eq!(v["grind_decision"]["steps"], 3);
    assert_eq!(v["ratio"].as_f64(), Some(2.0));
    assert_eq!(v["dose_adjustment"], "Reduce dose by 0.5g");
}

#[rstest]
fn generic_advice_has_null_decision() {
    let v = stdout_json(
        Command::cargo_bin("dialin")
            .unwrap()
            .args(["--json", "calibrate", "--taste", "75"]),
    );
    assert_eq!(v["band"], "bitter");
    assert!(v["grind_decision"].is_null());
    assert_eq!(v["brew_time_target"], "Aim for 25-28 seconds");
}

#[rstest]
fn yield_range_json() {
    let v = stdout_json(
        Command::cargo_bin("dialin")
            .unwrap()
            .args(["--json", "yield-range", "--dose", "20"]),
    );
    assert_eq!(v["min"].as_f64(), Some(20.0));
    assert_eq!(v["default"].as_f64(), Some(40.0));
    assert_eq!(v["max"].as_f64(), Some(60.0));
}

#[rstest]
fn invalid_input_is_structured_on_stderr() {
    let out = Command::cargo_bin("dialin")
        .unwrap()
        .args([
            "--json", "calibrate", "--taste", "50", "--dose", "0", "--time", "0",
        ])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8(out).unwrap();
    let first = text.lines().next().unwrap();
    let v: Value = serde_json::from_str(first).unwrap();

    assert_eq!(v["reason"], "InvalidInput");
    assert_eq!(v["fields"]["dose"], "must be greater than 0");
    assert_eq!(v["fields"]["brew_time"], "must be greater than 0");
    assert!(v["message"].as_str().unwrap().contains("rejected"));
}

#[rstest]
fn batch_json_lists_history_newest_first() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("shots.csv");
    fs::write(
        &csv,
        "roast,grind,dose,time,yield,taste\nlight,12,18,30,36,20\ndark,12,18,30,36,80\n",
    )
    .unwrap();

    let v = stdout_json(
        Command::cargo_bin("dialin")
            .unwrap()
            .arg("--json")
            .arg("batch")
            .arg("--shots")
            .arg(&csv),
    );
    let history = v["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["params"]["roast"], "dark");
    assert_eq!(history[0]["result"]["band"], "bitter");
    assert_eq!(history[1]["params"]["roast"], "light");
    assert_eq!(v["skipped"], 0);
}
