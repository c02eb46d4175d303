mod common;

use std::path::Path;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

fn dashboard(matches: &Path, deliveries: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cricket-stats").expect("binary exists");
    cmd.arg("--matches")
        .arg(matches)
        .arg("--deliveries")
        .arg(deliveries)
        .env("RUST_LOG", "off");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--format").arg("json").output().expect("run binary");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn overview_renders_summary_tables() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    dashboard(&matches, &deliveries)
        .arg("overview")
        .assert()
        .success()
        .stdout(contains("Summary"))
        .stdout(contains("Matches per Season"))
        .stdout(contains("Delhi Capitals"))
        .stdout(contains("Runs by Phase"));
}

#[test]
fn batting_json_ranks_scorers() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let report = json_output(dashboard(&matches, &deliveries).arg("batting"));

    let scorers = report["top_scorers"].as_array().expect("top scorers");
    assert_eq!(scorers[0]["name"], "MS Dhoni");
    assert_eq!(scorers[0]["value"], 11);
    assert_eq!(report["highlights"]["lowest_total"]["runs"], 1);
    assert_eq!(report["highlights"]["lowest_total"]["team"], "Chennai Super Kings");
    assert_eq!(report["highlights"]["highest_run_chase"], 8);
}

#[test]
fn season_flag_narrows_every_table() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let report = json_output(
        dashboard(&matches, &deliveries)
            .arg("batting")
            .arg("--season")
            .arg("2019"),
    );

    let scorers = report["top_scorers"].as_array().expect("top scorers");
    assert_eq!(scorers[0]["name"], "RG Sharma");
    assert_eq!(scorers[0]["value"], 10);
}

#[test]
fn unknown_season_still_renders() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    dashboard(&matches, &deliveries)
        .args(["bowling", "--season", "1999"])
        .assert()
        .success()
        .stdout(contains("(no data)"));
}

#[test]
fn two_teams_include_head_to_head() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let report = json_output(dashboard(&matches, &deliveries).args([
        "teams",
        "--team",
        "Chennai Super Kings",
        "--team",
        "Delhi Capitals",
    ]));

    let h2h = report["head_to_head"].as_array().expect("head to head");
    assert_eq!(h2h[0]["name"], "Chennai Super Kings");
    assert_eq!(report["comparison"]["teams"][1], "Delhi Capitals");
}

#[test]
fn single_team_skips_head_to_head() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let report = json_output(
        dashboard(&matches, &deliveries).args(["teams", "--team", "Mumbai Indians", "--phase", "death"]),
    );
    assert!(report.get("head_to_head").is_none());
    assert!(report.get("phase_batting").is_some());
}

#[test]
fn three_teams_are_rejected() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    dashboard(&matches, &deliveries)
        .args(["teams", "--team", "A", "--team", "B", "--team", "C"])
        .assert()
        .failure()
        .stderr(contains("at most two teams"));
}

#[test]
fn unclassified_player_is_reported_but_not_exported() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let export_dir = workspace.path().join("exports");
    dashboard(&matches, &deliveries)
        .args(["player", "--player", "MS Dhoni", "--export-dir"])
        .arg(&export_dir)
        .assert()
        .success()
        .stdout(contains("Unclassified"))
        .stdout(contains("Chennai Super Kings"));
    assert!(!export_dir.exists());
}

#[test]
fn roles_lists_each_group() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    dashboard(&matches, &deliveries)
        .arg("roles")
        .assert()
        .success()
        .stdout(contains("Batsmen").and(contains("Bowlers")).and(contains("All-rounders")));
}

#[test]
fn config_file_supplies_paths() {
    let workspace = TestWorkspace::new();
    let (matches, deliveries) = workspace.write_sample();
    let config = workspace.write(
        "dashboard.yaml",
        &format!(
            "matches: {}\ndeliveries: {}\ntop: 1\n",
            matches.display(),
            deliveries.display()
        ),
    );
    let mut cmd = Command::cargo_bin("cricket-stats").expect("binary exists");
    let report = json_output(cmd.arg("--config").arg(&config).arg("batting").env("RUST_LOG", "off"));
    assert_eq!(report["top_scorers"].as_array().map(Vec::len), Some(1));
}

#[test]
fn missing_input_fails_with_context() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("nope.csv");
    dashboard(&missing, &missing)
        .arg("overview")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("Loading matches")));
}
