//! End-to-end tests against the `starway` binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn ephem_subcommand_reports_star_position_and_type() {
    let mut cmd = Command::cargo_bin("starway").expect("starway bin");
    cmd.args(["ephem", "Cise=Sente", "--time", "0"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("type=star"));
}

#[test]
fn ephem_subcommand_reports_an_error_for_an_unknown_body() {
    let mut cmd = Command::cargo_bin("starway").expect("starway bin");
    cmd.args(["ephem", "Nonexistent Planet"]);
    cmd.assert().failure();
}

#[test]
fn list_vessels_includes_the_scenario_preset() {
    let mut cmd = Command::cargo_bin("starway").expect("starway bin");
    cmd.arg("list-vessels");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Plasma-Jet MIF OPT"));
}

#[test]
fn plan_subcommand_writes_a_csv_leg_plan() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("legs.csv");

    let mut cmd = Command::cargo_bin("starway").expect("starway bin");
    cmd.args([
        "plan",
        "--from",
        "Senawasa",
        "--to",
        "Ihokronu",
        "--csv-out",
    ])
    .arg(&csv_path);
    cmd.assert().success();

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert!(contents.starts_with("leg_number,destination"));
    assert!(contents.lines().count() >= 2);
}
