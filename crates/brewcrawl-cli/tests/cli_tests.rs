//! Integration tests for the brewcrawl CLI.
//!
//! These tests use `assert_cmd` to verify the route, tour, and show
//! subcommands against the checked-in walking-time fixture, including JSON
//! output and exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Path to the test fixture matrix.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/walking_times.csv")
}

fn brewcrawl() -> Command {
    let mut cmd = Command::cargo_bin("brewcrawl").expect("binary exists");
    cmd.env("RUST_LOG", "warn")
        .arg("--matrix")
        .arg(fixture_path());
    cmd
}

// =============================================================================
// route
// =============================================================================

#[test]
fn route_prints_shortest_walk() {
    brewcrawl()
        .args(["route", "--from", "Roux Institute", "--to", "Foundation Brewing"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Roux Institute -> Foundation Brewing (2 hops, 26 min walking)",
        ))
        .stdout(predicate::str::contains("  1: Rising Tide (+15 min)"));
}

#[test]
fn route_lookup_ignores_case_and_spacing() {
    brewcrawl()
        .args(["route", "--from", "  roux   institute ", "--to", "AUSTIN STREET"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19 min walking"));
}

#[test]
fn route_to_isolated_location_fails() {
    brewcrawl()
        .args(["route", "--from", "Roux Institute", "--to", "Lone Pine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no route found between Roux Institute and Lone Pine",
        ));
}

#[test]
fn route_unknown_location_suggests_names() {
    brewcrawl()
        .args(["route", "--from", "Roux Institute", "--to", "Rising Tid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location name: Rising Tid"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("'Rising Tide'"));
}

#[test]
fn route_json_output() {
    let output = brewcrawl()
        .args([
            "--format",
            "json",
            "route",
            "--from",
            "Roux Institute",
            "--to",
            "Austin Street",
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["total_minutes"], 19.0);
    assert_eq!(json["goal"]["name"], "Austin Street");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(3));
}

// =============================================================================
// tour
// =============================================================================

#[test]
fn tour_without_limits_visits_all_reachable_breweries() {
    brewcrawl()
        .args(["tour", "--origin", "Roux Institute"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tour from Roux Institute: 5 stops, 31 min walking, 181 min total",
        ))
        .stdout(predicate::str::contains("Lone Pine").not());
}

#[test]
fn tour_respects_max_stops() {
    brewcrawl()
        .args(["tour", "--origin", "Roux Institute", "--max-stops", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 stops, 14 min walking"))
        .stdout(predicate::str::contains("maximum stops reached"));
}

#[test]
fn tour_time_limit_with_custom_dwell() {
    let output = brewcrawl()
        .args([
            "--format",
            "json",
            "tour",
            "--origin",
            "Roux Institute",
            "--time-limit",
            "60",
            "--dwell-time",
            "10",
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["stop_count"], 3);
    assert_eq!(json["total_elapsed_time"], 49.0);
    assert_eq!(json["termination"], "time_limit");
}

#[test]
fn tour_dwell_exempt_waypoint() {
    let output = brewcrawl()
        .args([
            "--format",
            "json",
            "tour",
            "--origin",
            "Roux Institute",
            "--time-limit",
            "60",
            "--dwell-exempt",
            "Oxbow Blending",
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["stop_count"], 2);
    assert_eq!(json["total_elapsed_time"], 44.0);
    assert_eq!(json["stops"][2]["dwell_minutes"], 0.0);
}

#[test]
fn tour_unknown_dwell_exempt_location_fails() {
    brewcrawl()
        .args([
            "tour",
            "--origin",
            "Roux Institute",
            "--dwell-exempt",
            "Oxbow Blendin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location name: Oxbow Blendin"))
        .stderr(predicate::str::contains("'Oxbow Blending'"));
}

#[test]
fn tour_rejects_negative_limits() {
    brewcrawl()
        .args([
            "tour",
            "--origin",
            "Roux Institute",
            "--max-walk-time=-5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value -5 for max_walk_time"));
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_prints_adjacency_listing() {
    brewcrawl()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Graph:\n"))
        .stdout(predicate::str::contains(
            "Austin Street -> Roux Institute(20), Bissell Brothers(NA), Oxbow Blending(9)",
        ));
}

#[test]
fn missing_matrix_reports_path() {
    let temp = TempDir::new().expect("create temp dir");
    let missing = temp.path().join("missing.csv");

    Command::cargo_bin("brewcrawl")
        .expect("binary exists")
        .arg("--matrix")
        .arg(&missing)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load walking-time matrix"));
}

#[test]
fn malformed_matrix_is_rejected() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("bad.csv");
    fs::write(&path, ",A,B\nA,0,far\n").expect("write matrix");

    Command::cargo_bin("brewcrawl")
        .expect("binary exists")
        .arg("--matrix")
        .arg(&path)
        .args(["route", "--from", "A", "--to", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'far' is not a number"));
}

#[test]
fn workbook_matrix_asks_for_csv_export() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("Data.xlsx");
    fs::write(&path, b"PK").expect("write workbook");

    Command::cargo_bin("brewcrawl")
        .expect("binary exists")
        .arg("--matrix")
        .arg(&path)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("export the walking-time sheet as CSV"));
}

#[test]
fn infinite_matrix_cell_is_rejected() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("infinite.csv");
    fs::write(&path, ",A,B\nA,0,inf\nB,1,0\n").expect("write matrix");

    Command::cargo_bin("brewcrawl")
        .expect("binary exists")
        .arg("--matrix")
        .arg(&path)
        .args(["route", "--from", "A", "--to", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("walking time inf is not finite"));
}
