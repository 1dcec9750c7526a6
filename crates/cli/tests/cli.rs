use std::fs::File;

use assert_cmd::Command;
use predicates::prelude::*;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/scenarios");

fn bin(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).expect("binary built");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn impact_prints_full_report() {
    bin("impact")
        .args(["--diameter-km", "1", "--velocity-km-s", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Impact energy"))
        .stdout(predicate::str::contains("Crater: "))
        .stdout(predicate::str::contains("Seismic magnitude"))
        .stdout(predicate::str::contains("Severity: Extinction Level"));
}

#[test]
fn impact_in_the_atlantic_flags_tsunami() {
    bin("impact")
        .args([
            "--diameter-km",
            "1",
            "--velocity-km-s",
            "20",
            "--lat=30",
            "--lon=-40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tsunami risk: high (North Atlantic)"));
}

#[test]
fn impact_rejects_non_positive_diameter() {
    bin("impact")
        .args(["--diameter-km", "0", "--velocity-km-s", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("diameter must be a positive"));
}

#[test]
fn impact_requires_size_without_scenario() {
    bin("impact")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required unless --scenario"));
}

#[test]
fn impact_scenario_from_catalog_airbursts() {
    bin("impact")
        .args(["--scenario", "tunguska", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout(predicate::str::contains("Crater: none (airburst)"));
}

#[test]
fn impact_unknown_scenario_names_it() {
    bin("impact")
        .args(["--scenario", "Atlantis", "--catalog", CATALOG])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn impact_json_sidecar_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = dir.path().join("impact.json");
    bin("impact")
        .args(["--diameter-km", "1", "--velocity-km-s", "20", "--json"])
        .arg(&json)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_reader(File::open(&json).expect("json file")).expect("valid json");
    assert_eq!(value["kind"], "impact");
    assert_eq!(value["report"]["crater"]["airburst"], false);
    assert_eq!(value["report"]["comparison"]["severity"], "extinction_level");
    assert!(value["generated_utc"].is_string());
}

#[test]
fn mitigate_rejects_unknown_method() {
    bin("mitigate")
        .args([
            "--diameter-km",
            "1",
            "--velocity-km-s",
            "20",
            "--lead-years",
            "10",
            "--method",
            "nuclear",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported mitigation method `nuclear`"));
}

#[test]
fn mitigate_all_lists_both_methods() {
    bin("mitigate")
        .args([
            "--diameter-km",
            "0.05",
            "--velocity-km-s",
            "15",
            "--lead-years",
            "10",
            "--method",
            "all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Method: kinetic_impactor"))
        .stdout(predicate::str::contains("Method: gravity_tractor"))
        .stdout(predicate::str::contains("Success: yes"));
}

#[test]
fn mitigate_scenario_uses_custom_impactor() {
    bin("mitigate")
        .args(["--scenario", "Chicxulub", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout(predicate::str::contains("A 10000 kg impactor"))
        .stdout(predicate::str::contains("Success: no"));
}

#[test]
fn mitigate_all_keeps_scenario_impactor() {
    bin("mitigate")
        .args(["--scenario", "Chicxulub", "--catalog", CATALOG, "--method", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A 10000 kg impactor"))
        .stdout(predicate::str::contains("Method: gravity_tractor"));
}

#[test]
fn mitigate_tractor_boundary_succeeds() {
    bin("mitigate")
        .args([
            "--diameter-km",
            "3",
            "--velocity-km-s",
            "20",
            "--lead-years",
            "15",
            "--method",
            "gravity_tractor",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: yes (90.0%)"));
}

#[test]
fn propagate_writes_csv_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("orbit.csv");
    bin("propagate")
        .args(["--position", "0,1e7,0", "--velocity", "3000,0,0", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Impact after"));

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.len(), 12);
    assert_eq!(&headers[0], "time_s");
    assert_eq!(&headers[10], "altitude_km");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert!(rows.len() > 1_000);
    let last_altitude: f64 = rows.last().unwrap()[10].parse().unwrap();
    assert!(last_altitude > 0.0);

    let summary = dir.path().join("orbit_summary.json");
    let value: serde_json::Value =
        serde_json::from_reader(File::open(summary).expect("summary")).expect("valid json");
    assert_eq!(value["termination"]["crashed"], true);
    assert!(value["energy_drift"].as_f64().unwrap() < 0.01);
}

#[test]
fn propagate_scenario_crashes() {
    bin("propagate")
        .args(["--scenario", "decaying orbit", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout(predicate::str::contains("Impact after"))
        .stdout(predicate::str::contains("within tolerance"));
}

#[test]
fn propagate_no_crash_runs_full_budget() {
    bin("propagate")
        .args([
            "--position",
            "0,1e7,0",
            "--velocity",
            "3000,0,0",
            "--max-steps",
            "5000",
            "--no-crash",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No impact within 5000 steps"));
}

#[test]
fn propagate_seeded_speed_is_reproducible() {
    let run = || {
        bin("propagate")
            .args(["--speed", "8000", "--seed", "42", "--max-steps", "200"])
            .output()
            .expect("run")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn propagate_rejects_malformed_vector() {
    bin("propagate")
        .args(["--position", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected three"));
}

#[test]
fn propagate_rejects_zero_timestep() {
    bin("propagate")
        .args(["--dt", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timestep"));
}
