use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{rc, report_json, scan_at, seed_roster, setup_test_db};

// 2024-03-04 is a Monday; the seeded slot is Monday 08:00–09:00, grace 10.

#[test]
fn test_grace_boundary() {
    let db_path = setup_test_db("scan_grace_boundary");
    seed_roster(&db_path);

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--type", "in", "--date", "2024-03-04",
        "--time", "08:10",
    ])
    .assert()
    .success()
    .stdout(contains("Ada Byron").and(contains("On Time")));

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--type", "in", "--date", "2024-03-11",
        "--time", "08:11",
    ])
    .assert()
    .success()
    .stdout(contains("Late"));
}

#[test]
fn test_out_before_end_is_early_leave() {
    let db_path = setup_test_db("scan_early_leave");
    seed_roster(&db_path);

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--type", "out", "--date", "2024-03-04",
        "--time", "08:30",
    ])
    .assert()
    .success()
    .stdout(contains("Early Leave"));

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--type", "out", "--date", "2024-03-04",
        "--time", "09:00",
    ])
    .assert()
    .success()
    .stdout(contains("Checked out"));
}

#[test]
fn test_scan_type_is_inferred() {
    let db_path = setup_test_db("scan_inferred");
    seed_roster(&db_path);

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--date", "2024-03-04", "--time", "08:02",
    ])
    .assert()
    .success()
    .stdout(contains("Scan In"));

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--date", "2024-03-04", "--time", "08:45",
    ])
    .assert()
    .success()
    .stdout(contains("Scan Out").and(contains("Early Leave")));
}

#[test]
fn test_unscheduled_scan_is_kept_without_status() {
    let db_path = setup_test_db("scan_unscheduled");
    seed_roster(&db_path);

    // Tuesday: no slot
    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--type", "in", "--date", "2024-03-05",
        "--time", "08:00",
    ])
    .assert()
    .success()
    .stdout(contains("No scheduled class"));

    let json = report_json(&db_path, &["--range", "2024-03"]);
    assert_eq!(json["summary"]["total_scans"], 1);
    assert_eq!(json["summary"]["on_time_count"], 0);
    assert_eq!(json["summary"]["punctuality_rate"], 0);
    assert!(json["teachers"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_badge_and_room() {
    let db_path = setup_test_db("scan_unknown");
    seed_roster(&db_path);

    rc().args(["--db", &db_path, "scan", "NOPE", "--room", "c1"])
        .assert()
        .failure()
        .stderr(contains("Unknown RFID badge: NOPE"));

    rc().args(["--db", &db_path, "scan", "RF001", "--room", "c9"])
        .assert()
        .failure()
        .stderr(contains("c9"));

    rc().args([
        "--db", &db_path, "scan", "RF001", "--room", "c1", "--date", "2024-03-04", "--time", "25:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid scan_time"));
}

#[test]
fn test_logs_filter_by_status() {
    let db_path = setup_test_db("logs_filter_status");
    seed_roster(&db_path);
    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:05");
    scan_at(&db_path, "RF001", "in", "2024-03-11", "08:20");

    rc().args(["--db", &db_path, "logs", "--status", "late"])
        .assert()
        .success()
        .stdout(contains("2024-03-11").and(contains("2024-03-04").not()));

    rc().args(["--db", &db_path, "logs", "--teacher", "t2"])
        .assert()
        .success()
        .stdout(contains("No attendance logs found"));
}

#[test]
fn test_logs_are_listed_by_ingestion_order() {
    let db_path = setup_test_db("logs_ingestion_order");
    seed_roster(&db_path);
    scan_at(&db_path, "RF001", "in", "2024-03-11", "08:05");
    // backfilled afterwards for an earlier class
    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:05");

    let out = rc().args(["--db", &db_path, "logs"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let backfilled = stdout.find("2024-03-04").unwrap();
    let live = stdout.find("2024-03-11").unwrap();
    assert!(backfilled < live, "{stdout}");

    rc().args(["--db", &db_path, "logs", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("2024-03-04").and(contains("2024-03-11").not()));
}
