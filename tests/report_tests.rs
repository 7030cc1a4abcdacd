use chrono::{Datelike, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, ok, rc, report_json, scan_at, seed_roster, setup_test_db};

#[test]
fn test_report_counts_and_buckets() {
    let db_path = setup_test_db("report_counts");
    seed_roster(&db_path);

    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:10"); // on time
    scan_at(&db_path, "RF001", "out", "2024-03-04", "09:00"); // checkout, no status
    scan_at(&db_path, "RF001", "in", "2024-03-11", "08:11"); // late
    scan_at(&db_path, "RF001", "out", "2024-03-11", "08:30"); // early leave
    scan_at(&db_path, "RF001", "in", "2024-03-05", "08:00"); // unscheduled

    let json = report_json(&db_path, &["--range", "2024-03"]);
    let s = &json["summary"];
    assert_eq!(s["total_scans"], 5);
    assert_eq!(s["on_time_count"], 1);
    assert_eq!(s["late_count"], 1);
    assert_eq!(s["absent_count"], 0);
    assert_eq!(s["early_leave_count"], 1);
    assert_eq!(s["punctuality_rate"], 50);

    let weeks = json["weekly"].as_array().unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0]["week_start"], "2024-03-03");
    assert_eq!(weeks[0]["on_time"], 1);
    assert_eq!(weeks[1]["week_start"], "2024-03-10");
    assert_eq!(weeks[1]["late"], 1);

    let teachers = json["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["teacher_id"], "t1");
    assert_eq!(teachers[0]["total"], 2);
    assert_eq!(teachers[0]["punctuality_rate"], 50);
}

#[test]
fn test_report_seventy_percent() {
    let db_path = setup_test_db("report_seventy");
    seed_roster(&db_path);

    let mondays = ["2024-03-04", "2024-03-11", "2024-03-18", "2024-03-25"];
    let times = ["08:00", "08:01", "08:02", "08:03", "08:04", "08:05", "08:06", "08:20", "08:30", "08:40"];
    for (i, time) in times.iter().enumerate() {
        scan_at(&db_path, "RF001", "in", mondays[i % mondays.len()], time);
    }

    let json = report_json(&db_path, &["--range", "2024-03", "--zero-fill"]);
    assert_eq!(json["summary"]["on_time_count"], 7);
    assert_eq!(json["summary"]["late_count"], 3);
    assert_eq!(json["summary"]["punctuality_rate"], 70);

    // t2 has no arrivals but is listed with zero counts
    let teachers = json["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[1]["teacher_id"], "t2");
    assert_eq!(teachers[1]["total"], 0);
    assert_eq!(teachers[1]["punctuality_rate"], 0);

    // a range without data is all zeros, not an error
    let empty = report_json(&db_path, &["--range", "2023"]);
    assert_eq!(empty["summary"]["total_scans"], 0);
    assert!(empty["weekly"].as_array().unwrap().is_empty());
    assert!(empty["distribution"].as_array().unwrap().is_empty());
}

#[test]
fn test_report_table_output() {
    let db_path = setup_test_db("report_table");
    seed_roster(&db_path);
    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:00");

    rc().args(["--db", &db_path, "report", "--range", "2024-03"])
        .assert()
        .success()
        .stdout(
            contains("Overview")
                .and(contains("Weekly trend"))
                .and(contains("Status distribution"))
                .and(contains("Ada Byron"))
                .and(contains("100%")),
        );
}

/// A slot on today's weekday that ended at 00:01.
fn seed_todays_slot(db_path: &str) {
    init_db(db_path);
    ok(
        db_path,
        &["teacher", "add", "Alan Turing", "--email", "alan@school.edu", "--rfid", "RF002", "--id", "t2"],
    );
    ok(db_path, &["classroom", "add", "Lab A", "--id", "c1"]);
    let dow = Local::now().weekday().num_days_from_sunday().to_string();
    ok(
        db_path,
        &["schedule", "add", "--teacher", "t2", "--room", "c1", "--day", &dow, "--start", "00:00", "--end", "00:01"],
    );
}

/// Today's 00:00-00:01 slot, backdated so today's occurrence is owed.
fn seed_elapsed_slot(db_path: &str) {
    seed_todays_slot(db_path);
    let conn = rusqlite::Connection::open(db_path).unwrap();
    conn.execute(
        "UPDATE schedules SET created_at = '2000-01-01T00:00:00+00:00'",
        [],
    )
    .unwrap();
}

#[test]
fn test_sweep_skips_slot_created_after_it_ended() {
    let db_path = setup_test_db("sweep_created_late");
    seed_todays_slot(&db_path);
    let today = Local::now().format("%Y-%m-%d").to_string();

    rc().args(["--db", &db_path, "sweep", "--range", &today])
        .assert()
        .success()
        .stdout(contains("No missed classes"));
}

#[test]
fn test_sweep_is_idempotent() {
    let db_path = setup_test_db("sweep_idempotent");
    seed_elapsed_slot(&db_path);
    let today = Local::now().format("%Y-%m-%d").to_string();

    rc().args(["--db", &db_path, "sweep", "--range", &today, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("would be recorded"));

    rc().args(["--db", &db_path, "sweep", "--range", &today])
        .assert()
        .success()
        .stdout(contains("1 absence(s) recorded").and(contains("Absent")));

    rc().args(["--db", &db_path, "sweep", "--range", &today])
        .assert()
        .success()
        .stdout(contains("No missed classes"));

    let json = report_json(&db_path, &["--range", &today]);
    assert_eq!(json["summary"]["absent_count"], 1);
    assert_eq!(json["summary"]["punctuality_rate"], 0);
    assert_eq!(json["teachers"][0]["absent"], 1);
}

#[test]
fn test_report_sweeps_before_aggregating() {
    let db_path = setup_test_db("report_auto_sweep");
    seed_elapsed_slot(&db_path);
    let today = Local::now().format("%Y-%m-%d").to_string();

    let first = report_json(&db_path, &["--range", &today]);
    let second = report_json(&db_path, &["--range", &today]);
    assert_eq!(first["summary"]["absent_count"], 1);
    assert_eq!(first, second);
}

#[test]
fn test_teacher_view() {
    let db_path = setup_test_db("teacher_view");
    seed_roster(&db_path);
    scan_at(&db_path, "RF001", "in", "2024-02-26", "08:30"); // late, February
    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:00"); // on time, March

    rc().args(["--db", &db_path, "me", "--teacher", "t1", "--year", "2024", "--month", "3"])
        .assert()
        .success()
        .stdout(
            contains("Ada Byron (2024-03)")
                .and(contains("Recent attendance"))
                .and(contains("2024-02-26"))
                .and(contains("100%")),
        );

    rc().args(["--db", &db_path, "me", "--teacher", "ghost"])
        .assert()
        .failure()
        .stderr(contains("ghost"));
}

#[test]
fn test_dashboard() {
    let db_path = setup_test_db("dashboard");
    seed_roster(&db_path);
    scan_at(&db_path, "RF002", "in", "2024-03-04", "08:00");

    rc().args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Dashboard").and(contains("Recent scans")).and(contains("Alan Turing")));
}
