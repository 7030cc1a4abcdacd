mod common;
use common::{rc, scan_at, seed_roster, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;
use std::path::Path;

fn seeded(name: &str) -> String {
    let db_path = setup_test_db(name);
    seed_roster(&db_path);
    scan_at(&db_path, "RF001", "in", "2024-03-11", "08:20");
    scan_at(&db_path, "RF001", "in", "2024-03-04", "08:05");
    scan_at(&db_path, "RF002", "in", "2024-04-01", "08:05");
    db_path
}

#[test]
fn test_export_logs_csv_all() {
    let db_path = seeded("export_logs_csv_all");
    let out = temp_out("export_logs_csv_all", "csv");

    rc().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("id,date,scan_time,teacher_id,teacher"));
    // ordered by date
    let first = lines.next().unwrap();
    assert!(first.contains("2024-03-04"));
    assert!(first.contains("Ada Byron"));
    assert!(first.contains("on_time"));
    assert!(content.contains("2024-04-01"));
}

#[test]
fn test_export_logs_json_range() {
    let db_path = seeded("export_logs_json_range");
    let out = temp_out("export_logs_json_range", "json");

    rc().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2024-03",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["status"], "late");
    assert_eq!(rows[1]["classroom"], "Room 101");
}

#[test]
fn test_export_teacher_stats() {
    let db_path = seeded("export_teacher_stats");
    let out = temp_out("export_teacher_stats", "json");

    rc().args([
        "--db", &db_path, "export", "--what", "teachers", "--format", "json", "--file", &out,
        "--range", "2024-03",
    ])
    .assert()
    .success();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows[0]["teacher_id"], "t1");
    assert_eq!(rows[0]["on_time"], 1);
    assert_eq!(rows[0]["late"], 1);
    assert_eq!(rows[0]["punctuality_rate"], 50);
    // every teacher appears
    assert_eq!(rows[1]["teacher_id"], "t2");
    assert_eq!(rows[1]["total"], 0);
}

#[test]
fn test_export_xlsx() {
    let db_path = seeded("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");

    rc().args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success();

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = seeded("export_relative");

    rc().args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = seeded("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "stale").unwrap();

    rc().args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Ada Byron"));

    // declining the prompt leaves the file alone
    fs::write(&out, "stale").unwrap();
    rc().args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "stale");
}

#[test]
fn test_backup_and_compress() {
    let db_path = seeded("backup");
    let out = temp_out("backup", "sqlite");
    let zipped = temp_out("backup", "zip");

    rc().args(["--db", &db_path, "backup", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(Path::new(&out).exists());

    rc().args(["--db", &db_path, "backup", "--file", &out, "--compress", "--force"])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
}
