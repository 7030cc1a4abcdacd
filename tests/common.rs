#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rc() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode (no config file written)
pub fn init_db(db_path: &str) {
    rc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a command against `db_path` and expect success.
pub fn ok(db_path: &str, args: &[&str]) {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);
    rc().args(full).assert().success();
}

/// Two teachers, one classroom, and a Monday 08:00–09:00 slot (grace 10)
/// for `t1` in `c1`.
///
/// Badges: `t1` → RF001, `t2` → RF002.
pub fn seed_roster(db_path: &str) {
    init_db(db_path);
    ok(
        db_path,
        &["teacher", "add", "Ada Byron", "--email", "ada@school.edu", "--rfid", "RF001", "--id", "t1"],
    );
    ok(
        db_path,
        &["teacher", "add", "Alan Turing", "--email", "alan@school.edu", "--rfid", "RF002", "--id", "t2"],
    );
    ok(db_path, &["classroom", "add", "Room 101", "--location", "Building A", "--id", "c1"]);
    ok(
        db_path,
        &["schedule", "add", "--teacher", "t1", "--room", "c1", "--day", "monday", "--start", "08:00", "--end", "09:00", "--grace", "10"],
    );
}

/// Manual scan on a fixed date and time.
pub fn scan_at(db_path: &str, rfid: &str, kind: &str, date: &str, time: &str) {
    ok(
        db_path,
        &["scan", rfid, "--room", "c1", "--type", kind, "--date", date, "--time", time],
    );
}

/// Parse the JSON printed by `report --json`.
pub fn report_json(db_path: &str, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["--db", db_path, "report", "--json"];
    args.extend_from_slice(extra);
    let out = rc().args(args).output().expect("run report");
    assert!(out.status.success(), "report failed: {:?}", out);
    serde_json::from_slice(&out.stdout).expect("report prints JSON")
}
