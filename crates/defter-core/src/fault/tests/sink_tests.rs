use std::fs;

use chrono::NaiveDateTime;
use tempfile::tempdir;

use crate::fault::{FaultRecord, FaultReporter, LogSink, Severity};

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read sink file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn sink_writes_one_formatted_line_per_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defter.log");
    let sink = LogSink::open(&path).expect("open sink");

    sink.write_line("kernel", "INFO", "shell assembled");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);

    let parts: Vec<&str> = lines[0].splitn(4, " - ").collect();
    assert_eq!(parts.len(), 4, "timestamp - component - level - message");
    assert!(
        NaiveDateTime::parse_from_str(parts[0], "%Y-%m-%d %H:%M:%S%.3f").is_ok(),
        "leading field is a timestamp: {}",
        parts[0]
    );
    assert_eq!(parts[1], "kernel");
    assert_eq!(parts[2], "INFO");
    assert_eq!(parts[3], "shell assembled");
}

#[test]
fn sink_appends_without_disturbing_prior_entries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defter.log");

    let sink = LogSink::open(&path).expect("open sink");
    sink.write_line("storage", "INFO", "database ready");

    // Reopening the sink must append, not truncate.
    let reopened = LogSink::open(&path).expect("reopen sink");
    reopened.write_line("shell", "INFO", "6 tabs composed");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("database ready"));
    assert!(lines[1].ends_with("6 tabs composed"));
}

#[test]
fn sink_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("logs").join("defter.log");

    let sink = LogSink::open(&path).expect("open sink under missing dirs");
    sink.write_line("fault", "WARN", "probe");

    assert!(path.is_file());
}

#[test]
fn reporter_writes_exactly_one_fault_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defter.log");
    let sink = LogSink::open(&path).expect("open sink");
    let reporter = FaultReporter::new(sink);

    let record = FaultRecord::new(
        Severity::Critical,
        "ledger posting exploded",
        "src/posting.rs:42:7",
    );
    reporter.report(&record);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1, "one fault, one record");
    assert!(lines[0].contains("fault - CRITICAL - ledger posting exploded"));
    assert!(lines[0].contains("src/posting.rs:42:7"));
}

#[test]
fn severity_labels_are_stable() {
    assert_eq!(Severity::Warning.as_str(), "WARN");
    assert_eq!(Severity::Error.as_str(), "ERROR");
    assert_eq!(Severity::Critical.as_str(), "CRITICAL");
    assert!(Severity::Warning < Severity::Critical);
}

#[test]
fn fault_records_carry_their_context() {
    let record = FaultRecord::new(Severity::Error, "boom", "somewhere deep");
    assert_eq!(record.message, "boom");
    assert_eq!(record.context, "somewhere deep");
    assert_eq!(record.severity, Severity::Error);
}
