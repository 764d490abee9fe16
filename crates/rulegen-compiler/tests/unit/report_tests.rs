//! Compile report tests

use rulegen_compiler::CompileReport;
use rulegen_domain::{ReportSink, Severity};

fn sample_report() -> CompileReport {
    let mut report = CompileReport::new();
    report.info("rules.xml: 2 rule(s) generated");
    report.error("Rule 'X': no target word is marked as head");
    report.warning("Rule 'Y': feature 'gender' on head word '1' is not used");
    report
}

#[test]
fn test_empty_report_passes() {
    let report = CompileReport::new();
    let summary = report.summary();
    assert!(summary.passed);
    assert_eq!(summary.errors, 0);
    assert!(!report.has_errors());
    assert!(report.to_human_readable().contains("Result: PASSED"));
}

#[test]
fn test_summary_counts_by_severity() {
    let report = sample_report();
    let summary = report.summary();
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.infos, 1);
    assert!(!summary.passed);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.entries()[0].severity, Severity::Info);
}

#[test]
fn test_human_readable_lists_errors_first() {
    let text = sample_report().to_human_readable();
    assert!(text.starts_with("=== Rule Generation Report ===\n"));
    let error = text.find("[ERROR] Rule 'X'").unwrap();
    let warning = text.find("[WARNING] Rule 'Y'").unwrap();
    let info = text.find("[INFO] rules.xml").unwrap();
    assert!(error < warning && warning < info);
    assert!(text.contains("Result: FAILED"));
}

#[test]
fn test_json_rendering() {
    let value: serde_json::Value = serde_json::from_str(&sample_report().to_json()).unwrap();
    assert_eq!(value["summary"]["errors"], 1);
    assert_eq!(value["summary"]["passed"], false);
    assert_eq!(value["entries"].as_array().unwrap().len(), 3);
    assert_eq!(value["entries"][1]["severity"], "Error");
}

#[test]
fn test_clear_forgets_messages() {
    let mut report = sample_report();
    report.clear();
    assert!(report.entries().is_empty());
    assert!(report.errors().is_empty());
}
