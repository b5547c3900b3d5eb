//! Tests for the report formats.
//!
//! The text summary and verbose line shapes are part of the CLI
//! contract, and the JSON report must round-trip cleanly.

use std::path::PathBuf;

use vibelint::config::Config;
use vibelint::detect::{Rule, Runner, ScanResult};
use vibelint::report::{self, JsonReport};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn run_on(names: &[&str]) -> ScanResult {
    let paths: Vec<PathBuf> = names.iter().map(|n| testdata(n)).collect();
    let runner = Runner::new(Config::default());
    runner.run(&paths).expect("scan should succeed")
}

#[test]
fn test_summary_counts_files_with_findings_only() {
    // clean.py contributes nothing to the file count.
    let result = run_on(&["clean.py", "duplicated.py"]);
    assert_eq!(result.scanned, 2);
    assert_eq!(
        report::summary_line(&result),
        "1 potential issue(s) in 1 file(s)"
    );
}

#[test]
fn test_verbose_lines_are_path_line_message() {
    let result = run_on(&["duplicated.py", "leaky.py"]);
    for finding in &result.findings {
        let line = report::finding_line(finding);
        let expected_prefix = format!("{}:{} - ", finding.file, finding.line);
        assert!(line.starts_with(&expected_prefix));
        assert!(line.ends_with(&finding.message));
    }
}

#[test]
fn test_json_report_round_trip() {
    let result = run_on(&["duplicated.py", "literals.py"]);

    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_scanned: result.scanned,
        findings: result.findings.clone(),
        suppressed_count: result.suppressed.len(),
        excluded_count: result.excluded,
        warnings: result.warnings.clone(),
    };

    let json = serde_json::to_string_pretty(&report).expect("serialize");
    let parsed: JsonReport = serde_json::from_str(&json).expect("parse");

    assert_eq!(parsed.files_scanned, 2);
    assert_eq!(parsed.findings.len(), result.findings.len());
    assert!(parsed
        .findings
        .iter()
        .any(|f| f.rule == Rule::DuplicateBlock));
    assert!(parsed
        .findings
        .iter()
        .any(|f| f.rule == Rule::RepeatedLiteral));
}

#[test]
fn test_json_uses_snake_case_rule_names() {
    let result = run_on(&["duplicated.py"]);
    let json = serde_json::to_string(&result.findings).expect("serialize");
    assert!(json.contains("\"duplicate_block\""));
    assert!(json.contains("\"warn\""));
}

#[test]
fn test_related_locations_serialized() {
    let result = run_on(&["literals.py"]);
    let finding = result
        .findings
        .iter()
        .find(|f| f.rule == Rule::RepeatedLiteral)
        .expect("census finding");
    let json = serde_json::to_string(finding).expect("serialize");
    assert!(json.contains("\"related\""));
    assert_eq!(finding.related.len(), 6);
}
