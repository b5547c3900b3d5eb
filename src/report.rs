//! Output formatting for scan results.
//!
//! Two formats:
//! - Text: a one-line summary by default, per-finding detail with
//!   `--verbose`.
//! - JSON: structured output for programmatic consumption.

use colored::*;
use serde::{Deserialize, Serialize};

use crate::detect::{Finding, ScanResult, Severity};

/// The fixed summary line: `"<N> potential issue(s) in <M> file(s)"`.
pub fn summary_line(result: &ScanResult) -> String {
    format!(
        "{} potential issue(s) in {} file(s)",
        result.findings.len(),
        result.affected_files()
    )
}

/// One verbose listing line: `<file>:<line> - <message>`.
pub fn finding_line(finding: &Finding) -> String {
    format!("{}:{} - {}", finding.file, finding.line, finding.message)
}

/// Write the text report to stdout (warnings go to stderr).
pub fn write_text(result: &ScanResult, verbose: bool) {
    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }

    if verbose {
        for finding in &result.findings {
            let tag = match finding.severity {
                Severity::Block => "BLOCK".red().bold(),
                Severity::Warn => "WARN ".yellow(),
            };
            println!("{} {}", tag, finding_line(finding));
            for location in &finding.related {
                if location.file != finding.file || location.line != finding.line {
                    println!("        also at {}", location);
                }
            }
        }
        if !result.findings.is_empty() {
            println!();
        }
        if !result.suppressed.is_empty() {
            println!("{} suppressed by inline markers", result.suppressed.len());
        }
    }

    println!("{}", summary_line(result));
}

/// JSON report shape.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    pub suppressed_count: usize,
    pub excluded_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Write the JSON report to stdout.
pub fn write_json(result: &ScanResult) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_scanned: result.scanned,
        findings: result.findings.clone(),
        suppressed_count: result.suppressed.len(),
        excluded_count: result.excluded,
        warnings: result.warnings.clone(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Finding, Rule};

    #[test]
    fn test_summary_line_counts() {
        let mut result = ScanResult::new();
        assert_eq!(summary_line(&result), "0 potential issue(s) in 0 file(s)");

        result.add(Finding::new(Rule::DuplicateBlock, Severity::Warn, "a.py", 10, "m"));
        assert_eq!(summary_line(&result), "1 potential issue(s) in 1 file(s)");

        result.add(Finding::new(Rule::Secret, Severity::Block, "b.py", 3, "m"));
        result.add(Finding::new(Rule::Secret, Severity::Warn, "b.py", 9, "m"));
        assert_eq!(summary_line(&result), "3 potential issue(s) in 2 file(s)");
    }

    #[test]
    fn test_finding_line_format() {
        let finding = Finding::new(
            Rule::DuplicateBlock,
            Severity::Warn,
            "src/app.py",
            10,
            "duplicate block also found at line 40",
        );
        assert_eq!(
            finding_line(&finding),
            "src/app.py:10 - duplicate block also found at line 40"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut result = ScanResult::new();
        result.scanned = 2;
        result.add(Finding::new(Rule::RepeatedLiteral, Severity::Warn, "a.py", 4, "m"));

        let report = JsonReport {
            version: "0".to_string(),
            files_scanned: result.scanned,
            findings: result.findings.clone(),
            suppressed_count: 0,
            excluded_count: 0,
            warnings: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.files_scanned, 2);
        assert_eq!(parsed.findings.len(), 1);
        assert_eq!(parsed.findings[0].rule, Rule::RepeatedLiteral);
    }
}
