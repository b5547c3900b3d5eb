//! Core types for scan findings.

use serde::{Deserialize, Serialize};

/// Severity levels for findings.
///
/// Blocking findings fail the invocation; warnings are reported but never
/// change the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Block,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warn => write!(f, "warn"),
            Severity::Block => write!(f, "block"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(Severity::Warn),
            "block" => Ok(Severity::Block),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule names for the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    #[serde(rename = "duplicate_block")]
    DuplicateBlock,
    #[serde(rename = "repeated_literal")]
    RepeatedLiteral,
    #[serde(rename = "identical_function")]
    IdenticalFunction,
    #[serde(rename = "secret")]
    Secret,
    #[serde(rename = "hardcoded_url")]
    HardcodedUrl,
    #[serde(rename = "debug_statement")]
    DebugStatement,
    #[serde(rename = "empty_handler")]
    EmptyHandler,
    #[serde(rename = "magic_number")]
    MagicNumber,
    #[serde(rename = "deep_nesting")]
    DeepNesting,
    #[serde(rename = "long_function")]
    LongFunction,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::DuplicateBlock => "duplicate_block",
            Rule::RepeatedLiteral => "repeated_literal",
            Rule::IdenticalFunction => "identical_function",
            Rule::Secret => "secret",
            Rule::HardcodedUrl => "hardcoded_url",
            Rule::DebugStatement => "debug_statement",
            Rule::EmptyHandler => "empty_handler",
            Rule::MagicNumber => "magic_number",
            Rule::DeepNesting => "deep_nesting",
            Rule::LongFunction => "long_function",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "duplicate_block" => Some(Rule::DuplicateBlock),
            "repeated_literal" => Some(Rule::RepeatedLiteral),
            "identical_function" => Some(Rule::IdenticalFunction),
            "secret" => Some(Rule::Secret),
            "hardcoded_url" => Some(Rule::HardcodedUrl),
            "debug_statement" => Some(Rule::DebugStatement),
            "empty_handler" => Some(Rule::EmptyHandler),
            "magic_number" => Some(Rule::MagicNumber),
            "deep_nesting" => Some(Rule::DeepNesting),
            "long_function" => Some(Rule::LongFunction),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A secondary occurrence referenced by a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single detected issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub rule: Rule,
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub message: String,
    /// Paired locations (other occurrences of a duplicate, census hits).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<Location>,
}

impl Finding {
    pub fn new(
        rule: Rule,
        severity: Severity,
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity,
            file: file.into(),
            line,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn with_related(mut self, related: Vec<Location>) -> Self {
        self.related = related;
        self
    }
}

/// Everything one scan invocation produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub findings: Vec<Finding>,
    /// Findings cancelled by inline suppression markers.
    #[serde(default)]
    pub suppressed: Vec<Finding>,
    /// Findings dropped by exclusion patterns.
    #[serde(default)]
    pub excluded: usize,
    /// Non-fatal notes (unreadable files).
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Number of files scanned.
    pub scanned: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.findings.extend(other.findings);
        self.suppressed.extend(other.suppressed);
        self.excluded += other.excluded;
        self.warnings.extend(other.warnings);
        self.scanned += other.scanned;
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Check if any blocking finding survived filtering.
    pub fn has_blocking(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Block)
    }

    /// Number of distinct files with at least one finding.
    pub fn affected_files(&self) -> usize {
        let mut files: Vec<&str> = self.findings.iter().map(|f| f.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }

    /// Deterministic ordering for output: (file, line, rule).
    pub fn sort(&mut self) {
        self.findings.sort_by(|a, b| {
            (&a.file, a.line, a.rule.as_str()).cmp(&(&b.file, b.line, b.rule.as_str()))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("BLOCK".parse::<Severity>(), Ok(Severity::Block));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_rule_round_trip() {
        for rule in [
            Rule::DuplicateBlock,
            Rule::RepeatedLiteral,
            Rule::IdenticalFunction,
            Rule::Secret,
            Rule::DeepNesting,
        ] {
            assert_eq!(Rule::parse(rule.as_str()), Some(rule));
        }
        assert_eq!(Rule::parse("nonsense"), None);
    }

    #[test]
    fn test_result_ordering() {
        let mut result = ScanResult::new();
        result.add(Finding::new(Rule::Secret, Severity::Block, "b.py", 3, "x"));
        result.add(Finding::new(Rule::Secret, Severity::Block, "a.py", 9, "y"));
        result.add(Finding::new(Rule::HardcodedUrl, Severity::Warn, "a.py", 2, "z"));
        result.sort();
        assert_eq!(result.findings[0].file, "a.py");
        assert_eq!(result.findings[0].line, 2);
        assert_eq!(result.findings[1].line, 9);
        assert_eq!(result.findings[2].file, "b.py");
    }

    #[test]
    fn test_affected_files() {
        let mut result = ScanResult::new();
        result.add(Finding::new(Rule::Secret, Severity::Block, "a.py", 1, "m"));
        result.add(Finding::new(Rule::Secret, Severity::Warn, "a.py", 5, "m"));
        result.add(Finding::new(Rule::Secret, Severity::Warn, "b.py", 2, "m"));
        assert_eq!(result.affected_files(), 2);
        assert!(result.has_blocking());
    }
}
