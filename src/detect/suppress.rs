//! Inline suppression of findings via trailing comments.
//!
//! A marker cancels findings anchored at the line it appears on, and only
//! that line. Recognized markers, in a trailing comment:
//! - `# vibelint: ignore` / `// vibelint: ignore` — all rules
//! - `# vibelint: ignore[duplicate_block]` — one rule
//! - `# noqa` — all rules (pre-commit convention)

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::normalize::strip_line_comment;
use crate::source::SourceFile;

use super::types::{Finding, Rule};

/// A parsed suppression marker.
#[derive(Debug, Clone)]
pub struct Suppression {
    /// Rule the marker names; None suppresses every rule on the line.
    pub rule: Option<Rule>,
    pub file: String,
    pub line: usize,
}

lazy_static! {
    /// Marker body, matched against the comment part of a line.
    static ref MARKER: Regex =
        Regex::new(r"(?:vibelint:\s*ignore(?:\[([a-z_]+)\])?|\bnoqa\b(?::\s*([a-z_]+))?)").unwrap();
}

/// Parse suppression markers from one file.
///
/// Only the comment portion of each line is searched, so a marker inside
/// a string literal does not suppress anything.
pub fn parse_suppressions(file: &SourceFile) -> Vec<Suppression> {
    let mut suppressions = Vec::new();

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        if code.len() == raw.len() {
            continue;
        }
        let comment = &raw[code.len()..];
        let Some(caps) = MARKER.captures(comment) else {
            continue;
        };
        let rule = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| Rule::parse(m.as_str()));
        suppressions.push(Suppression {
            rule,
            file: file.path.clone(),
            line: line_no,
        });
    }
    suppressions
}

/// Collect suppressions for a file set, keyed by path.
pub fn collect_suppressions(files: &[SourceFile]) -> HashMap<String, Vec<Suppression>> {
    let mut map = HashMap::new();
    for file in files {
        let suppressions = parse_suppressions(file);
        if !suppressions.is_empty() {
            map.insert(file.path.clone(), suppressions);
        }
    }
    map
}

/// Check whether a suppression cancels a finding.
pub fn matches_suppression(finding: &Finding, suppression: &Suppression) -> bool {
    if finding.file != suppression.file || finding.line != suppression.line {
        return false;
    }
    match suppression.rule {
        None => true,
        Some(rule) => finding.rule == rule,
    }
}

/// Split findings into active and suppressed.
pub fn filter_suppressed(
    findings: Vec<Finding>,
    suppressions: &HashMap<String, Vec<Suppression>>,
) -> (Vec<Finding>, Vec<Finding>) {
    let mut active = Vec::new();
    let mut suppressed = Vec::new();

    for finding in findings {
        let cancelled = suppressions
            .get(&finding.file)
            .map(|list| list.iter().any(|s| matches_suppression(&finding, s)))
            .unwrap_or(false);
        if cancelled {
            suppressed.push(finding);
        } else {
            active.push(finding);
        }
    }
    (active, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::types::Severity;
    use crate::lang::Lang;

    fn py(text: &str) -> SourceFile {
        SourceFile::new("t.py", Lang::Python, text)
    }

    #[test]
    fn test_parse_markers() {
        let file = py("x = 1  # vibelint: ignore\ny = 2  # noqa\nz = 3\n");
        let suppressions = parse_suppressions(&file);
        assert_eq!(suppressions.len(), 2);
        assert_eq!(suppressions[0].line, 1);
        assert!(suppressions[0].rule.is_none());
        assert_eq!(suppressions[1].line, 2);
    }

    #[test]
    fn test_parse_rule_category() {
        let file = py("block()  # vibelint: ignore[duplicate_block]\n");
        let suppressions = parse_suppressions(&file);
        assert_eq!(suppressions[0].rule, Some(Rule::DuplicateBlock));
    }

    #[test]
    fn test_marker_in_string_not_a_suppression() {
        let file = py("msg = \"add # noqa to silence\"\n");
        assert!(parse_suppressions(&file).is_empty());
    }

    #[test]
    fn test_line_scoped_only() {
        let file = py("# vibelint: ignore\nleak()\n");
        let suppressions = collect_suppressions(std::slice::from_ref(&file));
        let finding = Finding::new(Rule::Secret, Severity::Block, "t.py", 2, "m");
        let (active, suppressed) = filter_suppressed(vec![finding], &suppressions);
        // The marker is on line 1; it does not shield line 2.
        assert_eq!(active.len(), 1);
        assert!(suppressed.is_empty());
    }

    #[test]
    fn test_filter_matches_rule() {
        let file = py("x()  # vibelint: ignore[secret]\n");
        let suppressions = collect_suppressions(std::slice::from_ref(&file));
        let hit = Finding::new(Rule::Secret, Severity::Block, "t.py", 1, "m");
        let other = Finding::new(Rule::HardcodedUrl, Severity::Warn, "t.py", 1, "m");
        let (active, suppressed) = filter_suppressed(vec![hit, other], &suppressions);
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].rule, Rule::Secret);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rule, Rule::HardcodedUrl);
    }
}
