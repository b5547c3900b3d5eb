//! Repeated string-literal census.
//!
//! Counts occurrences of each decoded literal across the whole file set
//! and reports values long enough and frequent enough to deserve a named
//! constant. Short boilerplate is excluded by the length floor alone;
//! there is no denylist.

use std::collections::HashMap;

use crate::normalize::StringLiteral;

use super::types::{Finding, Location, Rule, Severity};

/// Accumulates literal occurrences file by file.
///
/// Counts live for one scan; the aggregator builds one census, feeds it
/// every file, and finalizes once.
#[derive(Debug, Default)]
pub struct LiteralCensus {
    occurrences: HashMap<String, Vec<Location>>,
}

impl LiteralCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file's literals, applying the length floor up front.
    pub fn record(&mut self, path: &str, literals: &[StringLiteral], min_len: usize) {
        for literal in literals {
            if literal.value.chars().count() < min_len {
                continue;
            }
            self.occurrences
                .entry(literal.value.clone())
                .or_default()
                .push(Location {
                    file: path.to_string(),
                    line: literal.line,
                });
        }
    }

    /// Emit one finding per literal repeated at least `min_count` times.
    pub fn finalize(self, min_count: usize) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (value, mut locations) in self.occurrences {
            if locations.len() < min_count {
                continue;
            }
            locations.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

            let primary = locations[0].clone();
            let message = format!(
                "string literal {:?} repeated {} times; extract a constant",
                preview(&value, 40),
                locations.len()
            );
            findings.push(
                Finding::new(
                    Rule::RepeatedLiteral,
                    Severity::Warn,
                    primary.file,
                    primary.line,
                    message,
                )
                .with_related(locations),
            );
        }

        findings.sort_by(|a, b| (&a.file, a.line, &a.message).cmp(&(&b.file, b.line, &b.message)));
        findings
    }
}

fn preview(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let head: String = value.chars().take(max).collect();
    format!("{}...", head)
}
