//! Identical-function detection.
//!
//! Two functions match when their normalized bodies are byte-identical
//! after positional identifier abstraction, so renamed copies of the same
//! logic are still caught. The function's own name never enters the key.
//! Bodies below the minimum statement count are skipped to keep trivial
//! getters out of the report.

use std::collections::HashMap;

use crate::lang::Lang;
use crate::normalize::{abstract_identifiers, FunctionDef};

use super::types::{Finding, Location, Rule, Severity};

/// One function's identity for cross-file grouping.
#[derive(Debug)]
struct FunctionOcc {
    name: String,
    file: String,
    line: usize,
}

/// Accumulates function bodies file by file, then groups identical ones.
#[derive(Debug, Default)]
pub struct FunctionTable {
    bodies: HashMap<String, Vec<FunctionOcc>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file's function definitions.
    pub fn record(&mut self, path: &str, lang: Lang, functions: &[FunctionDef], min_units: usize) {
        for function in functions {
            if function.body.len() < min_units {
                continue;
            }
            let key = abstract_identifiers(&function.body, lang).join("\n");
            self.bodies.entry(key).or_default().push(FunctionOcc {
                name: function.name.clone(),
                file: path.to_string(),
                line: function.line,
            });
        }
    }

    /// Emit one finding per group of identical bodies.
    ///
    /// The primary is the first definition in (file, line) order; the
    /// rest are listed as related locations.
    pub fn finalize(self) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (_, mut group) in self.bodies {
            if group.len() < 2 {
                continue;
            }
            group.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

            let primary = &group[0];
            let twins = &group[1..];
            let listed = twins
                .iter()
                .map(|occ| format!("'{}' ({}:{})", occ.name, occ.file, occ.line))
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!(
                "function '{}' has an identical body to {}",
                primary.name, listed
            );
            let related = twins
                .iter()
                .map(|occ| Location {
                    file: occ.file.clone(),
                    line: occ.line,
                })
                .collect();

            findings.push(
                Finding::new(
                    Rule::IdenticalFunction,
                    Severity::Warn,
                    primary.file.clone(),
                    primary.line,
                    message,
                )
                .with_related(related),
            );
        }

        findings.sort_by(|a, b| (&a.file, a.line, &a.message).cmp(&(&b.file, b.line, &b.message)));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::extract_functions;
    use crate::source::SourceFile;

    fn record(table: &mut FunctionTable, path: &str, text: &str) {
        let file = SourceFile::new(path, Lang::Python, text);
        let functions = extract_functions(&file);
        table.record(path, Lang::Python, &functions, 3);
    }

    #[test]
    fn test_renamed_copy_detected() {
        let text = "\
def load_user(user_id):
    record = fetch(user_id)
    cleaned = scrub(record)
    return cleaned

def load_account(acct):
    row = fetch(acct)
    tidy = scrub(row)
    return tidy
";
        let mut table = FunctionTable::new();
        record(&mut table, "a.py", text);
        let findings = table.finalize();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert!(findings[0].message.contains("load_user"));
        assert!(findings[0].message.contains("load_account"));
        assert_eq!(findings[0].related[0].line, 6);
    }

    #[test]
    fn test_extra_statement_breaks_match() {
        let text = "\
def load_user(user_id):
    record = fetch(user_id)
    cleaned = scrub(record)
    return cleaned

def load_account(acct):
    row = fetch(acct)
    tidy = scrub(row)
    audit(tidy)
    return tidy
";
        let mut table = FunctionTable::new();
        record(&mut table, "a.py", text);
        assert!(table.finalize().is_empty());
    }

    #[test]
    fn test_small_bodies_skipped() {
        let text = "\
def get_a(self):
    return self.a

def get_b(self):
    return self.b
";
        let mut table = FunctionTable::new();
        record(&mut table, "a.py", text);
        assert!(table.finalize().is_empty());
    }

    #[test]
    fn test_groups_span_files() {
        let body = "def sync(src):\n    items = pull(src)\n    merged = merge(items)\n    return merged\n";
        let renamed = "def mirror(origin):\n    rows = pull(origin)\n    joined = merge(rows)\n    return joined\n";
        let mut table = FunctionTable::new();
        record(&mut table, "b.py", renamed);
        record(&mut table, "a.py", body);
        let findings = table.finalize();

        assert_eq!(findings.len(), 1);
        // First definition in (file, line) order wins, regardless of
        // recording order.
        assert_eq!(findings[0].file, "a.py");
        assert_eq!(findings[0].related[0].file, "b.py");
    }
}
