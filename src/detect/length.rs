//! Detection of overlong functions.
//!
//! Length is counted in raw source lines, decorators included, from the
//! definition header to the last line of the body.

use crate::normalize::FunctionDef;
use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

/// Flag functions longer than `max_lines`.
pub fn detect_long_functions(
    file: &SourceFile,
    functions: &[FunctionDef],
    max_lines: usize,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for function in functions {
        if function.raw_lines > max_lines {
            findings.push(Finding::new(
                Rule::LongFunction,
                Severity::Warn,
                file.path.clone(),
                function.line,
                format!(
                    "function '{}' is {} lines long (max {}); split it up",
                    function.name, function.raw_lines, max_lines
                ),
            ));
        }
    }
    findings
}
