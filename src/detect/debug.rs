//! Detection of leftover debug statements.

use lazy_static::lazy_static;
use regex::Regex;

use crate::lang::Lang;
use crate::normalize::strip_line_comment;
use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

struct DebugPattern {
    regex: Regex,
    label: &'static str,
}

lazy_static! {
    static ref PYTHON_PATTERNS: Vec<DebugPattern> = build(&[
        (r"\bpdb\.set_trace\(", "pdb.set_trace()"),
        (r"\bbreakpoint\(\)", "breakpoint()"),
        (r"^\s*print\(", "print()"),
        (r"\bic\(", "icecream ic()"),
    ]);
    static ref JS_PATTERNS: Vec<DebugPattern> = build(&[
        (r"\bconsole\.(log|debug|info|trace)\(", "console logging"),
        (r"^\s*debugger\b", "debugger statement"),
        (r"\balert\(", "alert()"),
    ]);
    static ref RUST_PATTERNS: Vec<DebugPattern> = build(&[
        (r"\bdbg!\(", "dbg!()"),
        (r#"\bprintln!\("DEBUG"#, "debug println!"),
    ]);
    static ref GO_PATTERNS: Vec<DebugPattern> = build(&[
        (r"\bfmt\.Println\(", "fmt.Println()"),
        (r"\bspew\.Dump\(", "spew.Dump()"),
    ]);
}

fn build(table: &[(&'static str, &'static str)]) -> Vec<DebugPattern> {
    table
        .iter()
        .copied()
        .map(|(pattern, label)| DebugPattern {
            regex: Regex::new(pattern).unwrap(),
            label,
        })
        .collect()
}

fn patterns_for(lang: Lang) -> &'static [DebugPattern] {
    match lang {
        Lang::Python => &PYTHON_PATTERNS,
        Lang::JavaScript | Lang::TypeScript => &JS_PATTERNS,
        Lang::Rust => &RUST_PATTERNS,
        Lang::Go => &GO_PATTERNS,
    }
}

/// Scan one file for debug statements left behind.
pub fn detect_debug_statements(file: &SourceFile) -> Vec<Finding> {
    let patterns = patterns_for(file.lang);
    let mut findings = Vec::new();

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        if code.trim().is_empty() {
            continue;
        }
        for pattern in patterns {
            if pattern.regex.is_match(code) {
                findings.push(Finding::new(
                    Rule::DebugStatement,
                    Severity::Warn,
                    file.path.clone(),
                    line_no,
                    format!("{} left in code", pattern.label),
                ));
                break;
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_print_flagged() {
        let file = SourceFile::new("a.py", Lang::Python, "print(response.json())\n");
        let findings = detect_debug_statements(&file);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("print()"));
    }

    #[test]
    fn test_console_log_flagged() {
        let file = SourceFile::new("a.ts", Lang::TypeScript, "console.log(payload);\n");
        assert_eq!(detect_debug_statements(&file).len(), 1);
    }

    #[test]
    fn test_debugger_flagged() {
        let file = SourceFile::new("a.js", Lang::JavaScript, "    debugger;\n");
        assert_eq!(detect_debug_statements(&file).len(), 1);
    }

    #[test]
    fn test_commented_out_debug_allowed() {
        let file = SourceFile::new("a.py", Lang::Python, "# print(response)\n");
        assert!(detect_debug_statements(&file).is_empty());
    }

    #[test]
    fn test_console_error_allowed() {
        // Intentional error reporting stays.
        let file = SourceFile::new("a.js", Lang::JavaScript, "console.error(err);\n");
        assert!(detect_debug_statements(&file).is_empty());
    }

    #[test]
    fn test_member_print_allowed() {
        let file = SourceFile::new("a.py", Lang::Python, "report.print(summary)\n");
        assert!(detect_debug_statements(&file).is_empty());
    }
}
