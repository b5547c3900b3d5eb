//! Detection of empty error handlers.
//!
//! An `except:` whose body is only `pass`/`...`, or a `catch` with an
//! empty brace body, swallows the error it caught.

use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::strip_line_comment;
use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

lazy_static! {
    static ref PY_EXCEPT: Regex = Regex::new(r"^\s*except\b[^:]*:\s*(pass\s*)?$").unwrap();
    static ref PY_SWALLOW: Regex = Regex::new(r"^\s*(pass|\.\.\.)\s*$").unwrap();
    static ref JS_CATCH: Regex = Regex::new(r"\bcatch\s*(\([^)]*\))?\s*\{").unwrap();
}

/// Scan one file for handlers that swallow errors.
pub fn detect_empty_handlers(file: &SourceFile) -> Vec<Finding> {
    if file.lang.spec().indent_blocks {
        detect_python_handlers(file)
    } else {
        detect_brace_handlers(file)
    }
}

fn detect_python_handlers(file: &SourceFile) -> Vec<Finding> {
    let lines: Vec<&str> = file.text.lines().collect();
    let mut findings = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let code = strip_line_comment(raw, file.lang);
        if !PY_EXCEPT.is_match(code) {
            continue;
        }

        // `except: pass` on one line
        if code.trim_end().ends_with("pass") {
            findings.push(empty_handler_finding(file, idx + 1));
            continue;
        }

        // Otherwise the indented body must be exactly one swallow statement.
        let handler_indent = indent_of(code);
        let body: Vec<&str> = lines[idx + 1..]
            .iter()
            .map(|l| strip_line_comment(l, file.lang))
            .take_while(|l| l.trim().is_empty() || indent_of(l) > handler_indent)
            .filter(|l| !l.trim().is_empty())
            .collect();
        if body.len() == 1 && PY_SWALLOW.is_match(body[0]) {
            findings.push(empty_handler_finding(file, idx + 1));
        }
    }
    findings
}

fn detect_brace_handlers(file: &SourceFile) -> Vec<Finding> {
    let mut findings = Vec::new();
    let lines: Vec<&str> = file.text.lines().collect();

    for (idx, raw) in lines.iter().enumerate() {
        let code = strip_line_comment(raw, file.lang);
        let Some(m) = JS_CATCH.find(code) else {
            continue;
        };

        // Empty on the same line: catch (e) {}
        let after_brace = &code[m.end()..];
        if after_brace.trim_start().starts_with('}') {
            findings.push(empty_handler_finding(file, idx + 1));
            continue;
        }
        if !after_brace.trim().is_empty() {
            continue;
        }

        // Multi-line: nothing but the closing brace before any statement.
        if let Some(next) = lines[idx + 1..]
            .iter()
            .map(|l| strip_line_comment(l, file.lang))
            .find(|l| !l.trim().is_empty())
        {
            if next.trim_start().starts_with('}') {
                findings.push(empty_handler_finding(file, idx + 1));
            }
        }
    }
    findings
}

fn indent_of(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn empty_handler_finding(file: &SourceFile, line: usize) -> Finding {
    Finding::new(
        Rule::EmptyHandler,
        Severity::Warn,
        file.path.clone(),
        line,
        "error handler swallows the error; handle or re-raise it",
    )
}
