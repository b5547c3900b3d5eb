//! Detection of magic numbers.
//!
//! Flags bare multi-digit integer literals in executable code. Constant
//! definitions (UPPER_CASE names, `const`/`static`/`final` declarations)
//! and a small allowed set of round values are exempt. Single-digit
//! literals are too common to be worth reporting.

use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::strip_line_comment;
use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

/// Values that read fine inline.
const ALLOWED_VALUES: &[u64] = &[0, 1, 2, 10, 100, 1000, 1024];

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"(?:^|[^\w.])(\d{2,})(?:[^\w.]|$)").unwrap();
    /// Constant definition shapes across the supported languages.
    static ref CONST_DEF: Regex =
        Regex::new(r"^\s*(?:[A-Z][A-Z0-9_]*\s*[:=]|const\b|static\b|final\b)").unwrap();
}

/// Scan one file for magic numbers.
pub fn detect_magic_numbers(file: &SourceFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        if code.trim().is_empty() || CONST_DEF.is_match(code) {
            continue;
        }
        let masked = mask_strings(code, file.lang);
        for caps in NUMBER.captures_iter(&masked) {
            let digits = &caps[1];
            let Ok(value) = digits.parse::<u64>() else {
                continue;
            };
            if ALLOWED_VALUES.contains(&value) {
                continue;
            }
            findings.push(Finding::new(
                Rule::MagicNumber,
                Severity::Warn,
                file.path.clone(),
                line_no,
                format!("magic number {}; name it as a constant", value),
            ));
        }
    }
    findings
}

/// Blank out string literal contents so digits inside them don't count.
fn mask_strings(code: &str, lang: crate::lang::Lang) -> String {
    let delims = lang.spec().string_delims;
    let mut out = String::with_capacity(code.len());
    let mut in_string = false;
    let mut string_char = '\0';
    let mut escaped = false;

    for ch in code.chars() {
        if escaped {
            escaped = false;
            out.push(' ');
            continue;
        }
        if in_string {
            if ch == '\\' {
                escaped = true;
                out.push(' ');
            } else if ch == string_char {
                in_string = false;
                out.push(ch);
            } else {
                out.push(' ');
            }
            continue;
        }
        if delims.contains(&ch) {
            in_string = true;
            string_char = ch;
        }
        out.push(ch);
    }
    out
}
