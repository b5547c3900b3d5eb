//! Detection of deeply nested code.
//!
//! Depth is counted per function and resets at each new definition.
//! Python depth comes from indentation; brace languages count `{`/`}`
//! outside strings and comments. One finding is emitted per contiguous
//! over-depth region, anchored where the limit is first exceeded.

use crate::normalize::{count_braces, strip_line_comment};
use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

/// Scan one file for nesting deeper than `max_depth`.
pub fn detect_deep_nesting(file: &SourceFile, max_depth: usize) -> Vec<Finding> {
    if file.lang.spec().indent_blocks {
        detect_indent_nesting(file, max_depth)
    } else {
        detect_brace_nesting(file, max_depth)
    }
}

fn detect_indent_nesting(file: &SourceFile, max_depth: usize) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut base_indent: Option<usize> = None;
    let mut over = false;

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = indent_width(code);

        if trimmed.starts_with("def ") || trimmed.starts_with("async def ") {
            base_indent = Some(indent);
            over = false;
            continue;
        }
        let Some(base) = base_indent else {
            continue;
        };
        if indent <= base {
            // Left the function.
            base_indent = None;
            over = false;
            continue;
        }

        // One block level per 4 columns past the function body's level.
        let depth = (indent - base).div_ceil(4);
        if depth > max_depth {
            if !over {
                findings.push(nesting_finding(file, line_no, depth, max_depth));
            }
            over = true;
        } else {
            over = false;
        }
    }
    findings
}

fn detect_brace_nesting(file: &SourceFile, max_depth: usize) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut depth: usize = 0;
    let mut over = false;

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        let (opens, closes) = count_braces(code, file.lang);
        depth = depth.saturating_sub(closes);
        depth += opens;

        // The function's own braces are level zero.
        if depth > max_depth + 1 {
            if !over {
                findings.push(nesting_finding(file, line_no, depth - 1, max_depth));
            }
            over = true;
        } else {
            over = false;
        }
    }
    findings
}

fn nesting_finding(file: &SourceFile, line: usize, depth: usize, max_depth: usize) -> Finding {
    Finding::new(
        Rule::DeepNesting,
        Severity::Warn,
        file.path.clone(),
        line,
        format!(
            "nesting depth {} exceeds maximum of {}; extract a helper",
            depth, max_depth
        ),
    )
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;

    #[test]
    fn test_detects_deep_python_nesting() {
        let text = "\
def process():
    if condition1:
        if condition2:
            if condition3:
                if condition4:
                    if condition5:
                        print(\"too deep\")
";
        let file = SourceFile::new("a.py", Lang::Python, text);
        let findings = detect_deep_nesting(&file, 4);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 6);
    }

    #[test]
    fn test_allows_acceptable_python_nesting() {
        let text = "\
def process():
    if condition1:
        if condition2:
            if condition3:
                print(\"this is ok\")
";
        let file = SourceFile::new("a.py", Lang::Python, text);
        assert!(detect_deep_nesting(&file, 4).is_empty());
    }

    #[test]
    fn test_depth_resets_per_function() {
        let text = "\
def func1():
    if a:
        if b:
            pass

def func2():
    if c:
        if d:
            pass
";
        let file = SourceFile::new("a.py", Lang::Python, text);
        assert!(detect_deep_nesting(&file, 4).is_empty());
    }

    #[test]
    fn test_detects_deep_js_nesting() {
        let text = "\
function process() {
    if (a) {
        if (b) {
            if (c) {
                if (d) {
                    if (e) {
                        work();
                    }
                }
            }
        }
    }
}
";
        let file = SourceFile::new("a.js", Lang::JavaScript, text);
        let findings = detect_deep_nesting(&file, 4);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_braces_in_strings_not_counted() {
        let text = "\
function test() {
    const str = \"{ this { has } braces }\";
    if (condition) {
        log(str);
    }
}
";
        let file = SourceFile::new("a.js", Lang::JavaScript, text);
        assert!(detect_deep_nesting(&file, 4).is_empty());
    }

    #[test]
    fn test_braces_in_comments_not_counted() {
        let text = "\
function test() {
    // if (x) { if (y) { if (z) { } } }
    if (condition) {
        log(\"ok\");
    }
}
";
        let file = SourceFile::new("a.js", Lang::JavaScript, text);
        assert!(detect_deep_nesting(&file, 4).is_empty());
    }
}
