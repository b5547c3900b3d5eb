//! Structural normalization of source text.
//!
//! Turns raw lines into comparison keys that are stable under incidental
//! formatting: comments stripped, whitespace collapsed, and (at the
//! stricter setting) literals abstracted to placeholders. Distinct
//! statements must keep distinct keys; normalization never merges two
//! different pieces of code.
//!
//! There is no language grammar here. When a file doesn't yield any
//! recognizable statement structure the units are simply its non-blank,
//! non-comment lines, which is the degraded mode the detectors accept.

use crate::config::Strictness;
use crate::lang::Lang;
use crate::source::SourceFile;

/// One statement/logical line reduced to a comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUnit {
    pub key: String,
    /// 1-indexed source line the unit starts on.
    pub line: usize,
}

/// A decoded string literal occurrence.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub line: usize,
}

/// A function definition with its normalized body.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    /// Line of the definition header.
    pub line: usize,
    /// Raw length in source lines, header included.
    pub raw_lines: usize,
    pub body: Vec<NormalizedUnit>,
}

/// Normalize a whole file into ordered units.
pub fn normalize_file(file: &SourceFile, strictness: Strictness) -> Vec<NormalizedUnit> {
    let spec = file.lang.spec();
    let mut units = Vec::new();
    for (line_no, raw) in file.lines() {
        let stripped = strip_line_comment(raw, file.lang);
        let mut key = collapse_whitespace(stripped);
        if key.is_empty() {
            continue;
        }
        if strictness == Strictness::AbstractLiterals {
            key = abstract_literals(&key, spec.string_delims);
        }
        units.push(NormalizedUnit { key, line: line_no });
    }
    units
}

/// Cut a trailing line comment, respecting string literals.
pub fn strip_line_comment(line: &str, lang: Lang) -> &str {
    let spec = lang.spec();
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut string_char = '\0';
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i] as char;
        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        if in_string {
            if ch == '\\' {
                escaped = true;
            } else if ch == string_char {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if spec.string_delims.contains(&ch) {
            in_string = true;
            string_char = ch;
            i += 1;
            continue;
        }
        if line.is_char_boundary(i) {
            for prefix in spec.comment_prefixes {
                if line[i..].starts_with(prefix) {
                    return &line[..i];
                }
            }
        }
        i += 1;
    }
    line
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace string and numeric literals with placeholder tokens.
fn abstract_literals(key: &str, string_delims: &[char]) -> String {
    let mut out = String::with_capacity(key.len());
    let chars: Vec<char> = key.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if string_delims.contains(&ch) {
            let quote = ch;
            i += 1;
            while i < chars.len() {
                if chars[i] == '\\' {
                    i += 2;
                    continue;
                }
                if chars[i] == quote {
                    i += 1;
                    break;
                }
                i += 1;
            }
            out.push_str("<str>");
            continue;
        }
        if ch.is_ascii_digit() && !prev_is_ident(&out) {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.' || chars[i] == '_') {
                i += 1;
            }
            out.push_str("<num>");
            continue;
        }
        out.push(ch);
        i += 1;
    }
    out
}

fn prev_is_ident(out: &str) -> bool {
    out.chars()
        .last()
        .map(|c| c.is_ascii_alphanumeric() || c == '_')
        .unwrap_or(false)
}

/// Extract decoded string literals with their line numbers.
///
/// Comments are stripped first so commented-out strings never enter the
/// census. Quote style is normalized away by decoding; `"a"` and `'a'`
/// count as the same value.
pub fn extract_string_literals(file: &SourceFile) -> Vec<StringLiteral> {
    let spec = file.lang.spec();
    let mut literals = Vec::new();

    for (line_no, raw) in file.lines() {
        let code = strip_line_comment(raw, file.lang);
        let chars: Vec<char> = code.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if !spec.string_delims.contains(&ch) {
                i += 1;
                continue;
            }
            let quote = ch;
            i += 1;
            let mut value = String::new();
            let mut closed = false;
            while i < chars.len() {
                let c = chars[i];
                if c == '\\' && i + 1 < chars.len() {
                    value.push(decode_escape(chars[i + 1]));
                    i += 2;
                    continue;
                }
                if c == quote {
                    closed = true;
                    i += 1;
                    break;
                }
                value.push(c);
                i += 1;
            }
            if closed {
                literals.push(StringLiteral {
                    value,
                    line: line_no,
                });
            }
        }
    }
    literals
}

fn decode_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

/// Extract function definitions and their normalized bodies.
pub fn extract_functions(file: &SourceFile) -> Vec<FunctionDef> {
    if file.lang.spec().indent_blocks {
        extract_indent_functions(file)
    } else {
        extract_brace_functions(file)
    }
}

fn extract_indent_functions(file: &SourceFile) -> Vec<FunctionDef> {
    let lines: Vec<&str> = file.text.lines().collect();
    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let raw = lines[i];
        let header_indent = indent_width(raw);
        let Some(name) = python_def_name(raw.trim_start()) else {
            i += 1;
            continue;
        };

        let header_line = i + 1;
        let mut body = Vec::new();
        let mut last_code_line = i;
        let mut j = i + 1;
        while j < lines.len() {
            let candidate = lines[j];
            if candidate.trim().is_empty() {
                j += 1;
                continue;
            }
            if indent_width(candidate) <= header_indent {
                break;
            }
            let stripped = strip_line_comment(candidate, file.lang);
            let key = collapse_whitespace(stripped);
            if !key.is_empty() {
                body.push(NormalizedUnit { key, line: j + 1 });
            }
            last_code_line = j;
            j += 1;
        }

        functions.push(FunctionDef {
            name,
            line: header_line,
            raw_lines: last_code_line + 1 - i + count_decorators(&lines, i),
            body,
        });
        // Nested defs are picked up by continuing from the next line.
        i += 1;
    }
    functions
}

/// Decorator lines directly above a Python def count toward its length.
fn count_decorators(lines: &[&str], def_idx: usize) -> usize {
    let mut count = 0;
    let mut i = def_idx;
    while i > 0 {
        i -= 1;
        if lines[i].trim_start().starts_with('@') {
            count += 1;
        } else {
            break;
        }
    }
    count
}

fn python_def_name(trimmed: &str) -> Option<String> {
    let rest = trimmed
        .strip_prefix("async def ")
        .or_else(|| trimmed.strip_prefix("def "))?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn extract_brace_functions(file: &SourceFile) -> Vec<FunctionDef> {
    let lines: Vec<&str> = file.text.lines().collect();
    let mut functions = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let code = strip_line_comment(raw, file.lang);
        let Some(name) = brace_fn_name(&collapse_whitespace(code), file.lang) else {
            continue;
        };

        // Track brace depth from the header until the body closes.
        let mut depth = 0i32;
        let mut opened = false;
        let mut body = Vec::new();
        let mut end_idx = idx;
        for (j, line) in lines.iter().enumerate().skip(idx) {
            let line_code = strip_line_comment(line, file.lang);
            let (opens, closes) = count_braces(line_code, file.lang);
            if j > idx && opened && depth > 0 {
                let key = collapse_whitespace(line_code);
                // The closing-brace line is structure, not a statement.
                if !key.is_empty() && !(key == "}" && depth - (closes as i32) <= 0) {
                    body.push(NormalizedUnit { key, line: j + 1 });
                }
            }
            if opens > 0 {
                opened = true;
            }
            depth += opens as i32 - closes as i32;
            end_idx = j;
            if opened && depth <= 0 {
                break;
            }
        }

        functions.push(FunctionDef {
            name,
            line: idx + 1,
            raw_lines: end_idx - idx + 1,
            body,
        });
    }
    functions
}

fn brace_fn_name(key: &str, lang: Lang) -> Option<String> {
    let spec = lang.spec();

    // `const handler = (req) => {` — arrow functions take their name
    // from the declaration.
    if key.contains("=>") {
        let decl = key
            .strip_prefix("export const ")
            .or_else(|| key.strip_prefix("const "))
            .or_else(|| key.strip_prefix("let "))
            .or_else(|| key.strip_prefix("var "));
        if let Some(rest) = decl {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    for keyword in spec.fn_keywords {
        for (pos, _) in key.match_indices(keyword) {
            // Keyword must stand alone as a word.
            let before_ok = pos == 0
                || key[..pos]
                    .chars()
                    .last()
                    .map(|c| !c.is_ascii_alphanumeric() && c != '_')
                    .unwrap_or(true);
            let after = &key[pos + keyword.len()..];
            if !before_ok || !after.starts_with(' ') && !after.starts_with('(') {
                continue;
            }
            let rest = after.trim_start();
            // `func (r *Recv) Name(` — skip a Go receiver group.
            let rest = if rest.starts_with('(') {
                match rest.find(')') {
                    Some(close) => rest[close + 1..].trim_start(),
                    None => rest,
                }
            } else {
                rest
            };
            let name: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

/// Count braces outside string literals on a comment-stripped line.
pub fn count_braces(code: &str, lang: Lang) -> (usize, usize) {
    let spec = lang.spec();
    let mut opens = 0;
    let mut closes = 0;
    let mut in_string = false;
    let mut string_char = '\0';
    let mut escaped = false;

    for ch in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            if ch == '\\' {
                escaped = true;
            } else if ch == string_char {
                in_string = false;
            }
            continue;
        }
        match ch {
            c if spec.string_delims.contains(&c) => {
                in_string = true;
                string_char = c;
            }
            '{' => opens += 1,
            '}' => closes += 1,
            _ => {}
        }
    }
    (opens, closes)
}

/// Rewrite a function body so identifiers compare positionally.
///
/// The Nth distinct non-keyword identifier becomes `ID{n}` in first-use
/// order, so two copies of the same logic with renamed parameters and
/// locals produce byte-identical keys.
pub fn abstract_identifiers(body: &[NormalizedUnit], lang: Lang) -> Vec<String> {
    let mut mapping: Vec<String> = Vec::new();
    let mut keys = Vec::with_capacity(body.len());

    for unit in body {
        let mut out = String::with_capacity(unit.key.len());
        let chars: Vec<char> = unit.key.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if ch.is_ascii_alphabetic() || ch == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if lang.is_keyword(&word) {
                    out.push_str(&word);
                } else {
                    let n = match mapping.iter().position(|w| *w == word) {
                        Some(pos) => pos,
                        None => {
                            mapping.push(word);
                            mapping.len() - 1
                        }
                    };
                    out.push_str(&format!("ID{}", n));
                }
                continue;
            }
            out.push(ch);
            i += 1;
        }
        keys.push(out);
    }
    keys
}
