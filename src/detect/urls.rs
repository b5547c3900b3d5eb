//! Detection of hardcoded localhost URLs.
//!
//! Flags `http://localhost:<port>` and `http://127.0.0.1:<port>` style
//! URLs that should come from configuration. Comments and env-var
//! fallback expressions are allowed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::source::SourceFile;

use super::types::{Finding, Rule, Severity};

lazy_static! {
    static ref URL_PATTERNS: Vec<Regex> = [
        r"http://localhost:\d+",
        r"https://localhost:\d+",
        r"http://127\.0\.0\.1:\d+",
        r"https://127\.0\.0\.1:\d+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Contexts where a literal URL is acceptable.
    static ref ALLOWED_PATTERNS: Vec<Regex> = [
        r"#.*http",                                // comments
        r"//.*http",                               // JS/TS comments
        r"/\*.*http.*\*/",                         // block comments
        r#"import\.meta\.env\.\w+\s*\|\|\s*['"]http"#, // Vite env fallback
        r#"process\.env\.\w+\s*\|\|\s*['"]http"#,  // Node env fallback
        r"VITE_\w+.*http",                         // Vite config
        r"os\.getenv\(",                           // Python env usage
        r"os\.environ\.",
        r"\.env",                                  // .env references
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Scan one file for hardcoded URLs.
pub fn detect_hardcoded_urls(file: &SourceFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (line_no, line) in file.lines() {
        if ALLOWED_PATTERNS.iter().any(|p| p.is_match(line)) {
            continue;
        }
        for pattern in URL_PATTERNS.iter() {
            if let Some(m) = pattern.find(line) {
                findings.push(Finding::new(
                    Rule::HardcodedUrl,
                    Severity::Warn,
                    file.path.clone(),
                    line_no,
                    format!(
                        "hardcoded URL {:?}; read it from configuration instead",
                        m.as_str()
                    ),
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
    use crate::lang::Lang;

    #[test]
    fn test_localhost_flagged() {
        let file = SourceFile::new(
            "api.py",
            Lang::Python,
            "BASE_URL = 'http://localhost:8000/api'\n",
        );
        let findings = detect_hardcoded_urls(&file);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("http://localhost:8000"));
    }

    #[test]
    fn test_loopback_flagged() {
        let file = SourceFile::new(
            "api.js",
            Lang::JavaScript,
            "const url = \"https://127.0.0.1:3000\";\n",
        );
        assert_eq!(detect_hardcoded_urls(&file).len(), 1);
    }

    #[test]
    fn test_env_fallback_allowed() {
        let file = SourceFile::new(
            "api.js",
            Lang::JavaScript,
            "const url = process.env.API_URL || 'http://localhost:8000';\n",
        );
        assert!(detect_hardcoded_urls(&file).is_empty());
    }

    #[test]
    fn test_comment_allowed() {
        let file = SourceFile::new(
            "api.py",
            Lang::Python,
            "# run locally at http://localhost:8000\n",
        );
        assert!(detect_hardcoded_urls(&file).is_empty());
    }

    #[test]
    fn test_getenv_allowed() {
        let file = SourceFile::new(
            "api.py",
            Lang::Python,
            "url = os.getenv('API_URL', 'http://localhost:8000')\n",
        );
        assert!(detect_hardcoded_urls(&file).is_empty());
    }
}
