//! Per-language scanning capabilities.
//!
//! Detectors never branch on language directly; they consult the
//! capability table looked up from the file extension. Adding a language
//! means adding a `LangSpec` here and registering its extensions in
//! `EXTENSIONS`.

use phf::phf_map;
use std::path::Path;

/// Languages the scanners understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Python,
    JavaScript,
    TypeScript,
    Rust,
    Go,
}

/// Static scanning capabilities for one language.
#[derive(Debug)]
pub struct LangSpec {
    /// Line-comment prefixes, most specific first.
    pub comment_prefixes: &'static [&'static str],
    /// String delimiter characters.
    pub string_delims: &'static [char],
    /// Keywords that open a function definition.
    pub fn_keywords: &'static [&'static str],
    /// True for indentation-blocked languages (Python), false for braces.
    pub indent_blocks: bool,
    /// Reserved words excluded from identifier abstraction.
    pub keywords: &'static [&'static str],
}

static PYTHON_SPEC: LangSpec = LangSpec {
    comment_prefixes: &["#"],
    string_delims: &['"', '\''],
    fn_keywords: &["def"],
    indent_blocks: true,
    keywords: &[
        "def", "return", "if", "elif", "else", "for", "while", "in", "not",
        "and", "or", "is", "None", "True", "False", "pass", "break",
        "continue", "import", "from", "as", "class", "try", "except",
        "finally", "raise", "with", "lambda", "yield", "async", "await",
        "global", "nonlocal", "del", "assert", "self",
    ],
};

static JAVASCRIPT_SPEC: LangSpec = LangSpec {
    comment_prefixes: &["//"],
    string_delims: &['"', '\'', '`'],
    fn_keywords: &["function"],
    indent_blocks: false,
    keywords: &[
        "function", "return", "if", "else", "for", "while", "do", "switch",
        "case", "default", "break", "continue", "const", "let", "var",
        "new", "delete", "typeof", "instanceof", "in", "of", "this",
        "null", "undefined", "true", "false", "try", "catch", "finally",
        "throw", "class", "extends", "super", "import", "export", "from",
        "async", "await", "yield", "static", "get", "set",
    ],
};

static TYPESCRIPT_SPEC: LangSpec = LangSpec {
    comment_prefixes: &["//"],
    string_delims: &['"', '\'', '`'],
    fn_keywords: &["function"],
    indent_blocks: false,
    keywords: &[
        "function", "return", "if", "else", "for", "while", "do", "switch",
        "case", "default", "break", "continue", "const", "let", "var",
        "new", "delete", "typeof", "instanceof", "in", "of", "this",
        "null", "undefined", "true", "false", "try", "catch", "finally",
        "throw", "class", "extends", "super", "import", "export", "from",
        "async", "await", "yield", "static", "get", "set", "interface",
        "type", "enum", "namespace", "implements", "readonly", "public",
        "private", "protected", "declare", "as",
    ],
};

static RUST_SPEC: LangSpec = LangSpec {
    comment_prefixes: &["//"],
    string_delims: &['"'],
    fn_keywords: &["fn"],
    indent_blocks: false,
    keywords: &[
        "fn", "let", "mut", "const", "static", "if", "else", "match",
        "for", "while", "loop", "break", "continue", "return", "struct",
        "enum", "impl", "trait", "mod", "pub", "use", "crate", "super",
        "self", "Self", "where", "move", "ref", "as", "in", "true",
        "false", "async", "await", "dyn", "type", "unsafe",
    ],
};

static GO_SPEC: LangSpec = LangSpec {
    comment_prefixes: &["//"],
    string_delims: &['"', '`'],
    fn_keywords: &["func"],
    indent_blocks: false,
    keywords: &[
        "func", "return", "if", "else", "for", "range", "switch", "case",
        "default", "break", "continue", "var", "const", "type", "struct",
        "interface", "map", "chan", "go", "defer", "select", "package",
        "import", "nil", "true", "false", "make", "new", "len", "cap",
        "append", "fallthrough", "goto",
    ],
};

/// File extension → language.
static EXTENSIONS: phf::Map<&'static str, Lang> = phf_map! {
    "py" => Lang::Python,
    "js" => Lang::JavaScript,
    "jsx" => Lang::JavaScript,
    "mjs" => Lang::JavaScript,
    "cjs" => Lang::JavaScript,
    "ts" => Lang::TypeScript,
    "tsx" => Lang::TypeScript,
    "rs" => Lang::Rust,
    "go" => Lang::Go,
};

impl Lang {
    /// Infer the language from a file path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        EXTENSIONS.get(ext).copied()
    }

    /// The capability table for this language.
    pub fn spec(&self) -> &'static LangSpec {
        match self {
            Lang::Python => &PYTHON_SPEC,
            Lang::JavaScript => &JAVASCRIPT_SPEC,
            Lang::TypeScript => &TYPESCRIPT_SPEC,
            Lang::Rust => &RUST_SPEC,
            Lang::Go => &GO_SPEC,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Python => "python",
            Lang::JavaScript => "javascript",
            Lang::TypeScript => "typescript",
            Lang::Rust => "rust",
            Lang::Go => "go",
        }
    }

    /// Whether this keyword is reserved in the language.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.spec().keywords.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(Lang::from_path(&PathBuf::from("a/b.py")), Some(Lang::Python));
        assert_eq!(Lang::from_path(&PathBuf::from("x.tsx")), Some(Lang::TypeScript));
        assert_eq!(Lang::from_path(&PathBuf::from("x.go")), Some(Lang::Go));
        assert_eq!(Lang::from_path(&PathBuf::from("x.txt")), None);
        assert_eq!(Lang::from_path(&PathBuf::from("Makefile")), None);
    }

    #[test]
    fn test_comment_prefix() {
        assert_eq!(Lang::Python.spec().comment_prefixes, &["#"]);
        assert_eq!(Lang::Rust.spec().comment_prefixes, &["//"]);
    }

    #[test]
    fn test_keywords() {
        assert!(Lang::Python.is_keyword("def"));
        assert!(!Lang::Python.is_keyword("process"));
        assert!(Lang::Go.is_keyword("func"));
    }
}
