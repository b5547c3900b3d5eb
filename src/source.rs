//! Source file loading.
//!
//! Files are read once per invocation. Unreadable files become scan
//! warnings rather than hard failures; files in unsupported languages are
//! skipped silently.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::lang::Lang;

/// One loaded source file, immutable for the rest of the scan.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as given by the caller.
    pub path: String,
    pub lang: Lang,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, lang: Lang, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lang,
            text: text.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.lines().enumerate().map(|(i, l)| (i + 1, l))
    }
}

/// A non-fatal problem encountered while loading files.
#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Load the caller-supplied file set.
///
/// Returns loaded files in the input order plus warnings for files that
/// could not be read. Unsupported extensions are dropped without warning
/// so mixed pre-commit batches (lockfiles, configs) stay quiet.
pub fn load_files(paths: &[PathBuf]) -> (Vec<SourceFile>, Vec<ScanWarning>) {
    let loaded: Vec<Result<Option<SourceFile>, ScanWarning>> = paths
        .par_iter()
        .map(|path| load_one(path))
        .collect();

    let mut files = Vec::new();
    let mut warnings = Vec::new();
    for item in loaded {
        match item {
            Ok(Some(file)) => files.push(file),
            Ok(None) => {}
            Err(warning) => warnings.push(warning),
        }
    }
    (files, warnings)
}

fn load_one(path: &Path) -> Result<Option<SourceFile>, ScanWarning> {
    let Some(lang) = Lang::from_path(path) else {
        return Ok(None);
    };

    let path_str = path.to_string_lossy().to_string();
    let bytes = std::fs::read(path).map_err(|e| ScanWarning {
        path: path_str.clone(),
        message: format!("skipped: {}", e),
    })?;

    // Binary content means a misnamed file; skip it like an unreadable one.
    if bytes.contains(&0) {
        return Err(ScanWarning {
            path: path_str,
            message: "skipped: binary content".to_string(),
        });
    }

    let text = match String::from_utf8(bytes) {
        Ok(t) => t,
        Err(e) => {
            return Err(ScanWarning {
                path: path_str,
                message: format!("skipped: invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
            })
        }
    };

    Ok(Some(SourceFile::new(path_str, lang, text)))
}
