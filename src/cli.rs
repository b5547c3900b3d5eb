//! Command-line interface for vibelint.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, Strictness};
use crate::detect::Runner;
use crate::lang::Lang;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static pattern-detectors for AI-generated technical debt.
///
/// Vibelint scans source files for patterns that correlate with
/// AI-generated shortcuts: duplicated code blocks, repeated string
/// literals, copy-pasted functions, committed secrets, hardcoded URLs,
/// leftover debug statements, swallowed errors, magic numbers, deep
/// nesting, and overlong functions.
#[derive(Parser)]
#[command(name = "vibelint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to scan (typically the changed-file set from pre-commit)
    pub files: Vec<PathBuf>,

    /// Print every finding instead of just the summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Walk the current directory for supported files
    #[arg(long)]
    pub all_files: bool,

    /// Path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Minimum duplicate window size in statements
    #[arg(long)]
    pub min_block_units: Option<usize>,

    /// Minimum literal length for the repeated-literal census
    #[arg(long)]
    pub min_literal_len: Option<usize>,

    /// Minimum occurrence count for a repeated-literal finding
    #[arg(long)]
    pub min_literal_count: Option<usize>,

    /// Minimum statements for identical-function comparison
    #[arg(long)]
    pub min_fn_units: Option<usize>,

    /// Maximum nesting depth
    #[arg(long)]
    pub max_nesting: Option<usize>,

    /// Maximum function length in lines
    #[arg(long)]
    pub max_fn_lines: Option<usize>,

    /// Abstract literal values when comparing blocks
    #[arg(long)]
    pub abstract_literals: bool,

    /// Exclusion glob (repeatable; replaces the defaults)
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then the config
    /// file, then flags.
    fn resolve_config(&self) -> Result<Config, crate::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::parse_file(path)?,
            None => Config::default(),
        };

        if let Some(v) = self.min_block_units {
            config.min_block_units = v;
        }
        if let Some(v) = self.min_literal_len {
            config.min_literal_len = v;
        }
        if let Some(v) = self.min_literal_count {
            config.min_literal_count = v;
        }
        if let Some(v) = self.min_fn_units {
            config.min_fn_units = v;
        }
        if let Some(v) = self.max_nesting {
            config.max_nesting = v;
        }
        if let Some(v) = self.max_fn_lines {
            config.max_fn_lines = v;
        }
        if self.abstract_literals {
            config.strictness = Strictness::AbstractLiterals;
        }
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Collect supported files under a directory.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && name.starts_with('.') && name.len() > 1 {
                return false;
            }
            if e.file_type().is_dir()
                && (name == "vendor" || name == "node_modules" || name == "target")
            {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Run the scan; returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.format != "text" && cli.format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'text' or 'json'", cli.format);
        return Ok(EXIT_ERROR);
    }

    // Configuration problems are the only startup-fatal condition.
    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if cli.all_files {
        collect_files(Path::new("."))?
    } else {
        cli.files.clone()
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let runner = Runner::new(config);
    let result = runner.run(&files)?;

    match cli.format.as_str() {
        "json" => report::write_json(&result)?,
        _ => report::write_text(&result, cli.verbose),
    }

    if result.has_blocking() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config() {
        let cli = Cli::parse_from(["vibelint", "--min-block-units", "4", "a.py"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.min_block_units, 4);
        // Untouched values keep defaults
        assert_eq!(config.min_literal_len, 40);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let cli = Cli::parse_from(["vibelint", "--min-block-units", "1", "a.py"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_abstract_literals_flag() {
        let cli = Cli::parse_from(["vibelint", "--abstract-literals", "a.py"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.strictness, Strictness::AbstractLiterals);
    }

    #[test]
    fn test_collect_files_filters_extensions() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(temp.path().join("b.txt"), "notes\n").unwrap();
        std::fs::create_dir(temp.path().join("node_modules")).unwrap();
        std::fs::write(temp.path().join("node_modules").join("c.js"), "x\n").unwrap();

        let files = collect_files(temp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.py"));
    }
}
