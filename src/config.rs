//! Scan configuration: thresholds, exclusions, strictness.
//!
//! All thresholds have defaults tuned for pre-commit usage; a YAML file
//! can override them and CLI flags override the file. Validation runs
//! before any file is touched — a bad threshold is the only startup-fatal
//! condition.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default exclusion globs: test files and migration directories.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/test_*.py",
    "**/*_test.py",
    "**/*_test.go",
    "**/*.test.js",
    "**/*.test.ts",
    "**/*.spec.js",
    "**/*.spec.ts",
    "**/tests/**",
    "**/migrations/**",
];

/// Errors raised while building or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value} (must be at least {min})")]
    InvalidThreshold {
        name: &'static str,
        value: usize,
        min: usize,
    },
    #[error("invalid exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("reading config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// How literal values participate in block comparison keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Literals compare by exact content.
    #[default]
    Exact,
    /// Literals collapse to a placeholder, so blocks differing only in a
    /// constant still match.
    AbstractLiterals,
}

/// Tunable scan parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Minimum duplicate window size in normalized units.
    pub min_block_units: usize,
    /// Minimum decoded length for a literal to enter the census.
    pub min_literal_len: usize,
    /// Minimum occurrence count for a repeated-literal finding.
    pub min_literal_count: usize,
    /// Minimum statements in a function body for twin detection.
    pub min_fn_units: usize,
    /// Maximum block nesting depth.
    pub max_nesting: usize,
    /// Maximum function length in raw lines.
    pub max_fn_lines: usize,
    /// Literal handling for block comparison.
    pub strictness: Strictness,
    /// Glob patterns for files whose findings are dropped.
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_block_units: 6,
            min_literal_len: 40,
            min_literal_count: 5,
            min_fn_units: 3,
            max_nesting: 4,
            max_fn_lines: 50,
            strictness: Strictness::Exact,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Check thresholds and exclusion patterns. Must pass before scanning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let minimums: [(&'static str, usize, usize); 6] = [
            ("min_block_units", self.min_block_units, 2),
            ("min_literal_len", self.min_literal_len, 1),
            ("min_literal_count", self.min_literal_count, 2),
            ("min_fn_units", self.min_fn_units, 1),
            ("max_nesting", self.max_nesting, 1),
            ("max_fn_lines", self.max_fn_lines, 1),
        ];
        for (name, value, min) in minimums {
            if value < min {
                return Err(ConfigError::InvalidThreshold { name, value, min });
            }
        }
        for pattern in &self.exclude {
            globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Compile the exclusion globs into one matcher.
    ///
    /// Callers must have validated first; an invalid pattern here is a bug.
    pub fn exclusion_matcher(&self) -> Result<globset::GlobSet, ConfigError> {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob =
                globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: String::from("<combined>"),
                source,
            })
    }
}
