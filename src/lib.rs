//! Vibelint - static detectors for AI-generated technical debt.
//!
//! Vibelint scans source files for patterns that correlate with
//! AI-generated shortcuts. The core is a duplicate-code detector built on
//! a shared normalized representation; the rest of the toolkit is a set
//! of single-pass scanners sharing the same file handling and inline
//! suppression conventions.
//!
//! # Architecture
//!
//! - `lang`: per-language capability table (comments, strings, functions)
//! - `source`: file loading with non-fatal error handling
//! - `normalize`: statements reduced to formatting-independent keys
//! - `detect`: one submodule per rule plus the orchestrating runner
//! - `report`: text and JSON output
//! - `config`: thresholds, strictness, and exclusion patterns
//!
//! Each invocation is self-contained: findings, census counts, and
//! function tables are scoped to one scan and discarded on exit.

pub mod cli;
pub mod config;
pub mod detect;
pub mod lang;
pub mod normalize;
pub mod report;
pub mod source;

pub use config::{Config, ConfigError, Strictness};
pub use detect::{Finding, Location, Rule, Runner, ScanResult, Severity};
pub use lang::Lang;
pub use source::{ScanWarning, SourceFile};
