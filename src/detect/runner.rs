//! Detection runner that orchestrates all checks.
//!
//! Files are loaded and normalized once; the per-file detectors run in a
//! parallel map and the cross-file detectors (duplicate blocks, literal
//! census, function table) are assembled in a reduce step over explicit
//! accumulators. Detectors only read the shared representation, so the
//! sharding is safe.

use rayon::prelude::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::normalize::{self, FunctionDef, StringLiteral};
use crate::source::{self, SourceFile};

use super::blocks::{find_duplicate_blocks, FileUnits};
use super::debug::detect_debug_statements;
use super::functions::FunctionTable;
use super::handlers::detect_empty_handlers;
use super::length::detect_long_functions;
use super::literals::LiteralCensus;
use super::magic::detect_magic_numbers;
use super::nesting::detect_deep_nesting;
use super::secrets::detect_secrets;
use super::suppress::{collect_suppressions, filter_suppressed};
use super::types::{Finding, ScanResult};
use super::urls::detect_hardcoded_urls;

/// Per-file output of the parallel map.
struct FilePass {
    units: FileUnits,
    literals: Vec<StringLiteral>,
    functions: Vec<FunctionDef>,
    findings: Vec<Finding>,
}

/// Executes every detector against a set of files.
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full scan over the caller-supplied paths.
    pub fn run(&self, paths: &[PathBuf]) -> anyhow::Result<ScanResult> {
        let exclusion = self.config.exclusion_matcher()?;

        let (files, load_warnings) = source::load_files(paths);
        let mut result = ScanResult::new();
        result.scanned = files.len();
        result.warnings = load_warnings.iter().map(|w| w.to_string()).collect();

        let passes: Vec<FilePass> = files
            .par_iter()
            .map(|file| self.scan_file(file))
            .collect();

        // Reduce: cross-file accumulators see the whole file set before
        // finalizing.
        let mut census = LiteralCensus::new();
        let mut table = FunctionTable::new();
        let mut all_units = Vec::with_capacity(passes.len());
        for (pass, file) in passes.into_iter().zip(&files) {
            census.record(&file.path, &pass.literals, self.config.min_literal_len);
            table.record(
                &file.path,
                file.lang,
                &pass.functions,
                self.config.min_fn_units,
            );
            all_units.push(pass.units);
            result.findings.extend(pass.findings);
        }

        result
            .findings
            .extend(find_duplicate_blocks(&all_units, self.config.min_block_units));
        result
            .findings
            .extend(census.finalize(self.config.min_literal_count));
        result.findings.extend(table.finalize());

        // Filter order: suppression markers first, then exclusion globs.
        let suppressions = collect_suppressions(&files);
        let (active, suppressed) = filter_suppressed(result.findings, &suppressions);
        result.findings = active;
        result.suppressed = suppressed;

        let before = result.findings.len();
        result
            .findings
            .retain(|f| !exclusion.is_match(f.file.as_str()));
        result.excluded = before - result.findings.len();

        result.sort();
        Ok(result)
    }

    /// All single-file work for one file.
    fn scan_file(&self, file: &SourceFile) -> FilePass {
        let units = normalize::normalize_file(file, self.config.strictness);
        let literals = normalize::extract_string_literals(file);
        let functions = normalize::extract_functions(file);

        let mut findings = Vec::new();
        findings.extend(detect_secrets(file));
        findings.extend(detect_hardcoded_urls(file));
        findings.extend(detect_debug_statements(file));
        findings.extend(detect_empty_handlers(file));
        findings.extend(detect_magic_numbers(file));
        findings.extend(detect_deep_nesting(file, self.config.max_nesting));
        findings.extend(detect_long_functions(file, &functions, self.config.max_fn_lines));

        FilePass {
            units: FileUnits {
                path: file.path.clone(),
                units,
            },
            literals,
            functions,
            findings,
        }
    }
}
