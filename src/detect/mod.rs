//! Detection module: one submodule per rule, plus the runner.

mod blocks;
mod debug;
mod functions;
mod handlers;
mod length;
mod literals;
mod magic;
mod nesting;
mod runner;
mod secrets;
mod suppress;
mod types;
mod urls;

pub use blocks::{find_duplicate_blocks, FileUnits};
pub use debug::detect_debug_statements;
pub use functions::FunctionTable;
pub use handlers::detect_empty_handlers;
pub use length::detect_long_functions;
pub use literals::LiteralCensus;
pub use magic::detect_magic_numbers;
pub use nesting::detect_deep_nesting;
pub use runner::Runner;
pub use secrets::detect_secrets;
pub use suppress::{
    collect_suppressions, filter_suppressed, matches_suppression, parse_suppressions, Suppression,
};
pub use types::{Finding, Location, Rule, ScanResult, Severity};
pub use urls::detect_hardcoded_urls;
