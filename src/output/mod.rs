//! Output module for run summaries and exports
//!
//! This module handles:
//! - Printing run and store statistics
//! - Exporting stored content as JSON lines

mod export;
pub mod stats;

pub use export::{export_jsonl, export_to_path};
pub use stats::{format_run_report, format_store_statistics, print_run_report, print_store_statistics};
