//! Human-readable run and store summaries
//!
//! Formatting is separate from printing so the text can be tested.

use crate::pipeline::RunReport;
use crate::storage::StoreStats;

/// Formats store statistics
pub fn format_store_statistics(stats: &StoreStats) -> String {
    let mut out = String::from("=== Content Store ===\n\n");
    out.push_str(&format!("  Scraped URLs: {}\n", stats.total_scraped_urls));
    out.push_str(&format!(
        "  Estimated size: {}\n",
        format_bytes(stats.storage_bytes_estimate)
    ));
    out
}

/// Formats the summary of a pipeline run
pub fn format_run_report(report: &RunReport) -> String {
    let mut out = String::from("=== Harvest Summary ===\n\n");

    if report.cancelled {
        out.push_str("Run was cancelled; counts cover completed work only.\n\n");
    }

    out.push_str("Crawl:\n");
    out.push_str(&format!("  Seeds: {}\n", report.seeds));
    out.push_str(&format!("  URLs discovered: {}\n\n", report.discovered));

    let scrape = &report.scrape;
    out.push_str("Scrape:\n");
    out.push_str(&format!("  Stored: {}\n", scrape.success));
    out.push_str(&format!("  Failed: {}\n", scrape.failed));
    out.push_str(&format!("  Skipped (already stored): {}\n", scrape.skipped));

    let attempted = scrape.success + scrape.failed;
    let success_rate = if attempted > 0 {
        (scrape.success as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "  Success Rate: {:.1}% ({} / {} fetched pages stored)\n\n",
        success_rate, scrape.success, attempted
    ));

    out.push_str(&format_store_statistics(&report.store));
    out.push_str(&format!("\nElapsed: {:.1}s\n", report.elapsed_secs));
    out
}

/// Prints store statistics to stdout
pub fn print_store_statistics(stats: &StoreStats) {
    print!("{}", format_store_statistics(stats));
}

/// Prints a run summary to stdout
pub fn print_run_report(report: &RunReport) {
    print!("{}", format_run_report(report));
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
