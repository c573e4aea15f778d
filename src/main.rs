//! Sumi-Harvest main entry point
//!
//! This is the command-line interface for the Sumi-Harvest crawl-and-ingest
//! pipeline.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_harvest::config::{load_config_with_hash, load_default_config, load_seed_urls, Config};
use sumi_harvest::output::{export_to_path, print_run_report, print_store_statistics};
use sumi_harvest::pipeline::run_from_config;
use sumi_harvest::storage::{ContentStore, SqliteStore};
use sumi_harvest::HarvestError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sumi-Harvest: a bounded, idempotent crawl-and-ingest pipeline
///
/// Sumi-Harvest crawls each seed domain up to a page budget, extracts the
/// readable text of every page it finds and stores it keyed by URL hash.
/// Re-running skips everything already stored.
#[derive(Parser, Debug)]
#[command(name = "sumi-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A bounded, idempotent crawl-and-ingest pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed list, one URL per line (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    seeds: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seeds and show what would be crawled
    #[arg(long, conflicts_with_all = ["stats", "export", "clear"])]
    dry_run: bool,

    /// Show content store statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export", "clear"])]
    stats: bool,

    /// Write every stored record as JSON lines to FILE (`-` for stdout)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["dry_run", "stats", "clear"])]
    export: Option<PathBuf>,

    /// Delete every stored record and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "export"])]
    clear: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(cli.config.as_deref())?;
    let seeds_path = cli
        .seeds
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.input.seeds_path));

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, &seeds_path)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(path) = &cli.export {
        handle_export(&config, path)?;
    } else if cli.clear {
        handle_clear(&config)?;
    } else {
        handle_run(&config, &seeds_path).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_harvest=info,warn"),
            1 => EnvFilter::new("sumi_harvest=debug,info"),
            2 => EnvFilter::new("sumi_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load_effective_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Ok(load_default_config()?)
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    let path = Path::new(&config.storage.database_path);
    SqliteStore::open(path).with_context(|| format!("failed to open store at {}", path.display()))
}

/// Handles the --dry-run mode: validates config and seeds without fetching
fn handle_dry_run(config: &Config, seeds_path: &Path) -> anyhow::Result<()> {
    println!("=== Sumi-Harvest Dry Run ===\n");

    println!("Effective Configuration:");
    let rendered = toml::to_string_pretty(config).context("failed to render configuration")?;
    for line in rendered.lines() {
        println!("  {}", line);
    }

    let seeds = load_seed_urls(seeds_path)?;
    println!("\nSeeds from {} ({}):", seeds_path.display(), seeds.len());
    for seed in &seeds {
        match sumi_harvest::url::parse_absolute_url(seed) {
            Ok(url) => println!("  - {}", url),
            Err(e) => println!("  ! {} (will be skipped: {})", seed, e),
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} pages for each of {} seeds",
        config.crawler.max_pages_per_domain,
        seeds.len()
    );

    Ok(())
}

/// Handles the --stats mode: shows statistics from the content store
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let store = open_store(config)?;
    print_store_statistics(&store.stats()?);

    Ok(())
}

/// Handles the --export mode: dumps stored records as JSON lines
fn handle_export(config: &Config, path: &Path) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let count = export_to_path(&store, path)?;

    if path != Path::new("-") {
        println!("✓ Exported {} records to: {}", count, path.display());
    }

    Ok(())
}

/// Handles the --clear mode: empties the content store
fn handle_clear(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let removed = store.clear_all()?;

    println!(
        "✓ Removed {} URLs from {}",
        removed, config.storage.database_path
    );

    Ok(())
}

/// Handles the main pipeline run
async fn handle_run(config: &Config, seeds_path: &Path) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // Ctrl-C stops the run between fetches; work already stored is kept
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current request");
            token.cancel();
        }
    });

    let report = match run_from_config(config, seeds_path, cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    print_run_report(&report);

    if report.cancelled {
        return Err(HarvestError::Cancelled.into());
    }

    Ok(())
}
