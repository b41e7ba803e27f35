//! Spread-Harvest main entry point
//!
//! This is the command-line interface for the Spread-Harvest dictionary harvester.

use anyhow::Context;
use clap::Parser;
use spread_harvest::config::{load_config_with_hash, Config, CrawlConfig};
use spread_harvest::crawler::crawl;
use spread_harvest::output::{print_statistics, write_dataset};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Spread-Harvest: a sign-language dictionary harvester
///
/// Spread-Harvest walks every category of the dictionary, extracts each entry
/// with its video references and writes the merged records as one JSON file.
#[derive(Parser, Debug)]
#[command(name = "spread-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A sign-language dictionary harvester", long_about = None)]
struct Cli {
    /// TOML file with the crawler, cache and output settings
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// More log output; repeat for debug and trace (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors and skip the statistics report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Ignore the page cache and fetch everything from the network
    #[arg(long)]
    no_cache: bool,

    /// Print the resolved settings and exit without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Reading settings from {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let mut crawl_config = CrawlConfig::try_from(&config)?;
    if cli.no_cache {
        tracing::info!("Page cache disabled for this run");
        crawl_config = crawl_config.without_cache();
    }

    if cli.dry_run {
        handle_dry_run(&config, &crawl_config);
        return Ok(());
    }

    handle_crawl(crawl_config, Path::new(&config.output.data_path), cli.quiet).await
}

/// Installs the global subscriber; `-q` wins over any `-v`
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spread_harvest=info,warn"),
            1 => EnvFilter::new("spread_harvest=debug,info"),
            2 => EnvFilter::new("spread_harvest=trace,debug"),
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

/// Prints what a run would use: site, language, workers, cache and output
fn handle_dry_run(config: &Config, crawl_config: &CrawlConfig) {
    println!("=== Spread-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", crawl_config.base_url);
    println!("  Language: {}", crawl_config.language);
    println!("  Concurrency: {}", crawl_config.concurrency);

    println!("\nCache:");
    match &crawl_config.cache {
        Some(cache) => {
            println!("  Folder: {}", cache.folder.display());
            println!("  TTL: {} ({:?})", config.cache.ttl, cache.ttl);
        }
        None => println!("  Disabled"),
    }

    println!("\nOutput:");
    println!("  Data file: {}", config.output.data_path);

    match spread_harvest::url::category_index_url(&crawl_config.base_url, &crawl_config.language)
    {
        Ok(index_url) => println!("\n✓ Would start from {}", index_url),
        Err(e) => println!("\n✗ Cannot build category index URL: {}", e),
    }
    println!("✓ Configuration is valid");
}

/// Crawls, writes the dataset and prints the run report
async fn handle_crawl(crawl_config: CrawlConfig, data_path: &Path, quiet: bool) -> anyhow::Result<()> {
    let outcome = match crawl(crawl_config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Harvest aborted: {}", e);
            return Err(e.into());
        }
    };

    write_dataset(&outcome.dataset, data_path)
        .with_context(|| format!("failed to write {}", data_path.display()))?;

    if !quiet {
        print_statistics(&outcome.statistics);
    }

    Ok(())
}
