//! Site-Crawler main entry point
//!
//! This is the command-line interface for the Site-Crawler bounded web crawler.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use site_crawler::config::{load_config, validate, Config};
use site_crawler::output::{export_results, print_statistics, CrawlStatistics};
use site_crawler::{Crawler, CrawlerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Site-Crawler: a bounded, same-domain web crawler
///
/// Crawls pages reachable from START_URL with a pool of concurrent workers,
/// stops after MAX_PAGES pages, and writes one CSV row per fetched page.
#[derive(Parser, Debug)]
#[command(name = "site-crawler")]
#[command(version)]
#[command(about = "A bounded, same-domain web crawler", long_about = None)]
struct Cli {
    /// The starting URL to crawl
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Maximum number of pages to crawl [default: 100]
    #[arg(value_name = "MAX_PAGES")]
    max_pages: Option<usize>,

    /// Number of concurrent workers [default: 4]
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the CSV file is written to [default: .]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_crawler=info,warn"),
            1 => EnvFilter::new("site_crawler=debug,info"),
            2 => EnvFilter::new("site_crawler=trace,debug"),
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

/// Loads the configuration file if one was given, then applies CLI overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(directory) = &cli.output_dir {
        config.output.directory = directory.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the main crawl operation
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;

    let crawler = match Crawler::new(&config, &cli.start_url) {
        Ok(crawler) => crawler,
        Err(e @ CrawlerError::InvalidStartUrl { .. }) => {
            return Err(e).context("URL is invalid");
        }
        Err(e) => return Err(e).context("Failed to start crawler"),
    };

    println!("Start URL: {}", crawler.start_url());
    println!("Max pages: {}", config.crawler.max_pages);
    println!("Workers: {}", config.crawler.workers);
    println!();

    let stop = crawler.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.stop();
        }
    });

    let results = crawler.run().await.context("Crawl failed")?;

    let path = export_results(&config.output, &results).context("Failed to write CSV results")?;

    println!();
    print_statistics(&CrawlStatistics::from_results(&results));
    println!();
    println!("Total pages crawled: {}", results.len());
    println!("Results saved to: {}", path.display());

    Ok(())
}
