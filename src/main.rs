//! Paragraph-Crawl main entry point
//!
//! This is the command-line interface for the paragraph crawler.

use anyhow::Context;
use clap::Parser;
use paragraph_crawl::config::{resolve_config, Overrides};
use paragraph_crawl::crawler::run_crawl;
use paragraph_crawl::output::print_report;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Paragraph-Crawl: fetch pages and save their paragraph text as JSON Lines
///
/// Every seed URL is fetched once, concurrently. Each successfully fetched
/// page becomes one `{"url": ..., "text": ...}` line in the output file.
#[derive(Parser, Debug)]
#[command(name = "paragraph-crawl")]
#[command(version)]
#[command(about = "Concurrent paragraph-text crawler", long_about = None)]
struct Cli {
    /// Path to output .jl file
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Comma-separated list of URLs to crawl (replaces the default seeds)
    #[arg(long, value_name = "URLS")]
    urls: Option<String>,

    /// Allowed domain (repeatable; replaces the configured list)
    #[arg(long = "allowed-domain", value_name = "DOMAIN")]
    allowed_domains: Vec<String>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        output_path: cli.output,
        urls: cli.urls,
        allowed_domains: cli.allowed_domains,
        log_path: cli.log_file,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)
        .context("Failed to load configuration")?;

    setup_logging(Path::new(&config.output.log_path), cli.verbose, cli.quiet)?;

    let output_path = Path::new(&config.output.path);
    ensure_parent_dir(output_path)
        .with_context(|| format!("Output directory not writable for {}", output_path.display()))?;

    tracing::info!("Total seed URLs: {}", config.crawler.seeds.len());

    let report = run_crawl(&config)
        .await
        .with_context(|| format!("Unable to crawl into {}", output_path.display()))?;

    print_report(&report, output_path);

    Ok(())
}

/// Sets up the tracing subscriber, writing to the log file
///
/// Standard output is reserved for the final summary line.
fn setup_logging(log_path: &Path, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("paragraph_crawl=info,warn"),
            1 => EnvFilter::new("paragraph_crawl=debug,info"),
            2 => EnvFilter::new("paragraph_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    ensure_parent_dir(log_path)
        .with_context(|| format!("Log directory not writable for {}", log_path.display()))?;
    let log_file = File::create(log_path)
        .with_context(|| format!("Unable to create log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();

    Ok(())
}

/// Creates the parent directory of `path` if it has one
fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
