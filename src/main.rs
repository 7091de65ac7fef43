//! APA crawler main entry point
//!
//! This is the command-line interface for the two APA tools.

use anyhow::Context;
use apa_crawler::config::{load_config_with_hash, Config};
use apa_crawler::crawler::{crawl_documents, format_document_list, walk_titles};
use apa_crawler::output::{CrawlReporter, TracingReporter};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// APA crawler: collects Advance Pricing Agreement rulings
///
/// `documents` follows the ruling links on the Belastingdienst APA page and
/// records the PDF behind each one. `titles` walks every page below the APA
/// page and lists the ruling titles it mentions.
#[derive(Parser, Debug)]
#[command(name = "apa-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Collects APA rulings from the Belastingdienst website", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect ruling PDFs linked from the APA page
    Documents {
        /// Download every resolved PDF without asking
        #[arg(long, conflicts_with = "no_download")]
        download: bool,

        /// Never download, and do not ask
        #[arg(long)]
        no_download: bool,
    },

    /// Walk the site and collect APA ruling titles
    Titles {
        /// Stop after fetching this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Do not follow links deeper than this
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

/// Whether resolved PDFs are downloaded after the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadDecision {
    Yes,
    No,
    Ask,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    setup_logging(cli.verbose, cli.quiet, Path::new(&config.output.log_path))?;

    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using built-in configuration"),
    }

    let reporter: Arc<dyn CrawlReporter> = Arc::new(TracingReporter);

    match cli.command {
        Command::Documents {
            download,
            no_download,
        } => {
            let decision = if download {
                DownloadDecision::Yes
            } else if no_download {
                DownloadDecision::No
            } else {
                DownloadDecision::Ask
            };
            handle_documents(config, reporter, decision).await
        }
        Command::Titles {
            max_pages,
            max_depth,
        } => {
            let mut config = config;
            if max_pages.is_some() {
                config.walker.max_pages = max_pages;
            }
            if max_depth.is_some() {
                config.walker.max_depth = max_depth;
            }
            handle_titles(config, reporter).await
        }
    }
}

/// Sets up console and file logging
///
/// Console output honours the verbosity flags; the log file receives the
/// same lines without ANSI colours and is appended to across runs.
fn setup_logging(verbose: u8, quiet: bool, log_path: &Path) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("apa_crawler=info,warn"),
            1 => EnvFilter::new("apa_crawler=debug,info"),
            2 => EnvFilter::new("apa_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(())
}

/// Handles the `documents` command
async fn handle_documents(
    config: Config,
    reporter: Arc<dyn CrawlReporter>,
    decision: DownloadDecision,
) -> anyhow::Result<()> {
    let crawler = crawl_documents(&config, reporter).await?;

    let report_path = Path::new(&config.output.documents_path);
    crawler.save_results(report_path)?;

    let documents = crawler.documents();

    println!("\n=== Crawl Summary ===");
    println!("Total documents found: {}", documents.len());
    println!("Results saved to: {}", report_path.display());
    println!("Log file: {}", config.output.log_path);

    if documents.is_empty() {
        return Ok(());
    }

    println!("\nFound PDFs:");
    print!("{}", format_document_list(documents));

    let download = match decision {
        DownloadDecision::Yes => true,
        DownloadDecision::No => false,
        DownloadDecision::Ask => confirm_download()?,
    };

    if download {
        let summary = crawler
            .download_pdfs(Path::new(&config.output.download_dir))
            .await?;
        println!(
            "Download complete! {} downloaded, {} failed",
            summary.downloaded.len(),
            summary.failed.len()
        );
    }

    Ok(())
}

/// Asks on stdin whether to download; only `y` (any case) counts as yes
fn confirm_download() -> anyhow::Result<bool> {
    print!("Download all PDFs? (y/n): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read answer from stdin")?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Handles the `titles` command
async fn handle_titles(config: Config, reporter: Arc<dyn CrawlReporter>) -> anyhow::Result<()> {
    let walker = walk_titles(&config, reporter).await?;

    println!("Found titles:");
    for title in walker.titles() {
        println!("{}", title);
    }

    let report_path = Path::new(&config.output.titles_path);
    walker.save_results(report_path)?;
    println!("Saved titles to {}", report_path.display());

    Ok(())
}
