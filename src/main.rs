//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror website mirror.

use clap::Parser;
use site_mirror::config::{load_config_with_hash, validate, Config};
use site_mirror::crawler::Mirror;
use site_mirror::output::print_statistics;
use site_mirror::url::CrawlScope;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mirror: mirror a single website to local storage
///
/// Starting from the seed page, Site-Mirror follows every same-origin
/// href/src link breadth-first and writes each resource to a path derived
/// from its URL.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a single website to local storage", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start from; its scheme and host bound the crawl
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write the mirror into (overrides crawler.root-dir)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed and show what would be mirrored without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(output) = cli.output {
        config.crawler.root_dir = output;
        validate(&config)?;
    }

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config)?;
    } else {
        handle_mirror(&cli.seed, config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
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

/// Handles the --dry-run mode: validates the seed and shows the settings
fn handle_dry_run(seed: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (scope, seed) = CrawlScope::from_seed(seed)?;

    println!("=== Site-Mirror Dry Run ===\n");

    println!("Seed:");
    println!("  URL: {}", seed);
    println!("  Locked origin: {}", scope.prefix());

    println!("\nCrawler Configuration:");
    println!("  Root directory: {}", config.crawler.root_dir.display());
    println!(
        "  Request timeout: {}s (connect {}s)",
        config.crawler.request_timeout_secs, config.crawler.connect_timeout_secs
    );
    println!(
        "  Markup extensions: {}",
        config.crawler.markup_extensions.join(", ")
    );

    println!("\nDecoding:");
    println!("  Encodings: {}", config.decoding.encodings.join(" -> "));

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Seed would be stored at {}",
        site_mirror::url::map_path(&seed, &config.crawler.root_dir).display()
    );

    Ok(())
}

/// Handles the main mirror operation
async fn handle_mirror(
    seed: &str,
    config: Config,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mirror = Mirror::new(seed, config)?;

    match mirror.run().await {
        Ok(stats) => {
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Mirror failed: {}", e);
            Err(e.into())
        }
    }
}
