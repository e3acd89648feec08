//! CLI application for building plant databases from guides and profiles.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, distribution, extract, fetch, guide, thumbnails};

/// Plant database toolkit - extract structured plant data from guides,
/// profile pages and the iNaturalist API
#[derive(Parser)]
#[command(name = "herbarium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plant attributes from a single file
    Extract(extract::ExtractArgs),

    /// Extract plant attributes from multiple files
    Batch(batch::BatchArgs),

    /// Parse a USDA plant guide into structured sections
    Guide(guide::GuideArgs),

    /// Convert a USDA distribution CSV to FIPS code sets
    Distribution(distribution::DistributionArgs),

    /// Fetch plant records from iNaturalist
    Fetch(fetch::FetchArgs),

    /// Derive and generate thumbnails for plant images
    Thumbnails(thumbnails::ThumbnailsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Guide(args) => guide::run(args, cli.config.as_deref()).await,
        Commands::Distribution(args) => distribution::run(args).await,
        Commands::Fetch(args) => fetch::run(args, cli.config.as_deref()).await,
        Commands::Thumbnails(args) => thumbnails::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
