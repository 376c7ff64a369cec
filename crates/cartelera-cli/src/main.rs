use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod crawl;

#[derive(Debug, Parser)]
#[command(name = "cartelera-cli")]
#[command(about = "Movie-listing crawler and CSV exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the configured source sites and export the records as CSV.
    Crawl {
        /// Only crawl the named source from sources.yaml.
        #[arg(long)]
        source: Option<String>,
        /// Override the output CSV path from the configuration.
        #[arg(long)]
        output: Option<PathBuf>,
        /// List what would be crawled without making any requests.
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch a single page and print its extracted records as JSON.
    ///
    /// Useful when adding a new site layout to the selector configuration.
    Probe { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = cartelera_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Crawl {
            source,
            output,
            dry_run,
        } => crawl::run_crawl(&config, source.as_deref(), output.as_deref(), dry_run).await,
        Commands::Probe { url } => crawl::run_probe(&config, &url).await,
    }
}
