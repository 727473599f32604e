use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weeklyfeed_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "weeklyfeed")]
#[command(author, version, about = "Render the latest weekly updates into a page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/weeklyfeed/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch updates and write them into the page's container
    Render {
        /// HTML page to update (defaults to general.page_path)
        #[arg(short = 'p', long)]
        page: Option<PathBuf>,
        /// Write the result here instead of updating the page in place
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Print the fragment that would be written into the container
    Preview,
    /// List the updates that would be shown
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Render { page, output } => {
            commands::render::run(&config, page, output).await
        }
        Commands::Preview => commands::preview::run(&config).await,
        Commands::List => commands::list::run(&config).await,
    }
}
