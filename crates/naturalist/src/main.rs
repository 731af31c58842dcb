//! Naturalist CLI binary.
//!
//! This binary provides command-line access to the observation picker:
//! - Pick photographed observations from a taxon group or a free search
//! - Resolve taxon labels
//! - Run a long-lived session whose cache clears itself daily

use clap::Parser;
use naturalist::{NaturalistBot, NaturalistConfig};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, init_logging, list_groups, pick, resolve_label, search, session};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    let config = match &cli.config {
        Some(path) => NaturalistConfig::from_file(path)?,
        None => NaturalistConfig::load()?,
    };

    if let Commands::Groups = cli.command {
        list_groups(&config);
        return Ok(());
    }

    let bot = NaturalistBot::from_config(&config)?;

    // Execute the requested command
    let result = match &cli.command {
        Commands::Pic {
            group,
            query,
            count,
        } => pick(&bot, &config, group, query, *count, cli.format).await,
        Commands::Search { query } => search(&bot, query, cli.format).await,
        Commands::Resolve { label } => resolve_label(&bot, label).await.map_err(Into::into),
        Commands::Session => session(&bot, &config, cli.format).await,
        Commands::Groups => Ok(()),
    };

    bot.shutdown().await;
    result
}
