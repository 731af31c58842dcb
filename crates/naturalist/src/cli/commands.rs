//! CLI command definitions.

use clap::{Parser, Subcommand};
use naturalist::OutputFormat;
use std::path::PathBuf;

/// Naturalist - random not-recently-seen iNaturalist observations
#[derive(Parser, Debug)]
#[command(name = "naturalist")]
#[command(about = "Random not-recently-seen iNaturalist observations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Read configuration from this file instead of the usual locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick observations from a taxon group
    Pic {
        /// Group alias or label (bird, mush, Aves, ...)
        group: String,

        /// Optional words narrowing the group
        query: Vec<String>,

        /// Number of distinct observations to pick
        #[arg(long, short = 'n', default_value = "1")]
        count: usize,
    },

    /// Pick an observation matching free text across all taxa
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List the available groups
    Groups,

    /// Resolve a taxon label to its catalog id
    Resolve {
        /// Taxon label, e.g. Aves
        label: String,
    },

    /// Read commands from stdin, one per line, sharing one cache
    Session,
}
