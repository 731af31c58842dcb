//! CLI command handlers.

mod commands;
mod run;
mod telemetry;

pub use commands::{Cli, Commands};
pub use run::{list_groups, pick, resolve_label, search, session};
pub use telemetry::init_logging;
