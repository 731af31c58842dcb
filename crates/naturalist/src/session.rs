//! Line-oriented command session over one long-lived bot.

use crate::render::{OutputFormat, render_clear, render_groups, render_outcome};
use naturalist_bot::{NaturalistBot, NaturalistConfig};
use naturalist_interface::Catalog;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `<alias>pic [query...]`: browse a group, optionally narrowed
    Pic {
        /// Catalog label the alias maps to
        label: String,
        /// Trailing words, if any
        query: Option<String>,
    },
    /// `search <query...>`: free search across all taxa
    Search {
        /// Search text
        query: String,
    },
    /// `groups`: list the available aliases
    Groups,
    /// `clearcache`: wipe the exclusion store now
    ClearCache,
    /// `quit` or `exit`
    Quit,
    /// Anything else
    Unknown(String),
}

impl SessionCommand {
    /// Parse a line, returning `None` for blank lines.
    pub fn parse(line: &str, config: &NaturalistConfig) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return None;
        }
        let rest = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_lowercase().as_str() {
            "clearcache" => Self::ClearCache,
            "groups" | "help" => Self::Groups,
            "quit" | "exit" => Self::Quit,
            "search" => match rest {
                Some(query) => Self::Search { query },
                None => Self::Unknown(line.to_string()),
            },
            name => match config.group_label(name) {
                Some(label) => Self::Pic { label, query: rest },
                None => Self::Unknown(word.to_string()),
            },
        };
        Some(command)
    }
}

/// Read commands from `input` until end of input or `quit`, writing one
/// result line per command to `output`.
///
/// All commands share the bot's cache, so repeated `birdpic` lines walk
/// through distinct observations until `clearcache` or the daily clear.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
#[instrument(skip_all, fields(format = ?format))]
pub async fn run_session<C, R, W>(
    bot: &NaturalistBot<C>,
    config: &NaturalistConfig,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> std::io::Result<()>
where
    C: Catalog + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Session started");
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = SessionCommand::parse(&line, config) else {
            continue;
        };
        debug!(?command, "Session command");

        let text = match command {
            SessionCommand::Pic { label, query } => {
                let outcome = bot.lookup(Some(label.as_str()), query.as_deref()).await;
                render_outcome(&outcome, format).map_err(std::io::Error::other)?
            }
            SessionCommand::Search { query } => {
                let outcome = bot.lookup(None, Some(query.as_str())).await;
                render_outcome(&outcome, format).map_err(std::io::Error::other)?
            }
            SessionCommand::Groups => render_groups(config),
            SessionCommand::ClearCache => match bot.trigger_manual_clear().await {
                Ok(ack) => render_clear(&ack, format).map_err(std::io::Error::other)?,
                Err(e) => {
                    warn!(error = %e, "Manual clear failed");
                    "Could not clear the cache.".to_string()
                }
            },
            SessionCommand::Quit => break,
            SessionCommand::Unknown(word) => format!("Unknown command: {}", word),
        };

        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    info!("Session ended");
    Ok(())
}
