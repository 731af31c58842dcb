//! Text and JSON rendering of lookup results.

use naturalist_bot::{ClearAck, LookupOutcome, NaturalistConfig};
use naturalist_core::TaxonGroup;
use strum::IntoEnumIterator;

/// Shown for every failed lookup, whatever broke.
const FAILURE_TEXT: &str = "Something went wrong while looking for a picture. Try again.";
const NO_RESULT_TEXT: &str = "No new observations match. Try again after the cache clears.";

/// How results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per result
    #[default]
    Plain,
    /// One JSON object per result
    Json,
}

/// Render a lookup outcome as a single line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_outcome(outcome: &LookupOutcome, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(outcome),
        OutputFormat::Plain => Ok(match outcome {
            LookupOutcome::Found(detail) => {
                let mut line = if detail.preferred_common_name().is_some() {
                    format!("{} ({})", detail.title(), detail.scientific_name())
                } else {
                    detail.scientific_name().clone()
                };
                line.push_str(&format!(" {} {}", detail.photo_url(), detail.uri()));
                if let Some(wiki) = detail.wikipedia_url() {
                    line.push_str(&format!(" {}", wiki));
                }
                line
            }
            LookupOutcome::NoResult => NO_RESULT_TEXT.to_string(),
            LookupOutcome::Failed(_) => FAILURE_TEXT.to_string(),
        }),
    }
}

/// Render a manual clear acknowledgement.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_clear(ack: &ClearAck, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(ack),
        OutputFormat::Plain => Ok(format!(
            "Cache cleared ({} observations, {} species). Next automatic clear in {}h.",
            ack.cleared_observations(),
            ack.cleared_taxa(),
            ack.next_deadline_in().as_secs() / 3600
        )),
    }
}

/// List built-in groups followed by configured aliases, one per line.
pub fn render_groups(config: &NaturalistConfig) -> String {
    let builtin = TaxonGroup::iter()
        .map(|group| format!("{}pic\t{}\t{}", group.alias(), group.label(), group.description()));
    let extra = config
        .groups()
        .iter()
        .map(|(alias, label)| format!("{}pic\t{}\t{} pics", alias, label, label));
    builtin.chain(extra).collect::<Vec<_>>().join("\n")
}
