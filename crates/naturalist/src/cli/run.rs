//! Command handlers.

use naturalist::{
    Catalog, NaturalistBot, NaturalistConfig, NaturalistResult, OutputFormat, render_groups,
    render_outcome, run_session,
};
use tokio::io::BufReader;
use tracing::{info, instrument};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Pick `count` observations from `group`, narrowed by `query`.
#[instrument(skip(bot, config))]
pub async fn pick<C: Catalog + 'static>(
    bot: &NaturalistBot<C>,
    config: &NaturalistConfig,
    group: &str,
    query: &[String],
    count: usize,
    format: OutputFormat,
) -> CliResult {
    let label = config
        .group_label(group)
        .ok_or_else(|| format!("Unknown group '{}'. Run `naturalist groups`.", group))?;
    let query = query.join(" ");

    for _ in 0..count {
        let outcome = bot.lookup(Some(label.as_str()), Some(query.as_str())).await;
        println!("{}", render_outcome(&outcome, format)?);
        if !outcome.is_found() {
            break;
        }
    }
    Ok(())
}

/// Pick one observation matching `query` across all taxa.
#[instrument(skip(bot))]
pub async fn search<C: Catalog + 'static>(
    bot: &NaturalistBot<C>,
    query: &[String],
    format: OutputFormat,
) -> CliResult {
    let query = query.join(" ");
    let outcome = bot.lookup(None, Some(query.as_str())).await;
    println!("{}", render_outcome(&outcome, format)?);
    Ok(())
}

/// Print the group table.
pub fn list_groups(config: &NaturalistConfig) {
    println!("{}", render_groups(config));
}

/// Print the taxon id a label resolves to.
#[instrument(skip(bot))]
pub async fn resolve_label<C: Catalog + 'static>(
    bot: &NaturalistBot<C>,
    label: &str,
) -> NaturalistResult<()> {
    match bot.resolve(label).await? {
        Some(id) => println!("{}\t{}", label, id),
        None => println!("{}\tnot found", label),
    }
    Ok(())
}

/// Run a stdin/stdout session.
pub async fn session<C: Catalog + 'static>(
    bot: &NaturalistBot<C>,
    config: &NaturalistConfig,
    format: OutputFormat,
) -> CliResult {
    info!("Reading commands from stdin");
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(bot, config, stdin, tokio::io::stdout(), format).await?;
    Ok(())
}
