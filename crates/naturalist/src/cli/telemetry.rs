use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks between info and
/// debug for the naturalist crates.
pub fn init_logging(verbose: bool, json: bool) {
    let default = if verbose {
        "info,naturalist=debug,naturalist_bot=debug,naturalist_cache=debug,naturalist_inat=debug"
    } else {
        "warn,naturalist=info,naturalist_bot=info,naturalist_cache=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
