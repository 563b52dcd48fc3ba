use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{filter::ParseError, layer::SubscriberExt, EnvFilter};

#[cfg(feature = "file-log")]
pub mod file;

/// Build the subscriber for `level_regex`. `RUST_LOG` overrides the configured
/// filter. An invalid filter falls back to `debug` and the error is handed back
/// so it can be reported once logging works.
#[must_use]
pub fn parse_log_level(level_regex: &str) -> (impl Subscriber, Option<ParseError>) {
    let mut parse_err = None;
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level_regex.to_owned());
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(&directives)
        .unwrap_or_else(|err| {
            parse_err = Some(err);
            EnvFilter::default().add_directive(LevelFilter::DEBUG.into())
        });
    (get_subscribers(filter), parse_err)
}

#[allow(clippy::let_and_return)]
pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber {
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    #[cfg(feature = "file-log")]
    let subscriber = file::add_layer(subscriber);

    subscriber
}

/// Install the global subscriber.
pub fn setup_logging(level_regex: &str) {
    let (subscriber, parse_err) = parse_log_level(level_regex);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Couldn't setup global subscriber (logger)");
    }
    if let Some(err) = parse_err {
        tracing::warn!("Invalid log level `{}`, using debug: {}", level_regex, err);
    }
}
