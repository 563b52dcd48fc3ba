use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

const LOG_DIR: &str = "~/.cache/tallwm";
const LOG_FILE_NAME: &str = "tallwm.log";

static GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

pub fn add_layer<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let writer = log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir)
            .map_err(|err| eprintln!("Couldn't create log directory {}: {err}", dir.display()))
            .ok()?;
        Some(get_log_writer(dir))
    });
    let layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });
    subscriber.with(layer)
}

fn log_dir() -> Option<PathBuf> {
    shellexpand::full(LOG_DIR)
        .ok()
        .map(|dir| PathBuf::from(dir.into_owned()))
}

fn get_log_writer(dir: PathBuf) -> NonBlocking {
    let writer = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);
    // Flushes on drop, so it has to live as long as the process.
    let _ = GUARD.set(guard);
    non_blocking
}
