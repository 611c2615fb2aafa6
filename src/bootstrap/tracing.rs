//! Tracing subscriber setup.
//!
//! One global subscriber with an env filter, a stderr layer and, when the
//! logs directory is usable, a daily-rolling non-blocking file layer. Stdout
//! is left to the console front end.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

const LOG_FILE_PREFIX: &str = "lingoclip.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default directives, used when `RUST_LOG` is unset or invalid.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("lc_platform={level}"),
        format!("lc_infra={level}"),
        format!("lc_app={level}"),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Register the global subscriber. Call once, before anything logs.
///
/// `logs_dir` of `None`, or a directory that cannot be created, leaves only
/// the stderr layer.
///
/// # Errors
///
/// Fails if a global subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let file_writer = match logs_dir.map(build_file_writer) {
        Some(Ok(writer)) => Some(writer),
        Some(Err(err)) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
            None
        }
        None => None,
    };

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_follow_build_profile() {
        let dev = build_filter_directives(true);
        assert_eq!(dev[0], "debug");
        assert!(dev.contains(&"lc_platform=debug".to_string()));
        assert!(dev.contains(&"reqwest=warn".to_string()));

        let prod = build_filter_directives(false);
        assert_eq!(prod[0], "info");
        assert!(prod.contains(&"lc_infra=info".to_string()));
    }

    #[test]
    fn filter_directives_parse() {
        let joined = build_filter_directives(false).join(",");
        assert!(EnvFilter::try_new(joined).is_ok());
    }
}
