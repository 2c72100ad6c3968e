//! Tracing setup for the CLI.

use std::path::Path;

use brujula_config::{expand_tilde, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// With `logging.file` set, output goes to that file through a non-blocking
/// writer and the returned guard must be held until exit.
pub fn init(config: &LoggingConfig, debug: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(config, debug)?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.file.as_deref() {
        Some(file) => {
            let path = expand_tilde(file).unwrap_or_else(|| file.into());
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "brujula.log".to_string());

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);
            registry.with(layer).try_init()?;
            Ok(Some(guard))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            registry.with(layer).try_init()?;
            Ok(None)
        }
    }
}

/// `debug` forces debug level; otherwise `RUST_LOG` wins over the
/// configured level.
fn build_filter(config: &LoggingConfig, debug: bool) -> anyhow::Result<EnvFilter> {
    if debug {
        return Ok(EnvFilter::try_new("debug")?);
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(config.level.to_string())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brujula_config::LogLevel;

    #[test]
    fn test_debug_flag_beats_rust_log() {
        std::env::set_var("RUST_LOG", "warn");
        let config = LoggingConfig {
            level: LogLevel::Error,
            file: None,
        };

        assert!(build_filter(&config, true).unwrap().to_string().contains("debug"));
        assert!(build_filter(&config, false).unwrap().to_string().contains("warn"));

        std::env::remove_var("RUST_LOG");
        assert!(build_filter(&config, false).unwrap().to_string().contains("error"));
    }
}
