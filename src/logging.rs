use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle, opt_format};

/// Start logging to stderr at `level`, unless `RUST_LOG` says otherwise.
///
/// Stdout is left alone for the text protocol. Keep the returned handle alive
/// for as long as logging is needed.
pub fn setup_logging(level: &str) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log specification: {level}"))?
        .format(opt_format)
        .start()
        .context("failed to start logger")
}
