//! Diagnostic logging.
//!
//! Reports go to stdout; everything logged through `tracing` goes to
//! stderr so the two never interleave in a pipe. The configured level is
//! the default; `RUST_LOG` directives override it per target, e.g.
//! `RUST_LOG=u_hypotest=debug`.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("logging already initialized")]
    AlreadyInitialized,

    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`,
/// case-insensitive).
pub fn parse_level(level: &str) -> Result<LevelFilter, LogError> {
    level
        .trim()
        .parse()
        .map_err(|_| LogError::InvalidLevel(level.to_string()))
}

/// Installs the global stderr subscriber. Call once at startup.
///
/// `level` applies to every target `RUST_LOG` does not mention.
pub fn init_logging(level: &str) -> Result<(), LogError> {
    let default_level = parse_level(level)?;
    if LOGGING_INITIALIZED.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(false),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    let _ = LOGGING_INITIALIZED.set(());
    Ok(())
}
