//! Stderr logging for the CLI.
//!
//! Messages follow the `event=<name> key=value` shape used across the crate.
//! `RUST_LOG`, when set, takes precedence over the verbosity flag.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use log::debug;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Maps the `-v` count to a level spec.
///
/// Only this crate is raised; dependencies stay at `warn` because the HTTP
/// stack logs full URLs, and those carry the API token.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,joplink=info",
        2 => "warn,joplink=debug",
        _ => "warn,joplink=trace",
    }
}

/// Starts the logger once per process; later calls are no-ops.
pub fn init(verbosity: u8) -> Result<(), FlexiLoggerError> {
    LOGGER.get_or_try_init(|| {
        let level = level_for(verbosity);
        let handle = Logger::try_with_env_or_str(level)?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()?;
        debug!(
            "event=logging_init level={level} version={}",
            env!("CARGO_PKG_VERSION")
        );
        Ok::<_, FlexiLoggerError>(handle)
    })?;
    Ok(())
}
