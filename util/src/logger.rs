//! Logging setup
//!
//! All executables log through the `log` facade, dispatched by `fern` to
//! stdout and the session's log file. Record timestamps are seconds since
//! the session epoch, so log lines correlate directly with archive rows.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::info;
use thiserror::Error;

// Internal imports
use crate::session::{self, Session};

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while setting up logging.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("The minimum log level must be at least `INFO`, got `{0}`")]
    MinLevelTooLow(LevelFilter),

    #[error("Could not open the log file: {0}")]
    LogFileError(std::io::Error),

    #[error("Could not register the logger: {0}")]
    SetLoggerError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Set up logging for this execution.
///
/// Shall be called exactly once, after the session is created. Records below
/// `min_level` are dropped, and the chatty `zmq` target is clamped to
/// `INFO`. `min_level` must admit `INFO` records, the session banner is
/// logged at that level.
pub fn logger_init(
    min_level: LevelFilter,
    session: &Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::MinLevelTooLow(min_level))
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            // The target is only interesting below INFO
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_tag(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_tag(record.level()),
                    message
                ))
            }
        })
        .level(min_level)
        .level_for("zmq", LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::SetLoggerError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Minimum level: {:?}", min_level);
    info!("    Log file: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Three letter colored tag for a log level
fn level_tag(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_rejects_coarse_min_level() {
        // A level which would filter out the session banner is refused
        // before any global logger state is touched
        let session = Session {
            session_root: PathBuf::new(),
            arch_root: PathBuf::new(),
            log_file_path: PathBuf::new(),
        };

        assert!(matches!(
            logger_init(LevelFilter::Warn, &session),
            Err(LoggerInitError::MinLevelTooLow(_))
        ));
        assert!(matches!(
            logger_init(LevelFilter::Off, &session),
            Err(LoggerInitError::MinLevelTooLow(_))
        ));
    }
}
