mod config;
mod error;
mod format;
mod init;
mod level;
mod timer;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timer::{LoggerTimeZone, Rfc3339Timer};

/// Install the global tracing subscriber described by `cfg`.
///
/// Text and JSON output go to stderr so stdout stays free for command output. Call once, early
/// in `main`, before any runtime threads are started: the local offset for
/// [`LoggerTimeZone::Local`] is read here.
///
/// ```no_run
/// use gruns_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => init::text(cfg),
        LoggerFormat::Json => init::json(cfg),
        LoggerFormat::Journald => init::journald(cfg),
    }
}
