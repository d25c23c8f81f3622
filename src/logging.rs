//! Process-wide logging through `log`, dispatched by fern.

use crate::config::LoggingConfig;
use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

/// Map a config level string onto a filter; unknown values mean `Info`.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger. Output goes to stderr so command results on
/// stdout stay clean, plus the configured file if any.
pub fn setup_logging(cfg: &LoggingConfig) -> Result<(), fern::InitError> {
    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level_filter(&cfg.level))
        .chain(std::io::stderr());

    if let Some(path) = &cfg.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
