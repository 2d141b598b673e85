use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;

/// HTTP stack modules whose logs are dropped below Trace.
const FILTERED_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "tower", "axum"];

pub struct Logger {}

impl Logger {
    /// Installs the global logger: the terminal always, plus `log_file` when configured.
    ///
    /// A log file that cannot be opened is reported on stderr and skipped.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;
        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
            level,
            Self::build_log_config(level),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )];

        if let Some(path) = config.log_file() {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    loggers.push(WriteLogger::new(level, Self::build_log_config(level), file))
                }
                Err(e) => eprintln!("Unable to open log file {path}: {e}"),
            }
        }

        CombinedLogger::init(loggers)
    }

    /// Builds a simplelog Config with RFC 3339 timestamps.
    ///
    /// Dependency logs are kept only at Trace.
    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if level != LevelFilter::Trace {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(*module);
            }
        }

        builder.build()
    }
}
