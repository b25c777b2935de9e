use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const APP_DIR_NAME: &str = "canvas-snake";
const LOG_FILE_NAME: &str = "canvas-snake.log";

/// Verbosity accepted on the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Routes the `log` facade into `path`.
///
/// The terminal belongs to the game while it runs, so records never go to
/// stdout or stderr.
pub fn init_file_logger(path: &Path, level: LogLevel) -> io::Result<()> {
    if level == LogLevel::Off {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(level.into(), config, File::create(path)?).map_err(io::Error::other)
}
