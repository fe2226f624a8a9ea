//! Debug logging to a file.
//!
//! Enable with the `--debug` flag. Records sent through the `log` facade are
//! written to `~/.sa-menu/debug.log`, since the terminal itself is taken by
//! the menu while it runs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebugLogError {
    #[error("failed to open debug log: {0}")]
    Open(#[from] std::io::Error),

    #[error("a logger is already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Logger writing one line per record to the debug log file.
struct FileLogger {
    file: Mutex<Option<File>>,
}

static LOGGER: FileLogger = FileLogger {
    file: Mutex::new(None),
};

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut guard) = self.file.lock()
            && let Some(ref mut file) = *guard
        {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
            let _ = file.write_all(format_line(&timestamp, record).as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock()
            && let Some(ref mut file) = *guard
        {
            let _ = file.flush();
        }
    }
}

/// Initialize the debug logging system.
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf, DebugLogError> {
    let log_path = get_log_path();

    // Create parent directory if needed
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    if let Ok(mut guard) = LOGGER.file.lock() {
        *guard = Some(file);
    }
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Trace);

    log::info!("debug log started");
    Ok(log_path)
}

/// Get the log file path.
pub fn get_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sa-menu")
        .join("debug.log")
}

fn format_line(timestamp: &str, record: &Record) -> String {
    format!(
        "[{}] {:<5} {}: {}\n",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}
