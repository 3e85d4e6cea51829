use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_LEVEL_ENV: &str = "MCQ_LOG";
const LOG_FILE_ENV: &str = "MCQ_LOG_FILE";
const DEFAULT_LOG_NAME: &str = "mcq.log";

pub fn log_path() -> PathBuf {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return PathBuf::from(path);
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mcq-practice")
        .join(DEFAULT_LOG_NAME)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends `tracing` output to the log file, since the terminal UI owns stdout.
///
/// Logging is optional: if the file cannot be opened nothing is installed.
pub fn init() {
    let path = log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
