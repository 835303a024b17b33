//! File logging. The terminal belongs to the UI, so events go to
//! `<config dir>/coinsift/coinsift.log`.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub fn log_path() -> PathBuf {
    Config::config_dir().join("coinsift.log")
}

/// Installs the global subscriber. Returns the log file path, or `None` when
/// the file cannot be opened, in which case logging stays off. Later calls
/// leave the first subscriber in place.
pub fn init(level: &str) -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_sits_next_to_config() {
        let path = log_path();
        assert_eq!(path.file_name().unwrap(), "coinsift.log");
        assert_eq!(path.parent().unwrap(), Config::config_dir());
    }
}
