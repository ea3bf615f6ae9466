// src/logging.rs
//
// File sink for the `log` facade. Lines look like
//   [00:00:01.234][INFO] appended row 7 to 'stats'
// and go to `.store/debug.log` so the terminal stays free for prompts.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
    lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>, level: LevelFilter) -> Self {
        Self { path: path.into(), level, lock: Mutex::new(()) }
    }

    fn format_line(level: &str, target: &str, msg: &str) -> String {
        let elapsed = fmt_elapsed(start().elapsed().as_millis());
        if target.is_empty() || target.starts_with("goal_scorer") {
            format!("[{elapsed}][{level}] {msg}\n")
        } else {
            format!("[{elapsed}][{level}][{target}] {msg}\n")
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) { return; }
        let line = Self::format_line(
            record.level().as_str(),
            record.target(),
            &record.args().to_string(),
        );

        if let Ok(_guard) = self.lock.lock() {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
            {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// Install the file logger as the global `log` backend.
/// Creates the log directory if needed. Calling twice is a no-op.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            crate::file::ensure_directory(parent)?;
        }
    }
    start();
    let logger = FileLogger::new(path, level);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}
