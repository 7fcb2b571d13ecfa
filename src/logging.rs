use log::{LevelFilter, Metadata, Record};
use std::sync::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use chrono::Local;

/// Appends log records to a file. The terminal UI owns stdout, so this is the
/// diagnostic channel while it runs.
pub struct FileLogger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn new(log_file: &Path, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            // Nowhere to report a failed log write.
            let _ = writeln!(
                file,
                "{} [{}] {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

pub fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger: the file logger when a path is given,
/// env_logger otherwise.
pub fn init(log_file: Option<&Path>, debug: bool) -> Result<(), LogInitError> {
    let level = level(debug);
    match log_file {
        Some(path) => {
            let logger = FileLogger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::from_default_env()
                .filter_level(level)
                .try_init()?;
        }
    }
    Ok(())
}
