use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

static FILE_LOGGER: FileLogger = FileLogger;

/// Appends log records to the file opened by [`init`]. The terminal UI owns
/// stdout, so nothing is ever printed.
struct FileLogger;

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut guard) = LOG_FILE.lock() else {
            return;
        };
        if let Some(file) = guard.as_mut() {
            let timestamp = chrono::Utc::now().timestamp();
            let _ = writeln!(
                file,
                "[{}] {:<5} {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock()
            && let Some(file) = guard.as_mut()
        {
            let _ = file.flush();
        }
    }
}

/// Opens `path` for appending and installs the file logger. Calling it again
/// keeps the first file.
pub fn init(path: &Path) {
    if let Ok(mut guard) = LOG_FILE.lock()
        && guard.is_none()
    {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
            *guard = Some(file);
        }
    }

    if log::set_logger(&FILE_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    lazy_static::lazy_static! {
        static ref LOG_DIR: tempfile::TempDir = tempfile::tempdir().unwrap();
    }

    // The logger is process-wide, so every test shares one file.
    fn log_path() -> std::path::PathBuf {
        LOG_DIR.path().join("exam_prep.log")
    }

    fn logged_line(message: &str) -> String {
        log::logger().flush();
        std::fs::read_to_string(log_path())
            .unwrap()
            .lines()
            .find(|line| line.ends_with(message))
            .map(str::to_string)
            .unwrap_or_else(|| panic!("no log line for {:?}", message))
    }

    fn assert_timestamp_prefix(line: &str) {
        let rest = line.strip_prefix('[').unwrap();
        let (secs, _) = rest.split_once("] ").unwrap();
        assert!(secs.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_logger_init_is_idempotent() {
        init(&log_path());
        init(&LOG_DIR.path().join("other.log"));
        log::info!("logger initialised twice");

        let line = logged_line("logger initialised twice");
        assert_timestamp_prefix(&line);
        assert!(line.contains("] INFO  exam_prep::logger::tests: logger initialised twice"));
        assert!(!LOG_DIR.path().join("other.log").exists());
    }

    #[test]
    fn test_logger_log() {
        init(&log_path());
        log::debug!("Test log message");

        let line = logged_line("Test log message");
        assert_timestamp_prefix(&line);
        assert!(line.contains("] DEBUG exam_prep::logger::tests: Test log message"));
    }
}
