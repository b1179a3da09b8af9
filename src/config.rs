use clap::Parser;
use std::path::PathBuf;

const APP_DIR: &str = "exam-prep";
const LOG_FILE: &str = "exam_prep.log";
const HISTORY_FILE: &str = "history.db";

#[derive(Debug, Parser)]
#[command(name = "exam-prep", version, about = "Terminal exam preparation with review of missed questions")]
pub struct Args {
    /// Directory holding saved test data, progress and history
    #[arg(long, env = "EXAM_PREP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory listed by the upload dialog
    #[arg(long, env = "EXAM_PREP_DOCUMENTS_DIR", default_value = "documents")]
    pub documents_dir: PathBuf,

    /// Parse this document before the menu opens
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Log file path (defaults to exam_prep.log in the data directory)
    #[arg(long, env = "EXAM_PREP_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub import: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        let log_file = args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
        Self {
            data_dir,
            documents_dir: args.documents_dir,
            import: args.import,
            log_file,
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

pub fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share").join(APP_DIR)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share").join(APP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["exam-prep", "--data-dir", "/tmp/exam"]).unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/exam"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/exam/exam_prep.log"));
        assert_eq!(config.history_path(), PathBuf::from("/tmp/exam/history.db"));
        assert!(config.import.is_none());
    }

    #[test]
    fn test_explicit_paths() {
        let args = Args::try_parse_from([
            "exam-prep",
            "--data-dir",
            "/tmp/exam",
            "--documents-dir",
            "/tmp/docs",
            "--import",
            "exam.txt",
            "--log-file",
            "/tmp/exam.log",
        ])
        .unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.documents_dir, PathBuf::from("/tmp/docs"));
        assert_eq!(config.import, Some(PathBuf::from("exam.txt")));
        assert_eq!(config.log_file, PathBuf::from("/tmp/exam.log"));
    }

    #[test]
    fn test_default_data_dir_is_app_specific() {
        assert!(default_data_dir().ends_with(APP_DIR));
    }
}
