use crate::error::ExamError;
use crate::models::Question;
use crate::parser::parse_document;
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_EXTENSIONS: [&str; 2] = ["txt", "md"];

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Text documents in `dir`, sorted by path. A missing directory yields none.
pub fn get_document_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_document(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// Reads and parses one exam document.
pub fn load_document(path: &Path) -> Result<Vec<Question>, ExamError> {
    let bytes = fs::read(path).map_err(|source| ExamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    log::info!("parsing {} ({} bytes)", path.display(), bytes.len());

    let questions = parse_document(&content);
    if questions.is_empty() {
        return Err(ExamError::Parse {
            path: path.to_path_buf(),
        });
    }
    Ok(questions)
}
