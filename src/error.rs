use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the user while loading documents or driving a session.
#[derive(Debug, Error)]
pub enum ExamError {
    /// The document could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was readable but contained no usable question blocks.
    #[error("no valid questions found in {}", path.display())]
    Parse { path: PathBuf },

    /// A 1-based question number outside `1..=max`.
    #[error("question {requested} is out of range, enter a number between 1 and {max}")]
    OutOfRange { requested: usize, max: usize },

    #[error("no questions available, upload a test file first")]
    NoQuestions,

    #[error("this test has already been submitted")]
    SessionSubmitted,

    #[error("question {0} is not part of this test")]
    UnknownQuestion(u32),

    #[error("option {letter} is not available for question {number}")]
    InvalidOption { number: u32, letter: char },
}

/// Persistence failures. Callers log these instead of interrupting a session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
