pub mod app;
pub mod config;
pub mod db;
pub mod defaults;
pub mod documents;
pub mod error;
pub mod flashcards;
pub mod input;
pub mod logger;
pub mod models;
pub mod parser;
pub mod review;
pub mod session;
pub mod store;
pub mod ui;
pub mod utils;
pub mod view;

// Re-exports for convenience
pub use app::{App, Mode, Overlay};
pub use config::{Args, Config};
pub use documents::{get_document_files, load_document};
pub use error::{ExamError, StoreError};
pub use flashcards::{FlashcardSource, FlashcardState};
pub use models::{CorrectAnswer, OptionLetter, Question, QuestionBank, ReviewSet};
pub use parser::parse_document;
pub use session::{Grade, SessionState, TestMode};
pub use store::PersistenceStore;
pub use view::QuestionView;
