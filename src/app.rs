//! Application state: one owned [`App`] whose [`Mode`] says what the screen is
//! doing, with an optional [`Overlay`] drawn on top of it.

use crate::db::attempts::{recent_attempts, record_attempt, AttemptSummary};
use crate::documents::{get_document_files, load_document};
use crate::error::ExamError;
use crate::flashcards::{FlashcardSource, FlashcardState};
use crate::models::{Provenance, Question, QuestionBank, ReviewSet};
use crate::review::ReviewSetManager;
use crate::session::{Launch, SessionResult, SessionState, TestMode};
use crate::store::PersistenceStore;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Attempts listed on the menu.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct ResultSummary {
    pub result: SessionResult,
}

impl ResultSummary {
    /// Whether the results screen offers the shortcut into the missed questions.
    pub fn offers_review(&self) -> bool {
        self.result.mode != TestMode::Mini && !self.result.review_set.is_empty()
    }
}

#[derive(Debug)]
pub enum Mode {
    Idle,
    InSession(SessionState),
    InFlashcards(FlashcardState),
    ShowingResults(ResultSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    QuitConfirm,
    ClearConfirm,
    JumpPrompt(String),
    DocumentPicker { files: Vec<PathBuf>, selected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Upload,
    FullTest,
    MiniTest,
    SampleTest,
    Flashcards,
    MiniFlashcards,
    ClearData,
    Quit,
}

const PERFECT_SCORE: &str = "Perfect score! You got every question right, there is nothing to review.";

pub struct App {
    bank: QuestionBank,
    review_set: ReviewSet,
    store: PersistenceStore,
    reviews: ReviewSetManager,
    history: Option<Connection>,
    documents_dir: PathBuf,
    attempts: Vec<AttemptSummary>,
    pub mode: Mode,
    pub overlay: Option<Overlay>,
    pub notice: Option<Notice>,
    pub menu_index: usize,
    pub should_quit: bool,
}

impl App {
    /// Restores saved state from `store`, falling back to the bundled bank and
    /// an empty review set.
    pub fn load(store: PersistenceStore, history: Option<Connection>, documents_dir: PathBuf) -> Self {
        let loaded = store.load();
        let bank = loaded.bank.unwrap_or_else(|| {
            log::info!("using bundled default questions");
            QuestionBank::bundled()
        });
        let mut app = Self {
            bank,
            review_set: loaded.review_set.unwrap_or_default(),
            reviews: ReviewSetManager::new(store.clone()),
            store,
            history,
            documents_dir,
            attempts: Vec::new(),
            mode: Mode::Idle,
            overlay: None,
            notice: None,
            menu_index: 0,
            should_quit: false,
        };
        app.refresh_attempts();
        app
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn review_set(&self) -> &ReviewSet {
        &self.review_set
    }

    pub fn attempts(&self) -> &[AttemptSummary] {
        &self.attempts
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Menu entries available for the current bank and review set.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::Upload, MenuItem::FullTest, MenuItem::Flashcards];
        if !self.review_set.is_empty() {
            items.push(MenuItem::MiniTest);
            items.push(MenuItem::MiniFlashcards);
        }
        if self.bank.provenance() == Provenance::BundledDefault {
            items.push(MenuItem::SampleTest);
        }
        if self.bank.is_uploaded() || !self.review_set.is_empty() {
            items.push(MenuItem::ClearData);
        }
        items.push(MenuItem::Quit);
        items
    }

    pub fn menu_label(&self, item: MenuItem) -> String {
        match item {
            MenuItem::Upload => "Upload Test File".to_string(),
            MenuItem::FullTest => format!("Start Full Test ({} Questions)", self.bank.len()),
            MenuItem::Flashcards => format!("Flash Cards ({} Questions)", self.bank.len()),
            MenuItem::MiniTest => format!("Take Mini Test ({} Questions)", self.review_set.len()),
            MenuItem::MiniFlashcards => {
                format!("Mini Flash Cards ({} Questions)", self.review_set.len())
            }
            MenuItem::SampleTest => format!("Sample Test ({} Questions)", self.bank.len()),
            MenuItem::ClearData => "Clear Saved Data".to_string(),
            MenuItem::Quit => "Exit Application".to_string(),
        }
    }

    pub fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::Upload => self.open_document_picker(),
            MenuItem::FullTest => self.start_test(TestMode::Full),
            MenuItem::MiniTest => self.start_test(TestMode::Mini),
            MenuItem::SampleTest => self.start_test(TestMode::Sample),
            MenuItem::Flashcards => self.start_flashcards(FlashcardSource::All),
            MenuItem::MiniFlashcards => self.start_flashcards(FlashcardSource::MiniReview),
            MenuItem::ClearData => self.overlay = Some(Overlay::ClearConfirm),
            MenuItem::Quit => self.should_quit = true,
        }
    }

    pub fn open_document_picker(&mut self) {
        let files = get_document_files(&self.documents_dir);
        if files.is_empty() {
            self.notice = Some(Notice::error(format!(
                "No .txt or .md files found in {}",
                self.documents_dir.display()
            )));
            return;
        }
        self.overlay = Some(Overlay::DocumentPicker { files, selected: 0 });
    }

    /// Replaces the bank with the questions parsed from `path`. On failure the
    /// bank is left untouched.
    pub fn import_document(&mut self, path: &Path) -> Result<usize, ExamError> {
        let questions = match load_document(path) {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("import of {} failed: {}", path.display(), e);
                self.notice = Some(Notice::error(e.to_string()));
                return Err(e);
            }
        };
        let count = questions.len();
        self.bank = QuestionBank::new(questions, Provenance::Uploaded);
        if let Err(e) = self.store.save_bank(&self.bank) {
            log::error!("error saving test data: {}", e);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.notice = Some(Notice::info(format!(
            "Loaded {} questions from {}. Test data saved.",
            count, name
        )));
        self.menu_index = 0;
        Ok(count)
    }

    fn questions_for(&self, mode: TestMode) -> &[Question] {
        match mode {
            TestMode::Full | TestMode::Sample => self.bank.questions(),
            TestMode::Mini => self.review_set.questions(),
        }
    }

    pub fn start_test(&mut self, mode: TestMode) {
        match SessionState::start(mode, self.questions_for(mode)) {
            Ok(Launch::Ready(session)) => {
                self.overlay = None;
                self.mode = Mode::InSession(session);
            }
            Ok(Launch::NothingToReview) => {
                self.mode = Mode::Idle;
                self.notice = Some(Notice::info(PERFECT_SCORE));
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    pub fn start_flashcards(&mut self, source: FlashcardSource) {
        let questions = match source {
            FlashcardSource::All => self.bank.questions(),
            FlashcardSource::MiniReview => self.review_set.questions(),
        };
        match FlashcardState::start(source, questions) {
            Ok(Launch::Ready(cards)) => {
                self.overlay = None;
                self.mode = Mode::InFlashcards(cards);
            }
            Ok(Launch::NothingToReview) => {
                self.mode = Mode::Idle;
                self.notice = Some(Notice::info(PERFECT_SCORE));
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    /// Ends the running test, replaces the review set and records the attempt.
    pub fn submit(&mut self) -> Result<(), ExamError> {
        let Mode::InSession(session) = &mut self.mode else {
            return Ok(());
        };
        let result = session.submit()?;

        self.reviews
            .replace(&mut self.review_set, result.review_set.clone());

        if let Some(conn) = &self.history
            && let Err(e) = record_attempt(conn, &result)
        {
            log::error!("error recording attempt: {}", e);
        }
        self.refresh_attempts();

        self.overlay = None;
        self.mode = Mode::ShowingResults(ResultSummary { result });
        Ok(())
    }

    /// Starts the finished mode again. A Mini retake uses the review set the
    /// submission just stored.
    pub fn retake(&mut self) {
        if let Mode::ShowingResults(summary) = &self.mode {
            let mode = summary.result.mode;
            self.start_test(mode);
        }
    }

    pub fn clear_saved_data(&mut self) {
        self.overlay = None;
        if let Err(e) = self.store.clear() {
            log::error!("error clearing saved data: {}", e);
            self.notice = Some(Notice::error(format!("Error clearing saved data: {}", e)));
            return;
        }
        self.bank = QuestionBank::bundled();
        self.review_set = ReviewSet::default();
        self.menu_index = 0;
        self.notice = Some(Notice::info(
            "All saved data has been cleared. Sample questions restored.",
        ));
    }

    pub fn return_to_menu(&mut self) {
        self.overlay = None;
        self.mode = Mode::Idle;
        let last = self.menu_items().len().saturating_sub(1);
        self.menu_index = self.menu_index.min(last);
    }

    fn refresh_attempts(&mut self) {
        let Some(conn) = &self.history else {
            return;
        };
        match recent_attempts(conn, HISTORY_LIMIT) {
            Ok(attempts) => self.attempts = attempts,
            Err(e) => log::error!("error reading attempt history: {}", e),
        }
    }
}
