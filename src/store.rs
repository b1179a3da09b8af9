//! JSON persistence for the question bank and the review set.
//!
//! The two records live in separate files and are written independently.
//! Every save replaces the whole file through a temporary sibling and a
//! rename, so a crash never leaves a half-written record behind.

use crate::error::StoreError;
use crate::models::{Provenance, Question, QuestionBank, ReviewSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const TEST_DATA_FILE: &str = "saved_test_data.json";
pub const PROGRESS_FILE: &str = "saved_progress.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub loaded_from_file: bool,
    #[serde(default)]
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub wrong_questions: Vec<Question>,
    #[serde(default)]
    pub timestamp: f64,
}

/// What [`PersistenceStore::load`] found. `None` means the caller applies its
/// default for that record.
#[derive(Debug, Default)]
pub struct LoadedState {
    pub bank: Option<QuestionBank>,
    pub review_set: Option<ReviewSet>,
}

fn now_timestamp() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

fn questions_are_consistent(questions: &[Question]) -> bool {
    let mut numbers = HashSet::new();
    questions
        .iter()
        .all(|q| q.is_well_formed() && numbers.insert(q.number))
}

#[derive(Debug, Clone)]
pub struct PersistenceStore {
    dir: PathBuf,
}

impl PersistenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn test_data_path(&self) -> PathBuf {
        self.dir.join(TEST_DATA_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_FILE)
    }

    /// Reads both records. Missing, unreadable or corrupt files are reported
    /// as absent and logged.
    pub fn load(&self) -> LoadedState {
        let bank = match self.read_record::<TestData>(&self.test_data_path()) {
            Ok(Some(data)) if data.questions.is_empty() => {
                log::info!("saved test data holds no questions");
                None
            }
            Ok(Some(data)) if !questions_are_consistent(&data.questions) => {
                log::warn!("saved test data failed validation, ignoring it");
                None
            }
            Ok(Some(data)) => {
                let provenance = if data.loaded_from_file {
                    Provenance::Uploaded
                } else {
                    Provenance::BundledDefault
                };
                log::info!("loaded {} questions from saved file", data.questions.len());
                Some(QuestionBank::new(data.questions, provenance))
            }
            Ok(None) => {
                log::info!("no saved test data found");
                None
            }
            Err(e) => {
                log::error!("error loading test data: {}", e);
                None
            }
        };

        let review_set = match self.read_record::<ProgressData>(&self.progress_path()) {
            Ok(Some(data)) if !questions_are_consistent(&data.wrong_questions) => {
                log::warn!("saved progress failed validation, ignoring it");
                None
            }
            Ok(Some(data)) => {
                log::info!(
                    "loaded {} wrong questions from saved file",
                    data.wrong_questions.len()
                );
                Some(ReviewSet::new(data.wrong_questions))
            }
            Ok(None) => {
                log::info!("no saved progress data found");
                None
            }
            Err(e) => {
                log::error!("error loading progress data: {}", e);
                None
            }
        };

        LoadedState { bank, review_set }
    }

    pub fn save_bank(&self, bank: &QuestionBank) -> Result<(), StoreError> {
        let data = TestData {
            questions: bank.questions().to_vec(),
            loaded_from_file: bank.is_uploaded(),
            timestamp: now_timestamp(),
        };
        self.write_record(&self.test_data_path(), &data)?;
        log::info!("saved {} questions to {}", bank.len(), TEST_DATA_FILE);
        Ok(())
    }

    pub fn save_review_set(&self, review_set: &ReviewSet) -> Result<(), StoreError> {
        let data = ProgressData {
            wrong_questions: review_set.questions().to_vec(),
            timestamp: now_timestamp(),
        };
        self.write_record(&self.progress_path(), &data)?;
        log::info!(
            "saved {} wrong questions to {}",
            review_set.len(),
            PROGRESS_FILE
        );
        Ok(())
    }

    /// Removes both records. Files that do not exist are not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        for path in [self.test_data_path(), self.progress_path()] {
            match fs::remove_file(&path) {
                Ok(()) => log::info!("removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn read_record<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_record<T: Serialize>(&self, path: &Path, data: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = path.with_extension("json.tmp");
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOptions, CorrectAnswer, OptionLetter};

    fn question(number: u32, correct: CorrectAnswer) -> Question {
        Question {
            number,
            prompt: format!("Prompt {}", number),
            options: [
                (OptionLetter::C, "Gamma"),
                (OptionLetter::A, "Alpha"),
                (OptionLetter::B, "Beta"),
            ]
            .into_iter()
            .collect::<AnswerOptions>(),
            correct_answer: correct,
            feedback: format!("Feedback {}", number),
        }
    }

    #[test]
    fn test_bank_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        let bank = QuestionBank::new(
            vec![
                question(3, CorrectAnswer::Letter(OptionLetter::A)),
                question(1, CorrectAnswer::Unresolved("Neither answer".to_string())),
            ],
            Provenance::Uploaded,
        );

        store.save_bank(&bank).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.bank, Some(bank));
        assert!(loaded.review_set.is_none());
    }

    #[test]
    fn test_unresolved_letter_answer_round_trip() {
        let doc = "**Question 8**\n**Question text**\nWhich clause applies?\nQuestion 8Answer\na. Alpha\nb. Beta\n**Feedback**\nSee the contract.\nThe correct answer is: c\n";
        let questions = crate::parser::parse_document(doc);
        assert_eq!(
            questions[0].correct_answer,
            CorrectAnswer::Unresolved("c".to_string())
        );

        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        let bank = QuestionBank::new(questions, Provenance::Uploaded);
        store.save_bank(&bank).unwrap();

        assert_eq!(store.load().bank, Some(bank));
    }

    #[test]
    fn test_review_set_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        let set = ReviewSet::new(vec![question(2, CorrectAnswer::Letter(OptionLetter::B))]);

        store.save_review_set(&set).unwrap();
        assert_eq!(store.load().review_set, Some(set));
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());

        let first = ReviewSet::new(vec![
            question(1, CorrectAnswer::Letter(OptionLetter::A)),
            question(2, CorrectAnswer::Letter(OptionLetter::A)),
        ]);
        let second = ReviewSet::new(vec![question(2, CorrectAnswer::Letter(OptionLetter::A))]);
        store.save_review_set(&first).unwrap();
        store.save_review_set(&second).unwrap();

        assert_eq!(store.load().review_set, Some(second));
        assert!(!dir.path().join("saved_progress.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PersistenceStore::new(dir.path().join("nowhere")).load();
        assert!(loaded.bank.is_none());
        assert!(loaded.review_set.is_none());
    }

    #[test]
    fn test_corrupt_record_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        let set = ReviewSet::new(vec![question(2, CorrectAnswer::Letter(OptionLetter::B))]);
        store.save_review_set(&set).unwrap();
        fs::write(store.test_data_path(), "{ not json").unwrap();

        let loaded = store.load();
        assert!(loaded.bank.is_none());
        assert_eq!(loaded.review_set, Some(set));
    }

    #[test]
    fn test_empty_question_list_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        fs::write(
            store.test_data_path(),
            r#"{"questions": [], "loadedFromFile": true, "timestamp": 1.5}"#,
        )
        .unwrap();
        assert!(store.load().bank.is_none());
    }

    #[test]
    fn test_saved_json_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        let bank = QuestionBank::new(
            vec![question(1, CorrectAnswer::Letter(OptionLetter::C))],
            Provenance::Uploaded,
        );
        store.save_bank(&bank).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.test_data_path()).unwrap()).unwrap();
        assert_eq!(raw["loadedFromFile"], serde_json::Value::Bool(true));
        assert!(raw["timestamp"].as_f64().unwrap() > 0.0);
        assert_eq!(raw["questions"][0]["correctAnswer"], "c");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersistenceStore::new(dir.path());
        store.save_bank(&QuestionBank::bundled()).unwrap();
        store.save_review_set(&ReviewSet::default()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.test_data_path().exists());
        assert!(!store.progress_path().exists());
    }
}
