use crate::models::{OptionLetter, Question, ReviewSet};
use crate::store::PersistenceStore;
use std::collections::HashMap;

/// Questions whose final answer is missing or wrong, as full copies in session order.
pub fn derive_review_set(questions: &[Question], answers: &HashMap<u32, OptionLetter>) -> ReviewSet {
    let missed = questions
        .iter()
        .filter(|q| {
            !answers
                .get(&q.number)
                .is_some_and(|letter| q.correct_answer.is_correct(*letter))
        })
        .cloned()
        .collect();
    ReviewSet::new(missed)
}

/// Owns the rule that each submitted test replaces the stored review set.
#[derive(Debug, Clone)]
pub struct ReviewSetManager {
    store: PersistenceStore,
}

impl ReviewSetManager {
    pub fn new(store: PersistenceStore) -> Self {
        Self { store }
    }

    /// Swaps `current` for `next` and writes it through. A failed write is
    /// logged; the in-memory set is replaced regardless.
    pub fn replace(&self, current: &mut ReviewSet, next: ReviewSet) {
        log::info!(
            "replacing review set of {} questions with {}",
            current.len(),
            next.len()
        );
        *current = next;
        if let Err(e) = self.store.save_review_set(current) {
            log::error!("error saving progress data: {}", e);
        }
    }
}
