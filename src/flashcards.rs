use crate::error::ExamError;
use crate::models::Question;
use crate::session::Launch;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardSource {
    All,
    MiniReview,
}

impl FlashcardSource {
    pub fn title(self) -> &'static str {
        match self {
            FlashcardSource::All => "Flash Cards",
            FlashcardSource::MiniReview => "Mini Flash Cards (Wrong Answers Only)",
        }
    }

    pub fn completion_title(self) -> &'static str {
        match self {
            FlashcardSource::All => "Flash Cards Complete",
            FlashcardSource::MiniReview => "Mini Flash Cards Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Hidden,
    Revealed,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashcardSummary {
    pub reviewed: usize,
    pub source: FlashcardSource,
}

#[derive(Debug, Clone)]
pub struct FlashcardState {
    source: FlashcardSource,
    cards: Vec<Question>,
    current_index: usize,
    phase: CardPhase,
}

impl FlashcardState {
    pub fn start(source: FlashcardSource, questions: &[Question]) -> Result<Launch<Self>, ExamError> {
        Self::start_with_rng(source, questions, &mut rand::thread_rng())
    }

    /// Starts a pass over a shuffled copy of `questions`.
    pub fn start_with_rng<R: Rng + ?Sized>(
        source: FlashcardSource,
        questions: &[Question],
        rng: &mut R,
    ) -> Result<Launch<Self>, ExamError> {
        if questions.is_empty() {
            return match source {
                FlashcardSource::MiniReview => Ok(Launch::NothingToReview),
                FlashcardSource::All => Err(ExamError::NoQuestions),
            };
        }
        let mut cards = questions.to_vec();
        cards.shuffle(rng);
        log::info!("{} started with {} cards", source.title(), cards.len());
        Ok(Launch::Ready(Self {
            source,
            cards,
            current_index: 0,
            phase: CardPhase::Hidden,
        }))
    }

    pub fn source(&self) -> FlashcardSource {
        self.source
    }

    pub fn cards(&self) -> &[Question] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_card(&self) -> &Question {
        &self.cards[self.current_index]
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn reveal(&mut self) {
        if self.phase == CardPhase::Hidden {
            self.phase = CardPhase::Revealed;
        }
    }

    pub fn retry(&mut self) {
        if self.phase == CardPhase::Revealed {
            self.phase = CardPhase::Hidden;
        }
    }

    /// Advances one card. Moving past the last card completes the pass.
    pub fn next(&mut self) -> Option<FlashcardSummary> {
        match self.phase {
            CardPhase::Complete => None,
            _ if self.current_index + 1 < self.cards.len() => {
                self.current_index += 1;
                self.phase = CardPhase::Hidden;
                None
            }
            _ => {
                self.phase = CardPhase::Complete;
                log::info!("{} finished", self.source.title());
                Some(FlashcardSummary {
                    reviewed: self.cards.len(),
                    source: self.source,
                })
            }
        }
    }

    /// Steps back one card. On the first card only the answer is hidden again.
    pub fn previous(&mut self) {
        if self.phase == CardPhase::Complete {
            return;
        }
        self.current_index = self.current_index.saturating_sub(1);
        self.phase = CardPhase::Hidden;
    }
}
