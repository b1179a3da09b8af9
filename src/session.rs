use crate::error::ExamError;
use crate::models::{CorrectAnswer, OptionLetter, Question, ReviewSet};
use crate::review::derive_review_set;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Running scores at or above this percentage are passing.
pub const PASSING_PERCENTAGE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Every question of the bank.
    Full,
    /// Only the questions missed in the last submitted test.
    Mini,
    /// The bundled sample bank.
    Sample,
}

impl TestMode {
    pub fn title(self) -> &'static str {
        match self {
            TestMode::Full => "Full Practice Test",
            TestMode::Mini => "Mini Test (Wrong Answers Only)",
            TestMode::Sample => "Sample Test",
        }
    }

    pub fn results_heading(self) -> &'static str {
        match self {
            TestMode::Mini => "MINI TEST RESULTS",
            TestMode::Full | TestMode::Sample => "FINAL TEST RESULTS",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestMode::Full => "full",
            TestMode::Mini => "mini",
            TestMode::Sample => "sample",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(TestMode::Full),
            "mini" => Some(TestMode::Mini),
            "sample" => Some(TestMode::Sample),
            _ => None,
        }
    }
}

/// Outcome of starting a test or a flashcard pass.
#[derive(Debug)]
pub enum Launch<T> {
    Ready(T),
    /// The review set is empty: the last test was answered perfectly.
    NothingToReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    Passing,
    NeedsImprovement,
}

impl ScoreStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScoreStatus::Passing => "PASSING",
            ScoreStatus::NeedsImprovement => "NEEDS IMPROVEMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningScore {
    pub correct: usize,
    pub answered: usize,
    pub percentage: f64,
    pub status: ScoreStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::A
        } else if percentage >= 80.0 {
            Grade::B
        } else if percentage >= PASSING_PERCENTAGE {
            Grade::C
        } else {
            Grade::F
        }
    }

    pub fn is_passing(self) -> bool {
        self != Grade::F
    }

    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::F => 'F',
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Grade::A => "EXCELLENT",
            Grade::B => "GOOD",
            Grade::C => "PASSING",
            Grade::F => "NEEDS IMPROVEMENT",
        }
    }
}

/// Live feedback for a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: CorrectAnswer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissedQuestion {
    pub question: Question,
    pub given: Option<OptionLetter>,
}

#[derive(Debug, Clone)]
pub struct SessionResult {
    pub mode: TestMode,
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub grade: Grade,
    pub elapsed: Duration,
    pub started_at: i64,
    pub missed: Vec<MissedQuestion>,
    pub review_set: ReviewSet,
}

/// One timed test run.
#[derive(Debug, Clone)]
pub struct SessionState {
    mode: TestMode,
    questions: Vec<Question>,
    answers: HashMap<u32, OptionLetter>,
    correct_count: usize,
    total_answered: usize,
    current_index: usize,
    started: Instant,
    started_at: i64,
    phase: SessionPhase,
}

impl SessionState {
    /// Starts a test over a copy of `questions`.
    ///
    /// An empty Mini test is the "nothing to review" outcome; an empty Full
    /// or Sample test is an error.
    pub fn start(mode: TestMode, questions: &[Question]) -> Result<Launch<Self>, ExamError> {
        if questions.is_empty() {
            return match mode {
                TestMode::Mini => Ok(Launch::NothingToReview),
                TestMode::Full | TestMode::Sample => Err(ExamError::NoQuestions),
            };
        }
        log::info!("{} started with {} questions", mode.title(), questions.len());
        Ok(Launch::Ready(Self {
            mode,
            questions: questions.to_vec(),
            answers: HashMap::new(),
            correct_count: 0,
            total_answered: 0,
            current_index: 0,
            started: Instant::now(),
            started_at: chrono::Utc::now().timestamp(),
            phase: SessionPhase::Active,
        }))
    }

    pub fn mode(&self) -> TestMode {
        self.mode
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn answer_for(&self, number: u32) -> Option<OptionLetter> {
        self.answers.get(&number).copied()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_answered(&self) -> usize {
        self.total_answered
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Records `letter` for question `number`, replacing any earlier choice.
    ///
    /// `total_answered` counts questions, not selections. `correct_count` is
    /// kept equal to the number of questions whose current choice is right.
    pub fn select_answer(
        &mut self,
        number: u32,
        letter: OptionLetter,
    ) -> Result<AnswerFeedback, ExamError> {
        if self.phase == SessionPhase::Submitted {
            return Err(ExamError::SessionSubmitted);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.number == number)
            .ok_or(ExamError::UnknownQuestion(number))?;
        if !question.options.contains(letter) {
            return Err(ExamError::InvalidOption {
                number,
                letter: letter.upper(),
            });
        }
        let correct_answer = question.correct_answer.clone();
        let now_correct = correct_answer.is_correct(letter);

        match self.answers.insert(number, letter) {
            None => {
                self.total_answered += 1;
                if now_correct {
                    self.correct_count += 1;
                }
            }
            Some(previous) => {
                let was_correct = correct_answer.is_correct(previous);
                if was_correct && !now_correct {
                    self.correct_count -= 1;
                } else if !was_correct && now_correct {
                    self.correct_count += 1;
                }
            }
        }

        Ok(AnswerFeedback {
            correct: now_correct,
            correct_answer,
        })
    }

    /// Selects `letter` for the question on screen.
    pub fn select_current(&mut self, letter: OptionLetter) -> Result<AnswerFeedback, ExamError> {
        let number = self.current_question().number;
        self.select_answer(number, letter)
    }

    /// Live feedback for the question on screen, if it has been answered.
    pub fn current_feedback(&self) -> Option<AnswerFeedback> {
        let question = self.current_question();
        let letter = self.answer_for(question.number)?;
        Some(AnswerFeedback {
            correct: question.correct_answer.is_correct(letter),
            correct_answer: question.correct_answer.clone(),
        })
    }

    /// Moves by `delta`, clamped to the question list.
    pub fn navigate(&mut self, delta: isize) {
        let last = self.questions.len().saturating_sub(1);
        let target = self.current_index.saturating_add_signed(delta);
        self.current_index = target.min(last);
    }

    /// Jumps to the 1-based position `n`.
    pub fn jump_to(&mut self, n: usize) -> Result<(), ExamError> {
        if n == 0 || n > self.questions.len() {
            return Err(ExamError::OutOfRange {
                requested: n,
                max: self.questions.len(),
            });
        }
        self.current_index = n - 1;
        Ok(())
    }

    /// Score over the questions answered so far.
    pub fn running_score(&self) -> RunningScore {
        let percentage = if self.total_answered > 0 {
            self.correct_count as f64 / self.total_answered as f64 * 100.0
        } else {
            0.0
        };
        let status = if percentage >= PASSING_PERCENTAGE {
            ScoreStatus::Passing
        } else {
            ScoreStatus::NeedsImprovement
        };
        RunningScore {
            correct: self.correct_count,
            answered: self.total_answered,
            percentage,
            status,
        }
    }

    /// Ends the test. Unanswered questions count as wrong.
    pub fn submit(&mut self) -> Result<SessionResult, ExamError> {
        if self.phase == SessionPhase::Submitted {
            return Err(ExamError::SessionSubmitted);
        }
        self.phase = SessionPhase::Submitted;

        let review_set = derive_review_set(&self.questions, &self.answers);
        let total = self.questions.len();
        let correct = total - review_set.len();
        let percentage = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let missed = review_set
            .questions()
            .iter()
            .map(|q| MissedQuestion {
                question: q.clone(),
                given: self.answer_for(q.number),
            })
            .collect();

        log::info!(
            "{} submitted: {}/{} correct, {} to review",
            self.mode.title(),
            correct,
            total,
            review_set.len()
        );

        Ok(SessionResult {
            mode: self.mode,
            correct,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            elapsed: self.elapsed(),
            started_at: self.started_at,
            missed,
            review_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionBank;

    fn ready(mode: TestMode, questions: &[Question]) -> SessionState {
        match SessionState::start(mode, questions).unwrap() {
            Launch::Ready(session) => session,
            Launch::NothingToReview => panic!("expected a session"),
        }
    }

    fn bank() -> Vec<Question> {
        QuestionBank::bundled().questions().to_vec()
    }

    fn answer_all_correctly(session: &mut SessionState) {
        let picks: Vec<(u32, OptionLetter)> = session
            .questions()
            .iter()
            .map(|q| (q.number, q.correct_answer.letter().unwrap()))
            .collect();
        for (number, letter) in picks {
            session.select_answer(number, letter).unwrap();
        }
    }

    #[test]
    fn test_empty_full_test_is_an_error() {
        assert!(matches!(
            SessionState::start(TestMode::Full, &[]),
            Err(ExamError::NoQuestions)
        ));
    }

    #[test]
    fn test_empty_mini_test_is_nothing_to_review() {
        assert!(matches!(
            SessionState::start(TestMode::Mini, &[]),
            Ok(Launch::NothingToReview)
        ));
    }

    #[test]
    fn test_session_copies_questions() {
        let mut questions = bank();
        let session = ready(TestMode::Mini, &questions);
        questions[0].options.insert(OptionLetter::A, "mutated later");

        assert_ne!(
            session.questions()[0].options.get(OptionLetter::A),
            Some("mutated later")
        );
    }

    #[test]
    fn test_reselection_counts_question_once() {
        let mut session = ready(TestMode::Full, &bank());

        for letter in [OptionLetter::A, OptionLetter::C, OptionLetter::B, OptionLetter::B] {
            session.select_answer(1, letter).unwrap();
        }
        assert_eq!(session.total_answered(), 1);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_correct_count_tracks_current_correctness() {
        let mut session = ready(TestMode::Full, &bank());

        let feedback = session.select_answer(1, OptionLetter::B).unwrap();
        assert!(feedback.correct);
        assert_eq!(session.correct_count(), 1);

        let feedback = session.select_answer(1, OptionLetter::A).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, CorrectAnswer::Letter(OptionLetter::B));
        assert_eq!(session.correct_count(), 0);

        session.select_answer(1, OptionLetter::B).unwrap();
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.total_answered(), 1);
    }

    #[test]
    fn test_select_rejects_unknown_question_and_option() {
        let mut questions = bank();
        questions[0].options = [(OptionLetter::A, "yes"), (OptionLetter::B, "no")]
            .into_iter()
            .collect();
        let mut session = ready(TestMode::Full, &questions);

        assert!(matches!(
            session.select_answer(99, OptionLetter::A),
            Err(ExamError::UnknownQuestion(99))
        ));
        assert!(matches!(
            session.select_answer(1, OptionLetter::D),
            Err(ExamError::InvalidOption { number: 1, letter: 'D' })
        ));
        assert_eq!(session.total_answered(), 0);
    }

    #[test]
    fn test_navigate_is_clamped() {
        let mut session = ready(TestMode::Full, &bank());
        session.navigate(-1);
        assert_eq!(session.current_index(), 0);

        for _ in 0..10 {
            session.navigate(1);
        }
        assert_eq!(session.current_index(), 4);

        session.navigate(-1);
        assert_eq!(session.current_index(), 3);
    }

    #[test]
    fn test_jump_to_range() {
        let mut session = ready(TestMode::Full, &bank());
        session.jump_to(3).unwrap();
        assert_eq!(session.current_index(), 2);

        assert!(matches!(
            session.jump_to(6),
            Err(ExamError::OutOfRange { requested: 6, max: 5 })
        ));
        assert!(session.jump_to(0).is_err());
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_running_score_ignores_unanswered() {
        let mut session = ready(TestMode::Full, &bank());
        let score = session.running_score();
        assert_eq!(score.percentage, 0.0);
        assert_eq!(score.status, ScoreStatus::NeedsImprovement);

        session.select_answer(1, OptionLetter::B).unwrap();
        let score = session.running_score();
        assert_eq!((score.correct, score.answered), (1, 1));
        assert_eq!(score.percentage, 100.0);
        assert_eq!(score.status, ScoreStatus::Passing);

        session.select_answer(2, OptionLetter::B).unwrap();
        assert_eq!(session.running_score().percentage, 50.0);
    }

    #[test]
    fn test_perfect_submission() {
        let mut session = ready(TestMode::Full, &bank());
        answer_all_correctly(&mut session);

        let result = session.submit().unwrap();
        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.grade, Grade::A);
        assert!(result.review_set.is_empty());
        assert!(result.missed.is_empty());
    }

    #[test]
    fn test_final_score_counts_unanswered_as_wrong() {
        let mut session = ready(TestMode::Full, &bank());
        session.select_answer(1, OptionLetter::B).unwrap();
        session.select_answer(2, OptionLetter::A).unwrap();
        session.select_answer(3, OptionLetter::D).unwrap();

        let result = session.submit().unwrap();
        assert_eq!((result.correct, result.total), (2, 5));
        assert_eq!(result.percentage, 40.0);
        assert_eq!(result.grade, Grade::F);

        let missed: Vec<(u32, Option<OptionLetter>)> = result
            .missed
            .iter()
            .map(|m| (m.question.number, m.given))
            .collect();
        assert_eq!(
            missed,
            vec![(3, Some(OptionLetter::D)), (4, None), (5, None)]
        );
        assert_eq!(result.review_set.questions()[0], bank()[2]);
    }

    #[test]
    fn test_submitted_session_is_terminal() {
        let mut session = ready(TestMode::Sample, &bank());
        session.submit().unwrap();

        assert_eq!(session.phase(), SessionPhase::Submitted);
        assert!(matches!(
            session.select_answer(1, OptionLetter::B),
            Err(ExamError::SessionSubmitted)
        ));
        assert!(matches!(session.submit(), Err(ExamError::SessionSubmitted)));
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percentage(100.0), Grade::A);
        assert_eq!(Grade::from_percentage(90.0), Grade::A);
        assert_eq!(Grade::from_percentage(89.9), Grade::B);
        assert_eq!(Grade::from_percentage(80.0), Grade::B);
        assert_eq!(Grade::from_percentage(75.0), Grade::C);
        assert!(Grade::from_percentage(75.0).is_passing());
        assert_eq!(Grade::from_percentage(74.9), Grade::F);
        assert!(!Grade::from_percentage(74.9).is_passing());
    }

    #[test]
    fn test_three_of_four_is_passing() {
        let questions = &bank()[..4];
        let mut session = ready(TestMode::Full, questions);
        session.select_answer(1, OptionLetter::B).unwrap();
        session.select_answer(2, OptionLetter::A).unwrap();
        session.select_answer(3, OptionLetter::A).unwrap();
        session.select_answer(4, OptionLetter::A).unwrap();

        assert_eq!(session.running_score().status, ScoreStatus::Passing);
        let result = session.submit().unwrap();
        assert_eq!(result.percentage, 75.0);
        assert_eq!(result.grade, Grade::C);
    }

    #[test]
    fn test_current_feedback_follows_navigation() {
        let mut session = ready(TestMode::Full, &bank());
        session.select_current(OptionLetter::C).unwrap();
        assert_eq!(session.current_feedback().map(|f| f.correct), Some(false));

        session.navigate(1);
        assert!(session.current_feedback().is_none());
    }

    #[test]
    fn test_mode_round_trips_through_str() {
        for mode in [TestMode::Full, TestMode::Mini, TestMode::Sample] {
            assert_eq!(TestMode::parse(mode.as_str()), Some(mode));
        }
    }
}
