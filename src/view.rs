use crate::models::{OptionLetter, Question};
use crate::session::{AnswerFeedback, RunningScore};

/// One row of the option table. `text` is `None` when the question does not
/// offer that letter; the row is still drawn, empty and unselectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub letter: OptionLetter,
    pub text: Option<String>,
}

impl OptionRow {
    pub fn is_selectable(&self) -> bool {
        self.text.is_some()
    }

    pub fn label(&self) -> String {
        match &self.text {
            Some(text) => format!("{}. {}", self.letter, text),
            None => String::new(),
        }
    }
}

/// Everything the question screen shows for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub title: String,
    pub prompt: String,
    pub rows: [OptionRow; 4],
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let rows = OptionLetter::ALL.map(|letter| OptionRow {
            letter,
            text: question.options.get(letter).map(str::to_string),
        });
        Self {
            title: format!("Question {}", question.number),
            prompt: question.prompt.clone(),
            rows,
        }
    }
}

pub fn feedback_line(feedback: &AnswerFeedback) -> String {
    if feedback.correct {
        "CORRECT! Well done!".to_string()
    } else {
        format!(
            "INCORRECT. The correct answer is {}.",
            feedback.correct_answer
        )
    }
}

pub fn score_line(score: &RunningScore) -> String {
    let status = if score.answered == 0 {
        "Not Started"
    } else {
        score.status.label()
    };
    format!(
        "Score: {}/{} ({:.1}%) | Status: {}",
        score.correct, score.answered, score.percentage, status
    )
}
