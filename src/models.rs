use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the four option letters an exam question can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Accepts `a`-`d` in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(OptionLetter::A),
            'b' => Some(OptionLetter::B),
            'c' => Some(OptionLetter::C),
            'd' => Some(OptionLetter::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'a',
            OptionLetter::B => 'b',
            OptionLetter::C => 'c',
            OptionLetter::D => 'd',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLetter::A => "a",
            OptionLetter::B => "b",
            OptionLetter::C => "c",
            OptionLetter::D => "d",
        }
    }

    pub fn upper(self) -> char {
        self.as_char().to_ascii_uppercase()
    }

    pub fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upper())
    }
}

/// Lettered answer options in display order.
///
/// Serialized as a JSON object whose key order is the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerOptions {
    entries: Vec<(OptionLetter, String)>,
}

impl AnswerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option. A repeated letter replaces the text but keeps its
    /// original display position.
    pub fn insert(&mut self, letter: OptionLetter, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|(l, _)| *l == letter) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((letter, text)),
        }
    }

    pub fn get(&self, letter: OptionLetter) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, letter: OptionLetter) -> bool {
        self.get(letter).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        self.entries.iter().map(|(l, t)| (*l, t.as_str()))
    }

    pub fn letters(&self) -> impl Iterator<Item = OptionLetter> + '_ {
        self.entries.iter().map(|(l, _)| *l)
    }
}

impl<S: Into<String>> FromIterator<(OptionLetter, S)> for AnswerOptions {
    fn from_iter<I: IntoIterator<Item = (OptionLetter, S)>>(iter: I) -> Self {
        let mut options = AnswerOptions::new();
        for (letter, text) in iter {
            options.insert(letter, text);
        }
        options
    }
}

impl Serialize for AnswerOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (letter, text) in &self.entries {
            map.serialize_entry(letter.as_str(), text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = AnswerOptions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from option letters a-d to option text")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut options = AnswerOptions::new();
                while let Some((key, text)) = access.next_entry::<String, String>()? {
                    let letter = single_letter(&key).ok_or_else(|| {
                        de::Error::invalid_value(de::Unexpected::Str(&key), &"one of a, b, c, d")
                    })?;
                    options.insert(letter, text);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

fn single_letter(s: &str) -> Option<OptionLetter> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => OptionLetter::from_char(c),
        _ => None,
    }
}

/// The declared correct answer of a question.
///
/// Documents sometimes declare an answer that cannot be mapped onto one of the
/// options; the declared text is kept verbatim in that case and no selection
/// will ever match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectAnswer {
    Letter(OptionLetter),
    Unresolved(String),
}

impl CorrectAnswer {
    pub fn letter(&self) -> Option<OptionLetter> {
        match self {
            CorrectAnswer::Letter(letter) => Some(*letter),
            CorrectAnswer::Unresolved(_) => None,
        }
    }

    pub fn is_correct(&self, selected: OptionLetter) -> bool {
        self.letter() == Some(selected)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Letter(_) => false,
            CorrectAnswer::Unresolved(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectAnswer::Letter(letter) => write!(f, "{}", letter),
            CorrectAnswer::Unresolved(text) => write!(f, "{}", text.to_uppercase()),
        }
    }
}

impl Serialize for CorrectAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CorrectAnswer::Letter(letter) => serializer.serialize_str(letter.as_str()),
            CorrectAnswer::Unresolved(text) => serializer.serialize_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredQuestion")]
pub struct Question {
    pub number: u32,
    pub prompt: String,
    pub options: AnswerOptions,
    pub correct_answer: CorrectAnswer,
    pub feedback: String,
}

/// On-disk form of a [`Question`]. The correct answer is a plain string that
/// only becomes a letter when the question offers that option.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQuestion {
    number: u32,
    prompt: String,
    options: AnswerOptions,
    correct_answer: String,
    feedback: String,
}

impl From<StoredQuestion> for Question {
    fn from(stored: StoredQuestion) -> Self {
        let correct_answer = match single_letter(&stored.correct_answer)
            .filter(|letter| stored.options.contains(*letter))
        {
            Some(letter) => CorrectAnswer::Letter(letter),
            None => CorrectAnswer::Unresolved(stored.correct_answer),
        };
        Self {
            number: stored.number,
            prompt: stored.prompt,
            options: stored.options,
            correct_answer,
            feedback: stored.feedback,
        }
    }
}

impl Question {
    /// Text of the correct option, when the answer resolved to a letter.
    pub fn correct_option_text(&self) -> Option<&str> {
        self.correct_answer
            .letter()
            .and_then(|letter| self.options.get(letter))
    }

    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && !self.correct_answer.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Uploaded,
    BundledDefault,
}

/// The full set of currently loaded questions.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    provenance: Provenance,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, provenance: Provenance) -> Self {
        Self {
            questions,
            provenance,
        }
    }

    pub fn bundled() -> Self {
        Self::new(crate::defaults::default_questions(), Provenance::BundledDefault)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_uploaded(&self) -> bool {
        self.provenance == Provenance::Uploaded
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Questions missed in the most recently submitted test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewSet {
    questions: Vec<Question>,
}

impl ReviewSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
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
}
