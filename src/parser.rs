//! Exam document parser.
//!
//! Documents follow one authoring convention. Each question is introduced by a
//! `**Question N**` header and carries, in order, a `**Question text**` marker
//! with the prompt, a `Question N Answer` marker with lettered option lines, a
//! `**Feedback**` marker with the explanation and a `The correct answer is:`
//! line. The text is first split into a flat stream of marker tokens, then
//! each header's block is cut into bounded windows between markers.

use crate::models::{AnswerOptions, CorrectAnswer, OptionLetter, Question};
use regex::Regex;
use std::collections::HashSet;

/// Number of leading option characters compared against the declared answer.
const ANSWER_PREFIX_CHARS: usize = 30;

lazy_static::lazy_static! {
    static ref MARKER_RE: Regex = Regex::new(concat!(
        r"(?P<header>\*\*Question (?P<number>\d+)\*\*)",
        r"|(?P<prompt>\*\*Question text\*\*)",
        r"|(?P<answer>Question \d+\s*Answer)",
        r"|(?P<feedback>\*\*Feedback\*\*)",
        r"|(?P<correct>The correct answer is:)",
    ))
    .expect("marker pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerKind {
    /// Block header; `None` when the number does not fit a `u32`.
    Header(Option<u32>),
    QuestionText,
    Answer,
    Feedback,
    CorrectAnswer,
}

impl MarkerKind {
    fn same_kind(self, other: MarkerKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: MarkerKind,
    pub start: usize,
    pub end: usize,
}

/// Why a block did not become a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRejection {
    InvalidNumber,
    MissingPrompt,
    TooFewOptions,
    MissingCorrectAnswer,
    DuplicateNumber,
}

pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if caps.name("header").is_some() {
                let number = caps.name("number").and_then(|m| m.as_str().parse().ok());
                MarkerKind::Header(number)
            } else if caps.name("prompt").is_some() {
                MarkerKind::QuestionText
            } else if caps.name("answer").is_some() {
                MarkerKind::Answer
            } else if caps.name("feedback").is_some() {
                MarkerKind::Feedback
            } else {
                MarkerKind::CorrectAnswer
            };
            Some(Token {
                kind,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// The text of one question block with its marker tokens.
struct Block<'a> {
    number: Option<u32>,
    text: &'a str,
    /// Token offsets are relative to the start of the whole document.
    tokens: &'a [Token],
    offset: usize,
}

impl<'a> Block<'a> {
    /// Text between the first `open` marker and the first `close` marker after it.
    fn window(&self, open: MarkerKind, close: MarkerKind) -> Option<&'a str> {
        let open_at = self.tokens.iter().position(|t| t.kind.same_kind(open))?;
        let open_tok = self.tokens[open_at];
        let close_tok = self.tokens[open_at + 1..]
            .iter()
            .find(|t| t.kind.same_kind(close))?;
        Some(&self.text[open_tok.end - self.offset..close_tok.start - self.offset])
    }

    /// Everything after the first marker of `kind` up to the end of the block.
    fn after(&self, kind: MarkerKind) -> Option<&'a str> {
        let tok = self.tokens.iter().find(|t| t.kind.same_kind(kind))?;
        Some(&self.text[tok.end - self.offset..])
    }
}

fn split_blocks<'a>(text: &'a str, tokens: &'a [Token]) -> Vec<Block<'a>> {
    let headers: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t.kind, MarkerKind::Header(_)))
        .map(|(i, _)| i)
        .collect();

    let mut blocks = Vec::with_capacity(headers.len());
    for (n, &h) in headers.iter().enumerate() {
        let header = tokens[h];
        let next = headers.get(n + 1).copied();
        let end = next.map(|i| tokens[i].start).unwrap_or(text.len());
        let number = match header.kind {
            MarkerKind::Header(number) => number,
            _ => None,
        };
        blocks.push(Block {
            number,
            text: &text[header.end..end],
            tokens: &tokens[h + 1..next.unwrap_or(tokens.len())],
            offset: header.end,
        });
    }
    blocks
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Recognizes `a.`, `a\.` and `a)` at the start of a line and returns the
/// letter together with the rest of the line.
fn option_line_start(line: &str) -> Option<(OptionLetter, &str)> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let first = chars.next()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    let letter = OptionLetter::from_char(first)?;
    let rest = chars.as_str();
    let rest = rest
        .strip_prefix("\\.")
        .or_else(|| rest.strip_prefix('.'))
        .or_else(|| rest.strip_prefix(')'))?;
    Some((letter, rest))
}

fn clean_option_text(raw: &str) -> Option<String> {
    let text = collapse_whitespace(raw).replace('\\', "");
    if text.is_empty() || text.starts_with("**") {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn extract_options(window: &str) -> AnswerOptions {
    let mut options = AnswerOptions::new();
    let mut current: Option<(OptionLetter, String)> = None;

    for line in window.lines() {
        if let Some((letter, rest)) = option_line_start(line) {
            if let Some((prev, raw)) = current.take()
                && let Some(text) = clean_option_text(&raw)
            {
                options.insert(prev, text);
            }
            current = Some((letter, rest.to_string()));
        } else if let Some((_, raw)) = current.as_mut() {
            raw.push('\n');
            raw.push_str(line);
        }
    }
    if let Some((letter, raw)) = current
        && let Some(text) = clean_option_text(&raw)
    {
        options.insert(letter, text);
    }
    options
}

/// Text declared after the correct-answer marker: leading whitespace (line
/// breaks included) is skipped and the rest of that line is taken.
fn declared_answer(after_marker: &str) -> Option<&str> {
    let rest = after_marker.trim_start();
    let line = rest.lines().next()?.trim();
    if line.is_empty() { None } else { Some(line) }
}

/// Maps the declared answer onto an option letter.
///
/// An option matches when its text is contained in the declared text, or when
/// the declared text starts with the option's first 30 characters. The first
/// matching option in display order wins. Failing that, a leading `a`-`d` in
/// the declared text is used if the block offers that letter, and otherwise
/// the declared text is kept as is.
pub fn resolve_correct_answer(declared: &str, options: &AnswerOptions) -> Option<CorrectAnswer> {
    if declared.is_empty() {
        return None;
    }
    let declared_lower = declared.to_lowercase();

    for (letter, text) in options.iter() {
        let option_lower = text.to_lowercase();
        let prefix: String = option_lower.chars().take(ANSWER_PREFIX_CHARS).collect();
        if declared_lower.contains(&option_lower) || declared_lower.starts_with(&prefix) {
            return Some(CorrectAnswer::Letter(letter));
        }
    }

    if let Some(letter) = declared_lower
        .chars()
        .next()
        .and_then(OptionLetter::from_char)
        .filter(|letter| options.contains(*letter))
    {
        return Some(CorrectAnswer::Letter(letter));
    }

    Some(CorrectAnswer::Unresolved(declared.to_string()))
}

fn build_question(block: &Block<'_>) -> Result<Question, BlockRejection> {
    let number = block.number.ok_or(BlockRejection::InvalidNumber)?;

    let prompt = block
        .window(MarkerKind::QuestionText, MarkerKind::Answer)
        .map(collapse_whitespace)
        .ok_or(BlockRejection::MissingPrompt)?;

    let options = block
        .window(MarkerKind::Answer, MarkerKind::Feedback)
        .map(extract_options)
        .unwrap_or_default();

    let feedback = block
        .window(MarkerKind::Feedback, MarkerKind::CorrectAnswer)
        .map(collapse_whitespace)
        .unwrap_or_default();

    let correct_answer = block
        .after(MarkerKind::CorrectAnswer)
        .and_then(declared_answer)
        .and_then(|declared| resolve_correct_answer(declared, &options));

    if options.len() < 2 {
        return Err(BlockRejection::TooFewOptions);
    }
    let correct_answer = correct_answer.ok_or(BlockRejection::MissingCorrectAnswer)?;

    Ok(Question {
        number,
        prompt,
        options,
        correct_answer,
        feedback,
    })
}

/// Parses every block of `text`, reporting each block's outcome in document order.
pub fn parse_blocks(text: &str) -> Vec<Result<Question, BlockRejection>> {
    let tokens = tokenize(text);
    let mut seen = HashSet::new();

    split_blocks(text, &tokens)
        .iter()
        .map(|block| {
            let question = build_question(block)?;
            if !seen.insert(question.number) {
                return Err(BlockRejection::DuplicateNumber);
            }
            Ok(question)
        })
        .collect()
}

/// Extracts the valid questions of a document. Malformed blocks are dropped.
pub fn parse_document(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    for (index, outcome) in parse_blocks(text).into_iter().enumerate() {
        match outcome {
            Ok(question) => questions.push(question),
            Err(reason) => log::debug!("dropping question block {}: {:?}", index + 1, reason),
        }
    }
    log::info!("parsed {} questions", questions.len());
    questions
}
