use crate::flashcards::{CardPhase, FlashcardSource, FlashcardState};
use crate::ui::key_span;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_flashcards(f: &mut Frame, cards: &FlashcardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(f.area());

    if cards.phase() == CardPhase::Complete {
        draw_complete(f, cards, chunks[1]);
        return;
    }

    let header = Paragraph::new(format!(
        "{} - Card {} of {}",
        cards.source().title(),
        cards.current_index() + 1,
        cards.len()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let card = cards.current_card();
    let mut question_text = Text::default();
    question_text.push_line(Line::from(card.prompt.as_str()));
    question_text.push_line(Line::from(""));
    for (letter, text) in card.options.iter() {
        question_text.push_line(Line::from(format!("{}. {}", letter, text)));
    }
    let question = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Question {}", card.number)),
        );
    f.render_widget(question, chunks[1]);

    let answer_text = if cards.phase() == CardPhase::Revealed {
        let correct = match card.correct_option_text() {
            Some(text) => format!("{}. {}", card.correct_answer, text),
            None => card.correct_answer.to_string(),
        };
        let mut text = Text::default();
        text.push_line(Line::from(Span::styled(
            "Correct Answer:",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(correct));
        if !card.feedback.is_empty() {
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "Explanation:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(card.feedback.as_str()));
        }
        text
    } else {
        Text::from(Span::styled(
            "[Think of your answer, then press Space to reveal]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    };
    let answer = Paragraph::new(answer_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answer"));
    f.render_widget(answer, chunks[2]);

    let help_text = vec![Line::from(vec![
        key_span("Space"),
        Span::from(" Reveal  "),
        key_span("r"),
        Span::from(" Try Again  "),
        key_span("←/→"),
        Span::from(" Previous/Next  "),
        key_span("Esc"),
        Span::from(" Main Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn draw_complete(f: &mut Frame, cards: &FlashcardState, area: Rect) {
    let follow_up = match cards.source() {
        FlashcardSource::MiniReview => {
            "Great job studying your weak areas! Ready to test yourself?"
        }
        FlashcardSource::All => {
            "Excellent studying! Ready to take the full test?"
        }
    };
    let text = vec![
        Line::from(Span::styled(
            cards.source().completion_title(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("You've reviewed {} questions.", cards.len())),
        Line::from(follow_up),
        Line::from(""),
        Line::from("Press any key to return to the menu"),
    ];
    let complete = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(complete, area);
}
