use crate::session::{ScoreStatus, SessionState};
use crate::ui::key_span;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::format_elapsed;
use crate::view::{feedback_line, score_line, QuestionView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, session: &SessionState) {
    let layout = calculate_quiz_chunks(f.area());
    let question = session.current_question();
    let view = QuestionView::from(question);

    let progress = format!(
        "Question {} of {} - {}",
        session.current_index() + 1,
        session.len(),
        session.mode().title()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(14)])
        .split(layout.status_area);

    let score = session.running_score();
    let score_color = if score.answered == 0 {
        Color::Yellow
    } else if score.status == ScoreStatus::Passing {
        Color::Green
    } else {
        Color::Red
    };
    f.render_widget(
        Paragraph::new(score_line(&score)).style(Style::default().fg(score_color)),
        status_chunks[0],
    );
    f.render_widget(
        Paragraph::new(format!("Time: {}", format_elapsed(session.elapsed())))
            .alignment(Alignment::Right),
        status_chunks[1],
    );

    let prompt = Paragraph::new(Text::from(view.prompt.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(view.title.as_str()));
    f.render_widget(prompt, layout.question_area);

    let selected = session.answer_for(question.number);
    let option_lines: Vec<Line> = view
        .rows
        .iter()
        .map(|row| {
            if !row.is_selectable() {
                return Line::from("");
            }
            let chosen = selected == Some(row.letter);
            let marker = if chosen { "(*) " } else { "( ) " };
            let style = if chosen {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{}{}", marker, row.label()), style))
        })
        .collect();
    let options = Paragraph::new(option_lines)
        .block(Block::default().borders(Borders::ALL).title("Answer Options"));
    f.render_widget(options, layout.options_area);

    let feedback = match session.current_feedback() {
        Some(feedback) => {
            let color = if feedback.correct {
                Color::Green
            } else {
                Color::Red
            };
            Paragraph::new(feedback_line(&feedback)).style(
                Style::default()
                    .fg(color)
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => Paragraph::new(""),
    };
    f.render_widget(
        feedback
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout.feedback_area,
    );

    let help_text = vec![Line::from(vec![
        key_span("a-d"),
        Span::from(" Answer  "),
        key_span("←/→"),
        Span::from(" Previous/Next  "),
        key_span("g"),
        Span::from(" Jump  "),
        key_span("s"),
        Span::from(" Submit Test  "),
        key_span("Esc"),
        Span::from(" Main Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
