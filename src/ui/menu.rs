use crate::app::App;
use crate::db::attempts::AttemptSummary;
use crate::models::Provenance;
use crate::ui::key_span;
use crate::utils::format_attempt_date;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn format_attempt_item(attempt: &AttemptSummary) -> String {
    format!(
        "{} - {} {}/{} ({:.1}%) Grade {}",
        format_attempt_date(attempt.completed_at),
        attempt.mode.title(),
        attempt.questions_correct,
        attempt.questions_total,
        attempt.percentage,
        attempt.grade
    )
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Real Estate Licensing Practice Test")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let bank = app.bank();
    let (source, color) = match bank.provenance() {
        Provenance::Uploaded => ("uploaded test file", Color::Green),
        Provenance::BundledDefault => ("sample questions", Color::Yellow),
    };
    let mut status_spans = vec![Span::styled(
        format!("{} questions loaded from {}", bank.len(), source),
        Style::default().fg(color),
    )];
    if !app.review_set().is_empty() {
        status_spans.push(Span::from(format!(
            "  |  {} questions to review",
            app.review_set().len()
        )));
    }
    let status = Paragraph::new(Line::from(status_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[1]);

    let items: Vec<ListItem> = app
        .menu_items()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.menu_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == app.menu_index { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, app.menu_label(item))).style(style)
        })
        .collect();
    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Menu")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(menu, chunks[2]);

    let history_items: Vec<ListItem> = if app.attempts().is_empty() {
        vec![ListItem::new("No attempts yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.attempts()
            .iter()
            .map(|attempt| ListItem::new(format_attempt_item(attempt)))
            .collect()
    };
    let history = List::new(history_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Attempts")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(history, chunks[3]);

    let help_text = vec![Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("Enter"),
        Span::from(" Select  "),
        key_span("u"),
        Span::from(" Upload  "),
        key_span("q/Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}
