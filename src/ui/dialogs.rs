use crate::app::{Notice, NoticeKind};
use crate::ui::key_span;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::path::{Path, PathBuf};

fn draw_confirmation(f: &mut Frame, title: &str, message: &[&str], yes: &str, no: &str) {
    let height = message.len() as u16 + 6;
    let area = centered_rect(60, height, f.area());
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = message.iter().map(|m| Line::from(*m)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}  ", yes)),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}", no)),
    ]));

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        );
    f.render_widget(dialog, area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    draw_confirmation(
        f,
        "Quit to Menu",
        &["Return to main menu?", "Answers in this test will be discarded."],
        "Yes (Return to Menu)",
        "No (Continue Test)",
    );
}

pub fn draw_clear_confirmation(f: &mut Frame) {
    draw_confirmation(
        f,
        "Clear Saved Data",
        &[
            "This will clear your uploaded test file",
            "and your study progress (wrong questions).",
            "Are you sure you want to continue?",
        ],
        "Yes (Clear)",
        "No (Keep)",
    );
}

pub fn draw_jump_prompt(f: &mut Frame, buffer: &str, max: usize) {
    let area = centered_rect(44, 5, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(format!("Enter question number (1-{}):", max)),
        Line::from(vec![
            Span::styled(
                format!("{}_", buffer),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            key_span("Enter"),
            Span::from(" Jump  "),
            key_span("Esc"),
            Span::from(" Cancel"),
        ]),
    ];
    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Jump to Question"));
    f.render_widget(prompt, area);
}

pub fn draw_document_picker(f: &mut Frame, dir: &Path, files: &[PathBuf], selected: usize) {
    let height = (files.len() as u16).saturating_add(4).min(20);
    let area = centered_rect(70, height, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(name).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Upload Test File - {}", dir.display()))
            .title_bottom(Line::from(" Enter Load  Esc Cancel ").alignment(Alignment::Center))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

pub fn draw_notice(f: &mut Frame, notice: &Notice) {
    let (title, color) = match notice.kind {
        NoticeKind::Info => ("Info", Color::Green),
        NoticeKind::Error => ("Error", Color::Red),
    };
    let area = f.area();
    let width = area.width.saturating_sub(4).min(80);
    let notice_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.saturating_sub(6),
        width,
        area.height.min(4),
    );
    f.render_widget(Clear, notice_area);

    let text = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(text, notice_area);
}
