pub mod layout;
mod dialogs;
mod flashcards;
mod menu;
mod quiz;
mod results;

use crate::app::{App, Mode, Overlay};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

pub use layout::{calculate_quiz_chunks, calculate_results_chunks, centered_rect};

/// Draws the current mode, then any overlay and notice on top of it.
pub fn draw(f: &mut Frame, app: &App) {
    match &app.mode {
        Mode::Idle => menu::draw_menu(f, app),
        Mode::InSession(session) => quiz::draw_quiz(f, session),
        Mode::InFlashcards(cards) => flashcards::draw_flashcards(f, cards),
        Mode::ShowingResults(summary) => results::draw_results(f, summary),
    }

    match &app.overlay {
        Some(Overlay::QuitConfirm) => dialogs::draw_quit_confirmation(f),
        Some(Overlay::ClearConfirm) => dialogs::draw_clear_confirmation(f),
        Some(Overlay::JumpPrompt(buffer)) => {
            let max = match &app.mode {
                Mode::InSession(session) => session.len(),
                _ => 0,
            };
            dialogs::draw_jump_prompt(f, buffer, max);
        }
        Some(Overlay::DocumentPicker { files, selected }) => {
            dialogs::draw_document_picker(f, app.documents_dir(), files, *selected)
        }
        None => {}
    }

    if let Some(notice) = &app.notice {
        dialogs::draw_notice(f, notice);
    }
}

pub(crate) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
