use crate::app::{App, Mode, Notice, Overlay};
use crate::flashcards::{CardPhase, FlashcardSource, FlashcardState};
use crate::models::OptionLetter;
use crate::session::{SessionState, TestMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Routes one key press. An open overlay takes every key; otherwise the
/// current mode does.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.notice = None;

    if let Some(overlay) = app.overlay.take() {
        handle_overlay_input(app, overlay, key);
        return;
    }

    match &mut app.mode {
        Mode::Idle => handle_menu_input(app, key),
        Mode::InSession(session) => {
            if let Some(action) = handle_session_input(session, key, &mut app.notice) {
                apply_session_action(app, action);
            }
        }
        Mode::InFlashcards(cards) => {
            if handle_flashcard_input(cards, key) {
                app.return_to_menu();
            }
        }
        Mode::ShowingResults(_) => handle_results_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyEvent) {
    let items = app.menu_items();
    match key.code {
        KeyCode::Up => {
            if app.menu_index > 0 {
                app.menu_index -= 1;
            }
        }
        KeyCode::Down => {
            if app.menu_index < items.len().saturating_sub(1) {
                app.menu_index += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(item) = items.get(app.menu_index).copied() {
                app.activate(item);
            }
        }
        KeyCode::Char('u') => app.open_document_picker(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

/// What a session key asks of the surrounding app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    Submit,
    Overlay(OverlayRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayRequest {
    Quit,
    Jump,
}

fn handle_session_input(
    session: &mut SessionState,
    key: KeyEvent,
    notice: &mut Option<Notice>,
) -> Option<SessionAction> {
    match key.code {
        KeyCode::Esc => Some(SessionAction::Overlay(OverlayRequest::Quit)),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('n') => {
            session.navigate(1);
            None
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('p') => {
            session.navigate(-1);
            None
        }
        KeyCode::Char('g') => Some(SessionAction::Overlay(OverlayRequest::Jump)),
        KeyCode::Char('s') => Some(SessionAction::Submit),
        KeyCode::Char(c) => {
            if let Some(letter) = OptionLetter::from_char(c)
                && let Err(e) = session.select_current(letter)
            {
                *notice = Some(Notice::error(e.to_string()));
            }
            None
        }
        _ => None,
    }
}

fn apply_session_action(app: &mut App, action: SessionAction) {
    match action {
        SessionAction::Submit => {
            if let Err(e) = app.submit() {
                app.notice = Some(Notice::error(e.to_string()));
            }
        }
        SessionAction::Overlay(OverlayRequest::Quit) => app.overlay = Some(Overlay::QuitConfirm),
        SessionAction::Overlay(OverlayRequest::Jump) => {
            app.overlay = Some(Overlay::JumpPrompt(String::new()))
        }
    }
}

/// Returns `true` when the pass should end and the menu come back.
fn handle_flashcard_input(cards: &mut FlashcardState, key: KeyEvent) -> bool {
    if cards.phase() == CardPhase::Complete {
        return true;
    }
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char(' ') => cards.reveal(),
        KeyCode::Enter => match cards.phase() {
            CardPhase::Hidden => cards.reveal(),
            _ => {
                cards.next();
            }
        },
        KeyCode::Char('r') => cards.retry(),
        KeyCode::Right | KeyCode::Char('n') => {
            cards.next();
        }
        KeyCode::Left | KeyCode::Char('p') => cards.previous(),
        _ => {}
    }
    false
}

fn handle_results_input(app: &mut App, key: KeyEvent) {
    let offers_review = matches!(&app.mode, Mode::ShowingResults(summary) if summary.offers_review());
    match key.code {
        KeyCode::Char('r') => app.retake(),
        KeyCode::Char('w') if offers_review => app.start_test(TestMode::Mini),
        KeyCode::Char('f') if offers_review => app.start_flashcards(FlashcardSource::MiniReview),
        KeyCode::Char('m') | KeyCode::Esc | KeyCode::Enter => app.return_to_menu(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_overlay_input(app: &mut App, overlay: Overlay, key: KeyEvent) {
    match overlay {
        Overlay::QuitConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.return_to_menu(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => app.overlay = Some(Overlay::QuitConfirm),
        },
        Overlay::ClearConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.clear_saved_data(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => app.overlay = Some(Overlay::ClearConfirm),
        },
        Overlay::JumpPrompt(mut buffer) => match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => submit_jump(app, &buffer),
            KeyCode::Backspace => {
                buffer.pop();
                app.overlay = Some(Overlay::JumpPrompt(buffer));
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                buffer.push(c);
                app.overlay = Some(Overlay::JumpPrompt(buffer));
            }
            _ => app.overlay = Some(Overlay::JumpPrompt(buffer)),
        },
        Overlay::DocumentPicker { files, mut selected } => match key.code {
            KeyCode::Esc => {}
            KeyCode::Up => {
                selected = selected.saturating_sub(1);
                app.overlay = Some(Overlay::DocumentPicker { files, selected });
            }
            KeyCode::Down => {
                if selected < files.len().saturating_sub(1) {
                    selected += 1;
                }
                app.overlay = Some(Overlay::DocumentPicker { files, selected });
            }
            KeyCode::Enter => {
                if let Some(path) = files.get(selected) {
                    // Failures leave a notice on the app.
                    let _ = app.import_document(path);
                }
            }
            _ => app.overlay = Some(Overlay::DocumentPicker { files, selected }),
        },
    }
}

fn submit_jump(app: &mut App, buffer: &str) {
    let Mode::InSession(session) = &mut app.mode else {
        return;
    };
    let result = match buffer.trim().parse::<usize>() {
        Ok(n) => session.jump_to(n).map_err(|e| e.to_string()),
        Err(_) => Err("Please enter a valid number".to_string()),
    };
    if let Err(message) = result {
        app.notice = Some(Notice::error(message));
        app.overlay = Some(Overlay::JumpPrompt(String::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NoticeKind;
    use crate::store::PersistenceStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key(app, key(*code));
        }
    }

    fn new_app(dir: &std::path::Path) -> App {
        App::load(PersistenceStore::new(dir), None, dir.join("documents"))
    }

    fn session(app: &App) -> &SessionState {
        match &app.mode {
            Mode::InSession(session) => session,
            other => panic!("expected a session, got {:?}", other),
        }
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_navigation_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        let last = app.menu_items().len() - 1;

        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.menu_index, 0);
        for _ in 0..20 {
            press(&mut app, &[KeyCode::Down]);
        }
        assert_eq!(app.menu_index, last);
    }

    #[test]
    fn test_menu_enter_starts_full_test() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());

        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(session(&app).mode(), TestMode::Full);
    }

    #[test]
    fn test_letter_keys_select_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);

        press(&mut app, &[KeyCode::Char('B'), KeyCode::Right, KeyCode::Char('a')]);
        let session = session(&app);
        assert_eq!(session.answer_for(1), Some(OptionLetter::B));
        assert_eq!(session.answer_for(2), Some(OptionLetter::A));
        assert_eq!(session.total_answered(), 2);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_missing_option_shows_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        let mut questions = app.bank().questions().to_vec();
        questions[0].options = [(OptionLetter::A, "yes"), (OptionLetter::B, "no")]
            .into_iter()
            .collect();
        let Ok(crate::session::Launch::Ready(state)) = SessionState::start(TestMode::Full, &questions)
        else {
            panic!("expected a session");
        };
        app.mode = Mode::InSession(state);

        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
        assert_eq!(session(&app).total_answered(), 0);
    }

    #[test]
    fn test_jump_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);

        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('4'), KeyCode::Enter]);
        assert!(app.overlay.is_none());
        assert_eq!(session(&app).current_index(), 3);

        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('9'), KeyCode::Enter]);
        assert_eq!(app.overlay, Some(Overlay::JumpPrompt(String::new())));
        let notice = app.notice.clone().unwrap();
        assert!(notice.message.contains("between 1 and 5"));
        assert_eq!(session(&app).current_index(), 3);

        press(&mut app, &[KeyCode::Esc]);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_quit_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.overlay, Some(Overlay::QuitConfirm));
        press(&mut app, &[KeyCode::Char('n')]);
        assert!(matches!(app.mode, Mode::InSession(_)));

        press(&mut app, &[KeyCode::Esc, KeyCode::Char('y')]);
        assert!(matches!(app.mode, Mode::Idle));
    }

    #[test]
    fn test_submit_then_retake() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);

        press(&mut app, &[KeyCode::Char('b'), KeyCode::Char('s')]);
        assert!(matches!(app.mode, Mode::ShowingResults(_)));
        assert_eq!(app.review_set().len(), 4);

        press(&mut app, &[KeyCode::Char('w')]);
        assert_eq!(session(&app).mode(), TestMode::Mini);
        assert_eq!(session(&app).len(), 4);
    }

    #[test]
    fn test_flashcard_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_flashcards(FlashcardSource::All);

        press(&mut app, &[KeyCode::Char(' ')]);
        let Mode::InFlashcards(cards) = &app.mode else {
            panic!("expected flashcards");
        };
        assert_eq!(cards.phase(), CardPhase::Revealed);

        press(&mut app, &[KeyCode::Char('r'), KeyCode::Enter, KeyCode::Enter]);
        let Mode::InFlashcards(cards) = &app.mode else {
            panic!("expected flashcards");
        };
        assert_eq!(cards.current_index(), 1);
        assert_eq!(cards.phase(), CardPhase::Hidden);

        for _ in 0..4 {
            press(&mut app, &[KeyCode::Right]);
        }
        let Mode::InFlashcards(cards) = &app.mode else {
            panic!("expected flashcards");
        };
        assert_eq!(cards.phase(), CardPhase::Complete);

        press(&mut app, &[KeyCode::Char('x')]);
        assert!(matches!(app.mode, Mode::Idle));
    }

    #[test]
    fn test_clear_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.start_test(TestMode::Full);
        app.submit().unwrap();
        app.return_to_menu();

        app.overlay = Some(Overlay::ClearConfirm);
        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(app.overlay, Some(Overlay::ClearConfirm));

        press(&mut app, &[KeyCode::Char('y')]);
        assert!(app.review_set().is_empty());
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
    }
}
