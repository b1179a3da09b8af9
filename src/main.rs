use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exam_prep::{db, input, logger, ui, App, Args, Config, PersistenceStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Redraw interval while no key arrives, so the test timer keeps ticking.
const TICK: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let config = Config::from_args(Args::parse());
    logger::init(&config.log_file);
    log::info!("starting with data dir {}", config.data_dir.display());

    let history = match db::init_db(&config.history_path()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            log::error!("attempt history unavailable: {}", e);
            None
        }
    };
    let store = PersistenceStore::new(&config.data_dir);
    let mut app = App::load(store, history, config.documents_dir.clone());

    if let Some(path) = &config.import {
        // A failed import is reported as a notice on the menu.
        let _ = app.import_document(path);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("exiting");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
    }
    Ok(())
}
