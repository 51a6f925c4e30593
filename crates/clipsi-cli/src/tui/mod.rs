//! Clipsi TUI
//!
//! Terminal user interface for browsing and editing categorized links.
//!
//! ## Layout
//!
//! Three-pane layout:
//! - Left: Categories ("All" first)
//! - Middle: Links for the selected category and search
//! - Right: Detail of the highlighted link
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move up/down
//! - h/l, ←/→ or Tab: Switch panes
//! - Enter: Select category / Open link
//! - o: Open link
//! - c: New category
//! - a: Add link to the selected category
//! - d: Delete highlighted category or link
//! - X: Delete everything
//! - /: Search
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipsi_core::{Config, Session, Store};

use app::{ActivePane, App, InputMode};

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if CLIPSI_LOG is set)
    init_tui_logging(&config);

    let store = Store::open_with_config(config)?;
    let mut session = Session::new(store);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&session);

    let result = run_app(&mut terminal, &mut app, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If error modal is showing, any key dismisses it
        if app.has_error() {
            app.clear_error();
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, session, key.code, key.modifiers),
            InputMode::Search => handle_search_mode(app, session, key.code),
            InputMode::Form => handle_form_mode(app, session, key.code),
            InputMode::Confirm => handle_confirm_mode(app, session, key.code),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, session: &mut Session, code: KeyCode, modifiers: KeyModifiers) {
    // Clear status message on navigation keys
    if matches!(
        code,
        KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
    ) {
        app.status_message = None;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.prev_pane(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_pane(),

        KeyCode::Enter => match app.active_pane {
            ActivePane::Categories => app.select_highlighted(session),
            ActivePane::Links | ActivePane::Detail => app.open_current_link(),
        },
        KeyCode::Char('o') => app.open_current_link(),

        KeyCode::Char('c') => app.open_category_form(),
        KeyCode::Char('a') => app.open_link_form(session),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('X') => app.request_clear(),

        KeyCode::Char('/') => app.enter_search_mode(session),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key events while typing a search
fn handle_search_mode(app: &mut App, session: &mut Session, code: KeyCode) {
    match code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.cancel_search(session),
        KeyCode::Backspace => app.search_delete(session),
        KeyCode::Char(c) => app.search_insert(session, c),
        _ => {}
    }
}

/// Handle key events inside the modal form
fn handle_form_mode(app: &mut App, session: &mut Session, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(session),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.delete_char();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.insert_char(c);
            }
        }
        _ => {}
    }
}

/// Handle y/n for a pending destructive action
fn handle_confirm_mode(app: &mut App, session: &mut Session, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_pending(session, true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.resolve_pending(session, false)
        }
        _ => {}
    }
}

/// Initialize file-based logging for the TUI
///
/// Logging to stderr would corrupt the alternate screen, so TUI logs go to
/// `config.log_path()` and only when CLIPSI_LOG is set.
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("CLIPSI_LOG") else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match create_log_file(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "clipsi_core={},clipsi_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

/// Create the log file, making its directory first
fn create_log_file(log_path: &Path) -> Result<File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create log directory {:?}", parent))?;
    }
    File::create(log_path).with_context(|| format!("Could not create log file {:?}", log_path))
}
