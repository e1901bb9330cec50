// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, backend outcomes)
// - Rendering the UI
// - Handing controller effects to the dispatcher

pub mod app;
pub mod clipboard;
pub mod components;
pub mod form;
pub mod layout;
pub mod theme;
pub mod views;

use crate::controller::{Controller, Mode, Outcome};
use crate::dispatch::Dispatcher;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use theme::ThemeKind;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even when the loop fails.
pub async fn run_tui(
    controller: Controller,
    dispatcher: Dispatcher,
    mut outcome_rx: mpsc::Receiver<Outcome>,
    log_buffer: LogBuffer,
    theme: ThemeKind,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(controller, log_buffer, theme);
    app.start();

    let result = run_event_loop(&mut terminal, &mut app, &dispatcher, &mut outcome_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, a redraw tick and completed backend calls,
/// whichever comes first. Effects queued by any of them are dispatched
/// before the next frame.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    outcome_rx: &mut mpsc::Receiver<Outcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        dispatcher.dispatch_all(app.take_effects());

        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(outcome) = outcome_rx.recv() => {
                app.apply(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Route a key press to the handler for the current mode
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows sends release events too
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode() {
        Mode::Login | Mode::Register => handle_form_key(app, key),
        Mode::Browsing if app.editing_search => handle_search_key(app, key),
        Mode::Browsing | Mode::Recommendations => handle_list_key(app, key),
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.controller.navigate();
        app.queue(Vec::new());
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        _ => {}
    }

    let form = if app.mode() == Mode::Register {
        &mut app.register_form
    } else {
        &mut app.login_form
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {
            form.focused_mut().handle_key(key);
        }
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.editing_search = false,
        KeyCode::Enter => {
            app.editing_search = false;
            app.sync_search();
            let effects = app.controller.search();
            app.queue(effects);
        }
        _ => {
            if app.search.handle_key(key) {
                app.sync_search();
            }
        }
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    let browsing = app.mode() == Mode::Browsing;

    let effects = match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            return;
        }
        KeyCode::Char('l') | KeyCode::Char(' ') => {
            app.like_selected();
            return;
        }
        KeyCode::Char('y') => {
            app.copy_selected();
            return;
        }
        KeyCode::Char('L') => {
            app.toggle_logs();
            return;
        }
        KeyCode::Char('t') => {
            app.next_theme();
            return;
        }
        KeyCode::Tab | KeyCode::Char('r') => app.controller.toggle_view(),
        KeyCode::Char('o') => {
            app.controller.logout();
            Vec::new()
        }
        KeyCode::Char('/') if browsing => {
            app.editing_search = true;
            return;
        }
        KeyCode::Char('c') if browsing => app.controller.cycle_category(true),
        KeyCode::Char('C') if browsing => app.controller.cycle_category(false),
        KeyCode::Char('a') if browsing => app.controller.set_category(None),
        _ => return,
    };
    app.queue(effects);
}
