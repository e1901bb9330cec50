// Views module - screen-level rendering logic
//
// Each mode of the controller has one view:
// - Auth: login and register forms
// - Catalog: search, category filter and the product list
// - Recommendations: the personalized list
//
// This module lays out the shell (title, content, optional logs, status) and
// dispatches the content area to the view for the current mode.

mod auth;
mod catalog;
mod recommendations;

use super::app::App;
use super::components::{logs_panel, status_bar, title_bar};
use crate::controller::Mode;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Lines of log shown when the panel is open
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    title_bar::render(f, chunks[0], app);

    let content = chunks[1];
    match app.mode() {
        Mode::Login | Mode::Register => auth::render(f, content, app),
        Mode::Browsing => catalog::render(f, content, app),
        Mode::Recommendations => recommendations::render(f, content, app),
    }

    if app.show_logs {
        let entries = app.log_buffer.recent(LOGS_HEIGHT as usize);
        logs_panel::render(f, chunks[2], &entries, &app.theme);
    }
    status_bar::render(f, chunks[chunks.len() - 1], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
