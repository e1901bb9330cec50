// Auth view - login and register forms in a centered box

use crate::controller::Mode;
use crate::tui::app::App;
use crate::tui::form::Form;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TEST_CREDENTIALS: &str = "Test credentials: alice@example.com / password123";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.controller.state();
    let (form, title, action, switch) = match state.mode {
        Mode::Register => (
            &app.register_form,
            " Register ",
            "Register",
            "Already have an account? Ctrl-R to login",
        ),
        _ => (
            &app.login_form,
            " Login ",
            "Login",
            "Don't have an account? Ctrl-R to register",
        ),
    };

    // Two lines per field plus messages and hints
    let height = (form.fields.len() as u16 * 2 + 9).min(area.height);
    let box_area = centered(area, 64, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(true))
        .title(Span::styled(title, theme.title_style()));
    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let mut lines = field_lines(form, app);
    lines.push(Line::default());

    let button = if state.submitting {
        format!("{} {}...", app.spinner_char(), action)
    } else {
        format!("[ Enter: {} ]", action)
    };
    lines.push(Line::from(Span::styled(button, theme.title_style())).alignment(Alignment::Center));

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(error.clone(), theme.error_style())));
    } else if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(notice.clone(), theme.notice_style())));
    } else {
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(switch, theme.muted_style())));
    if state.mode == Mode::Login {
        lines.push(Line::from(Span::styled(TEST_CREDENTIALS, theme.muted_style())));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn field_lines(form: &Form, app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus();
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme.title_style()
        } else {
            theme.muted_style()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, field.label),
            label_style,
        )));

        let value = if focused {
            let (before, after) = field.split_at_cursor();
            vec![
                Span::raw("  "),
                Span::styled(before, theme.base_style()),
                Span::styled("█", theme.border_style(true)),
                Span::styled(after, theme.base_style()),
            ]
        } else {
            vec![Span::raw("  "), Span::styled(field.display(), theme.base_style())]
        };
        lines.push(Line::from(value));
    }
    lines
}

/// A `width` x `height` rect centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
