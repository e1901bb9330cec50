// Title bar component
//
// Renders the shop name, the view tabs and who is logged in, with a spinner
// while a fetch or submission is outstanding.

use crate::controller::Mode;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mode = app.mode();

    let mut spans = vec![Span::styled(" 🛒 E-Shop", theme.title_style())];
    if app.is_busy() {
        spans.push(Span::styled(
            format!(" {}", app.spinner_char()),
            theme.muted_style(),
        ));
    }

    if mode.is_authenticated() {
        spans.push(Span::raw("  "));
        for (i, tab) in [Mode::Browsing, Mode::Recommendations].iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", theme.muted_style()));
            }
            let style = if *tab == mode {
                theme.selected_style()
            } else {
                theme.muted_style()
            };
            spans.push(Span::styled(format!(" {} ", tab.label()), style));
        }
    }

    let user = match app.controller.identity() {
        Some(identity) => format!(" {} ", identity.username),
        None => format!(" {} ", mode.label()),
    };

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(
                Line::from(Span::styled(
                    user,
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            ),
    );

    f.render_widget(title, area);
}
