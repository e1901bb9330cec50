// Status bar component
//
// Key hints for the current mode plus a short summary of the list on screen.

use crate::controller::Mode;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Key hints, shortened for narrow terminals
fn hints(mode: Mode, editing_search: bool, compact: bool) -> &'static str {
    match (mode, editing_search, compact) {
        (Mode::Login, _, false) => "Tab next field │ Enter login │ Ctrl-R register │ Esc quit",
        (Mode::Register, _, false) => "Tab next field │ Enter register │ Ctrl-R login │ Esc quit",
        (Mode::Login | Mode::Register, _, true) => "Tab │ Enter │ ^R │ Esc",
        (_, true, false) => "Enter search │ Esc done",
        (_, true, true) => "Enter │ Esc",
        (Mode::Browsing, false, false) => {
            "/ search │ c/C category │ a all │ l like │ y copy │ r recommended │ o logout │ L logs │ q quit"
        }
        (Mode::Recommendations, false, false) => {
            "l like │ y copy │ r products │ o logout │ L logs │ q quit"
        }
        (_, false, true) => "/ c l y r o q",
    }
}

fn summary(app: &App) -> String {
    let state = app.controller.state();
    match state.mode {
        Mode::Browsing if state.loading => "Loading...".to_string(),
        Mode::Browsing => format!(
            "{} products │ {}",
            state.products.len(),
            state.selected_category.as_deref().unwrap_or("All categories")
        ),
        Mode::Recommendations => format!("{} recommended", state.recommendations.len()),
        _ => String::new(),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let hints = hints(app.mode(), app.editing_search, !bp.at_least(Breakpoint::Normal));

    let summary = summary(app);
    let text = if summary.is_empty() {
        format!(" {}", hints)
    } else {
        format!(" {} │ {}", summary, hints)
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
