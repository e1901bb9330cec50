//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level.

use crate::logging::LogEntry;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// "[HH:MM:SS] LEVEL message"
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Render the most recent entries that fit
pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries[start..]
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(theme.log_style(entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}
