// Recommendations view - the personalized list for the logged-in user

use crate::tui::app::App;
use crate::tui::components::product_card;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TITLE: &str = "Recommended for You";
const EMPTY: &str =
    "No recommendations yet. Interact with products to get personalized suggestions!";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let deck = &app.controller.state().recommendations;

    if deck.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(EMPTY, theme.muted_style())))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(theme.border_style(false))
                    .title(format!(" {} ", TITLE)),
            );
        f.render_widget(placeholder, area);
        return;
    }

    product_card::render_deck(f, area, deck, app.selected, TITLE, theme);
}
