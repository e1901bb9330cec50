// Catalog view - search bar, category selector and the product list

use crate::controller::PRODUCTS_FAILED;
use crate::tui::app::App;
use crate::tui::components::product_card;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_filters(f, chunks[0], app);
    render_products(f, chunks[1], app);
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.controller.state();

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search = if app.editing_search {
        let (before, after) = app.search.split_at_cursor();
        vec![
            Span::styled(before, theme.base_style()),
            Span::styled("█", theme.border_style(true)),
            Span::styled(after, theme.base_style()),
        ]
    } else if app.search.value().is_empty() {
        vec![Span::styled("Press / to search products...", theme.muted_style())]
    } else {
        vec![Span::styled(app.search.value().to_string(), theme.base_style())]
    };
    let search_box = Paragraph::new(Line::from(search)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(app.editing_search))
            .title(" Search "),
    );
    f.render_widget(search_box, halves[0]);

    let category = state
        .selected_category
        .as_deref()
        .unwrap_or("All Categories");
    let category_box = Paragraph::new(Line::from(vec![
        Span::styled("◂ ", theme.muted_style()),
        Span::styled(category.to_string(), Style::default().fg(theme.category)),
        Span::styled(" ▸", theme.muted_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(" Category (c/C) "),
    );
    f.render_widget(category_box, halves[1]);
}

fn render_products(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.controller.state();

    if state.loading {
        let spinner = format!("{} Loading...", app.spinner_char());
        render_placeholder(f, area, Line::from(Span::styled(spinner, theme.muted_style())), app);
        return;
    }

    // A failed fetch keeps the previous list on screen under the error
    let failed = state.error.as_deref() == Some(PRODUCTS_FAILED);
    if state.products.is_empty() {
        let line = if failed {
            Line::from(Span::styled(PRODUCTS_FAILED, theme.error_style()))
        } else {
            Line::from(Span::styled("No products found", theme.muted_style()))
        };
        render_placeholder(f, area, line, app);
        return;
    }

    let list_area = if failed {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {}", PRODUCTS_FAILED),
            theme.error_style(),
        )));
        f.render_widget(banner, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let title = format!("Products ({})", state.products.len());
    product_card::render_deck(f, list_area, &state.products, app.selected, &title, theme);
}

fn render_placeholder(f: &mut Frame, area: Rect, line: Line<'static>, app: &App) {
    let theme = &app.theme;
    let placeholder = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(" Products "),
    );
    f.render_widget(placeholder, area);
}
