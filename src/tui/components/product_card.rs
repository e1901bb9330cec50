//! Product cards, the list they live in, and the detail pane
//!
//! A card is two or three lines: name with price and badges, then category,
//! then (when there is room) the description.

use crate::api::Product;
use crate::controller::tracker::{CardDeck, CardState};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::util::truncate_display;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Heart shown on liked cards
const LIKED: &str = "♥";
const NOT_LIKED: &str = "♡";

/// Build the lines of one card
pub fn card_lines(
    product: &Product,
    card: CardState,
    width: usize,
    bp: Breakpoint,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let heart = if card.liked {
        Span::styled(LIKED, Style::default().fg(theme.liked))
    } else {
        Span::styled(NOT_LIKED, theme.muted_style())
    };

    let mut header = vec![
        heart,
        Span::raw(" "),
        Span::styled(
            truncate_display(&product.name, width.saturating_sub(16).max(8)),
            theme.base_style().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(product.price_label(), Style::default().fg(theme.price)),
    ];
    if let Some(label) = product.match_label() {
        header.push(Span::raw("  "));
        header.push(Span::styled(
            label,
            Style::default()
                .fg(theme.match_badge)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("  {}", product.category),
            Style::default().fg(theme.category),
        )),
    ];
    if bp.shows_descriptions() && !product.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate_display(&product.description, width.saturating_sub(4))),
            theme.muted_style(),
        )));
    }
    lines
}

/// Render a deck as a selectable list, with the detail pane on wide screens
pub fn render_deck(
    f: &mut Frame,
    area: Rect,
    deck: &CardDeck,
    selected: usize,
    title: &str,
    theme: &Theme,
) {
    let bp = Breakpoint::from_width(area.width);
    let (list_area, detail_area) = if bp.shows_detail_pane() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let inner_width = list_area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = deck
        .products()
        .iter()
        .map(|p| ListItem::new(card_lines(p, deck.card(&p.id), inner_width, bp, theme)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(true))
                .title(format!(" {} ", title)),
        )
        .highlight_style(Style::default().bg(theme.selected_bg))
        .highlight_symbol("▌");

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, list_area, &mut state);

    if let (Some(detail_area), Some(product)) = (detail_area, deck.get(selected)) {
        render_detail(f, detail_area, product, deck.card(&product.id), theme);
    }
}

/// Full description of one product
pub fn render_detail(f: &mut Frame, area: Rect, product: &Product, card: CardState, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(product.name.clone(), theme.title_style())),
        Line::from(vec![
            Span::styled(product.price_label(), Style::default().fg(theme.price)),
            Span::raw("  "),
            Span::styled(product.category.clone(), Style::default().fg(theme.category)),
        ]),
    ];
    if let Some(label) = product.match_label() {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(theme.match_badge),
        )));
    }
    if card.liked {
        lines.push(Line::from(Span::styled(
            format!("{} Liked", LIKED),
            Style::default().fg(theme.liked),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        product.description.clone(),
        theme.base_style(),
    )));
    if !product.image_url.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            product.image_url.clone(),
            theme.muted_style(),
        )));
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(" Details "),
    );
    f.render_widget(detail, area);
}
