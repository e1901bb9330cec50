// Reusable TUI components

pub mod logs_panel;
pub mod product_card;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
