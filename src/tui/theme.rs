// Theme system for the TUI
//
// Three built-in palettes selected by name from config. Each theme defines
// colors for every storefront element; views never hardcode colors.

use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Look up by config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "nord" => ThemeKind::Nord,
            "dark" => ThemeKind::Dark,
            other => {
                tracing::warn!("Unknown theme '{}', using dark", other);
                ThemeKind::Dark
            }
        }
    }

    /// Next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    pub border_type: BorderType,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Product cards
    pub price: Color,
    pub category: Color,
    pub liked: Color,
    pub match_badge: Color,

    // Messages
    pub error: Color,
    pub notice: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            border_type: BorderType::Rounded,

            bg: Color::Reset,
            fg: Color::White,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,

            price: Color::LightBlue,
            category: Color::Magenta,
            liked: Color::Red,
            match_badge: Color::Green,

            error: Color::Red,
            notice: Color::Green,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            border_type: BorderType::Rounded,

            bg: Color::White,
            fg: Color::Black,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            price: Color::Blue,
            category: Color::Magenta,
            liked: Color::Red,
            match_badge: Color::Rgb(21, 128, 61), // Dark green

            error: Color::Red,
            notice: Color::Rgb(21, 128, 61),

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            kind: ThemeKind::Nord,
            border_type: BorderType::Plain,

            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            muted: Color::Rgb(216, 222, 233),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208), // Frost

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140), // Green

            selected_bg: Color::Rgb(67, 76, 94),
            selected_fg: Color::Rgb(235, 203, 139), // Yellow

            price: Color::Rgb(129, 161, 193),
            category: Color::Rgb(180, 142, 173), // Purple
            liked: Color::Rgb(191, 97, 106),
            match_badge: Color::Rgb(163, 190, 140),

            error: Color::Rgb(191, 97, 106),
            notice: Color::Rgb(163, 190, 140),

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(59, 66, 82),
        }
    }

    // Helper methods for creating styles

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn notice_style(&self) -> Style {
        Style::default().fg(self.notice).add_modifier(Modifier::BOLD)
    }

    pub fn log_style(&self, level: LogLevel) -> Style {
        let color = match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug => self.log_debug,
            LogLevel::Trace => self.log_trace,
        };
        Style::default().fg(color)
    }
}
