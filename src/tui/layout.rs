/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: name and price only
    Compact,
    /// 60-99 cols: cards with description
    Normal,
    /// 100+ cols: list plus detail pane
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    /// Product cards include their description line
    pub fn shows_descriptions(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    /// The selected product gets a detail pane beside the list
    pub fn shows_detail_pane(&self) -> bool {
        self.at_least(Breakpoint::Wide)
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}
