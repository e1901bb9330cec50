//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, appending `…` when
/// anything was cut.
///
/// Uses display width rather than byte length, so wide CJK characters and
/// emoji count as two columns and combining marks as zero.
///
/// ```ignore
/// assert_eq!(truncate_display("Wireless Headphones", 10), "Wireless …");
/// ```
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let target = max_width - 1;
    let mut width = 0;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        width += w;
        end = i + c.len_utf8();
    }

    let mut out = s[..end].to_string();
    out.push('…');
    out
}

/// Right-pad `s` with spaces to exactly `width` columns (truncating if longer)
pub fn pad_display(s: &str, width: usize) -> String {
    let mut out = truncate_display(s, width);
    let used = out.width();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}
