//! SGR color assignments for highlight classes and UI chrome.

use crate::syntax::Highlight;

/// Dim color for the line-number gutter.
pub const LINE_NUMBER: &str = "\x1b[90m";
/// Back to the default foreground.
pub const RESET_FG: &str = "\x1b[39m";
/// Full attribute reset.
pub const RESET_ALL: &str = "\x1b[m";
/// Inverted video: status bar and visible control bytes.
pub const INVERT: &str = "\x1b[7m";
/// Search match cells: yellow background, black foreground.
pub const MATCH: &str = "\x1b[43m\x1b[30m";

/// SGR foreground code for a highlight class. `None` means the default
/// foreground; `Match` is handled separately with [`MATCH`].
pub fn fg_code(hl: Highlight) -> Option<u8> {
    match hl {
        Highlight::Normal | Highlight::Match => None,
        Highlight::LineComment | Highlight::BlockComment => Some(90),
        Highlight::KeywordPrimary => Some(93),
        Highlight::KeywordSecondary => Some(92),
        Highlight::StringLiteral => Some(95),
        Highlight::Number => Some(91),
    }
}
