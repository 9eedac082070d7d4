//! Incremental search: prompt-driven, moves the cursor live as the query
//! grows, with arrow keys stepping between matches and wrap-around.

use super::{Editor, PromptKind};
use crate::syntax::Highlight;
use crate::terminal::Key;

/// Search state that outlives individual prompt keypresses.
#[derive(Default)]
pub(crate) struct SearchState {
    /// Row index of the last match.
    pub last_match: Option<usize>,
    /// +1 scans forward, -1 backward.
    pub direction: i64,
    /// Highlight bytes of the last match's row, restored before the next
    /// match (or when the prompt closes).
    pub saved_highlight: Option<(usize, Vec<Highlight>)>,
    /// Cursor and viewport snapshot taken when the prompt opened, restored
    /// on cancel: (cursor_x, cursor_y, rowoff, coloff).
    pub saved_view: Option<(usize, usize, usize, usize)>,
}

/// First offset of `needle` in `haystack`; an empty needle matches at 0.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl Editor {
    /// Opens the search prompt, snapshotting the viewport for cancel.
    pub fn find(&mut self) {
        self.search.saved_view = Some((self.cursor_x, self.cursor_y, self.rowoff, self.coloff));
        self.search.last_match = None;
        self.search.direction = 1;
        self.open_prompt(PromptKind::Search);
    }

    /// Runs after every prompt keypress with the current query.
    pub(crate) fn search_callback(&mut self, query: &[u8], key: Key) {
        // undo the Match overlay from the previous callback
        if let Some((line, hl)) = self.search.saved_highlight.take() {
            if let Some(row) = self.rows.get_mut(line) {
                if row.highlight.len() == hl.len() {
                    row.highlight = hl;
                }
            }
        }

        match key {
            Key::Enter | Key::Esc => {
                self.search.last_match = None;
                self.search.direction = 1;
                return;
            }
            Key::ArrowRight | Key::ArrowDown => self.search.direction = 1,
            Key::ArrowLeft | Key::ArrowUp => self.search.direction = -1,
            _ => {
                self.search.last_match = None;
                self.search.direction = 1;
            }
        }

        if self.search.last_match.is_none() {
            self.search.direction = 1;
        }

        let numrows = self.rows.len() as i64;
        let mut current = self.search.last_match.map_or(-1, |i| i as i64);
        for _ in 0..numrows {
            current += self.search.direction;
            if current == -1 {
                current = numrows - 1;
            } else if current == numrows {
                current = 0;
            }

            let idx = current as usize;
            if let Some(offset) = find_bytes(&self.rows[idx].render, query) {
                self.search.last_match = Some(idx);
                self.cursor_y = idx;
                self.cursor_x = self.rows[idx].rx_to_cx(offset);
                // past-the-end offset: the next scroll pass clamps it
                // back onto the match row
                self.rowoff = self.rows.len();

                self.search.saved_highlight = Some((idx, self.rows[idx].highlight.clone()));
                let row = &mut self.rows[idx];
                for h in &mut row.highlight[offset..offset + query.len()] {
                    *h = Highlight::Match;
                }
                break;
            }
        }
    }

    /// Closes out a search prompt: restore the viewport on cancel, keep
    /// the match position on commit.
    pub(crate) fn finish_search(&mut self, committed: bool) {
        if let Some((line, hl)) = self.search.saved_highlight.take() {
            if let Some(row) = self.rows.get_mut(line) {
                if row.highlight.len() == hl.len() {
                    row.highlight = hl;
                }
            }
        }
        if let Some((cx, cy, rowoff, coloff)) = self.search.saved_view.take() {
            if !committed {
                self.cursor_x = cx;
                self.cursor_y = cy;
                self.rowoff = rowoff;
                self.coloff = coloff;
            }
        }
    }
}
