//! Row storage: raw line bytes, the derived render string with tabs
//! expanded, per-cell highlight attributes, and the cx/rx column mapping.

use crate::syntax::Highlight;

/// Render column width of a tab stop.
pub const TAB_STOP: usize = 4;

/// One logical line of the buffer.
///
/// `chars` is authoritative; `render` and `highlight` are derived from it.
/// Mutate `chars` first, then call `update_render`; the editor runs the
/// highlighter afterwards so the three stay consistent.
pub struct Row {
    /// Raw byte content, no trailing newline.
    pub chars: Vec<u8>,
    /// Display bytes: each tab replaced by spaces up to the next tab stop.
    pub render: Vec<u8>,
    /// One highlight class per render byte.
    pub highlight: Vec<Highlight>,
    /// True when this row ends inside an unterminated block comment.
    pub open_comment: bool,
}

impl Row {
    pub fn new(chars: Vec<u8>) -> Self {
        let mut row = Row {
            chars,
            render: Vec::new(),
            highlight: Vec::new(),
            open_comment: false,
        };
        row.update_render();
        row
    }

    /// Rebuilds `render` from `chars`, expanding tabs to spaces. Each tab
    /// advances to the next multiple of `TAB_STOP`, always at least one
    /// space. `highlight` is resized to match and left for the highlighter.
    pub fn update_render(&mut self) {
        self.render.clear();
        for &b in &self.chars {
            if b == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(b);
            }
        }
        self.highlight.resize(self.render.len(), Highlight::Normal);
    }

    /// Inserts one byte at `at`, clamping `at` into `[0, len]`.
    pub fn insert_char(&mut self, at: usize, b: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, b);
        self.update_render();
    }

    /// Removes the byte at `at`. Out of range is a no-op.
    pub fn delete_char(&mut self, at: usize) {
        if at >= self.chars.len() {
            return;
        }
        self.chars.remove(at);
        self.update_render();
    }

    /// Appends `bytes` to the end of the row.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update_render();
    }

    /// Truncates the row to `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.chars.truncate(len);
        self.update_render();
    }

    // ─── Column mapping ──────────────────────────────────────────────────

    /// Maps a `chars` index to the render column it lands on.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            if b == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Maps a render column back to a `chars` index: the first index whose
    /// cumulative render column exceeds `rx`, or the row length.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }
}
