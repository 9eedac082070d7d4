//! The editor state engine: buffer of rows, cursor and viewport, dirty
//! tracking, status messaging, and the editing operations that keep the
//! derived render/highlight state consistent.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::row::Row;
use crate::syntax::{self, Syntax};
use crate::terminal::Key;

use self::search::SearchState;
use self::undo::{Journal, Op, Record};

/// Repeated Ctrl-Q presses required to discard unsaved changes.
pub const QUIT_TIMES: u8 = 3;

/// Width of the line-number gutter, including the trailing space.
pub const LINENUM_WIDTH: usize = 5;

/// How long status bar messages stay visible.
pub const STATUS_DURATION: Duration = Duration::from_secs(5);

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the modal prompt is collecting input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromptKind {
    SaveAs,
    Search,
}

/// Transient single-line prompt state; `Some` while the prompt is open.
pub(crate) struct Prompt {
    pub kind: PromptKind,
    pub buf: Vec<u8>,
}

pub struct Editor {
    pub rows: Vec<Row>,
    /// Cursor position: `cursor_y` may equal `rows.len()` (the line past
    /// the end); `cursor_x` is a byte index into the row's `chars`.
    pub cursor_x: usize,
    pub cursor_y: usize,
    /// Render column of the cursor, recomputed by `scroll`.
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
    /// Visible text rows (terminal height minus the two bars).
    pub screenrows: usize,
    /// Visible render columns (terminal width minus the gutter).
    pub screencols: usize,
    /// Counts unsaved mutations; zero right after load or save.
    pub dirty: u64,
    pub filename: Option<PathBuf>,
    pub syntax: Option<&'static Syntax>,
    pub status_message: String,
    pub status_time: Option<Instant>,
    pub should_quit: bool,
    pub(crate) quit_times: u8,
    pub(crate) journal: Journal,
    pub(crate) search: SearchState,
    pub(crate) prompt: Option<Prompt>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Editor {
            rows: Vec::new(),
            cursor_x: 0,
            cursor_y: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            screenrows: 0,
            screencols: 0,
            dirty: 0,
            filename: None,
            syntax: None,
            status_message: String::new(),
            status_time: None,
            should_quit: false,
            quit_times: QUIT_TIMES,
            journal: Journal::default(),
            search: SearchState::default(),
            prompt: None,
        }
    }

    /// Adopts new terminal dimensions, reserving two lines for the status
    /// and message bars and `LINENUM_WIDTH` columns for the gutter.
    pub fn set_window_size(&mut self, cols: u16, rows: u16) {
        self.screenrows = (rows as usize).saturating_sub(2);
        self.screencols = (cols as usize).saturating_sub(LINENUM_WIDTH);
    }

    /// Shows a temporary message in the message bar (clipped to 80 bytes).
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let mut msg = msg.into();
        if msg.len() > 80 {
            let mut end = 80;
            while !msg.is_char_boundary(end) {
                end -= 1;
            }
            msg.truncate(end);
        }
        self.status_message = msg;
        self.status_time = Some(Instant::now());
    }

    /// Re-selects the syntax definition for the current filename and
    /// re-highlights every row.
    pub fn select_syntax(&mut self) {
        self.syntax = self
            .filename
            .as_ref()
            .and_then(|p| syntax::select_syntax(&p.to_string_lossy()));
        for idx in 0..self.rows.len() {
            let prev_open = idx > 0 && self.rows[idx - 1].open_comment;
            syntax::highlight_row(&mut self.rows[idx], self.syntax, prev_open);
        }
    }

    // ─── Row-level primitives ────────────────────────────────────────────
    //
    // Every mutation funnels through these: chars first, then render,
    // then highlight (with the block-comment cascade), then dirty.

    /// Inserts a row at `at`; out-of-range is a no-op.
    pub fn insert_row(&mut self, at: usize, bytes: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(bytes));
        self.rehighlight_from(at);
        self.dirty += 1;
    }

    /// Removes the row at `at`; out-of-range is a no-op.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        // the successor now follows a different predecessor
        self.rehighlight_from(at);
        self.dirty += 1;
    }

    pub(crate) fn row_insert_char(&mut self, y: usize, at: usize, b: u8) {
        if y >= self.rows.len() {
            return;
        }
        self.rows[y].insert_char(at, b);
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    pub(crate) fn row_delete_char(&mut self, y: usize, at: usize) {
        if y >= self.rows.len() {
            return;
        }
        self.rows[y].delete_char(at);
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    pub(crate) fn row_append_bytes(&mut self, y: usize, bytes: &[u8]) {
        if y >= self.rows.len() {
            return;
        }
        self.rows[y].append_bytes(bytes);
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    /// Re-runs the highlighter at `at`, cascading into successor rows
    /// until the block-comment state reaches a fixed point.
    pub(crate) fn rehighlight_from(&mut self, at: usize) {
        let mut idx = at;
        while idx < self.rows.len() {
            let prev_open = idx > 0 && self.rows[idx - 1].open_comment;
            let changed = syntax::highlight_row(&mut self.rows[idx], self.syntax, prev_open);
            if !changed {
                break;
            }
            idx += 1;
        }
    }

    // ─── Editing operations ──────────────────────────────────────────────

    /// Inserts one byte at the cursor, appending an empty row first when
    /// the cursor sits on the line past the end.
    pub fn insert_char(&mut self, b: u8) {
        if self.cursor_y == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        self.journal.record(Record {
            op: Op::Delete,
            x: self.cursor_x,
            y: self.cursor_y,
            text: vec![b],
        });
        self.row_insert_char(self.cursor_y, self.cursor_x, b);
        self.cursor_x += 1;
    }

    /// Splits the current row at the cursor (or inserts an empty row when
    /// the cursor is at column 0) and moves to the start of the next line.
    pub fn insert_newline(&mut self) {
        if self.cursor_x == 0 {
            self.insert_row(self.cursor_y, Vec::new());
        } else {
            let rest = self.rows[self.cursor_y].chars[self.cursor_x..].to_vec();
            self.insert_row(self.cursor_y + 1, rest);
            self.rows[self.cursor_y].truncate(self.cursor_x);
            self.rehighlight_from(self.cursor_y);
        }
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    /// Deletes the byte left of the cursor, or joins the current row onto
    /// the previous one when the cursor is at column 0.
    pub fn delete_char(&mut self) {
        if self.cursor_y == self.rows.len() {
            return;
        }
        if self.cursor_x == 0 && self.cursor_y == 0 {
            return;
        }

        if self.cursor_x > 0 {
            let deleted = self.rows[self.cursor_y].chars[self.cursor_x - 1];
            self.journal.record(Record {
                op: Op::Insert,
                x: self.cursor_x - 1,
                y: self.cursor_y,
                text: vec![deleted],
            });
            self.row_delete_char(self.cursor_y, self.cursor_x - 1);
            self.cursor_x -= 1;
        } else {
            let join_at = self.rows[self.cursor_y - 1].chars.len();
            let moved = self.rows[self.cursor_y].chars.clone();
            self.row_append_bytes(self.cursor_y - 1, &moved);
            self.delete_row(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = join_at;
        }
    }

    // ─── Cursor movement ─────────────────────────────────────────────────

    /// Arrow movement with edge wrap: left at column 0 goes to the end of
    /// the previous row, right at the end goes to the start of the next.
    /// `cursor_x` is clamped to the destination row's length.
    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                if self.cursor_x != 0 {
                    self.cursor_x -= 1;
                } else if self.cursor_y > 0 {
                    self.cursor_y -= 1;
                    self.cursor_x = self.rows[self.cursor_y].chars.len();
                }
            }
            Key::ArrowRight => {
                if let Some(row) = self.rows.get(self.cursor_y) {
                    if self.cursor_x < row.chars.len() {
                        self.cursor_x += 1;
                    } else {
                        self.cursor_y += 1;
                        self.cursor_x = 0;
                    }
                }
            }
            Key::ArrowUp => {
                self.cursor_y = self.cursor_y.saturating_sub(1);
            }
            Key::ArrowDown => {
                if self.cursor_y < self.rows.len() {
                    self.cursor_y += 1;
                }
            }
            _ => {}
        }

        let rowlen = self.rows.get(self.cursor_y).map_or(0, |r| r.chars.len());
        if self.cursor_x > rowlen {
            self.cursor_x = rowlen;
        }
    }

    // ─── Undo / redo ─────────────────────────────────────────────────────

    pub fn undo(&mut self) {
        match self.journal.pop_undo() {
            Some(record) => {
                self.apply_record(&record, false);
                self.journal.push_redo(record);
            }
            None => self.set_status("Nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        match self.journal.pop_redo() {
            Some(record) => {
                self.apply_record(&record, true);
                self.journal.push_undo(record);
            }
            None => self.set_status("Nothing to redo"),
        }
    }

    /// Replays a journal record. Undo applies the record as stored;
    /// redo (`invert`) applies the opposite primitive. Replays go through
    /// the row primitives directly and record nothing themselves.
    fn apply_record(&mut self, record: &Record, invert: bool) {
        self.cursor_y = record.y.min(self.rows.len());
        self.cursor_x = record.x;

        let insert = (record.op == Op::Insert) != invert;
        if insert {
            if self.cursor_y == self.rows.len() {
                self.insert_row(self.rows.len(), Vec::new());
            }
            for (i, &b) in record.text.iter().enumerate() {
                self.row_insert_char(self.cursor_y, record.x + i, b);
            }
            self.cursor_x = record.x + record.text.len();
        } else {
            for _ in 0..record.text.len() {
                self.row_delete_char(self.cursor_y, record.x);
            }
        }
    }

    // ─── Buffer serialization ────────────────────────────────────────────

    /// Joins all rows with `\n` (including after the last row).
    pub fn rows_to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for row in &self.rows {
            buf.extend_from_slice(&row.chars);
            buf.push(b'\n');
        }
        buf
    }
}

mod input;
mod render;
mod save;
mod search;
mod undo;
