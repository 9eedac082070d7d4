//! Frame assembly: scroll clamping, then a full repaint (text rows with
//! color runs, status bar, message bar) into one byte buffer emitted
//! with a single write.

use std::io::{self, Write};

use super::{Editor, LINENUM_WIDTH, STATUS_DURATION, VERSION};
use crate::row::Row;
use crate::syntax::Highlight;
use crate::theme;

impl Editor {
    /// Clamps `rowoff`/`coloff` so the cursor is inside the viewport.
    /// Runs before every frame.
    pub fn scroll(&mut self) {
        self.rx = match self.rows.get(self.cursor_y) {
            Some(row) => row.cx_to_rx(self.cursor_x),
            None => 0,
        };

        if self.cursor_y < self.rowoff {
            self.rowoff = self.cursor_y;
        }
        if self.cursor_y >= self.rowoff + self.screenrows {
            self.rowoff = self.cursor_y + 1 - self.screenrows;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = self.rx + 1 - self.screencols;
        }
    }

    /// Builds the complete frame: hide cursor, home, rows, bars, cursor
    /// placement, show cursor.
    pub fn draw_frame(&mut self) -> Vec<u8> {
        self.scroll();

        let mut buf = Vec::new();
        buf.extend_from_slice(b"\x1b[?25l\x1b[H");

        self.draw_rows(&mut buf);
        self.draw_status_bar(&mut buf);
        self.draw_message_bar(&mut buf);

        let row = self.cursor_y - self.rowoff + 1;
        let col = self.rx - self.coloff + 1 + LINENUM_WIDTH;
        buf.extend_from_slice(format!("\x1b[{};{}H", row, col).as_bytes());
        buf.extend_from_slice(b"\x1b[?25h");
        buf
    }

    /// Assembles and writes one frame in a single syscall.
    pub fn refresh(&mut self, out: &mut impl Write) -> io::Result<()> {
        let frame = self.draw_frame();
        out.write_all(&frame)?;
        out.flush()
    }

    fn draw_rows(&self, buf: &mut Vec<u8>) {
        for y in 0..self.screenrows {
            let filerow = y + self.rowoff;
            if filerow >= self.rows.len() {
                // gutter stays blank past the end of the buffer
                buf.extend_from_slice(&[b' '; LINENUM_WIDTH]);
                if self.rows.is_empty() && y == self.screenrows / 3 {
                    self.draw_welcome(buf);
                } else {
                    buf.push(b'~');
                }
            } else {
                buf.extend_from_slice(theme::LINE_NUMBER.as_bytes());
                buf.extend_from_slice(format!("{:>4} ", filerow + 1).as_bytes());
                buf.extend_from_slice(theme::RESET_FG.as_bytes());
                self.draw_row_payload(&self.rows[filerow], buf);
            }
            buf.extend_from_slice(b"\x1b[K\r\n");
        }
    }

    fn draw_welcome(&self, buf: &mut Vec<u8>) {
        let welcome = format!("CCode editor -- version {}", VERSION);
        let len = welcome.len().min(self.screencols);
        let mut padding = (self.screencols - len) / 2;
        if padding > 0 {
            buf.push(b'~');
            padding -= 1;
        }
        buf.extend(std::iter::repeat(b' ').take(padding));
        buf.extend_from_slice(&welcome.as_bytes()[..len]);
    }

    /// The visible window of one row with minimal SGR runs: a color code
    /// is emitted only when the class changes, match cells get inverted
    /// colors with an immediate reset, and control bytes render as an
    /// inverse caret letter.
    fn draw_row_payload(&self, row: &Row, buf: &mut Vec<u8>) {
        let start = self.coloff.min(row.render.len());
        let end = (self.coloff + self.screencols).min(row.render.len());
        let mut current_color: Option<u8> = None;

        for i in start..end {
            let b = row.render[i];
            let hl = row.highlight[i];

            if b.is_ascii_control() {
                let sym = if b <= 26 { b'@' + b } else { b'?' };
                buf.extend_from_slice(theme::INVERT.as_bytes());
                buf.push(sym);
                buf.extend_from_slice(theme::RESET_ALL.as_bytes());
                // the reset dropped the run's color; re-establish it
                if let Some(c) = current_color {
                    buf.extend_from_slice(format!("\x1b[{}m", c).as_bytes());
                }
            } else if hl == Highlight::Match {
                buf.extend_from_slice(theme::MATCH.as_bytes());
                buf.push(b);
                buf.extend_from_slice(theme::RESET_ALL.as_bytes());
                current_color = None;
            } else {
                let color = theme::fg_code(hl);
                if color != current_color {
                    match color {
                        Some(c) => buf.extend_from_slice(format!("\x1b[{}m", c).as_bytes()),
                        None => buf.extend_from_slice(theme::RESET_FG.as_bytes()),
                    }
                    current_color = color;
                }
                buf.push(b);
            }
        }
        buf.extend_from_slice(theme::RESET_FG.as_bytes());
    }

    /// Inverted bar: filename, line count and modified marker on the
    /// left; syntax name and cursor position on the right.
    fn draw_status_bar(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(theme::INVERT.as_bytes());

        let name = self
            .filename
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string());
        let left = format!(
            "{:.20} - {} lines {}",
            name,
            self.rows.len(),
            if self.dirty > 0 { "(modified)" } else { "" }
        );
        let right = format!(
            "{} | {}/{}",
            self.syntax.map_or("no ft", |s| s.name),
            self.cursor_y + 1,
            self.rows.len()
        );

        let width = self.screencols + LINENUM_WIDTH;
        let mut len = left.len().min(width);
        buf.extend_from_slice(&left.as_bytes()[..len]);
        while len < width {
            if width - len == right.len() {
                buf.extend_from_slice(right.as_bytes());
                break;
            }
            buf.push(b' ');
            len += 1;
        }

        buf.extend_from_slice(theme::RESET_ALL.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    /// Message bar: cleared every frame, message shown only while fresh.
    fn draw_message_bar(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"\x1b[K");
        let fresh = self
            .status_time
            .map_or(false, |t| t.elapsed() < STATUS_DURATION);
        if fresh && !self.status_message.is_empty() {
            let width = self.screencols + LINENUM_WIDTH;
            let len = self.status_message.len().min(width);
            buf.extend_from_slice(&self.status_message.as_bytes()[..len]);
        }
    }
}
