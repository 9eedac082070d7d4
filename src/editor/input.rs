//! Key dispatch: the editor-mode bindings, the quit guard, and the modal
//! single-line prompt used for save-as and search.

use std::path::PathBuf;

use super::{Editor, Prompt, PromptKind, QUIT_TIMES};
use crate::terminal::Key;

impl Editor {
    /// Dispatches one logical key. The main loop repaints after every
    /// call, so handlers only mutate state.
    pub fn process_key(&mut self, key: Key) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        match key {
            Key::Enter => self.insert_newline(),
            Key::Ctrl(b'q') => {
                if self.dirty > 0 && self.quit_times > 1 {
                    self.quit_times -= 1;
                    self.set_status(format!(
                        "Warning!!! File has unsaved changes. \
                         Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    return;
                }
                self.should_quit = true;
                return;
            }
            Key::Ctrl(b's') => self.save(),
            Key::Ctrl(b'f') => self.find(),
            Key::Ctrl(b'z') => self.undo(),
            Key::Ctrl(b'y') => self.redo(),
            Key::Backspace | Key::Ctrl(b'h') => self.delete_char(),
            Key::Delete => {
                self.move_cursor(Key::ArrowRight);
                self.delete_char();
            }
            Key::Home => self.cursor_x = 0,
            Key::End => {
                if let Some(row) = self.rows.get(self.cursor_y) {
                    self.cursor_x = row.chars.len();
                }
            }
            Key::PageUp | Key::PageDown => {
                if key == Key::PageUp {
                    self.cursor_y = self.rowoff;
                } else {
                    self.cursor_y = self.rowoff + self.screenrows.saturating_sub(1);
                    if self.cursor_y > self.rows.len() {
                        self.cursor_y = self.rows.len();
                    }
                }
                let step = if key == Key::PageUp {
                    Key::ArrowUp
                } else {
                    Key::ArrowDown
                };
                for _ in 0..self.screenrows {
                    self.move_cursor(step);
                }
            }
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                self.move_cursor(key)
            }
            Key::Ctrl(b'l') | Key::Esc => {}
            Key::Char(b) => self.insert_char(b),
            Key::Ctrl(_) => {}
        }

        // any key other than Ctrl-Q rearms the quit guard
        self.quit_times = QUIT_TIMES;
    }

    // ─── Modal prompt ────────────────────────────────────────────────────

    /// Opens the single-line prompt and seeds its message-bar text.
    pub(crate) fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            buf: Vec::new(),
        });
        self.refresh_prompt_status();
    }

    /// One keypress while the prompt is open: printable bytes grow the
    /// buffer, Backspace/Ctrl-H/Delete pop one, ESC cancels, Enter with a
    /// nonempty buffer commits. The live callback runs after every key.
    fn handle_prompt_key(&mut self, key: Key) {
        let mut prompt = match self.prompt.take() {
            Some(p) => p,
            None => return,
        };

        match key {
            Key::Esc => {
                self.set_status("");
                self.run_prompt_callback(&prompt, key);
                match prompt.kind {
                    PromptKind::SaveAs => self.set_status("Save aborted"),
                    PromptKind::Search => self.finish_search(false),
                }
                return;
            }
            Key::Enter => {
                if !prompt.buf.is_empty() {
                    self.set_status("");
                    self.run_prompt_callback(&prompt, key);
                    self.commit_prompt(prompt);
                    return;
                }
            }
            Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
                prompt.buf.pop();
            }
            Key::Char(b) if (32..128).contains(&b) => {
                prompt.buf.push(b);
            }
            _ => {}
        }

        self.run_prompt_callback(&prompt, key);
        self.prompt = Some(prompt);
        self.refresh_prompt_status();
    }

    fn run_prompt_callback(&mut self, prompt: &Prompt, key: Key) {
        if prompt.kind == PromptKind::Search {
            let query = prompt.buf.clone();
            self.search_callback(&query, key);
        }
    }

    /// Enter with a nonempty buffer: hand the collected input to its
    /// consumer.
    fn commit_prompt(&mut self, prompt: Prompt) {
        match prompt.kind {
            PromptKind::SaveAs => {
                let name = String::from_utf8_lossy(&prompt.buf).into_owned();
                self.filename = Some(PathBuf::from(name));
                self.select_syntax();
                self.save_file();
            }
            PromptKind::Search => self.finish_search(true),
        }
    }

    /// Mirrors the growing buffer into the message bar.
    fn refresh_prompt_status(&mut self) {
        let prompt = match &self.prompt {
            Some(p) => p,
            None => return,
        };
        let buf = String::from_utf8_lossy(&prompt.buf).into_owned();
        let msg = match prompt.kind {
            PromptKind::SaveAs => format!("Save as: {} (ESC to cancel)", buf),
            PromptKind::Search => format!("Search: {} (ESC/Arrows/Enter)", buf),
        };
        self.set_status(msg);
    }
}
