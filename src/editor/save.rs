//! File I/O: loading a file into rows and saving the buffer back with the
//! truncate-then-write discipline.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::{Editor, PromptKind};

impl Editor {
    /// Loads `path` into the buffer. Line endings are `\n`; a trailing
    /// `\r` per line is stripped. An empty file loads as zero rows.
    pub fn open_file(&mut self, path: &Path) -> io::Result<()> {
        self.filename = Some(path.to_path_buf());
        self.select_syntax();

        let data = fs::read(path)?;
        if !data.is_empty() {
            let mut lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
            if data.last() == Some(&b'\n') {
                lines.pop();
            }
            for line in lines {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                self.insert_row(self.rows.len(), line.to_vec());
            }
        }
        self.dirty = 0;
        Ok(())
    }

    /// Ctrl-S entry point: prompts for a name when the buffer has none,
    /// otherwise writes straight to disk.
    pub fn save(&mut self) {
        if self.filename.is_none() {
            self.open_prompt(PromptKind::SaveAs);
            return;
        }
        self.save_file();
    }

    /// Writes the buffer to the current filename. Failure is non-fatal:
    /// it lands in the message bar and the dirty counter is untouched.
    pub(crate) fn save_file(&mut self) {
        let path = match &self.filename {
            Some(p) => p.clone(),
            None => return,
        };
        let buf = self.rows_to_bytes();
        match write_truncate(&path, &buf) {
            Ok(()) => {
                self.dirty = 0;
                self.set_status(format!("{} bytes written to disk", buf.len()));
            }
            Err(e) => self.set_status(format!("Can't save! I/O error: {}", e)),
        }
    }
}

/// Opens read-write-create (mode 0644), shrinks or grows the file to the
/// buffer length, then writes. Truncating explicitly instead of opening
/// with O_TRUNC keeps most of the old content if the write itself fails.
fn write_truncate(path: &Path, buf: &[u8]) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.set_len(buf.len() as u64)?;
    file.write_all(buf)?;
    Ok(())
}
