use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use ccode::editor::Editor;
use ccode::terminal::{self, Input};

#[derive(Parser)]
#[command(name = "ccode", version, about = "A minimalist terminal text editor")]
struct Cli {
    /// File to open for editing
    file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let mut editor = Editor::new();
    if let Some(path) = &cli.file {
        if let Err(e) = editor.open_file(path) {
            eprintln!("ccode: {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
    editor.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");

    // Setup panic hook to restore the terminal before the default report
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let result = run(&mut editor);
    disable_raw_mode()?;

    if let Err(e) = result {
        eprintln!("ccode: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// The main loop: repaint, block for input, dispatch. Leaves a cleared
/// screen behind on a clean quit.
fn run(editor: &mut Editor) -> io::Result<()> {
    let (cols, rows) = terminal::window_size()?;
    editor.set_window_size(cols, rows);

    let mut out = io::stdout();
    loop {
        editor.refresh(&mut out)?;
        match terminal::read_input()? {
            Input::Key(key) => editor.process_key(key),
            Input::Resize(cols, rows) => editor.set_window_size(cols, rows),
        }
        if editor.should_quit {
            break;
        }
    }

    out.write_all(b"\x1b[2J\x1b[H")?;
    out.flush()
}
