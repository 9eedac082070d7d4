//! End-to-end tests: spawn the real binary in a pty, send the raw bytes a
//! terminal would, and assert on screen output and on-disk results.

use std::process::Command;
use std::time::Duration;

use expectrl::{Eof, Regex, Session};
use tempfile::TempDir;

// ─── Raw byte constants ──────────────────────────────────────────────────

const CTRL_Q: &[u8] = b"\x11"; // Ctrl+Q
const CTRL_S: &[u8] = b"\x13"; // Ctrl+S
const CTRL_F: &[u8] = b"\x06"; // Ctrl+F
const ENTER: &[u8] = b"\r"; // Enter/Return
const END: &[u8] = b"\x1b[F"; // End

// ─── Helpers ─────────────────────────────────────────────────────────────

fn spawn_ccode(args: &[&str]) -> Session {
    let bin = env!("CARGO_BIN_EXE_ccode");
    let mut cmd = Command::new(bin);
    cmd.args(args);
    cmd.env("TERM", "xterm-256color");

    let mut session = Session::spawn(cmd).expect("Failed to spawn ccode");
    session.set_expect_timeout(Some(Duration::from_secs(5)));
    session
}

/// Spawns the editor on `test.c` inside a fresh temp dir, with the dir as
/// cwd so the short name fits the status bar.
fn spawn_with_file(content: &str) -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("test.c"), content).unwrap();

    let bin = env!("CARGO_BIN_EXE_ccode");
    let mut cmd = Command::new(bin);
    cmd.arg("test.c");
    cmd.current_dir(dir.path());
    cmd.env("TERM", "xterm-256color");

    let mut session = Session::spawn(cmd).expect("Failed to spawn ccode");
    session.set_expect_timeout(Some(Duration::from_secs(5)));
    (session, dir)
}

/// Small delay to let the editor process and repaint.
fn short_delay() {
    std::thread::sleep(Duration::from_millis(200));
}

fn send_and_wait(session: &mut Session, bytes: &[u8]) {
    session.send(bytes).expect("Failed to send bytes");
    short_delay();
}

// ─── Lifecycle ───────────────────────────────────────────────────────────

#[test]
fn empty_start_shows_welcome_banner_and_quits() {
    let mut session = spawn_ccode(&[]);
    session
        .expect(Regex("CCode editor -- version"))
        .expect("Should see the welcome banner");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}

#[test]
fn opening_a_file_shows_its_name_and_help_line() {
    let (mut session, _dir) = spawn_with_file("int x;\n");
    session
        .expect(Regex("test\\.c"))
        .expect("Should see the filename in the status bar");
    session
        .expect(Regex("HELP: Ctrl-S = save"))
        .expect("Should see the startup help message");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}

#[test]
fn typing_and_saving_persists_to_disk() {
    let (mut session, dir) = spawn_with_file("start\n");
    short_delay();
    send_and_wait(&mut session, END);
    session.send(b"ADDED").expect("send text");
    short_delay();
    send_and_wait(&mut session, CTRL_S);
    session
        .expect(Regex("bytes written to disk"))
        .expect("Should see the save confirmation");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);

    let content = std::fs::read_to_string(dir.path().join("test.c")).unwrap();
    assert_eq!(content, "startADDED\n");
}

#[test]
fn missing_file_is_a_fatal_startup_error() {
    let bin = env!("CARGO_BIN_EXE_ccode");
    let output = Command::new(bin)
        .arg("/nonexistent-dir/missing.c")
        .output()
        .expect("run ccode");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.c"), "stderr: {}", stderr);
}

// ─── Quit guard ──────────────────────────────────────────────────────────

#[test]
fn dirty_buffer_warns_before_quitting() {
    let (mut session, _dir) = spawn_with_file("hello\n");
    short_delay();
    session.send(b"x").expect("send text");
    short_delay();
    send_and_wait(&mut session, CTRL_Q);
    session
        .expect(Regex("unsaved changes"))
        .expect("First Ctrl-Q should warn instead of quitting");
    send_and_wait(&mut session, CTRL_Q);
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}

// ─── Search ──────────────────────────────────────────────────────────────

#[test]
fn search_prompt_appears_and_commits() {
    let (mut session, _dir) = spawn_with_file("alpha\nbeta\n");
    short_delay();
    send_and_wait(&mut session, CTRL_F);
    session
        .expect(Regex("Search:"))
        .expect("Ctrl-F should open the search prompt");
    session.send(b"beta").expect("send query");
    short_delay();
    send_and_wait(&mut session, ENTER);
    // back in edit mode: position indicator shows row 2
    session
        .expect(Regex("2/2"))
        .expect("Cursor should land on the matched row");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}
