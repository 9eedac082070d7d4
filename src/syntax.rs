//! Syntax definitions and the per-row highlighter: a left-to-right state
//! machine over a row's render bytes, with block-comment state threaded
//! from the previous row.

use crate::row::Row;

/// Per-cell highlight class. Each maps to a foreground color in the
/// renderer; `Match` is drawn with an inverted background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    LineComment,
    BlockComment,
    KeywordPrimary,
    KeywordSecondary,
    StringLiteral,
    Number,
    Match,
}

/// A compiled-in syntax definition, selected by filename at load or save.
pub struct Syntax {
    /// Shown in the status bar.
    pub name: &'static str,
    /// Leading `.` means extension match, otherwise substring match.
    pub patterns: &'static [&'static str],
    /// Trailing `|` marks a secondary-class keyword (types).
    pub keywords: &'static [&'static str],
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

pub static SYNTAX_DB: &[Syntax] = &[Syntax {
    name: "c",
    patterns: &[".c", ".h", ".cpp", ".php", ".js", ".py"],
    keywords: &[
        "switch", "if", "while", "for", "break", "continue", "return",
        "else", "struct", "union", "typedef", "static", "enum", "class",
        "case", "int|", "long|", "double|", "float|", "char|", "unsigned|",
        "signed|", "void|",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    highlight_numbers: true,
    highlight_strings: true,
}];

/// Picks the first syntax whose pattern matches `filename`, or None.
pub fn select_syntax(filename: &str) -> Option<&'static Syntax> {
    let ext = filename.rfind('.').map(|i| &filename[i..]);
    SYNTAX_DB.iter().find(|syntax| {
        syntax.patterns.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                filename.contains(pat)
            }
        })
    })
}

/// Keyword and number boundaries: whitespace or common punctuation.
/// End-of-row counts as a separator at the call sites.
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'\0' || b",.()+-/*=~%<>[];".contains(&b)
}

/// Recomputes `row.highlight` from `row.render`. `prev_open` is the
/// previous row's `open_comment` (false for the first row). Returns true
/// when the row's own `open_comment` changed, in which case the caller
/// must re-highlight the next row as well.
pub fn highlight_row(row: &mut Row, syntax: Option<&'static Syntax>, prev_open: bool) -> bool {
    let rsize = row.render.len();
    let mut hl = vec![Highlight::Normal; rsize];

    let syntax = match syntax {
        Some(s) => s,
        None => {
            row.highlight = hl;
            let changed = row.open_comment;
            row.open_comment = false;
            return changed;
        }
    };

    let line = &row.render;
    let scs = syntax.line_comment.map(str::as_bytes);
    let mc = syntax
        .block_comment
        .map(|(open, close)| (open.as_bytes(), close.as_bytes()));

    let mut prev_sep = true;
    let mut in_string: u8 = 0;
    let mut in_comment = prev_open;

    let mut i = 0;
    while i < rsize {
        let c = line[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(scs) = scs {
            if in_string == 0 && !in_comment && line[i..].starts_with(scs) {
                for h in &mut hl[i..] {
                    *h = Highlight::LineComment;
                }
                break;
            }
        }

        if let Some((mcs, mce)) = mc {
            if in_string == 0 {
                if in_comment {
                    hl[i] = Highlight::BlockComment;
                    if line[i..].starts_with(mce) {
                        for h in &mut hl[i..i + mce.len()] {
                            *h = Highlight::BlockComment;
                        }
                        i += mce.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if line[i..].starts_with(mcs) {
                    for h in &mut hl[i..i + mcs.len()] {
                        *h = Highlight::BlockComment;
                    }
                    i += mcs.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if syntax.highlight_strings {
            if in_string != 0 {
                hl[i] = Highlight::StringLiteral;
                // Escaped byte: paint it too and skip past
                if c == b'\\' && i + 1 < rsize {
                    hl[i + 1] = Highlight::StringLiteral;
                    i += 2;
                    continue;
                }
                if c == in_string {
                    in_string = 0;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = c;
                hl[i] = Highlight::StringLiteral;
                i += 1;
                continue;
            }
        }

        if syntax.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            let mut matched = false;
            for kw in syntax.keywords {
                let kw = kw.as_bytes();
                let secondary = kw.last() == Some(&b'|');
                let kw = if secondary { &kw[..kw.len() - 1] } else { kw };
                let end = i + kw.len();
                if line[i..].starts_with(kw) && (end == rsize || is_separator(line[end])) {
                    let class = if secondary {
                        Highlight::KeywordSecondary
                    } else {
                        Highlight::KeywordPrimary
                    };
                    for h in &mut hl[i..end] {
                        *h = class;
                    }
                    i = end;
                    matched = true;
                    break;
                }
            }
            if matched {
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    row.highlight = hl;
    let changed = row.open_comment != in_comment;
    row.open_comment = in_comment;
    changed
}
