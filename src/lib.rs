//! A minimalist single-file terminal text editor: byte-oriented rows with
//! derived render and highlight state, incremental search, undo/redo, and
//! full-frame ANSI repaints.

pub mod editor;
pub mod row;
pub mod syntax;
pub mod terminal;
pub mod theme;
