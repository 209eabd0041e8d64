//! Grapheme-level text mutation helpers shared by the builtin commands that
//! back bound editing keys (Enter, Backspace, Delete) and by the
//! dispatcher's printable-character fallback.
//!
//! There is no separate "insert mode": normal mode both moves the cursor
//! and accepts typed text, so every helper here just wraps the matching
//! `EditorState` mutator in the coalescing scope appropriate to it.

use core_state::{EditorState, undo::MergeTag};
use core_text::Position;

/// Insert a single grapheme at `cursor`, coalescing with an adjacent prior
/// insert so a run of typing undoes in one step.
pub fn insert_grapheme(state: &mut EditorState, cursor: &mut Position, g: &str) {
    state.begin_change(MergeTag::Insert);
    state.insert_text(cursor, g);
    state.end_change();
}

/// Insert an already-decoded run of pasted text (bracketed paste). Always a
/// fresh, non-coalescing change.
pub fn insert_text(state: &mut EditorState, cursor: &mut Position, text: &str) {
    state.begin_change(MergeTag::None);
    state.insert_text(cursor, text);
    state.end_change();
}

pub fn insert_newline(state: &mut EditorState, cursor: &mut Position) -> bool {
    let before_lines = state.active_buffer().line_count();
    state.begin_change(MergeTag::Insert);
    state.insert_text(cursor, "\n");
    state.end_change();
    state.active_buffer().line_count() != before_lines
}

/// Delete the grapheme before `cursor` (Backspace). Returns false if there
/// was nothing to remove.
pub fn backspace(state: &mut EditorState, cursor: &mut Position) -> bool {
    let Some((start, end)) = grapheme_before(state, *cursor) else {
        return false;
    };
    state.begin_change(MergeTag::Erase);
    let removed = state.erase_range(start, end);
    state.end_change();
    *cursor = position_at(state, start);
    !removed.is_empty()
}

/// Delete the grapheme under `cursor` (Delete key / `x`-style). Returns the
/// removed text, empty if there was nothing under the cursor.
pub fn delete_under(state: &mut EditorState, cursor: &mut Position) -> String {
    let Some((start, end)) = grapheme_under(state, *cursor) else {
        return String::new();
    };
    state.begin_change(MergeTag::Delete);
    let removed = state.delete_range(start, end);
    state.end_change();
    *cursor = position_at(state, start);
    removed
}

fn position_at(state: &EditorState, offset: usize) -> Position {
    let buf = state.active_buffer();
    buf.position_of(&buf.iter_at_byte(offset))
}

fn grapheme_before(state: &EditorState, cursor: Position) -> Option<(usize, usize)> {
    if cursor.byte == 0 && cursor.line == 0 {
        return None;
    }
    let buffer = state.active_buffer();
    if cursor.byte == 0 {
        // Backspace at column 0 erases the previous line's newline.
        let prev_line = cursor.line.checked_sub(1)?;
        let end = buffer.byte_offset(&buffer.iter_at(cursor.line, 0));
        let start = end.checked_sub(1)?;
        let _ = prev_line;
        return Some((start, end));
    }
    let line = buffer.line(cursor.line)?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let prev = core_text::grapheme::prev_boundary(trimmed, cursor.byte);
    if prev >= cursor.byte {
        return None;
    }
    let line_start = buffer.byte_offset(&buffer.iter_at(cursor.line, 0));
    Some((line_start + prev, line_start + cursor.byte))
}

fn grapheme_under(state: &EditorState, cursor: Position) -> Option<(usize, usize)> {
    let buffer = state.active_buffer();
    if cursor.line >= buffer.line_count() {
        return None;
    }
    let line = buffer.line(cursor.line)?;
    let has_newline = line.ends_with('\n');
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let line_start = buffer.byte_offset(&buffer.iter_at(cursor.line, 0));
    if cursor.byte < trimmed.len() {
        let next = core_text::grapheme::next_boundary(trimmed, cursor.byte);
        Some((line_start + cursor.byte, line_start + next))
    } else if has_newline {
        let end = line_start + trimmed.len() + 1;
        Some((line_start + trimmed.len(), end))
    } else {
        None
    }
}
