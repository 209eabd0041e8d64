//! Undo / redo against the active buffer's change tree.
//!
//! `EditorState::undo`/`redo` already take a raw cursor position and
//! reposition it at the edit they unwind, so there is nothing left for this
//! module to own beyond the before/after line-count comparison the
//! dispatcher uses to decide whether a full repaint is needed.

use core_state::EditorState;
use core_text::Position;

/// Undo the most recent change. Returns `true` if anything was undone.
pub fn undo(state: &mut EditorState, cursor: &mut Position) -> bool {
    let before = state.active_buffer().line_count();
    let moved = state.undo(cursor);
    if moved {
        let after = state.active_buffer().line_count();
        tracing::trace!(target: "actions.undo", buffer_changed = (before != after), "undo");
    }
    moved
}

/// Redo the most recently undone change. Returns `true` if anything was redone.
pub fn redo(state: &mut EditorState, cursor: &mut Position) -> bool {
    let before = state.active_buffer().line_count();
    let moved = state.redo(cursor);
    if moved {
        let after = state.active_buffer().line_count();
        tracing::trace!(target: "actions.undo", buffer_changed = (before != after), "redo");
    }
    moved
}
