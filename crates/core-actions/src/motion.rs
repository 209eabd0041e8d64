//! Cursor motion kinds and their pure application to a buffer position.
//!
//! Vertical motions thread `EditorState::sticky_col` so that repeated
//! up/down keeps the cursor's preferred visual column even through short
//! lines, the way terminal editors generally do.

use core_state::{EditorState, Mode, SelectionSpan};
use core_text::{Position, motion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    LineStart,
    LineEnd,
    Up,
    Down,
    WordForward,
    WordBackward,
    PageHalfDown,
    PageHalfUp,
}

/// Apply `kind` once to `cursor` against `state`'s active buffer.
pub fn apply(state: &mut EditorState, cursor: &mut Position, kind: MotionKind) {
    match kind {
        MotionKind::Left => {
            motion::left(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::Right => {
            motion::right(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::LineStart => {
            motion::line_start(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::LineEnd => {
            motion::line_end(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::WordForward => {
            motion::word_forward(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::WordBackward => {
            motion::word_backward(state.active_buffer(), cursor);
            state.sticky_col = None;
        }
        MotionKind::Up => {
            let sticky = state.sticky_col;
            state.sticky_col = motion::up(state.active_buffer(), cursor, sticky);
        }
        MotionKind::Down => {
            let sticky = state.sticky_col;
            state.sticky_col = motion::down(state.active_buffer(), cursor, sticky);
        }
        MotionKind::PageHalfDown => page_half(state, cursor, true),
        MotionKind::PageHalfUp => page_half(state, cursor, false),
    }
    if matches!(state.mode(), Mode::Normal) {
        motion::normalize_normal_mode_position(state.active_buffer(), cursor);
    }
    extend_selection(state, *cursor);
}

/// If a selection anchor is set (the `select` command toggled one on),
/// grow the active span to the cursor's new position, keeping its kind.
fn extend_selection(state: &mut EditorState, cursor: Position) {
    let Some(anchor) = state.selection.anchor else {
        return;
    };
    let kind = state
        .selection
        .active
        .map(|s| s.kind)
        .unwrap_or(core_state::SelectionKind::Characterwise);
    state.selection.set(SelectionSpan::new(anchor, cursor, kind));
}

/// Half a screen's worth of lines (`last_text_height / 2`, floor 1),
/// applied by repeating the single-line vertical motion so sticky-column
/// tracking stays correct.
fn page_half(state: &mut EditorState, cursor: &mut Position, down: bool) {
    let total_lines = state.active_buffer().line_count();
    if total_lines == 0 {
        return;
    }
    let h = state.last_text_height.max(1).min(total_lines);
    let jump = (h / 2).max(1);
    let target = if down {
        (cursor.line + jump).min(total_lines.saturating_sub(1))
    } else {
        cursor.line.saturating_sub(jump)
    };
    while cursor.line != target {
        let sticky = state.sticky_col;
        state.sticky_col = if down {
            motion::down(state.active_buffer(), cursor, sticky)
        } else {
            motion::up(state.active_buffer(), cursor, sticky)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    fn setup(text: &str) -> (EditorState, Position) {
        let buffer = Buffer::from_str("t", text).unwrap();
        (EditorState::new(buffer), Position::origin())
    }

    #[test]
    fn normal_mode_line_end_clamps() {
        let (mut state, mut cursor) = setup("abc\n");
        apply(&mut state, &mut cursor, MotionKind::LineEnd);
        assert_eq!(cursor.byte, 2, "cursor clamps to last grapheme start");
    }

    #[test]
    fn vertical_motion_tracks_sticky_column() {
        let (mut state, mut cursor) = setup("abcdef\nxy\nabcdef\n");
        cursor.byte = 5;
        apply(&mut state, &mut cursor, MotionKind::Down);
        assert_eq!(cursor.line, 1);
        assert!(cursor.byte <= 2, "clamped on the short line");
        apply(&mut state, &mut cursor, MotionKind::Down);
        assert_eq!(cursor.line, 2);
        assert_eq!(cursor.byte, 5, "restores preferred column once room allows");
    }

    #[test]
    fn motion_extends_active_selection() {
        use core_state::{SelectionKind, SelectionSpan};
        let (mut state, mut cursor) = setup("abcdef\n");
        state.selection.anchor = Some(cursor);
        state
            .selection
            .set(SelectionSpan::new(cursor, cursor, SelectionKind::Characterwise));
        apply(&mut state, &mut cursor, MotionKind::Right);
        apply(&mut state, &mut cursor, MotionKind::Right);
        let span = state.selection().unwrap();
        assert_eq!(span.start.byte, 0);
        assert_eq!(span.end.byte, 2);
    }

    #[test]
    fn page_half_down_moves_by_half_text_height() {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("{i}\n"));
        }
        let (mut state, mut cursor) = setup(&text);
        state.last_text_height = 20;
        apply(&mut state, &mut cursor, MotionKind::PageHalfDown);
        assert_eq!(cursor.line, 10);
    }
}
