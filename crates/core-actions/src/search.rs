//! Regex-driven incremental search and buffer/selection-wide replace.
//!
//! Search has no persistent compiled state beyond `EditorState::last_search`:
//! every jump recompiles the pattern, which keeps this module free of
//! lifetime-tied caches at the cost of a rebuild per keystroke of "search
//! next". Fine for interactive use; a hot loop would want to cache the
//! `Regex` instead.

use core_state::{EditorState, undo::MergeTag};
use core_text::Position;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Find the next match in `direction` from `cursor`, wrapping around the
/// buffer when nothing is found between the cursor and that end.
pub fn find(
    state: &EditorState,
    cursor: Position,
    pattern: &str,
    direction: SearchDirection,
) -> Result<Option<(usize, usize)>, regex::Error> {
    let re = Regex::new(pattern)?;
    let buffer = state.active_buffer();
    let text = buffer.slice_bytes(0, buffer.total_bytes());
    let at = buffer.byte_offset(&buffer.iter_at(cursor.line, cursor.byte));

    Ok(match direction {
        SearchDirection::Forward => {
            let after = at + 1;
            re.find_at(&text, after.min(text.len()))
                .map(|m| (m.start(), m.end()))
                .or_else(|| re.find(&text).map(|m| (m.start(), m.end())))
        }
        SearchDirection::Backward => {
            let mut last_before = None;
            let mut last_overall = None;
            for m in re.find_iter(&text) {
                last_overall = Some((m.start(), m.end()));
                if m.start() < at {
                    last_before = Some((m.start(), m.end()));
                }
            }
            last_before.or(last_overall)
        }
    })
}

/// Move `cursor` to the start of `(start, end)`.
pub fn jump_to(state: &EditorState, cursor: &mut Position, start: usize) {
    let buffer = state.active_buffer();
    *cursor = buffer.position_of(&buffer.iter_at_byte(start));
}

/// Substitute every match of `pattern` within `range` (or the whole buffer)
/// with `replacement`, expanding `$1`/`$name` capture references the way
/// `Regex::replace_all` does. Recorded as a single undo step regardless of
/// match count. Returns the number of matches replaced.
pub fn replace_all(
    state: &mut EditorState,
    pattern: &str,
    replacement: &str,
    range: Option<(usize, usize)>,
) -> Result<usize, regex::Error> {
    let re = Regex::new(pattern)?;
    let (start, end) = range.unwrap_or((0, state.active_buffer().total_bytes()));
    if start >= end {
        return Ok(0);
    }
    let text = state.active_buffer().slice_bytes(start, end);
    let count = re.find_iter(&text).count();
    if count == 0 {
        return Ok(0);
    }
    let replaced = re.replace_all(&text, replacement).into_owned();
    state.begin_change(MergeTag::None);
    state.replace_range(start, end, &replaced);
    state.end_change();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    fn setup(text: &str) -> EditorState {
        EditorState::new(Buffer::from_str("t", text).unwrap())
    }

    #[test]
    fn find_forward_wraps_around() {
        let state = setup("foo bar foo\n");
        let cursor = Position::new(0, 5);
        let (start, _) = find(&state, cursor, "foo", SearchDirection::Forward)
            .unwrap()
            .unwrap();
        assert_eq!(start, 8);
        let cursor = Position::new(0, 9);
        let (start, _) = find(&state, cursor, "foo", SearchDirection::Forward)
            .unwrap()
            .unwrap();
        assert_eq!(start, 0, "wraps to the first match");
    }

    #[test]
    fn find_backward_wraps_around() {
        let state = setup("foo bar foo\n");
        let cursor = Position::new(0, 9);
        let (start, _) = find(&state, cursor, "foo", SearchDirection::Backward)
            .unwrap()
            .unwrap();
        assert_eq!(start, 0);
        let cursor = Position::new(0, 0);
        let (start, _) = find(&state, cursor, "foo", SearchDirection::Backward)
            .unwrap()
            .unwrap();
        assert_eq!(start, 8, "wraps to the last match");
    }

    #[test]
    fn replace_all_is_a_single_undo_step() {
        let mut state = setup("cat cat cat");
        let mut cursor = Position::origin();
        let replaced = replace_all(&mut state, "cat", "dog", None).unwrap();
        assert_eq!(replaced, 3);
        assert_eq!(state.active_buffer().line(0).unwrap(), "dog dog dog");
        assert_eq!(state.undo_depth(), 1);
        assert!(state.undo(&mut cursor));
        assert_eq!(state.active_buffer().line(0).unwrap(), "cat cat cat");
    }

    #[test]
    fn bad_pattern_errors() {
        let mut state = setup("abc");
        assert!(replace_all(&mut state, "(", "x", None).is_err());
    }
}
