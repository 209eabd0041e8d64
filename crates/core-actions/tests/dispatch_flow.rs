//! End-to-end key-dispatch scenarios: motion + selection + clipboard,
//! command-mode round trips, and undo/redo through the public dispatcher.

use core_actions::dispatcher::{ModeBindings, dispatch_key};
use core_command::Runner;
use core_keymap::{KeyCode, parse_key_string};
use core_state::{EditorState, Mode};
use core_text::{Buffer, Position};

fn setup(text: &str) -> (ModeBindings, Runner, EditorState, Position) {
    (
        ModeBindings::with_defaults(),
        Runner::new(),
        EditorState::new(Buffer::from_str("t", text).unwrap()),
        Position::origin(),
    )
}

fn press(
    bindings: &mut ModeBindings,
    runner: &mut Runner,
    state: &mut EditorState,
    cursor: &mut Position,
    key: &str,
) {
    let code = parse_key_string(key).unwrap();
    dispatch_key(bindings, runner, state, cursor, code, None);
}

fn type_text(
    bindings: &mut ModeBindings,
    runner: &mut Runner,
    state: &mut EditorState,
    cursor: &mut Position,
    text: &str,
) {
    for c in text.chars() {
        dispatch_key(bindings, runner, state, cursor, KeyCode::from_char(c, 0), None);
    }
}

#[test]
fn typing_then_undo_restores_empty_buffer() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("");
    type_text(&mut bindings, &mut runner, &mut state, &mut cursor, "hello");
    assert_eq!(state.active_buffer().line(0).unwrap(), "hello");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-z");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-z");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-z");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-z");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-z");
    assert_eq!(state.active_buffer().line(0).unwrap(), "");
}

#[test]
fn select_extend_copy_paste_round_trip() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("hello world");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-space");
    for _ in 0..5 {
        press(&mut bindings, &mut runner, &mut state, &mut cursor, "S-right");
    }
    assert_eq!(state.selection().unwrap().start.byte, 0);
    assert_eq!(state.selection().unwrap().end.byte, 5);
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-c");
    // Inclusive selection: the character under the cursor after the last
    // motion (the space at byte 5) is part of the copied range.
    assert_eq!(state.registers.unnamed, "hello ");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-end");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-v");
    assert_eq!(state.active_buffer().line(0).unwrap(), "hello worldhello ");
}

#[test]
fn command_mode_entry_and_cancel_round_trip() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("abc");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-;");
    assert_eq!(state.mode(), Mode::Command);
    type_text(&mut bindings, &mut runner, &mut state, &mut cursor, "quit");
    assert_eq!(state.command_line.buffer(), "quit");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "escape");
    assert_eq!(state.mode(), Mode::Normal);
    assert_eq!(state.command_line.buffer(), "");
}

#[test]
fn search_mode_jumps_to_next_match() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("foo bar foo\n");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-/");
    type_text(&mut bindings, &mut runner, &mut state, &mut cursor, "foo");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "enter");
    assert_eq!(state.mode(), Mode::Normal);
    assert_eq!(cursor.byte, 8);
    assert_eq!(state.last_search.as_deref(), Some("foo"));
}

#[test]
fn command_mode_accept_runs_the_typed_line() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("ab");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-;");
    type_text(&mut bindings, &mut runner, &mut state, &mut cursor, "new-line");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "enter");
    assert_eq!(state.mode(), Mode::Normal);
    assert_eq!(state.command_line.buffer(), "");
    assert_eq!(state.active_buffer().line(0).unwrap(), "");
    assert_eq!(state.active_buffer().line(1).unwrap(), "ab");
}

#[test]
fn command_mode_accept_on_blank_line_is_a_no_op() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("abc");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "C-;");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "enter");
    assert_eq!(state.mode(), Mode::Normal);
    assert_eq!(state.active_buffer().line(0).unwrap(), "abc");
}

#[test]
fn delete_under_cursor_without_selection() {
    let (mut bindings, mut runner, mut state, mut cursor) = setup("abc");
    press(&mut bindings, &mut runner, &mut state, &mut cursor, "del");
    assert_eq!(state.active_buffer().line(0).unwrap(), "bc");
}
