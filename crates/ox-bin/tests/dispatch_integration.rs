//! Integration-level check that key dispatch and the view/model layer agree:
//! typing through the dispatcher updates the active view's cursor and the
//! model stays on its single-view invariant.

use core_actions::dispatcher::{ModeBindings, dispatch_key};
use core_command::Runner;
use core_keymap::parse_key_string;
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Buffer;

#[test]
fn typing_through_the_model_advances_the_active_view_cursor() {
    let buffer = Buffer::from_str("t", "").unwrap();
    let mut model = EditorModel::new(EditorState::new(buffer));
    let mut bindings = ModeBindings::with_defaults();
    let mut runner = Runner::new();

    {
        let (state, view) = model.split_state_and_active_view();
        for c in "hi".chars() {
            dispatch_key(
                &mut bindings,
                &mut runner,
                state,
                &mut view.cursor,
                core_keymap::KeyCode::from_char(c, 0),
                None,
            );
        }
    }

    assert_eq!(model.state().active_buffer().line(0).unwrap(), "hi");
    assert_eq!(model.active_view().cursor.byte, 2);
}

#[test]
fn quit_binding_is_observed_through_dispatch_outcome() {
    let buffer = Buffer::from_str("t", "x").unwrap();
    let mut model = EditorModel::new(EditorState::new(buffer));
    let mut bindings = ModeBindings::with_defaults();
    let mut runner = Runner::new();

    let (state, view) = model.split_state_and_active_view();
    let code = parse_key_string("C-;").unwrap();
    dispatch_key(&mut bindings, &mut runner, state, &mut view.cursor, code, None);
    for c in "quit -f".chars() {
        dispatch_key(
            &mut bindings,
            &mut runner,
            state,
            &mut view.cursor,
            core_keymap::KeyCode::from_char(c, 0),
            None,
        );
    }
    let enter = parse_key_string("enter").unwrap();
    let outcome = dispatch_key(&mut bindings, &mut runner, state, &mut view.cursor, enter, None);
    assert!(outcome.quit);
}
