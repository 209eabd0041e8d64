//! Default key bindings for the three input modes.
//!
//! Bare `:` and `/` cannot be bound (a bare printable key has no modifier to
//! disambiguate it from ordinary text insertion), so mode entry rides on
//! `C-;`/`C-/` instead, mirroring how the original editor reserves control
//! chords for its mode-entry keys.

use crate::builtins::ALL_COMMANDS;
use core_keymap::KeyBindingGroup;

fn bind(group: &mut KeyBindingGroup, key: &str, command: &str) {
    group
        .bind(key, command)
        .unwrap_or_else(|e| panic!("bad default binding {key} -> {command}: {e}"));
}

pub fn normal_mode_bindings() -> KeyBindingGroup {
    let mut group = KeyBindingGroup::new(ALL_COMMANDS);
    bind(&mut group, "left", "left");
    bind(&mut group, "right", "right");
    bind(&mut group, "up", "up");
    bind(&mut group, "down", "down");
    bind(&mut group, "S-left", "left -c");
    bind(&mut group, "S-right", "right -c");
    bind(&mut group, "S-up", "up -c");
    bind(&mut group, "S-down", "down -c");
    bind(&mut group, "home", "bol");
    bind(&mut group, "end", "eol");
    bind(&mut group, "C-home", "bof");
    bind(&mut group, "C-end", "eof");
    bind(&mut group, "pgup", "pgup");
    bind(&mut group, "pgdown", "pgdown");
    bind(&mut group, "C-right", "word-fwd");
    bind(&mut group, "C-left", "word-bwd");
    bind(&mut group, "enter", "new-line");
    bind(&mut group, "backspace", "erase");
    bind(&mut group, "del", "delete");
    bind(&mut group, "C-k", "delete-eol");
    bind(&mut group, "C-j", "join");
    bind(&mut group, "C-z", "undo");
    bind(&mut group, "C-y", "redo");
    bind(&mut group, "C-c", "copy");
    bind(&mut group, "C-x", "cut");
    bind(&mut group, "C-v", "paste");
    bind(&mut group, "C-space", "select");
    bind(&mut group, "escape", "unselect");
    bind(&mut group, "tab", "shift 1");
    bind(&mut group, "S-tab", "shift -1");
    bind(&mut group, "C-;", "command");
    bind(&mut group, "C-/", "search-mode");
    bind(&mut group, "C-n", "search");
    bind(&mut group, "C-p", "search -r");
    group
}

pub fn command_mode_bindings() -> KeyBindingGroup {
    let mut group = KeyBindingGroup::new(ALL_COMMANDS);
    bind(&mut group, "enter", "accept");
    bind(&mut group, "escape", "cancel");
    group
}

pub fn search_mode_bindings() -> KeyBindingGroup {
    let mut group = KeyBindingGroup::new(ALL_COMMANDS);
    bind(&mut group, "enter", "accept");
    bind(&mut group, "escape", "cancel");
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_keymap::parse_key_string;

    #[test]
    fn normal_mode_binds_core_motions() {
        let group = normal_mode_bindings();
        assert!(group.lookup(parse_key_string("left").unwrap()).is_some());
        assert!(group.lookup(parse_key_string("C-;").unwrap()).is_some());
    }

    #[test]
    fn command_and_search_modes_share_accept_cancel() {
        let cmd = command_mode_bindings();
        let search = search_mode_bindings();
        assert!(cmd.lookup(parse_key_string("enter").unwrap()).is_some());
        assert!(search.lookup(parse_key_string("enter").unwrap()).is_some());
    }
}
