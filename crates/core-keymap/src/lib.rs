//! Key encoding and per-mode key bindings.
//!
//! [`keycode`] defines the packed 32-bit `KeyCode` and the `[C-][M-][S-]<name>`
//! grammar used in binding files. [`binding`] holds the flat per-mode
//! key-to-command table that the input pipeline consults on every key.

pub mod binding;
pub mod keycode;

pub use binding::{BindError, BindTarget, KeyBindingGroup, resolve_target};
pub use keycode::{
    KeyCode, KeyParseError, MOD_CTRL, MOD_META, MOD_SHIFT, SymbolicKey, format_key_string,
    parse_key_string,
};
