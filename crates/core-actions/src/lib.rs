//! Editor actions: motions, edits, selection, undo/redo, search/replace, the
//! built-in command table, default key bindings, and the top-level key
//! dispatcher that ties them together.
//!
//! There is no separate "insert mode" here: Normal mode both moves the
//! cursor and accepts typed text, so `dispatcher::dispatch_key` falls
//! through to a direct grapheme insert for any bound-less printable key
//! rather than routing through a mode switch.

pub mod builtins;
pub mod dispatcher;
pub mod edit_ops;
pub mod io_ops;
pub mod keymap_defaults;
pub mod motion;
pub mod search;
pub mod undo_ops;

pub use dispatcher::{DispatchOutcome, ModeBindings, apply_pending_bind, dispatch_key};
pub use motion::MotionKind;
