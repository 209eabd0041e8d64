//! The command language: tokenizer, argument parser, alias/macro runner,
//! and the small set of supplemented helpers (indent, shift, status format,
//! `show` introspection) that built-in commands are implemented in terms
//! of.

pub mod args;
pub mod command;
pub mod indent;
pub mod runner;
pub mod shift;
pub mod show;
pub mod status;
pub mod tokenizer;
pub mod vars;

pub use args::{ArgsError, CommandArgs};
pub use command::{Command, CommandFn, CommandSet};
pub use runner::{
    CachedCommand, ExecContext, MacroRecorder, MacroStep, PendingBind, PendingShowBind, RunError,
    Runner,
};
pub use tokenizer::TokenizeError;
pub use vars::VarContext;
