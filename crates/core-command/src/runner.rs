//! Alias expansion, macro recording and command execution.

use crate::args::{self, ArgsError};
use crate::command::{Command, CommandSet};
use crate::tokenizer::{self, TokenizeError};
use crate::vars::VarContext;
use core_state::{EditorState, undo::MergeTag};
use core_text::Position;
use std::collections::HashMap;
use thiserror::Error;

/// Bound on alias-expansion recursion (`alias a -> alias b -> alias a ...`).
const MAX_ALIAS_DEPTH: u32 = 16;

/// Commands whose recorded macro form is suppressed: the recorder toggle
/// itself, commands that open external processes/tag jumps (not replayable
/// deterministically), and a no-op `search` (position-only, no mutation).
const MACRO_FILTERED: &[&str] = &["command", "exec-open", "exec-tag"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error("no such command: {0}")]
    NoSuchCommand(String),
    #[error("alias recursion limit reached")]
    AliasRecursionLimit,
    #[error("{0} is not allowed in rc files")]
    NotAllowedInRc(String),
}

/// Mutable context threaded into every [`crate::command::CommandFn`].
///
/// `cursor` is the active view's cursor position, owned by `core-model` and
/// borrowed in for the duration of one command. Commands that move or type
/// text read and write through it directly; viewport scrolling is a
/// presentation concern recomputed by the caller after dispatch, not here.
///
/// `runner` is a separate lifetime (`'r`) from `state`/`cursor`'s `'a`: it is
/// only ever populated for the duration of a single `cmd.func` call (by
/// [`Runner::run_tokens`]/[`CachedCommand::execute`], the two places that
/// hold both a `&mut Runner` and a `&mut ExecContext` as sibling borrows),
/// letting `alias`/`macro`/`show` reach `Runner::aliases`/`macros` without
/// `core-command` depending on anything above it.
pub struct ExecContext<'a, 'r> {
    pub state: &'a mut EditorState,
    pub cursor: &'a mut Position,
    pub vars: VarContext,
    /// True while evaluating an rc file; gates `allowed_in_rc`.
    pub loading_rc: bool,
    /// Set by the `quit` builtin; the caller checks this after dispatch and
    /// tears the session down instead of rendering another frame.
    pub quit_requested: bool,
    /// Present only while the command currently executing needs it.
    pub runner: Option<&'r mut Runner>,
    /// Staged by the `bind` builtin. `core-command` has no visibility into
    /// `core-keymap`'s binding tables, so the request is left here as plain
    /// data for the dispatcher (which owns the tables) to apply after the
    /// command returns, then clear.
    pub pending_bind: Option<PendingBind>,
    /// Staged by `show bind`; same completion path as `pending_bind`.
    pub pending_show_bind: Option<PendingShowBind>,
    /// Staged by `set <name> <value>`; `core-config::Config` lives in the
    /// event loop, not in any crate `core-command` can depend on, so this
    /// is applied the same way as `pending_bind`.
    pub pending_set: Option<(String, String)>,
    /// Set by `show option`; the event loop renders the live `Config` once
    /// dispatch returns, then clears this.
    pub show_option_requested: bool,
}

/// A `bind [-n|-c|-s] <key> <command...>` request, resolved by the caller
/// that owns the per-mode `KeyBindingGroup`s.
#[derive(Debug, Clone)]
pub struct PendingBind {
    pub has_n: bool,
    pub has_c: bool,
    pub has_s: bool,
    pub key: String,
    pub body: String,
}

/// A `show bind [-n|-c|-s]` request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingShowBind {
    pub has_n: bool,
    pub has_c: bool,
    pub has_s: bool,
}

/// A single recorded macro step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroStep {
    Command(String),
    Insert(String),
}

/// Captures *source-level* commands (not reparsed arguments) plus
/// text-insertion events while recording is toggled on.
#[derive(Debug, Default)]
pub struct MacroRecorder {
    recording: bool,
    steps: Vec<MacroStep>,
}

impl MacroRecorder {
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn start(&mut self) {
        self.recording = true;
        self.steps.clear();
    }

    pub fn stop(&mut self) -> Vec<MacroStep> {
        self.recording = false;
        std::mem::take(&mut self.steps)
    }

    pub fn record_command(&mut self, source: &str) {
        if !self.recording {
            return;
        }
        let head = source.split_whitespace().next().unwrap_or("");
        if MACRO_FILTERED.contains(&head) || head == "search" {
            return;
        }
        self.steps.push(MacroStep::Command(source.to_string()));
    }

    pub fn record_insert(&mut self, text: &str) {
        if self.recording && !text.is_empty() {
            self.steps.push(MacroStep::Insert(text.to_string()));
        }
    }
}

/// A pre-parsed binding/alias body. If the body is a single command with
/// static arguments (no `$` expansion, exactly one command, a resolvable
/// `Command` and a successful argument parse) the resolved function and
/// args are cached; otherwise only the raw source is kept and the body is
/// re-parsed on every invocation.
pub struct CachedCommand {
    pub source: String,
    resolved: Option<(Command, args::CommandArgs)>,
}

impl CachedCommand {
    pub fn compile(source: &str, command_set: &CommandSet) -> Self {
        let is_static = !source.contains('$');
        if is_static
            && let Ok(commands) = tokenizer::tokenize_sequence(source, |_| String::new())
            && commands.len() == 1
            && let [name, rest @ ..] = commands[0].as_slice()
            && let Some(cmd) = command_set.lookup(name)
            && let Ok(parsed) = args::parse(cmd, rest)
        {
            return Self {
                source: source.to_string(),
                resolved: Some((*cmd, parsed)),
            };
        }
        Self {
            source: source.to_string(),
            resolved: None,
        }
    }

    pub fn is_fast_path(&self) -> bool {
        self.resolved.is_some()
    }

    /// Execute the cached body: directly if a resolved fast path exists,
    /// otherwise by delegating to a fresh [`Runner::run`]. `runner`'s
    /// lifetime is tied directly to `ctx`'s `runner` slot so the fast path
    /// can hand it over for the single `cmd.func` call below.
    pub fn execute<'r>(
        &self,
        runner: &'r mut Runner,
        command_set: &CommandSet,
        ctx: &mut ExecContext<'_, 'r>,
    ) -> Result<(), RunError> {
        if let Some((cmd, parsed_args)) = &self.resolved {
            runner.macros.record_command(&self.source);
            ctx.runner = Some(runner);
            let result = (cmd.func)(parsed_args, ctx);
            ctx.runner = None;
            return result;
        }
        runner.run(&self.source, command_set, ctx)
    }
}

/// Resolves command names (built-ins then aliases), expands aliases with a
/// bounded recursion depth, and dispatches to the resolved function.
#[derive(Default)]
pub struct Runner {
    aliases: HashMap<String, String>,
    pub macros: MacroRecorder,
    /// The most recently completed recording, kept for `macro play`. Empty
    /// until the first `macro stop`.
    pub last_macro: Vec<MacroStep>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_alias(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.aliases.insert(name.into(), value.into());
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tokenize and run every command in `source` (a `;`/newline-separated
    /// sequence). Each top-level command gets a fresh non-coalescing change
    /// scope.
    pub fn run(
        &mut self,
        source: &str,
        command_set: &CommandSet,
        ctx: &mut ExecContext,
    ) -> Result<(), RunError> {
        let vars = ctx.vars.clone();
        let commands = tokenizer::tokenize_sequence(source, |name| crate::vars::expand(name, &vars))?;
        for tokens in commands {
            ctx.state.begin_change(MergeTag::None);
            let result = self.run_tokens(&tokens, command_set, ctx, 0);
            ctx.state.end_change();
            result?;
        }
        Ok(())
    }

    /// `self`'s lifetime is tied directly to `ctx`'s `runner` slot: the only
    /// places that hand `self` over (the resolved-command branch below, and
    /// the tail call into the alias-expanded form) do so exactly once and
    /// return immediately afterward, so the tie never needs to outlive a
    /// single branch of one call.
    fn run_tokens<'r>(
        &'r mut self,
        tokens: &[String],
        command_set: &CommandSet,
        ctx: &mut ExecContext<'_, 'r>,
        depth: u32,
    ) -> Result<(), RunError> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(());
        };
        // Record the literal top-level invocation only: a recursive call for
        // an alias's expanded form would otherwise log both the alias call
        // and its expansion as separate steps, double-executing on replay.
        if depth == 0 {
            self.macros.record_command(&tokens.join(" "));
        }
        if let Some(cmd) = command_set.lookup(name) {
            if ctx.loading_rc && !cmd.allowed_in_rc {
                return Err(RunError::NotAllowedInRc(name.clone()));
            }
            let parsed = args::parse(cmd, rest)?;
            ctx.runner = Some(self);
            let result = (cmd.func)(&parsed, ctx);
            ctx.runner = None;
            return result;
        }
        if let Some(alias_value) = self.aliases.get(name).cloned() {
            if depth + 1 >= MAX_ALIAS_DEPTH {
                return Err(RunError::AliasRecursionLimit);
            }
            let mut expanded_tokens = tokenizer::tokenize_sequence(&alias_value, |_| String::new())
                .map_err(RunError::from)?
                .into_iter()
                .next()
                .unwrap_or_default();
            expanded_tokens.extend(rest.iter().cloned());
            return self.run_tokens(&expanded_tokens, command_set, ctx, depth + 1);
        }
        Err(RunError::NoSuchCommand(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::CommandArgs;
    use core_text::Buffer;

    fn noop(_args: &CommandArgs, _ctx: &mut ExecContext) -> Result<(), RunError> {
        Ok(())
    }

    fn rc_only(_args: &CommandArgs, _ctx: &mut ExecContext) -> Result<(), RunError> {
        Ok(())
    }

    static CMDS: &[Command] = &[
        Command {
            name: "noop",
            min_args: 0,
            max_args: 0xFF,
            option_spec: "",
            allowed_in_rc: true,
            func: noop,
        },
        Command {
            name: "interactive-only",
            min_args: 0,
            max_args: 0,
            option_spec: "",
            allowed_in_rc: false,
            func: rc_only,
        },
    ];

    fn fresh_state() -> EditorState {
        EditorState::new(Buffer::from_str("t", "").unwrap())
    }

    #[test]
    fn unknown_command_errors() {
        let mut runner = Runner::new();
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        let err = runner.run("bogus", &set, &mut ctx).unwrap_err();
        assert_eq!(err, RunError::NoSuchCommand("bogus".to_string()));
    }

    #[test]
    fn alias_expands_and_appends_caller_args() {
        let mut runner = Runner::new();
        runner.define_alias("n", "noop extra");
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        assert!(runner.run("n more", &set, &mut ctx).is_ok());
    }

    #[test]
    fn alias_recursion_is_bounded() {
        let mut runner = Runner::new();
        for i in 0..20 {
            runner.define_alias(format!("a{i}"), format!("a{}", i + 1));
        }
        runner.define_alias("a20", "noop");
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        let err = runner.run("a0", &set, &mut ctx).unwrap_err();
        assert_eq!(err, RunError::AliasRecursionLimit);
    }

    #[test]
    fn rc_gating_blocks_non_rc_commands() {
        let mut runner = Runner::new();
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: true,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        let err = runner.run("interactive-only", &set, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RunError::NotAllowedInRc("interactive-only".to_string())
        );
    }

    #[test]
    fn macro_recorder_filters_meta_commands() {
        let mut runner = Runner::new();
        runner.macros.start();
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        runner.run("noop", &set, &mut ctx).unwrap();
        let steps = runner.macros.stop();
        assert_eq!(steps, vec![MacroStep::Command("noop".to_string())]);
    }

    #[test]
    fn macro_recorder_logs_alias_invocation_once() {
        let mut runner = Runner::new();
        runner.define_alias("n", "noop extra");
        runner.macros.start();
        let set = CommandSet { commands: CMDS };
        let mut state = fresh_state();
        let mut cursor = Position::origin();
        let mut ctx = ExecContext {
            state: &mut state,
            cursor: &mut cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        runner.run("n more", &set, &mut ctx).unwrap();
        let steps = runner.macros.stop();
        assert_eq!(steps, vec![MacroStep::Command("n more".to_string())]);
    }

    #[test]
    fn cached_command_fast_path_skips_reparsing() {
        let set = CommandSet { commands: CMDS };
        let cached = CachedCommand::compile("noop a b", &set);
        assert!(cached.is_fast_path());
        let dynamic = CachedCommand::compile("noop $FILE", &set);
        assert!(!dynamic.is_fast_path());
    }
}
