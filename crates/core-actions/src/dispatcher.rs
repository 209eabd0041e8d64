//! Top-level key dispatch: the single entry point the event loop calls once
//! per decoded key.
//!
//! Per mode, in order: a paste marker inserts side-channel paste text (into
//! the buffer in Normal mode, into the command line otherwise); a bound key
//! runs through its `CachedCommand` fast path or a full re-parse; a bare
//! printable scalar with no binding is inserted directly; anything else is
//! discarded. This mirrors the original editor's key-handling loop, which
//! tries a binding table before falling back to "insert this character".

use crate::edit_ops;
use core_command::{ExecContext, Runner, VarContext};
use core_keymap::{KeyBindingGroup, KeyCode, format_key_string, resolve_target};
use core_state::{EditorState, Mode};
use core_text::Position;

pub struct ModeBindings {
    pub normal: KeyBindingGroup,
    pub command: KeyBindingGroup,
    pub search: KeyBindingGroup,
}

impl ModeBindings {
    pub fn with_defaults() -> Self {
        Self {
            normal: crate::keymap_defaults::normal_mode_bindings(),
            command: crate::keymap_defaults::command_mode_bindings(),
            search: crate::keymap_defaults::search_mode_bindings(),
        }
    }

    fn group(&self, mode: Mode) -> &KeyBindingGroup {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Command => &self.command,
            Mode::Search => &self.search,
        }
    }

    fn group_for_target(&mut self, target: core_keymap::BindTarget) -> &mut KeyBindingGroup {
        match target {
            core_keymap::BindTarget::Normal => &mut self.normal,
            core_keymap::BindTarget::Command => &mut self.command,
            core_keymap::BindTarget::Search => &mut self.search,
        }
    }
}

/// What the caller needs to know after one dispatch: whether to repaint and
/// whether the session should end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub dirty: bool,
    pub quit: bool,
    pub buffer_replaced: bool,
    /// A `set <name> <value>` the command core staged; `core-config::Config`
    /// lives in the event loop, which applies this and clears it.
    pub pending_set: Option<(String, String)>,
    /// `show option` was invoked; the event loop renders the live `Config`.
    pub show_option_requested: bool,
}

/// Resolves a staged `bind`/`show bind` request against the live binding
/// tables and reports the result/listing through `state.error`, the same
/// channel command errors use. Called right after a command runs, since
/// `core-command` cannot reach `ModeBindings` itself. Also used directly by
/// the rc-file loader, which runs commands outside of `dispatch_key`.
pub fn apply_pending_bind(bindings: &mut ModeBindings, ctx: &mut ExecContext) {
    if let Some(req) = ctx.pending_bind.take() {
        let result = resolve_target(req.has_n, req.has_c, req.has_s)
            .map_err(|e| e.to_string())
            .and_then(|target| {
                bindings
                    .group_for_target(target)
                    .bind(&req.key, &req.body)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            ctx.state.error.report(format!("bind: {e}"));
        }
    }
    if let Some(req) = ctx.pending_show_bind.take() {
        let text = match resolve_target(req.has_n, req.has_c, req.has_s) {
            Ok(target) => {
                let group = bindings.group_for_target(target);
                let pairs: Vec<(String, String)> =
                    group.iter().map(|(key, cached)| (format_key_string(key), cached.source.clone())).collect();
                core_command::show::show_bind(pairs.iter().map(|(k, s)| (k.as_str(), s.as_str())))
            }
            Err(e) => e.to_string(),
        };
        ctx.state.error.report(text);
    }
}

/// Dispatch one decoded key. `paste_text` carries the side-channel payload
/// when `key` is the bracketed-paste marker; it is ignored otherwise.
pub fn dispatch_key(
    bindings: &mut ModeBindings,
    runner: &mut Runner,
    state: &mut EditorState,
    cursor: &mut Position,
    key: KeyCode,
    paste_text: Option<&str>,
) -> DispatchOutcome {
    let mode = state.mode();
    let before_buffers = state.buffers.len();
    let before_dirty = state.dirty();

    if key.is_paste_marker() {
        let text = paste_text.unwrap_or_default();
        match mode {
            Mode::Normal => edit_ops::insert_text(state, cursor, text),
            Mode::Command | Mode::Search => state.command_line.push_pasted(text),
        }
        return DispatchOutcome {
            dirty: true,
            quit: false,
            buffer_replaced: state.buffers.len() != before_buffers,
            ..DispatchOutcome::default()
        };
    }

    let group = bindings.group(mode);
    if let Some(cached) = group.lookup(key) {
        let command_set = group.command_set();
        // `accept` in Command mode only clears the prompt (its `CommandFn`
        // has no handle to this `Runner`); the dispatcher, which does, runs
        // the typed line itself once the prompt has closed.
        let is_command_line_accept =
            mode == Mode::Command && cached.source.split_whitespace().next() == Some("accept");
        let pending_line = is_command_line_accept.then(|| state.command_line.buffer().to_string());

        let mut ctx = ExecContext {
            state,
            cursor,
            vars: VarContext::default(),
            loading_rc: false,
            quit_requested: false,
            runner: None,
            pending_bind: None,
            pending_show_bind: None,
            pending_set: None,
            show_option_requested: false,
        };
        let result = cached.execute(runner, &command_set, &mut ctx);
        let mut quit = ctx.quit_requested;
        if let Err(e) = result {
            ctx.state.error.report(e.to_string());
        }
        apply_pending_bind(bindings, &mut ctx);
        let mut pending_set = ctx.pending_set.take();
        let mut show_option_requested = ctx.show_option_requested;

        if let Some(line) = pending_line
            && !line.trim().is_empty()
        {
            let mut ctx = ExecContext {
                state,
                cursor,
                vars: VarContext::default(),
                loading_rc: false,
                quit_requested: false,
                runner: None,
                pending_bind: None,
                pending_show_bind: None,
                pending_set: None,
                show_option_requested: false,
            };
            if let Err(e) = runner.run(&line, &command_set, &mut ctx) {
                ctx.state.error.report(e.to_string());
            }
            quit |= ctx.quit_requested;
            apply_pending_bind(bindings, &mut ctx);
            pending_set = pending_set.or(ctx.pending_set.take());
            show_option_requested |= ctx.show_option_requested;
        }

        return DispatchOutcome {
            dirty: true,
            quit,
            buffer_replaced: state.buffers.len() != before_buffers || state.dirty() != before_dirty,
            pending_set,
            show_option_requested,
        };
    }

    if let Some(c) = key.scalar()
        && key.is_bare_printable()
    {
        match mode {
            Mode::Normal => edit_ops::insert_grapheme(state, cursor, c.encode_utf8(&mut [0u8; 4])),
            Mode::Command | Mode::Search => state.command_line.push_char(c),
        }
        return DispatchOutcome {
            dirty: true,
            quit: false,
            buffer_replaced: false,
            ..DispatchOutcome::default()
        };
    }

    DispatchOutcome::default()
}
