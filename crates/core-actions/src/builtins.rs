//! The shared command table: one flat `CommandSet` backing all three modes'
//! key bindings and the command-line `Runner`, grounded in the original
//! editor's single command table (`commands.c`'s `cmds[]`).
//!
//! Block (rectangular) selection, tags, compiler/error-list integration,
//! external filters and tab/window management are out of scope here; the
//! commands below cover motion, editing, selection, clipboard, undo, search
//! and replace, mode transitions and session I/O.

use crate::edit_ops;
use crate::motion::{self, MotionKind};
use crate::search::{self, SearchDirection};
use core_command::{Command, CommandArgs, CommandSet, ExecContext, MacroStep, RunError};
use core_state::{Mode, PasteSource, SelectionKind, SelectionSpan};
use core_text::Position;

fn ok() -> Result<(), RunError> {
    Ok(())
}

/// Mirrors `handle_select_chars_flag`: with the flag present, start (or
/// continue) a characterwise selection anchored at the pre-move cursor;
/// without it, a plain motion drops any active selection.
fn select_chars_flag(ctx: &mut ExecContext, has_c: bool) {
    if !has_c {
        ctx.state.selection.clear();
        return;
    }
    if ctx.state.selection.anchor.is_none() {
        ctx.state.selection.anchor = Some(*ctx.cursor);
        ctx.state
            .selection
            .set(SelectionSpan::new(*ctx.cursor, *ctx.cursor, SelectionKind::Characterwise));
    }
}

/// Mirrors `handle_select_chars_or_lines_flags`: `-l` selects whole lines,
/// `-c` selects characters, neither drops the selection.
fn select_chars_or_lines_flag(ctx: &mut ExecContext, has_c: bool, has_l: bool) {
    if !has_c && !has_l {
        ctx.state.selection.clear();
        return;
    }
    let kind = if has_l { SelectionKind::Linewise } else { SelectionKind::Characterwise };
    if ctx.state.selection.anchor.is_none() {
        ctx.state.selection.anchor = Some(*ctx.cursor);
        ctx.state.selection.set(SelectionSpan::new(*ctx.cursor, *ctx.cursor, kind));
    } else if let Some(mut span) = ctx.state.selection.active {
        span.kind = kind;
        ctx.state.selection.active = Some(span);
    }
}

macro_rules! motion_cmd {
    ($fn_name:ident, $kind:expr) => {
        fn $fn_name(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
            select_chars_flag(ctx, args.has_flag('c'));
            motion::apply(ctx.state, ctx.cursor, $kind);
            ok()
        }
    };
}

motion_cmd!(mv_left, MotionKind::Left);
motion_cmd!(mv_right, MotionKind::Right);
motion_cmd!(mv_bol, MotionKind::LineStart);
motion_cmd!(mv_eol, MotionKind::LineEnd);
motion_cmd!(mv_word_fwd, MotionKind::WordForward);
motion_cmd!(mv_word_bwd, MotionKind::WordBackward);

fn mv_up(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    select_chars_or_lines_flag(ctx, args.has_flag('c'), args.has_flag('l'));
    motion::apply(ctx.state, ctx.cursor, MotionKind::Up);
    ok()
}

fn mv_down(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    select_chars_or_lines_flag(ctx, args.has_flag('c'), args.has_flag('l'));
    motion::apply(ctx.state, ctx.cursor, MotionKind::Down);
    ok()
}

fn mv_pgup(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    select_chars_or_lines_flag(ctx, args.has_flag('c'), args.has_flag('l'));
    motion::apply(ctx.state, ctx.cursor, MotionKind::PageHalfUp);
    ok()
}

fn mv_pgdown(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    select_chars_or_lines_flag(ctx, args.has_flag('c'), args.has_flag('l'));
    motion::apply(ctx.state, ctx.cursor, MotionKind::PageHalfDown);
    ok()
}

fn mv_bof(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.selection.clear();
    *ctx.cursor = Position::origin();
    ok()
}

fn mv_eof(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.selection.clear();
    let buf = ctx.state.active_buffer();
    let last = buf.line_count().saturating_sub(1);
    let byte = buf.line_byte_len(last);
    *ctx.cursor = Position::new(last, byte);
    core_text::motion::normalize_normal_mode_position(ctx.state.active_buffer(), ctx.cursor);
    ok()
}

// --- Editing -----------------------------------------------------------

/// Newline with auto-indent: copies the previous line's leading whitespace.
/// (Extra indent on an opening brace/keyword is a filetype-aware feature not
/// wired up in this build; this always copies verbatim.)
fn cmd_new_line(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let buf_opts = ctx.state.active_buffer().options;
    let prev_line = ctx.state.active_buffer().line(ctx.cursor.line).unwrap_or_default();
    let trimmed = prev_line.strip_suffix('\n').unwrap_or(&prev_line);
    let indent_opts = core_command::indent::IndentOptions {
        indent_width: buf_opts.indent_width,
        tab_width: buf_opts.tab_width,
        expand_tab: buf_opts.expand_tab,
    };
    let indent = core_command::indent::compute_indent(trimmed, false, indent_opts);
    edit_ops::insert_newline(ctx.state, ctx.cursor);
    if !indent.is_empty() {
        edit_ops::insert_text(ctx.state, ctx.cursor, &indent);
    }
    ok()
}

fn delete_selection_if_any(ctx: &mut ExecContext) -> bool {
    let Some(span) = ctx.state.selection() else { return false; };
    let (start, end) = span.inclusive_byte_range(ctx.state.active_buffer());
    if start == end {
        ctx.state.selection.clear();
        return false;
    }
    let removed = ctx.state.delete_span_with_snapshot(ctx.cursor, start, end);
    ctx.state.registers_facade().write_delete(removed, None);
    ctx.state.selection.clear();
    true
}

fn cmd_delete(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if !delete_selection_if_any(ctx) {
        edit_ops::delete_under(ctx.state, ctx.cursor);
    }
    ok()
}

fn cmd_erase(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if !delete_selection_if_any(ctx) {
        edit_ops::backspace(ctx.state, ctx.cursor);
    }
    ok()
}

fn cmd_delete_eol(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if ctx.state.selection().is_some() {
        return ok();
    }
    let buf = ctx.state.active_buffer();
    let start = buf.byte_offset(&buf.iter_at(ctx.cursor.line, ctx.cursor.byte));
    let eol = buf.byte_offset(&buf.iter_at(ctx.cursor.line, buf.line_byte_len(ctx.cursor.line)));
    ctx.state.delete_range(start, eol);
    ok()
}

fn cmd_join(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let buf = ctx.state.active_buffer();
    if ctx.cursor.line + 1 >= buf.line_count() {
        return ok();
    }
    let eol = buf.byte_offset(&buf.iter_at(ctx.cursor.line, buf.line_byte_len(ctx.cursor.line)));
    ctx.state.begin_change(core_state::undo::MergeTag::None);
    ctx.state.replace_range(eol, eol + 1, " ");
    ctx.state.end_change();
    ok()
}

// --- Selection / clipboard ----------------------------------------------

fn cmd_select(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let kind = if args.has_flag('l') { SelectionKind::Linewise } else { SelectionKind::Characterwise };
    let keep = args.has_flag('k');
    if let Some(span) = ctx.state.selection.active {
        if !keep && span.kind == kind {
            ctx.state.selection.clear();
            return ok();
        }
        ctx.state.selection.set(SelectionSpan::new(span.start, span.end, kind));
        return ok();
    }
    ctx.state.selection.anchor = Some(*ctx.cursor);
    ctx.state.selection.set(SelectionSpan::new(*ctx.cursor, *ctx.cursor, kind));
    ok()
}

fn cmd_unselect(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.selection.clear();
    ok()
}

fn current_line_range(ctx: &ExecContext) -> (usize, usize) {
    let buf = ctx.state.active_buffer();
    let start = buf.byte_offset(&buf.iter_at(ctx.cursor.line, 0));
    let len = buf.line_byte_len(ctx.cursor.line);
    let has_nl = buf.line(ctx.cursor.line).is_some_and(|l| l.ends_with('\n'));
    (start, start + len + usize::from(has_nl))
}

fn cmd_copy(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if let Some(span) = ctx.state.selection() {
        let (start, end) = span.inclusive_byte_range(ctx.state.active_buffer());
        let text = ctx.state.active_buffer().slice_bytes(start, end);
        ctx.state.registers_facade().write_yank(text, None);
        if !args.has_flag('k') {
            ctx.state.selection.clear();
        }
    } else {
        let (start, end) = current_line_range(ctx);
        let text = ctx.state.active_buffer().slice_bytes(start, end);
        ctx.state.registers_facade().write_yank(text, None);
    }
    ok()
}

fn cmd_cut(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let (start, end) = match ctx.state.selection() {
        Some(span) => span.inclusive_byte_range(ctx.state.active_buffer()),
        None => current_line_range(ctx),
    };
    if start == end {
        ctx.state.selection.clear();
        return ok();
    }
    let removed = ctx.state.delete_span_with_snapshot(ctx.cursor, start, end);
    ctx.state.registers_facade().write_delete(removed, None);
    ctx.state.selection.clear();
    ok()
}

fn cmd_paste(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let before = args.has_flag('c');
    if let Err(e) = ctx.state.paste(PasteSource::Unnamed, before, ctx.cursor) {
        ctx.state.error.report(format!("nothing to paste: {e:?}"));
    }
    ok()
}

fn cmd_shift(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let Some(count_str) = args.positional.first() else {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    };
    let Ok(count) = count_str.parse::<i64>() else {
        ctx.state.error.report(format!("invalid shift count: {count_str}"));
        return ok();
    };
    let (start_line, end_line) = match ctx.state.selection() {
        Some(span) => (span.start.line, span.end.line),
        None => (ctx.cursor.line, ctx.cursor.line),
    };
    let buf_opts = ctx.state.active_buffer().options;
    let indent_width = buf_opts.indent_width;
    let tab_width = buf_opts.tab_width;
    let expand_tab = buf_opts.expand_tab;
    ctx.state.begin_change_chain();
    for line_idx in start_line..=end_line {
        let buf = ctx.state.active_buffer();
        let Some(line) = buf.line(line_idx) else { break; };
        let has_nl = line.ends_with('\n');
        let content = line.strip_suffix('\n').unwrap_or(&line).to_string();
        let shifted = if count >= 0 {
            core_command::shift::shift_right(&content, count as usize, indent_width, expand_tab)
        } else {
            core_command::shift::shift_left(&content, (-count) as usize, indent_width, tab_width)
        };
        let line_start = buf.byte_offset(&buf.iter_at(line_idx, 0));
        let line_end = line_start + content.len();
        let mut replacement = shifted;
        if has_nl {
            replacement.push('\n');
        }
        ctx.state.replace_range(line_start, line_end + usize::from(has_nl), &replacement);
    }
    ctx.state.end_change_chain();
    ok()
}

// --- Undo / redo ----------------------------------------------------------

fn cmd_undo(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    crate::undo_ops::undo(ctx.state, ctx.cursor);
    ok()
}

fn cmd_redo(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    crate::undo_ops::redo(ctx.state, ctx.cursor);
    ok()
}

// --- Mode transitions ------------------------------------------------------

fn cmd_command(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.command_line.begin();
    ctx.state.push_mode(Mode::Command);
    ok()
}

fn cmd_search_mode(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.command_line.begin();
    ctx.state.push_mode(Mode::Search);
    ok()
}

fn cmd_cancel(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    ctx.state.command_line.clear();
    ctx.state.pop_mode();
    ok()
}

/// `accept` is dispatched from `Command`/`Search` mode only (never bound in
/// Normal); its effect depends on which mode it fires from.
fn cmd_accept(_args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    match ctx.state.mode() {
        Mode::Search => {
            let pattern = ctx.state.command_line.buffer().to_string();
            ctx.state.command_line.clear();
            ctx.state.pop_mode();
            if pattern.is_empty() {
                return ok();
            }
            match search::find(ctx.state, *ctx.cursor, &pattern, SearchDirection::Forward) {
                Ok(Some((start, _))) => search::jump_to(ctx.state, ctx.cursor, start),
                Ok(None) => ctx.state.error.report(format!("not found: {pattern}")),
                Err(e) => ctx.state.error.report(format!("bad pattern: {e}")),
            }
            ctx.state.last_search = Some(pattern);
        }
        Mode::Command => {
            // Only closes the prompt: this `CommandFn` has no handle to a
            // `Runner`. `dispatch_key` recognizes `accept` in Command mode
            // and runs the typed line itself once the prompt is closed.
            ctx.state.command_line.clear();
            ctx.state.pop_mode();
        }
        Mode::Normal => {}
    }
    ok()
}

// --- Search / replace -------------------------------------------------------

fn cmd_search(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let backward = args.has_flag('r');
    let pattern = args
        .positional
        .first()
        .cloned()
        .or_else(|| ctx.state.last_search.clone());
    let Some(pattern) = pattern else {
        ctx.state.error.report("no previous search pattern");
        return ok();
    };
    let direction = if backward { SearchDirection::Backward } else { SearchDirection::Forward };
    match search::find(ctx.state, *ctx.cursor, &pattern, direction) {
        Ok(Some((start, _))) => search::jump_to(ctx.state, ctx.cursor, start),
        Ok(None) => ctx.state.error.report(format!("not found: {pattern}")),
        Err(e) => ctx.state.error.report(format!("bad pattern: {e}")),
    }
    ctx.state.last_search = Some(pattern);
    ok()
}

fn cmd_replace(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if args.positional.len() < 2 {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    }
    let pattern = args.positional[0].clone();
    let replacement = args.positional[1].clone();
    let range = if args.has_flag('g') {
        None
    } else {
        ctx.state.selection().map(|s| s.inclusive_byte_range(ctx.state.active_buffer()))
    };
    match search::replace_all(ctx.state, &pattern, &replacement, range) {
        Ok(n) => {
            ctx.state.set_ephemeral(format!("{n} replacement(s)"), std::time::Duration::from_secs(3));
        }
        Err(e) => ctx.state.error.report(format!("bad pattern: {e}")),
    }
    ok()
}

// --- Session I/O -------------------------------------------------------------

fn cmd_quit(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    if ctx.state.dirty() && !args.has_flag('f') {
        ctx.state.error.report("unsaved changes (use quit -f to discard)");
        return ok();
    }
    ctx.quit_requested = true;
    ok()
}

fn cmd_save(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let target = args.positional.first().map(std::path::Path::new);
    match crate::io_ops::write_file(ctx.state, target) {
        crate::io_ops::WriteFileResult::Success => {}
        crate::io_ops::WriteFileResult::NoFilename => {
            ctx.state.error.report("no file name");
        }
        crate::io_ops::WriteFileResult::Error => {
            ctx.state.error.report("write failed");
        }
    }
    ok()
}

fn cmd_open(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let Some(path) = args.positional.first() else {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    };
    match crate::io_ops::open_file(std::path::Path::new(path)) {
        crate::io_ops::OpenFileResult::Success(s) => {
            let idx = ctx.state.add_buffer(s.buffer);
            ctx.state.active = idx;
            ctx.state.set_file_name(Some(s.file_name));
            ctx.state.set_original_line_ending(s.original_line_ending);
            ctx.state.set_had_trailing_newline(s.had_trailing_newline);
            *ctx.cursor = Position::origin();
        }
        crate::io_ops::OpenFileResult::Error => {
            ctx.state.error.report(format!("cannot open {path}"));
        }
    }
    ok()
}

/// Toggles the macro recorder and replays the last completed recording.
/// `record`/`stop` reach `Runner::macros` through `ctx.runner`, staged there
/// by `Runner::run_tokens`/`CachedCommand::execute` for this one call.
fn cmd_macro(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let Some(sub) = args.positional.first().map(String::as_str) else {
        ctx.state.error.report("usage: macro record|stop|play");
        return ok();
    };
    let Some(runner) = ctx.runner.as_deref_mut() else {
        ctx.state.error.report("macro: no runner attached");
        return ok();
    };
    match sub {
        "record" => runner.macros.start(),
        "stop" => {
            let steps = runner.macros.stop();
            runner.last_macro = steps;
        }
        "play" => {
            // Safe to `take`: nothing below reuses `runner` after this, and
            // `run` puts `ctx` right back the way it found it.
            let runner = ctx.runner.take().expect("checked above");
            let steps = runner.last_macro.clone();
            for step in &steps {
                match step {
                    MacroStep::Command(src) => {
                        let _ = runner.run(src, &ALL_COMMANDS, ctx);
                    }
                    MacroStep::Insert(text) => edit_ops::insert_text(ctx.state, ctx.cursor, text),
                }
            }
            ctx.runner = Some(runner);
        }
        _ => ctx.state.error.report("usage: macro record|stop|play"),
    }
    ok()
}

/// `alias <name> <command...>`. Reaches `Runner::define_alias` through
/// `ctx.runner` the same way `cmd_macro` reaches `Runner::macros`.
fn cmd_alias(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let Some(name) = args.positional.first() else {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    };
    let value = args.positional[1..].join(" ");
    match ctx.runner.as_deref_mut() {
        Some(runner) => runner.define_alias(name.clone(), value),
        None => ctx.state.error.report("alias: no runner attached"),
    }
    ok()
}

/// `bind [-n|-c|-s] <key> <command...>`. `core-command` cannot reach the
/// per-mode `KeyBindingGroup`s (that would cycle back through `core-keymap`
/// and `core-actions`), so this only stages the request; `dispatch_key`
/// applies it against the live binding tables right after this call returns.
fn cmd_bind(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let Some(key) = args.positional.first() else {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    };
    let body = args.positional[1..].join(" ");
    ctx.pending_bind = Some(core_command::PendingBind {
        has_n: args.has_flag('n'),
        has_c: args.has_flag('c'),
        has_s: args.has_flag('s'),
        key: key.clone(),
        body,
    });
    ok()
}

/// `set <name> <value>`. Editor options (`core_config::Config`) live only in
/// the `ox-bin` event loop, so `set`/`show option` stage their request the
/// same way `bind`/`show bind` do, for the loop to apply once dispatch
/// returns.
fn cmd_set(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    let (Some(name), Some(value)) = (args.positional.first(), args.positional.get(1)) else {
        return Err(RunError::Args(core_command::ArgsError::TooFewArguments));
    };
    ctx.pending_set = Some((name.clone(), value.clone()));
    ok()
}

/// `show alias|cmd <name>|bind [-n|-c|-s]|option`.
fn cmd_show(args: &CommandArgs, ctx: &mut ExecContext) -> Result<(), RunError> {
    match args.positional.first().map(String::as_str) {
        Some("alias") => {
            let text = match ctx.runner.as_deref() {
                Some(runner) => core_command::show::show_alias(runner),
                None => "show alias: no runner attached".to_string(),
            };
            ctx.state.error.report(text);
        }
        Some("cmd") => {
            let Some(name) = args.positional.get(1) else {
                ctx.state.error.report("usage: show cmd <name>");
                return ok();
            };
            ctx.state.error.report(core_command::show::show_cmd(&ALL_COMMANDS, name));
        }
        Some("bind") => {
            ctx.pending_show_bind = Some(core_command::PendingShowBind {
                has_n: args.has_flag('n'),
                has_c: args.has_flag('c'),
                has_s: args.has_flag('s'),
            });
        }
        Some("option") => {
            ctx.show_option_requested = true;
        }
        Some(other) => {
            ctx.state.error.report(format!("unknown show target: {other}"));
        }
        None => ctx.state.error.report("usage: show alias|cmd|bind|option"),
    }
    ok()
}

macro_rules! cmd {
    ($name:expr, $min:expr, $max:expr, $spec:expr, $rc:expr, $func:expr) => {
        Command {
            name: $name,
            min_args: $min,
            max_args: $max,
            option_spec: $spec,
            allowed_in_rc: $rc,
            func: $func,
        }
    };
}

static COMMANDS: &[Command] = &[
    cmd!("left", 0, 0, "c", false, mv_left),
    cmd!("right", 0, 0, "c", false, mv_right),
    cmd!("up", 0, 0, "cl", false, mv_up),
    cmd!("down", 0, 0, "cl", false, mv_down),
    cmd!("bol", 0, 0, "c", false, mv_bol),
    cmd!("eol", 0, 0, "c", false, mv_eol),
    cmd!("bof", 0, 0, "", false, mv_bof),
    cmd!("eof", 0, 0, "", false, mv_eof),
    cmd!("pgup", 0, 0, "cl", false, mv_pgup),
    cmd!("pgdown", 0, 0, "cl", false, mv_pgdown),
    cmd!("word-fwd", 0, 0, "cs", false, mv_word_fwd),
    cmd!("word-bwd", 0, 0, "cs", false, mv_word_bwd),
    cmd!("new-line", 0, 0, "", false, cmd_new_line),
    cmd!("delete", 0, 0, "", false, cmd_delete),
    cmd!("erase", 0, 0, "", false, cmd_erase),
    cmd!("delete-eol", 0, 0, "n", false, cmd_delete_eol),
    cmd!("join", 0, 0, "", false, cmd_join),
    cmd!("select", 0, 0, "kl", false, cmd_select),
    cmd!("unselect", 0, 0, "", false, cmd_unselect),
    cmd!("copy", 0, 0, "k", false, cmd_copy),
    cmd!("cut", 0, 0, "", false, cmd_cut),
    cmd!("paste", 0, 0, "c", false, cmd_paste),
    cmd!("shift", 1, 1, "", false, cmd_shift),
    cmd!("undo", 0, 0, "", false, cmd_undo),
    cmd!("redo", 0, 0, "", false, cmd_redo),
    cmd!("command", 0, 0, "", false, cmd_command),
    cmd!("search-mode", 0, 0, "", false, cmd_search_mode),
    cmd!("accept", 0, 0, "", false, cmd_accept),
    cmd!("cancel", 0, 0, "", false, cmd_cancel),
    cmd!("search", 0, 1, "r", false, cmd_search),
    cmd!("replace", 2, 2, "g", false, cmd_replace),
    cmd!("quit", 0, 0, "f", false, cmd_quit),
    cmd!("save", 0, 1, "", false, cmd_save),
    cmd!("open", 1, 1, "", false, cmd_open),
    cmd!("macro", 1, 1, "", false, cmd_macro),
    cmd!("alias", 2, 0xFF, "", true, cmd_alias),
    cmd!("bind", 2, 0xFF, "ncs", true, cmd_bind),
    cmd!("set", 2, 2, "", true, cmd_set),
    cmd!("show", 1, 2, "ncs", false, cmd_show),
];

/// The single command table shared by Normal/Command/Search bindings and by
/// the command-line `Runner`.
pub static ALL_COMMANDS: CommandSet = CommandSet { commands: COMMANDS };
