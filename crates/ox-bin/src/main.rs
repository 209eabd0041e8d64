//! Oxidized entrypoint.

mod key_bridge;

use anyhow::Result;
use clap::Parser;
use core_actions::builtins::ALL_COMMANDS;
use core_actions::dispatcher::{ModeBindings, apply_pending_bind, dispatch_key};
use core_actions::io_ops::OpenFileResult;
use core_command::{ExecContext, Runner, VarContext};
use core_config::{Config, ConfigContext, ConfigPlatformTraits, load_from};
use core_events::{Event, InputEvent};
use core_model::{EditorModel, Layout};
use core_render::render_engine::{RenderEngine, build_status_line_with_ephemeral};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalCapabilities};
use core_text::{Buffer, BufferOptions};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const STATUS_ROWS: u16 = 1;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxidized", version, about = "Oxidized editor")]
struct Args {
    /// Optional path to open at startup (UTF-8 text). If omitted a welcome buffer is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `oxidized.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Optional rc file path (overrides discovery of the startup command file).
    #[arg(long = "rc")]
    pub rc: Option<PathBuf>,
    /// Skip loading the rc file entirely.
    #[arg(long = "norc")]
    pub norc: bool,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("oxidized.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, "oxidized.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_editor_model(args: &Args) -> Result<(EditorModel, Config)> {
    let (mut state, open_failed) = if let Some(path) = args.path.as_ref() {
        match core_actions::io_ops::open_file(path) {
            OpenFileResult::Success(ok) => {
                if ok.mixed_line_endings {
                    tracing::warn!(target: "io", "mixed_line_endings_detected_startup");
                }
                let mut state = EditorState::new(ok.buffer);
                state.set_file_name(Some(ok.file_name));
                state.set_original_line_ending(ok.original_line_ending);
                state.set_had_trailing_newline(ok.had_trailing_newline);
                state.set_dirty(false);
                if let Ok(abs_path) = path.canonicalize() {
                    apply_editorconfig(state.active_buffer_mut(), &abs_path);
                }
                (state, false)
            }
            OpenFileResult::Error => {
                error!(target: "io", path = %path.display(), "file_open_error");
                (EditorState::new(Buffer::from_str("untitled", "")?), true)
            }
        }
    } else {
        (EditorState::new(Buffer::from_str("untitled", "")?), false)
    };

    if open_failed {
        state.set_ephemeral("Open failed", std::time::Duration::from_secs(3));
    }

    let mut config = load_from(args.config.clone())?;
    let terminal_caps = TerminalCapabilities::detect();
    let platform_traits =
        ConfigPlatformTraits::new(cfg!(windows), terminal_caps.supports_scroll_region);
    if let Ok((w, h)) = crossterm::terminal::size() {
        let ctx = ConfigContext::new(w, h, STATUS_ROWS, 0, platform_traits);
        config.apply_context(ctx);
    }
    state.config_vertical_margin = config.effective_vertical_margin as usize;

    info!(
        target: "runtime.startup",
        path = ?args.path,
        open_failed,
        effective_margin = config.effective_vertical_margin,
        "bootstrap_complete"
    );

    Ok((EditorModel::new(state), config))
}

/// Merges a file's resolved `.editorconfig` properties onto its buffer's
/// options (indent width/style, tab width, line-length limit), leaving any
/// field `.editorconfig` left unspecified at the buffer's existing default.
fn apply_editorconfig(buffer: &mut Buffer, path: &Path) {
    let ec = core_config::editorconfig::resolve_for_path(path);
    let mut opts: BufferOptions = buffer.options;
    match ec.indent_style {
        core_config::IndentStyle::Space => opts.expand_tab = true,
        core_config::IndentStyle::Tab => opts.expand_tab = false,
        core_config::IndentStyle::Unspecified => {}
    }
    if let Some(tab_width) = ec.tab_width {
        opts.tab_width = tab_width as usize;
    }
    if ec.indent_size_is_tab {
        opts.indent_width = opts.tab_width;
    } else if let Some(indent_size) = ec.indent_size {
        opts.indent_width = indent_size as usize;
    }
    if let Some(max_line_length) = ec.max_line_length {
        opts.text_width = max_line_length as usize;
    }
    buffer.options = opts;
}

/// Runs the rc file (if any) once at startup, with `loading_rc` set so
/// interactive-only commands (movement, editing, `quit`, ...) are rejected
/// before they can run against a buffer that has no view yet. Bindings and
/// options a line stages (`bind`, `set`) are applied the same way the main
/// loop applies them for interactive commands; a missing rc file is not an
/// error, a malformed one is reported but does not abort startup.
fn load_rc(
    args: &Args,
    runner: &mut Runner,
    bindings: &mut ModeBindings,
    config: &mut Config,
    model: &mut EditorModel,
) {
    if args.norc {
        return;
    }
    let path = args.rc.clone().unwrap_or_else(core_config::discover_rc);
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            tracing::warn!(target: "runtime.rc", path = %path.display(), %e, "rc_file_unreadable");
            return;
        }
    };

    let (state, view) = model.split_state_and_active_view();
    let mut ctx = ExecContext {
        state,
        cursor: &mut view.cursor,
        vars: VarContext::default(),
        loading_rc: true,
        quit_requested: false,
        runner: None,
        pending_bind: None,
        pending_show_bind: None,
        pending_set: None,
        show_option_requested: false,
    };
    if let Err(e) = runner.run(&source, &ALL_COMMANDS, &mut ctx) {
        tracing::warn!(target: "runtime.rc", path = %path.display(), %e, "rc_command_failed");
    }
    apply_pending_bind(bindings, &mut ctx);
    apply_pending_config(
        &core_actions::DispatchOutcome {
            pending_set: ctx.pending_set.take(),
            show_option_requested: ctx.show_option_requested,
            ..core_actions::DispatchOutcome::default()
        },
        config,
        ctx.state,
    );
}

/// Applies a `set`/`show option` staged by `dispatch_key`, reporting the
/// result through the same `state.error` channel command errors use.
fn apply_pending_config(outcome: &core_actions::dispatcher::DispatchOutcome, config: &mut Config, state: &mut EditorState) {
    if let Some((name, value)) = &outcome.pending_set
        && let Err(e) = config.set_option(name, value)
    {
        state.error.report(e.to_string());
    }
    if outcome.show_option_requested {
        let mut text = String::new();
        for (name, value) in config.options() {
            text.push_str(&format!("{name}  {value}\n"));
        }
        state.error.report(text);
    }
}

/// Accumulates bracketed-paste chunks between `PasteStart`/`PasteEnd` so the
/// whole paste reaches the dispatcher as a single side-channel string rather
/// than one `dispatch_key` call per chunk.
#[derive(Default)]
struct PasteAccumulator {
    buf: Option<String>,
}

impl PasteAccumulator {
    fn start(&mut self) {
        self.buf = Some(String::new());
    }
    fn push(&mut self, chunk: &str) {
        if let Some(buf) = self.buf.as_mut() {
            buf.push_str(chunk);
        }
    }
    fn finish(&mut self) -> String {
        self.buf.take().unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();

    let args = Args::parse();
    let mut backend = CrosstermBackend::new();
    backend.set_title("Oxidized")?;
    let _guard = backend.enter_guard()?;

    let (mut model, mut config) = load_editor_model(&args)?;
    let mut bindings = ModeBindings::with_defaults();
    let mut runner = Runner::new();
    load_rc(&args, &mut runner, &mut bindings, &mut config, &mut model);
    let mut render_engine = RenderEngine::new();
    let mut paste = PasteAccumulator::default();

    let (tx, mut rx) = mpsc::channel::<Event>(core_events::EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    drop(tx);

    let (mut term_w, mut term_h) = crossterm::terminal::size().unwrap_or((80, 24));

    let result = loop {
        let event = match rx.recv().await {
            Some(event) => event,
            None => break Ok(()),
        };

        let quit = match event {
            Event::Input(InputEvent::Resize(w, h)) => {
                term_w = w;
                term_h = h;
                false
            }
            Event::Input(InputEvent::CtrlC) => true,
            Event::Input(InputEvent::PasteStart) => {
                paste.start();
                false
            }
            Event::Input(InputEvent::PasteChunk(chunk)) => {
                paste.push(&chunk);
                false
            }
            Event::Input(InputEvent::PasteEnd) => {
                let text = paste.finish();
                let (state, view) = model.split_state_and_active_view();
                let outcome = dispatch_key(
                    &mut bindings,
                    &mut runner,
                    state,
                    &mut view.cursor,
                    core_keymap::KeyCode::paste_marker(),
                    Some(&text),
                );
                apply_pending_config(&outcome, &mut config, state);
                outcome.quit
            }
            Event::Input(InputEvent::KeyPress(ext)) => {
                if let Some(code) = key_bridge::translate_token(&ext.token) {
                    let (state, view) = model.split_state_and_active_view();
                    let outcome =
                        dispatch_key(&mut bindings, &mut runner, state, &mut view.cursor, code, None);
                    apply_pending_config(&outcome, &mut config, state);
                    outcome.quit
                } else {
                    false
                }
            }
            Event::Shutdown => true,
            // Legacy key event, periodic ticks, render requests, mouse/focus/IME
            // events and raw bytes are not part of the editor-core surface this
            // binary drives; ignored.
            _ => false,
        };

        if quit {
            break Ok(());
        }

        let text_height = term_h.saturating_sub(STATUS_ROWS);
        {
            let (state, view) = model.split_state_and_active_view();
            view.auto_scroll(state, text_height as usize);
        }

        let layout = Layout::single(term_w, term_h);
        let status_line =
            build_status_line_with_ephemeral(model.state(), model.active_view(), term_w);
        if let Err(e) = render_engine.render_full(
            model.state(),
            model.active_view(),
            &layout,
            term_w,
            term_h,
            &status_line,
        ) {
            error!(target: "render", ?e, "render_full_failed");
        }
    };

    input_shutdown.signal();
    let _ = input_task.await;
    result
}
