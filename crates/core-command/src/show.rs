//! Read-only textual dumps used for diagnostics and for round-trip tests:
//! `show bind [mode]`, `show alias`, `show option`, `show cmd <name>`.

use crate::command::CommandSet;
use crate::runner::Runner;
use std::fmt::Write as _;

/// Render every alias as `name  value`, one per line, sorted by name.
pub fn show_alias(runner: &Runner) -> String {
    let mut entries: Vec<_> = runner.aliases().collect();
    entries.sort_by_key(|(name, _)| *name);
    let mut out = String::new();
    for (name, value) in entries {
        let _ = writeln!(out, "{name}  {value}");
    }
    out
}

/// Render a single command's descriptor, or a "no such command" line.
pub fn show_cmd(command_set: &CommandSet, name: &str) -> String {
    match command_set.lookup(name) {
        Some(cmd) => format!(
            "{}  min={} max={} opts={} rc={}",
            cmd.name, cmd.min_args, cmd.max_args, cmd.option_spec, cmd.allowed_in_rc
        ),
        None => format!("no such command: {name}"),
    }
}

/// Render the bindings of a given mode's [`crate::command::CommandSet`] as
/// `key -> source`, one per line, sorted by key for deterministic output.
pub fn show_bind<'a>(bindings: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut entries: Vec<_> = bindings.collect();
    entries.sort_by_key(|(k, _)| k.to_string());
    let mut out = String::new();
    for (key, source) in entries {
        let _ = writeln!(out, "{key} -> {source}");
    }
    out
}

/// Render a list of `(name, value)` options, one per line, sorted by name.
pub fn show_option<'a>(options: impl Iterator<Item = (&'a str, String)>) -> String {
    let mut entries: Vec<_> = options.collect();
    entries.sort_by_key(|(k, _)| k.to_string());
    let mut out = String::new();
    for (name, value) in entries {
        let _ = writeln!(out, "{name}  {value}");
    }
    out
}
