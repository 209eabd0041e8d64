//! Per-mode key-to-command bindings.

use crate::keycode::{KeyCode, KeyParseError, parse_key_string};
use core_command::{CachedCommand, CommandSet};
use std::collections::HashMap;
use thiserror::Error;

/// Which mode's binding table a `bind` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    Normal,
    Command,
    Search,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    Key(#[from] KeyParseError),
    #[error("bind requires exactly one of -n/-c/-s")]
    AmbiguousTarget,
    #[error("bind requires a key string and a command body")]
    MissingArgs,
}

/// Resolve `-n`/`-c`/`-s` flags to a [`BindTarget`]; defaults to `Normal`
/// when none is given (matching the bare `bind <key> <cmd>` form).
pub fn resolve_target(has_n: bool, has_c: bool, has_s: bool) -> Result<BindTarget, BindError> {
    match (has_n, has_c, has_s) {
        (false, false, false) => Ok(BindTarget::Normal),
        (true, false, false) => Ok(BindTarget::Normal),
        (false, true, false) => Ok(BindTarget::Command),
        (false, false, true) => Ok(BindTarget::Search),
        _ => Err(BindError::AmbiguousTarget),
    }
}

/// A mode's key bindings: a flat map from [`KeyCode`] to a pre-parsed
/// command body, plus the [`CommandSet`] that bodies resolve against.
pub struct KeyBindingGroup {
    bindings: HashMap<KeyCode, CachedCommand>,
    command_set: CommandSet,
}

impl KeyBindingGroup {
    pub fn new(command_set: CommandSet) -> Self {
        Self {
            bindings: HashMap::new(),
            command_set,
        }
    }

    pub fn command_set(&self) -> CommandSet {
        self.command_set
    }

    /// Parse `key_string` and compile `command_source` against this group's
    /// command set, replacing any existing binding for that key.
    pub fn bind(&mut self, key_string: &str, command_source: &str) -> Result<(), BindError> {
        let key = parse_key_string(key_string)?;
        let cached = CachedCommand::compile(command_source, &self.command_set);
        self.bindings.insert(key, cached);
        Ok(())
    }

    pub fn unbind(&mut self, key_string: &str) -> Result<bool, KeyParseError> {
        let key = parse_key_string(key_string)?;
        Ok(self.bindings.remove(&key).is_some())
    }

    pub fn lookup(&self, key: KeyCode) -> Option<&CachedCommand> {
        self.bindings.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, &CachedCommand)> {
        self.bindings.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
