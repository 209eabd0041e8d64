//! Static command descriptors and per-mode command sets.

use crate::args::CommandArgs;
use crate::runner::{ExecContext, RunError};

/// A command's implementation function. Receives the parsed args and the
/// execution context (buffer/view access, error reporting, variable
/// context).
pub type CommandFn = fn(&CommandArgs, &mut ExecContext) -> Result<(), RunError>;

/// Static descriptor for a built-in command.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub min_args: u8,
    pub max_args: u8,
    /// Letters and `=` markers, e.g. `"fx="` means `-f` is a bare flag and
    /// `-x` requires an argument.
    pub option_spec: &'static str,
    pub allowed_in_rc: bool,
    pub func: CommandFn,
}

/// The set of commands legal in a given mode, looked up by name.
#[derive(Clone, Copy)]
pub struct CommandSet {
    pub commands: &'static [Command],
}

impl CommandSet {
    pub fn lookup(&self, name: &str) -> Option<&'static Command> {
        self.commands.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_args: &CommandArgs, _ctx: &mut ExecContext) -> Result<(), RunError> {
        Ok(())
    }

    #[test]
    fn lookup_finds_command_by_name() {
        static CMDS: &[Command] = &[Command {
            name: "quit",
            min_args: 0,
            max_args: 0,
            option_spec: "f",
            allowed_in_rc: true,
            func: noop,
        }];
        let set = CommandSet { commands: CMDS };
        assert!(set.lookup("quit").is_some());
        assert!(set.lookup("nope").is_none());
    }
}
