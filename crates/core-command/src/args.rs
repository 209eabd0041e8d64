//! Argument/flag parser: turns a token vector plus a [`Command`] descriptor
//! into a [`CommandArgs`].

use crate::command::Command;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ArgsError {
    #[error("invalid option -{0}")]
    InvalidOption(char),
    #[error("too many options")]
    TooManyOptions,
    #[error("option -{0} requires an argument")]
    OptionArgumentMissing(char),
    #[error("option -{0}'s argument must be a separate token")]
    OptionArgumentNotSeparate(char),
    #[error("too few arguments")]
    TooFewArguments,
    #[error("too many arguments")]
    TooManyArguments,
}

/// Cap on the number of distinct flags a single invocation may carry,
/// matching the fixed small cap described for `TOO_MANY_OPTIONS`.
const MAX_OPTIONS: usize = 16;

/// Parsed result of a single command invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandArgs {
    pub positional: Vec<String>,
    pub flag_chars: Vec<char>,
    pub flag_bitset: u64,
    pub flag_args: Vec<String>,
}

impl CommandArgs {
    pub fn has_flag(&self, c: char) -> bool {
        flag_bit(c).is_some_and(|bit| self.flag_bitset & (1 << bit) != 0)
    }

    /// The argument bound to flag `c`, if `c` was listed as `c=` in the
    /// command's option-spec and was present.
    pub fn flag_arg(&self, c: char) -> Option<&str> {
        self.flag_chars
            .iter()
            .position(|&f| f == c)
            .and_then(|i| self.flag_args.get(i))
            .map(String::as_str)
    }
}

fn flag_bit(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        'a'..='z' => Some(26 + c as u32 - 'a' as u32),
        '0'..='9' => Some(52 + c as u32 - '0' as u32),
        _ => None,
    }
}

/// Returns the set of chars from `option_spec` that require a separate
/// argument (those marked `x=`).
fn arg_taking_flags(option_spec: &str) -> Vec<char> {
    let chars: Vec<char> = option_spec.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if i + 1 < chars.len() && chars[i + 1] == '=' {
            out.push(c);
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Parse `tokens` (the command's arguments, not including the command name
/// itself) against `cmd`'s descriptor.
pub fn parse(cmd: &Command, tokens: &[String]) -> Result<CommandArgs, ArgsError> {
    let arg_taking = arg_taking_flags(cmd.option_spec);
    let mut positional = Vec::new();
    let mut flag_chars = Vec::new();
    let mut flag_args = Vec::new();
    let mut seen = 0usize;
    let mut flags_done = false;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        if flags_done || !tok.starts_with('-') || tok == "-" {
            positional.push(tok.clone());
            i += 1;
            continue;
        }
        if tok == "--" {
            flags_done = true;
            i += 1;
            continue;
        }
        for c in tok[1..].chars() {
            if seen >= MAX_OPTIONS {
                return Err(ArgsError::TooManyOptions);
            }
            let bit = flag_bit(c).ok_or(ArgsError::InvalidOption(c))?;
            if arg_taking.contains(&c) {
                i += 1;
                let arg = tokens.get(i).ok_or(ArgsError::OptionArgumentMissing(c))?;
                if arg.starts_with('-') && arg.len() > 1 {
                    return Err(ArgsError::OptionArgumentNotSeparate(c));
                }
                flag_chars.push(c);
                flag_args.push(arg.clone());
            } else {
                flag_chars.push(c);
            }
            let _ = bit;
            seen += 1;
        }
        i += 1;
    }

    let nr_args = positional.len();
    if nr_args < cmd.min_args as usize {
        return Err(ArgsError::TooFewArguments);
    }
    if cmd.max_args != 0xFF && nr_args > cmd.max_args as usize {
        return Err(ArgsError::TooManyArguments);
    }

    let flag_bitset = flag_chars.iter().fold(0u64, |acc, &c| {
        flag_bit(c).map(|b| acc | (1 << b)).unwrap_or(acc)
    });

    // Flag-arguments are rotated to the front of the positional vector.
    let mut out_positional = flag_args.clone();
    out_positional.extend(positional);

    Ok(CommandArgs {
        positional: out_positional,
        flag_chars,
        flag_bitset,
        flag_args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(option_spec: &'static str, min: u8, max: u8) -> Command {
        Command {
            name: "test",
            min_args: min,
            max_args: max,
            option_spec,
            allowed_in_rc: true,
            func: |_args, _ctx| Ok(()),
        }
    }

    #[test]
    fn packed_flags_parse() {
        let c = cmd("abc", 0, 0xFF);
        let out = parse(&c, &["-abc".to_string()]).unwrap();
        assert!(out.has_flag('a') && out.has_flag('b') && out.has_flag('c'));
    }

    #[test]
    fn flag_with_required_argument() {
        let c = cmd("x=", 0, 0xFF);
        let out = parse(&c, &["-x".to_string(), "value".to_string()]).unwrap();
        assert_eq!(out.flag_arg('x'), Some("value"));
    }

    #[test]
    fn flag_argument_must_be_separate() {
        let c = cmd("x=", 0, 0xFF);
        let err = parse(&c, &["-xvalue".to_string()]).unwrap_err();
        // 'x' is read from the packed token and then demands the *next*
        // token as its argument; none follows, so this is a missing arg,
        // not an implicit "rest of this token" argument.
        assert_eq!(err, ArgsError::OptionArgumentMissing('x'));
    }

    #[test]
    fn double_dash_terminates_flags() {
        let c = cmd("f", 0, 0xFF);
        let out = parse(&c, &["--".to_string(), "-f".to_string()]).unwrap();
        assert_eq!(out.positional, vec!["-f"]);
        assert!(!out.has_flag('f'));
    }

    #[test]
    fn too_few_and_too_many_arguments() {
        let c = cmd("", 1, 1);
        assert_eq!(
            parse(&c, &[]).unwrap_err(),
            ArgsError::TooFewArguments
        );
        assert_eq!(
            parse(&c, &["a".to_string(), "b".to_string()]).unwrap_err(),
            ArgsError::TooManyArguments
        );
    }

    #[test]
    fn unbounded_max_args_is_0xff() {
        let c = cmd("", 0, 0xFF);
        let tokens: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert!(parse(&c, &tokens).is_ok());
    }

    #[test]
    fn flag_args_rotate_to_front() {
        let c = cmd("x=", 0, 0xFF);
        let out = parse(
            &c,
            &[
                "pos1".to_string(),
                "-x".to_string(),
                "val".to_string(),
                "pos2".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(out.positional, vec!["val", "pos1", "pos2"]);
    }
}
