//! Shell-like tokenizer for the command language.
//!
//! Whitespace separates tokens; `;` and `\n` separate commands within a
//! sequence; `#` begins a comment to end of line outside strings. Adjacent
//! quoted/unquoted fragments concatenate into a single argument.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum TokenizeError {
    #[error("unclosed '")]
    UnclosedSquote,
    #[error("unclosed \"")]
    UnclosedDquote,
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// A single command line: positional tokens, already variable-expanded.
pub type Tokens = Vec<String>;

/// Split `input` into `;`/newline-separated commands, each tokenized.
pub fn tokenize_sequence(
    input: &str,
    expand: impl Fn(&str) -> String,
) -> Result<Vec<Tokens>, TokenizeError> {
    let mut commands = Vec::new();
    let mut rest = input;
    loop {
        let (tokens, consumed) = tokenize_one(rest, &expand)?;
        if !tokens.is_empty() {
            commands.push(tokens);
        }
        if consumed >= rest.len() {
            break;
        }
        rest = &rest[consumed..];
    }
    Ok(commands)
}

/// Tokenize a single command (up to the next unescaped `;`/newline/EOF),
/// returning the tokens and how many bytes of `input` were consumed.
fn tokenize_one(
    input: &str,
    expand: &impl Fn(&str) -> String,
) -> Result<(Tokens, usize), TokenizeError> {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut tokens = Tokens::new();
    let mut current = String::new();
    let mut in_token = false;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            '#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            ';' | '\n' => {
                i += 1;
                break;
            }
            ' ' | '\t' => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
                i += 1;
            }
            '\'' => {
                in_token = true;
                i += 1;
                let start = i;
                while i < bytes.len() && bytes[i] != b'\'' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(TokenizeError::UnclosedSquote);
                }
                current.push_str(&input[start..i]);
                i += 1;
            }
            '"' => {
                in_token = true;
                i += 1;
                i = scan_dquote(bytes, input, i, &mut current)?;
            }
            '\\' if i + 1 >= bytes.len() => {
                return Err(TokenizeError::UnexpectedEof);
            }
            '$' => {
                in_token = true;
                let (expanded, next) = scan_variable(input, i, expand);
                current.push_str(&expanded);
                i = next;
            }
            _ => {
                in_token = true;
                let ch_len = c.len_utf8();
                current.push_str(&input[i..i + ch_len]);
                i += ch_len;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok((tokens, i))
}

fn scan_dquote(
    bytes: &[u8],
    input: &str,
    mut i: usize,
    out: &mut String,
) -> Result<usize, TokenizeError> {
    while i < bytes.len() && bytes[i] != b'"' {
        if bytes[i] == b'\\' {
            i += 1;
            if i >= bytes.len() {
                return Err(TokenizeError::UnexpectedEof);
            }
            i = decode_escape(input, i, out);
        } else {
            let c = input[i..].chars().next().unwrap();
            out.push(c);
            i += c.len_utf8();
        }
    }
    if i >= bytes.len() {
        return Err(TokenizeError::UnclosedDquote);
    }
    Ok(i + 1)
}

/// Decode the escape sequence starting right after the backslash at `i`.
/// Returns the index just past the consumed escape.
fn decode_escape(input: &str, i: usize, out: &mut String) -> usize {
    let bytes = input.as_bytes();
    let c = bytes[i] as char;
    match c {
        'a' => {
            out.push('\u{07}');
            i + 1
        }
        'b' => {
            out.push('\u{08}');
            i + 1
        }
        't' => {
            out.push('\t');
            i + 1
        }
        'n' => {
            out.push('\n');
            i + 1
        }
        'v' => {
            out.push('\u{0B}');
            i + 1
        }
        'f' => {
            out.push('\u{0C}');
            i + 1
        }
        'r' => {
            out.push('\r');
            i + 1
        }
        'e' => {
            out.push('\u{1B}');
            i + 1
        }
        '\\' => {
            out.push('\\');
            i + 1
        }
        '"' => {
            out.push('"');
            i + 1
        }
        'x' => decode_braced_hex(input, i + 1, out, 2),
        'u' => decode_braced_hex(input, i + 1, out, 4),
        'U' => decode_braced_hex(input, i + 1, out, 8),
        other => {
            out.push('\\');
            out.push(other);
            i + other.len_utf8()
        }
    }
}

/// Decode `{HH..}` hex payload up to `max_digits`. An incomplete sequence
/// (missing braces or non-hex digits) yields empty output, per the tokenizer
/// contract, and consumes only the opening brace check.
fn decode_braced_hex(input: &str, i: usize, out: &mut String, max_digits: usize) -> usize {
    let bytes = input.as_bytes();
    if i >= bytes.len() || bytes[i] != b'{' {
        return i;
    }
    let start = i + 1;
    let mut j = start;
    while j < bytes.len() && bytes[j] != b'}' && (j - start) < max_digits {
        j += 1;
    }
    if j >= bytes.len() || bytes[j] != b'}' {
        return i;
    }
    let hex = &input[start..j];
    if let Ok(code) = u32::from_str_radix(hex, 16)
        && let Some(ch) = char::from_u32(code)
    {
        out.push(ch);
    }
    j + 1
}

/// Scan `$NAME` or `${NAME}` starting at `i` (which points at `$`). Returns
/// the expanded text and the index just past the variable reference.
fn scan_variable(input: &str, i: usize, expand: &impl Fn(&str) -> String) -> (String, usize) {
    let bytes = input.as_bytes();
    let mut j = i + 1;
    if j < bytes.len() && bytes[j] == b'{' {
        let start = j + 1;
        let mut k = start;
        while k < bytes.len() && bytes[k] != b'}' {
            k += 1;
        }
        if k < bytes.len() {
            let name = &input[start..k];
            return (expand(name), k + 1);
        }
        return (String::new(), bytes.len());
    }
    let start = j;
    while j < bytes.len() {
        let c = input[j..].chars().next().unwrap();
        if c.is_ascii_alphanumeric() || c == '_' {
            j += c.len_utf8();
        } else {
            break;
        }
    }
    if j == start {
        return ("$".to_string(), start);
    }
    (expand(&input[start..j]), j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_name: &str) -> String {
        String::new()
    }

    #[test]
    fn splits_on_whitespace() {
        let (toks, _) = tokenize_one("open foo.txt bar.txt", &noop).unwrap();
        assert_eq!(toks, vec!["open", "foo.txt", "bar.txt"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        let (toks, _) = tokenize_one(r"echo 'a\nb'", &noop).unwrap();
        assert_eq!(toks, vec!["echo", r"a\nb"]);
    }

    #[test]
    fn double_quote_escapes() {
        let (toks, _) = tokenize_one(r#"echo "a\tb\n""#, &noop).unwrap();
        assert_eq!(toks, vec!["echo", "a\tb\n"]);
    }

    #[test]
    fn incomplete_hex_escape_yields_empty() {
        let (toks, _) = tokenize_one(r#"echo "\x{}""#, &noop).unwrap();
        assert_eq!(toks, vec!["echo", ""]);
    }

    #[test]
    fn unknown_escape_passes_through() {
        let (toks, _) = tokenize_one(r#"echo "\q""#, &noop).unwrap();
        assert_eq!(toks, vec!["echo", "\\q"]);
    }

    #[test]
    fn adjacent_fragments_concatenate() {
        let (toks, _) = tokenize_one(r#"echo foo"bar"baz"#, &noop).unwrap();
        assert_eq!(toks, vec!["echo", "foobarbaz"]);
    }

    #[test]
    fn trailing_backslash_is_unexpected_eof() {
        let err = tokenize_one("echo foo\\", &noop).unwrap_err();
        assert_eq!(err, TokenizeError::UnexpectedEof);
    }

    #[test]
    fn unclosed_quotes_error() {
        assert_eq!(
            tokenize_one("echo 'foo", &noop).unwrap_err(),
            TokenizeError::UnclosedSquote
        );
        assert_eq!(
            tokenize_one("echo \"foo", &noop).unwrap_err(),
            TokenizeError::UnclosedDquote
        );
    }

    #[test]
    fn sequence_splits_on_semicolon_and_comment() {
        let cmds = tokenize_sequence("a 1; b 2 # trailing\nc 3", noop).unwrap();
        assert_eq!(
            cmds,
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), "2".to_string()],
                vec!["c".to_string(), "3".to_string()],
            ]
        );
    }

    #[test]
    fn variable_expansion_braced_and_bare() {
        let expand = |name: &str| if name == "FILE" { "x.rs".to_string() } else { String::new() };
        let (toks, _) = tokenize_one("open $FILE ${FILE}", &expand).unwrap();
        assert_eq!(toks, vec!["open", "x.rs", "x.rs"]);
    }

    #[test]
    fn unknown_variable_expands_to_empty() {
        let expand = |_: &str| String::new();
        let (toks, _) = tokenize_one("open $NOPE", &expand).unwrap();
        assert_eq!(toks, vec!["open", ""]);
    }
}
