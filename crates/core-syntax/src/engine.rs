//! Per-line, byte-at-a-time highlighting walk over a [`Syntax`] state graph.

use crate::types::{ConditionKind, StateId, Syntax};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub style: String,
}

/// Per-line continuation token: the state a line starts in, plus any
/// heredoc delimiter captured by an earlier `HeredocBegin` and still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub state: StateId,
    pub heredoc_delim: Option<String>,
}

impl Cookie {
    pub fn start(start_state: StateId) -> Self {
        Self {
            state: start_state,
            heredoc_delim: None,
        }
    }
}

pub struct LineResult {
    pub spans: Vec<Span>,
    pub cookie: Cookie,
}

/// Highlight one line of text starting from `cookie`. `is_first_line` gates
/// the `BufferStart` condition (it fires only at offset 0 of the buffer).
pub fn highlight_line(syntax: &Syntax, line: &str, cookie: &Cookie, is_first_line: bool) -> LineResult {
    let mut spans = Vec::new();
    let mut state = cookie.state;
    let mut heredoc_delim = cookie.heredoc_delim.clone();
    let mut pos = 0usize;
    let len = line.len();

    while pos < len {
        let st = &syntax.states[state];
        let mut matched = false;
        for cond in &st.conditions {
            if let Some((consumed, new_delim)) =
                try_match(syntax, &cond.kind, line, pos, is_first_line, heredoc_delim.as_deref())
            {
                let style = cond
                    .action
                    .style
                    .clone()
                    .unwrap_or_else(|| st.default_style.clone());
                spans.push(Span {
                    start: pos,
                    end: pos + consumed,
                    style,
                });
                if let Some(delim) = new_delim {
                    heredoc_delim = Some(delim);
                }
                if let Some(dest) = cond.action.dest {
                    state = dest;
                }
                pos += consumed.max(1);
                matched = true;
                break;
            }
        }
        if !matched {
            let next = next_char_boundary(line, pos);
            spans.push(Span {
                start: pos,
                end: next,
                style: st.default_style.clone(),
            });
            if let Some(dest) = st.default_action.dest {
                state = dest;
            }
            pos = next;
        }
    }

    // Zero-width conditions (`Eol`, an end-anchored `Regex`, `BufferStart` on an
    // empty first line) only match once every byte on the line is consumed,
    // which is exactly the point where the `pos < len` loop above exits — so
    // they never get a turn inside it. Give the current state's conditions one
    // more pass here, at `pos == len`, for a transition with no span produced.
    {
        let st = &syntax.states[state];
        for cond in &st.conditions {
            if let Some((_, new_delim)) =
                try_match(syntax, &cond.kind, line, pos, is_first_line, heredoc_delim.as_deref())
            {
                if let Some(delim) = new_delim {
                    heredoc_delim = Some(delim);
                }
                if let Some(dest) = cond.action.dest {
                    state = dest;
                }
                break;
            }
        }
    }

    LineResult {
        spans,
        cookie: Cookie {
            state,
            heredoc_delim,
        },
    }
}

fn next_char_boundary(line: &str, pos: usize) -> usize {
    if pos >= line.len() {
        return line.len();
    }
    let mut next = pos + 1;
    while next < line.len() && !line.is_char_boundary(next) {
        next += 1;
    }
    next
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Try each condition kind at `pos`. Returns `(consumed_bytes, captured_heredoc_delim)`.
fn try_match(
    syntax: &Syntax,
    kind: &ConditionKind,
    line: &str,
    pos: usize,
    is_first_line: bool,
    heredoc_delim: Option<&str>,
) -> Option<(usize, Option<String>)> {
    let bytes = line.as_bytes();
    match kind {
        ConditionKind::Str { text, icase } => {
            let rest = &line[pos..];
            let hit = if *icase {
                rest.len() >= text.len() && rest[..text.len()].eq_ignore_ascii_case(text)
            } else {
                rest.starts_with(text.as_str())
            };
            hit.then(|| (text.len(), None))
        }
        ConditionKind::CharSet(set) => {
            let c = line[pos..].chars().next()?;
            set.contains(&c).then(|| (c.len_utf8(), None))
        }
        ConditionKind::Blank => {
            let b = *bytes.get(pos)?;
            (b == b' ' || b == b'\t').then(|| (1, None))
        }
        ConditionKind::InList { list, icase: _ } => {
            let at_word_start = pos == 0 || !is_word_byte(bytes[pos - 1]);
            if !at_word_start {
                return None;
            }
            let mut end = pos;
            while end < bytes.len() && is_word_byte(bytes[end]) {
                end += 1;
            }
            if end == pos {
                return None;
            }
            let word = &line[pos..end];
            let hit = syntax.lists.get(list).is_some_and(|l| l.contains(word));
            hit.then(|| (end - pos, None))
        }
        ConditionKind::Regex(re) => {
            let m = re.find_at(line, pos)?;
            (m.start() == pos).then(|| (m.end() - m.start(), None))
        }
        ConditionKind::HeredocBegin => {
            let mut end = pos;
            while end < bytes.len() && bytes[end] != b' ' && bytes[end] != b'\t' {
                end += 1;
            }
            if end == pos {
                return None;
            }
            let delim = line[pos..end].to_string();
            Some((end - pos, Some(delim)))
        }
        ConditionKind::HeredocEnd => {
            let delim = heredoc_delim?;
            line[pos..].starts_with(delim).then(|| (delim.len(), None))
        }
        ConditionKind::BufferStart => (is_first_line && pos == 0).then(|| (0, None)),
        ConditionKind::Eol => (pos == line.len()).then(|| (0, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Condition, State, Syntax};

    #[test]
    fn eol_condition_transitions_state_at_end_of_line() {
        let mut syntax = Syntax::new("eol-test");
        let after = syntax.add_state(State::new("AFTER", "default"));
        syntax.states[0].conditions.push(Condition {
            kind: ConditionKind::Eol,
            action: Action {
                dest: Some(after),
                style: Some("default".to_string()),
            },
        });
        let cookie = Cookie::start(syntax.start);
        let result = highlight_line(&syntax, "no trailing trigger here", &cookie, true);
        assert_eq!(result.cookie.state, after);
    }

    #[test]
    fn eol_condition_fires_on_an_empty_line() {
        let mut syntax = Syntax::new("eol-empty");
        let after = syntax.add_state(State::new("AFTER", "default"));
        syntax.states[0].conditions.push(Condition {
            kind: ConditionKind::Eol,
            action: Action {
                dest: Some(after),
                style: Some("default".to_string()),
            },
        });
        let cookie = Cookie::start(syntax.start);
        let result = highlight_line(&syntax, "", &cookie, true);
        assert_eq!(result.cookie.state, after);
        assert!(result.spans.is_empty());
    }
}
