//! Regex-driven syntax highlighting: a per-line state-machine walk over a
//! [`types::Syntax`] graph, with sub-syntax merging for heredocs and other
//! nested bodies.

pub mod engine;
pub mod finalize;
pub mod merge;
pub mod stringlist;
pub mod types;

pub use engine::{Cookie, LineResult, Span, highlight_line};
pub use finalize::{FinalizeError, finalize};
pub use merge::merge_syntax;
pub use stringlist::StringList;
pub use types::{Action, Condition, ConditionKind, State, StateId, Syntax};

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny two-state syntax: `#` starts a comment to end of line,
    /// everything else is `default` style.
    fn comment_syntax() -> Syntax {
        let mut syntax = Syntax::new("mini");
        let comment = syntax.add_state(State::new("COMMENT", "comment"));
        syntax.states[0].conditions.push(Condition {
            kind: ConditionKind::Str {
                text: "#".to_string(),
                icase: false,
            },
            action: Action {
                dest: Some(comment),
                style: Some("comment".to_string()),
            },
        });
        syntax
    }

    #[test]
    fn highlights_comment_to_end_of_line() {
        let syntax = comment_syntax();
        let cookie = Cookie::start(syntax.start);
        let result = highlight_line(&syntax, "let x = 1; # note", &cookie, true);
        let comment_span = result.spans.iter().find(|s| s.style == "comment").unwrap();
        assert_eq!(comment_span.start, 12);
    }

    #[test]
    fn cookie_carries_state_across_lines() {
        let mut syntax = Syntax::new("block-comment");
        let inside = syntax.add_state(State::new("INSIDE", "comment"));
        syntax.states[0].conditions.push(Condition {
            kind: ConditionKind::Str {
                text: "/*".to_string(),
                icase: false,
            },
            action: Action {
                dest: Some(inside),
                style: Some("comment".to_string()),
            },
        });
        let cookie0 = Cookie::start(syntax.start);
        let r1 = highlight_line(&syntax, "/* start", &cookie0, true);
        assert_eq!(r1.cookie.state, inside);
        let r2 = highlight_line(&syntax, "still inside", &r1.cookie, false);
        assert!(r2.spans.iter().all(|s| s.style == "comment"));
    }

    #[test]
    fn heredoc_begin_then_end_round_trips() {
        let mut body = Syntax::new("body");
        body.states[0].conditions.push(Condition {
            kind: ConditionKind::HeredocEnd,
            action: Action {
                dest: None,
                style: Some("default".to_string()),
            },
        });
        body.states[0].is_subsyntax = true;

        let mut parent = Syntax::new("shell");
        let after = parent.add_state(State::new("AFTER", "default"));
        let body_start = merge_syntax(&mut parent, &body, after, "h");
        parent.states[0].conditions.push(Condition {
            kind: ConditionKind::HeredocBegin,
            action: Action {
                dest: Some(body_start),
                style: Some("default".to_string()),
            },
        });

        let cookie0 = Cookie::start(parent.start);
        let r1 = highlight_line(&parent, "EOF", &cookie0, true);
        assert_eq!(r1.cookie.heredoc_delim.as_deref(), Some("EOF"));
        assert_eq!(r1.cookie.state, body_start);

        let r2 = highlight_line(&parent, "EOF", &r1.cookie, false);
        assert_eq!(r2.cookie.state, after);
    }

    /// One `merge_syntax` call produces one shared copy of the body states;
    /// the literal delimiter text is never baked into them, only captured
    /// per-occurrence in the `Cookie`. Two heredocs in the same buffer using
    /// different delimiters must each close on their own delimiter without
    /// reusing or clobbering the other's, even though both route through the
    /// same merged `body_start` state.
    #[test]
    fn distinct_heredoc_instances_close_on_their_own_delimiter() {
        let mut body = Syntax::new("body");
        body.states[0].conditions.push(Condition {
            kind: ConditionKind::HeredocEnd,
            action: Action {
                dest: None,
                style: Some("default".to_string()),
            },
        });
        body.states[0].is_subsyntax = true;

        let mut parent = Syntax::new("shell");
        let after = parent.add_state(State::new("AFTER", "default"));
        let body_start = merge_syntax(&mut parent, &body, after, "h");
        parent.states[0].conditions.push(Condition {
            kind: ConditionKind::HeredocBegin,
            action: Action {
                dest: Some(body_start),
                style: Some("default".to_string()),
            },
        });

        let cookie0 = Cookie::start(parent.start);
        let r1 = highlight_line(&parent, "FIRST", &cookie0, true);
        assert_eq!(r1.cookie.heredoc_delim.as_deref(), Some("FIRST"));
        let r2 = highlight_line(&parent, "not the end", &r1.cookie, false);
        assert_eq!(r2.cookie.state, body_start);
        let r3 = highlight_line(&parent, "FIRST", &r2.cookie, false);
        assert_eq!(r3.cookie.state, after);

        let cookie_second = Cookie::start(parent.start);
        let s1 = highlight_line(&parent, "SECOND", &cookie_second, true);
        assert_eq!(s1.cookie.heredoc_delim.as_deref(), Some("SECOND"));
        let s2 = highlight_line(&parent, "FIRST", &s1.cookie, false);
        assert_eq!(
            s2.cookie.state, body_start,
            "the first heredoc's delimiter must not close the second heredoc"
        );
        let s3 = highlight_line(&parent, "SECOND", &s2.cookie, false);
        assert_eq!(s3.cookie.state, after);
    }

    #[test]
    fn finalize_reports_no_errors_for_well_formed_syntax() {
        let syntax = comment_syntax();
        assert!(finalize::finalize(&syntax).is_empty());
    }
}
