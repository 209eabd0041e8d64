//! `merge_syntax`: splice a sub-syntax's states into a parent syntax at a
//! `@@@` directive, under a unique name prefix.

use crate::types::{Action, State, StateId, Syntax};

/// Deep-clone `sub`'s states into `parent` under `prefix`, rewrite every
/// unset action destination to `return_state`, and re-resolve each
/// condition's effective style against `parent`'s styles (here: left
/// as-is, since styles are plain names resolved at render time). Merged
/// states are tagged `copied` so finalisation's unreachable-state check
/// skips them. Returns the sub-syntax's start state as seen in `parent`.
///
/// `HeredocEnd` conditions are not statically rewritten with a literal
/// delimiter: the delimiter is captured dynamically per-heredoc-instance
/// by the highlighter's [`crate::engine::Cookie`] and compared at match
/// time, so no static payload substitution is needed here.
///
/// This is a deliberate departure from the original implementation, where
/// merging happens per heredoc occurrence and bakes that occurrence's
/// literal delimiter text into a fresh copy of the body states. One merge
/// here produces one shared copy of the body states for every occurrence
/// of that heredoc body syntax in a buffer; distinct delimiters are told
/// apart purely by the `Cookie` each runs with, never by distinct states.
/// `distinct_heredoc_instances_close_on_their_own_delimiter` (in `lib.rs`)
/// covers that two differently-delimited heredocs sharing one `body_start`
/// don't cross-close on each other's delimiter.
pub fn merge_syntax(parent: &mut Syntax, sub: &Syntax, return_state: StateId, prefix: &str) -> StateId {
    let base = parent.states.len();
    for state in &sub.states {
        let mut cloned = State {
            name: format!("{prefix}::{}", state.name),
            default_style: state.default_style.clone(),
            conditions: state.conditions.clone(),
            default_action: state.default_action.clone(),
            is_subsyntax: true,
            copied: true,
        };
        rewrite_unset_dests(&mut cloned, base, return_state);
        parent.states.push(cloned);
    }
    for list in sub.lists.values() {
        parent
            .lists
            .entry(format!("{prefix}::{}", list.name))
            .or_insert_with(|| list.clone());
    }
    base + sub.start
}

fn rewrite_unset_dests(state: &mut State, base: StateId, return_state: StateId) {
    let fix = |action: &mut Action| {
        action.dest = Some(match action.dest {
            Some(local) => base + local,
            None => return_state,
        });
    };
    for cond in &mut state.conditions {
        fix(&mut cond.action);
    }
    fix(&mut state.default_action);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Condition;

    #[test]
    fn merged_states_get_unique_prefix_and_are_tagged_copied() {
        let mut sub = Syntax::new("heredoc-body");
        sub.states[0].default_action = Action {
            dest: None,
            style: None,
        };
        let mut parent = Syntax::new("shell");
        let return_state = parent.add_state(State::new("AFTER_HEREDOC", "default"));
        let start = merge_syntax(&mut parent, &sub, return_state, "heredoc1");
        let merged = &parent.states[start];
        assert_eq!(merged.name, "heredoc1::START");
        assert!(merged.copied);
        assert_eq!(merged.default_action.dest, Some(return_state));
    }

    #[test]
    fn internal_dest_offsets_are_rebased() {
        let mut sub = Syntax::new("body");
        let s1 = sub.add_state(State::new("S1", "default"));
        sub.states[0].conditions.push(Condition {
            kind: ConditionKind::Eol,
            action: Action {
                dest: Some(s1),
                style: None,
            },
        });
        let mut parent = Syntax::new("shell");
        let return_state = parent.add_state(State::new("AFTER", "default"));
        let base = parent.states.len();
        let start = merge_syntax(&mut parent, &sub, return_state, "p");
        assert_eq!(start, base);
        assert_eq!(parent.states[start].conditions[0].action.dest, Some(base + s1));
    }
}
