//! Finalisation checks run once a syntax is fully loaded.

use crate::types::{ConditionKind, Syntax};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinalizeError {
    #[error("state {0:?} references undefined destination state")]
    UndefinedState(String),
    #[error("state {0:?} references undefined string list {1:?}")]
    UndefinedList(String, String),
    #[error("state {0:?} is unreachable from the start state")]
    UnreachableState(String),
    #[error("string list {0:?} is never referenced")]
    UnusedList(String),
    #[error("heredocend condition in state {0:?} outside a sub-syntax")]
    HeredocEndOutsideSubsyntax(String),
}

/// Run every finalisation check, collecting all violations rather than
/// stopping at the first one.
pub fn finalize(syntax: &Syntax) -> Vec<FinalizeError> {
    let mut errors = Vec::new();
    let n = syntax.states.len();
    let mut used_lists: HashSet<&str> = HashSet::new();

    for state in &syntax.states {
        for cond in &state.conditions {
            if let Some(dest) = cond.action.dest
                && dest >= n
            {
                errors.push(FinalizeError::UndefinedState(state.name.clone()));
            }
            if let ConditionKind::InList { list, .. } = &cond.kind {
                used_lists.insert(list.as_str());
                if !syntax.lists.contains_key(list) {
                    errors.push(FinalizeError::UndefinedList(state.name.clone(), list.clone()));
                }
            }
            if matches!(cond.kind, ConditionKind::HeredocEnd) && !state.is_subsyntax {
                errors.push(FinalizeError::HeredocEndOutsideSubsyntax(state.name.clone()));
            }
        }
        if let Some(dest) = state.default_action.dest
            && dest >= n
        {
            errors.push(FinalizeError::UndefinedState(state.name.clone()));
        }
    }

    let reachable = reachable_states(syntax);
    for (idx, state) in syntax.states.iter().enumerate() {
        if !state.copied && !reachable.contains(&idx) {
            errors.push(FinalizeError::UnreachableState(state.name.clone()));
        }
    }

    for name in syntax.lists.keys() {
        if !used_lists.contains(name.as_str()) {
            errors.push(FinalizeError::UnusedList(name.clone()));
        }
    }

    errors
}

fn reachable_states(syntax: &Syntax) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut stack = vec![syntax.start];
    while let Some(idx) = stack.pop() {
        if idx >= syntax.states.len() || !seen.insert(idx) {
            continue;
        }
        let state = &syntax.states[idx];
        for cond in &state.conditions {
            if let Some(dest) = cond.action.dest {
                stack.push(dest);
            }
        }
        if let Some(dest) = state.default_action.dest {
            stack.push(dest);
        }
    }
    seen
}
