//! Syntax/state/condition/action data model.

use regex::Regex;

pub type StateId = usize;

#[derive(Debug, Clone)]
pub enum ConditionKind {
    /// Literal byte prefix match, case-sensitive or folded.
    Str { text: String, icase: bool },
    /// Single character drawn from a fixed set.
    CharSet(Vec<char>),
    /// A single space or tab.
    Blank,
    /// Word lookup in a named string list, only at word boundaries.
    InList { list: String, icase: bool },
    /// Precompiled regex, anchored at the current position.
    Regex(Regex),
    /// Captures the remainder of the current word as a heredoc delimiter.
    HeredocBegin,
    /// Matches the delimiter captured by a prior `HeredocBegin`. Legal only
    /// inside a merged sub-syntax.
    HeredocEnd,
    /// Fires only at absolute buffer offset 0.
    BufferStart,
    /// Fires at end of line.
    Eol,
}

#[derive(Debug, Clone, Default)]
pub struct Action {
    /// `None` defers to the sub-syntax's return state once merged.
    pub dest: Option<StateId>,
    pub style: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub kind: ConditionKind,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct State {
    pub name: String,
    pub default_style: String,
    pub conditions: Vec<Condition>,
    pub default_action: Action,
    /// True once part of the primary syntax, so matching heredoc-end
    /// conditions are accepted.
    pub is_subsyntax: bool,
    /// Set when this state was produced by `merge_syntax`; suppresses
    /// unreachable-state warnings during finalisation.
    pub copied: bool,
}

impl State {
    pub fn new(name: impl Into<String>, default_style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_style: default_style.into(),
            conditions: Vec::new(),
            default_action: Action::default(),
            is_subsyntax: false,
            copied: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Syntax {
    pub name: String,
    pub states: Vec<State>,
    pub start: StateId,
    pub lists: std::collections::HashMap<String, crate::stringlist::StringList>,
}

impl Syntax {
    pub fn new(name: impl Into<String>) -> Self {
        let mut states = Vec::new();
        states.push(State::new("START", "default"));
        Self {
            name: name.into(),
            states,
            start: 0,
            lists: std::collections::HashMap::new(),
        }
    }

    pub fn add_state(&mut self, state: State) -> StateId {
        self.states.push(state);
        self.states.len() - 1
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|s| s.name == name)
    }
}
