//! Per-buffer change tree supporting branching undo/redo with coalescing.
//!
//! Every mutation is recorded as a [`ChangeNode`] in a tree rooted at an
//! empty sentinel. Undo walks to the parent and applies the node's inverse;
//! redo walks to the node's preferred child and applies it forward. This
//! lets a user undo, make a new edit, and still be able to reach the
//! abandoned branch by redoing with an explicit child index, while the
//! ordinary redo path sticks to the newest branch.

use core_text::Buffer;
use tracing::trace;

/// Coalescing classification for a change leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeTag {
    None,
    Insert,
    Delete,
    Erase,
}

#[derive(Debug, Clone)]
struct ChangeNode {
    parent: Option<usize>,
    children: Vec<usize>,
    preferred_child: Option<usize>,
    offset: usize,
    removed: Vec<u8>,
    inserted: Vec<u8>,
    tag: MergeTag,
    /// True when this node should be undone/redone together with its parent
    /// as part of the same `begin_change_chain`/`end_change_chain` scope.
    chained: bool,
}

impl ChangeNode {
    fn root() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            preferred_child: None,
            offset: 0,
            removed: Vec::new(),
            inserted: Vec::new(),
            tag: MergeTag::None,
            chained: false,
        }
    }
}

pub struct ChangeTree {
    nodes: Vec<ChangeNode>,
    current: usize,
    merge_hint: MergeTag,
    chain_depth: u32,
}

impl Default for ChangeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ChangeNode::root()],
            current: 0,
            merge_hint: MergeTag::None,
            chain_depth: 0,
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.current == 0
    }

    /// Declare the coalescing intent for the edits about to be recorded.
    pub fn begin_change(&mut self, hint: MergeTag) {
        self.merge_hint = hint;
    }

    /// Close the current coalescing scope.
    pub fn end_change(&mut self) {
        self.merge_hint = MergeTag::None;
    }

    /// Group every change recorded until `end_change_chain` into a single
    /// undo/redo step.
    pub fn begin_change_chain(&mut self) {
        self.chain_depth += 1;
    }

    pub fn end_change_chain(&mut self) {
        self.chain_depth = self.chain_depth.saturating_sub(1);
        self.merge_hint = MergeTag::None;
    }

    fn push_leaf(&mut self, offset: usize, removed: Vec<u8>, inserted: Vec<u8>, tag: MergeTag) {
        let chained = self.chain_depth > 0 && self.current != 0;
        let node = ChangeNode {
            parent: Some(self.current),
            children: Vec::new(),
            preferred_child: None,
            offset,
            removed,
            inserted,
            tag,
            chained,
        };
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.nodes[self.current].children.push(idx);
        self.nodes[self.current].preferred_child = Some(idx);
        self.current = idx;
        trace!(target: "state.undo", node = idx, parent = self.nodes[idx].parent, "record_change");
    }

    fn current_leaf_mut(&mut self) -> Option<&mut ChangeNode> {
        if self.current == 0 {
            None
        } else {
            Some(&mut self.nodes[self.current])
        }
    }

    /// Record an insertion of `bytes` at `offset`.
    pub fn record_insert(&mut self, offset: usize, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if matches!(self.merge_hint, MergeTag::Insert)
            && let Some(leaf) = self.current_leaf_mut()
            && matches!(leaf.tag, MergeTag::Insert)
            && leaf.offset + leaf.inserted.len() == offset
        {
            leaf.inserted.extend_from_slice(bytes);
            return;
        }
        self.push_leaf(offset, Vec::new(), bytes.to_vec(), MergeTag::Insert);
    }

    /// Record a forward deletion (cursor stays put, text after it shrinks).
    pub fn record_delete(&mut self, offset: usize, removed: &[u8]) {
        if removed.is_empty() {
            return;
        }
        if matches!(self.merge_hint, MergeTag::Delete)
            && let Some(leaf) = self.current_leaf_mut()
            && matches!(leaf.tag, MergeTag::Delete)
            && leaf.offset == offset
        {
            leaf.removed.extend_from_slice(removed);
            return;
        }
        self.push_leaf(offset, removed.to_vec(), Vec::new(), MergeTag::Delete);
    }

    /// Record a backward deletion (e.g. backspace): each call eats bytes
    /// immediately before the previous call's start.
    pub fn record_erase(&mut self, offset: usize, removed: &[u8]) {
        if removed.is_empty() {
            return;
        }
        if matches!(self.merge_hint, MergeTag::Erase)
            && let Some(leaf) = self.current_leaf_mut()
            && matches!(leaf.tag, MergeTag::Erase)
            && offset + removed.len() == leaf.offset
        {
            let mut new_removed = removed.to_vec();
            new_removed.extend_from_slice(&leaf.removed);
            leaf.removed = new_removed;
            leaf.offset = offset;
            return;
        }
        self.push_leaf(offset, removed.to_vec(), Vec::new(), MergeTag::Erase);
    }

    /// Record an atomic delete+insert. Never coalesces with a prior leaf or
    /// a subsequent insert/delete — a replace always starts a fresh leaf.
    pub fn record_replace(&mut self, offset: usize, removed: &[u8], inserted: &[u8]) {
        self.push_leaf(offset, removed.to_vec(), inserted.to_vec(), MergeTag::None);
        self.merge_hint = MergeTag::None;
    }

    /// Undo the current change (and any chained ancestors), returning to the
    /// buffer state before it. Returns false if already at the root.
    pub fn undo(&mut self, buffer: &mut Buffer) -> bool {
        if self.current == 0 {
            return false;
        }
        loop {
            let node = self.nodes[self.current].clone();
            apply_inverse(buffer, &node);
            self.current = node.parent.unwrap_or(0);
            trace!(target: "state.undo", current = self.current, "undo_step");
            if !node.chained || self.current == 0 {
                break;
            }
        }
        true
    }

    /// Redo along the preferred branch (or `child_hint` if given), applying
    /// every chained descendant as one step. Returns false if there is no
    /// child to redo into.
    pub fn redo(&mut self, buffer: &mut Buffer, child_hint: Option<usize>) -> bool {
        let first_child = child_hint.or(self.nodes[self.current].preferred_child);
        let Some(mut child) = first_child else {
            return false;
        };
        self.nodes[self.current].preferred_child = Some(child);
        loop {
            let node = self.nodes[child].clone();
            apply_forward(buffer, &node);
            self.current = child;
            trace!(target: "state.undo", current = self.current, "redo_step");
            match self.nodes[child].children.last() {
                Some(&next) if self.nodes[next].chained => child = next,
                _ => break,
            }
        }
        true
    }

    pub fn undo_depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.current;
        while let Some(parent) = self.nodes[cur].parent {
            depth += 1;
            cur = parent;
        }
        depth
    }

    pub fn can_redo(&self) -> bool {
        self.nodes[self.current].preferred_child.is_some()
    }
}

fn apply_forward(buffer: &mut Buffer, node: &ChangeNode) {
    let mut it = buffer.iter_at_byte(node.offset);
    buffer.replace(&mut it, node.removed.len(), &node.inserted);
}

fn apply_inverse(buffer: &mut Buffer, node: &ChangeNode) {
    let mut it = buffer.iter_at_byte(node.offset);
    buffer.replace(&mut it, node.inserted.len(), &node.removed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_undo_restores_buffer() {
        let mut buf = Buffer::from_str("t", "abc\n").unwrap();
        let mut tree = ChangeTree::new();
        tree.begin_change(MergeTag::Insert);
        let offset = buf.total_bytes();
        buf.insert_bytes_at(offset, b"XYZ");
        tree.record_insert(offset, b"XYZ");
        tree.end_change();
        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), "abc\nXYZ");
        assert!(tree.undo(&mut buf));
        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), "abc\n");
    }

    #[test]
    fn adjacent_single_char_inserts_coalesce_into_one_undo() {
        let mut buf = Buffer::from_str("t", "").unwrap();
        let mut tree = ChangeTree::new();
        tree.begin_change(MergeTag::Insert);
        for ch in ["a", "b", "c"] {
            let offset = buf.total_bytes();
            buf.insert_bytes_at(offset, ch.as_bytes());
            tree.record_insert(offset, ch.as_bytes());
        }
        tree.end_change();
        assert_eq!(tree.undo_depth(), 1);
        assert!(tree.undo(&mut buf));
        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), "");
    }

    #[test]
    fn replace_never_coalesces() {
        let mut buf = Buffer::from_str("t", "abc").unwrap();
        let mut tree = ChangeTree::new();
        tree.begin_change(MergeTag::Insert);
        tree.record_replace(0, b"abc", b"xyz");
        let offset = 3;
        buf.insert_bytes_at(offset, b"!");
        tree.record_insert(offset, b"!");
        assert_eq!(tree.undo_depth(), 2);
    }

    #[test]
    fn undo_then_redo_is_identity() {
        let mut buf = Buffer::from_str("t", "abc\n").unwrap();
        let mut tree = ChangeTree::new();
        tree.begin_change(MergeTag::Insert);
        let offset = buf.total_bytes();
        buf.insert_bytes_at(offset, b"XYZ");
        tree.record_insert(offset, b"XYZ");
        tree.end_change();
        let before = buf.slice_bytes(0, buf.total_bytes());
        tree.undo(&mut buf);
        tree.redo(&mut buf, None);
        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), before);
    }

    #[test]
    fn redo_follows_preferred_branch_after_new_edit() {
        let mut buf = Buffer::from_str("t", "").unwrap();
        let mut tree = ChangeTree::new();
        tree.begin_change(MergeTag::Insert);
        buf.insert_bytes_at(0, b"a");
        tree.record_insert(0, b"a");
        tree.end_change();
        tree.undo(&mut buf);

        tree.begin_change(MergeTag::Insert);
        buf.insert_bytes_at(0, b"b");
        tree.record_insert(0, b"b");
        tree.end_change();

        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), "b");
        assert!(tree.undo(&mut buf));
        assert_eq!(buf.slice_bytes(0, buf.total_bytes()), "");
        assert!(tree.can_redo());
    }
}
