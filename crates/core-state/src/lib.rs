//! Editor state: buffer collection, mode stack, change tree, registers and
//! the small pieces of bookkeeping (command line, ephemeral status, error
//! context) that the dispatcher and renderer both need to see.
//!
//! Undo is delegated to [`undo::ChangeTree`], a per-buffer tree of
//! [`undo::MergeTag`]-tagged leaves (see that module for the coalescing
//! policy). This crate intentionally stays buffer-centric; per-view cursor
//! and scroll state lives in `core-model::View`.

use core_text::{Buffer, Position};
pub mod undo;
use undo::{ChangeTree, MergeTag};

/// Which of the three input modes is active. The dispatcher keeps a stack of
/// these (see `core-actions`) so that, e.g., a search launched from command
/// mode returns to command mode rather than normal mode on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
    Search,
}

/// Selection kind for the `select`/copy/shift operations in §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Characterwise,
    Linewise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub start: Position,
    pub end: Position,
    pub kind: SelectionKind,
}

impl SelectionSpan {
    /// Construct a new span normalizing ordering so that start <= end.
    pub fn new(mut a: Position, mut b: Position, kind: SelectionKind) -> Self {
        if Self::greater(&a, &b) {
            std::mem::swap(&mut a, &mut b);
        }
        Self {
            start: a,
            end: b,
            kind,
        }
    }

    fn greater(a: &Position, b: &Position) -> bool {
        a.line > b.line || (a.line == b.line && a.byte > b.byte)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Compute an inclusive absolute byte range for this span within the
    /// active buffer, expanding a non-empty characterwise selection so the
    /// last grapheme is included.
    pub fn inclusive_byte_range(&self, buffer: &Buffer) -> (usize, usize) {
        let to_abs = |pos: Position| buffer.byte_offset(&buffer.iter_at(pos.line, pos.byte));
        let mut a = to_abs(self.start);
        let mut b = to_abs(self.end);
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        if a == b {
            return (a, b);
        }
        match self.kind {
            SelectionKind::Characterwise => {
                let end_pos = self.end;
                if let Some(line) = buffer.line(end_pos.line) {
                    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
                    let clamped = end_pos.byte.min(trimmed.len());
                    let next = core_text::grapheme::next_boundary(trimmed, clamped);
                    let line_prefix_abs = to_abs(Position::new(end_pos.line, 0));
                    let expanded = line_prefix_abs + next;
                    if expanded > b {
                        b = expanded;
                    }
                }
                (a, b)
            }
            SelectionKind::Linewise => (a, b),
        }
    }
}

/// A single, optionally empty, active selection.
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    pub active: Option<SelectionSpan>,
    pub anchor: Option<Position>,
}

impl SelectionModel {
    pub fn clear(&mut self) {
        self.active = None;
        self.anchor = None;
    }
    pub fn set(&mut self, span: SelectionSpan) {
        self.active = Some(span);
    }
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Yank/delete registers: an always-populated unnamed register, a numbered
/// ring (newest at index 0, capped), and named registers `a`-`z` where the
/// uppercase form appends instead of replacing.
#[derive(Debug, Default, Clone)]
pub struct Registers {
    pub unnamed: String,
    numbered: Vec<String>,
    named: [String; 26],
}

impl Registers {
    pub const MAX: usize = 10;

    pub fn new() -> Self {
        Self {
            unnamed: String::new(),
            numbered: Vec::new(),
            named: std::array::from_fn(|_| String::new()),
        }
    }

    pub fn record_yank<S: Into<String>>(&mut self, text: S) {
        let s = text.into();
        self.unnamed = s.clone();
        self.unshift_numbered(s);
    }

    pub fn record_delete<S: Into<String>>(&mut self, text: S) {
        let s = text.into();
        self.unnamed = s.clone();
        self.unshift_numbered(s);
    }

    pub fn numbered(&self) -> &[String] {
        &self.numbered
    }

    fn unshift_numbered(&mut self, s: String) -> bool {
        let rotated = self.numbered.len() == Self::MAX;
        if rotated {
            self.numbered.pop();
        }
        self.numbered.insert(0, s);
        rotated
    }

    fn named_index(c: char) -> Option<usize> {
        if c.is_ascii_alphabetic() {
            Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
        } else {
            None
        }
    }

    pub fn get_named(&self, c: char) -> Option<&str> {
        Self::named_index(c).map(|i| self.named[i].as_str())
    }

    pub fn named_snapshot(&self) -> Vec<(char, &str)> {
        self.named
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                if s.is_empty() {
                    None
                } else {
                    Some(((b'a' + i as u8) as char, s.as_str()))
                }
            })
            .collect()
    }

    pub fn record_yank_named<S: Into<String>>(&mut self, c: char, text: S) {
        if let Some(idx) = Self::named_index(c) {
            let mut payload = text.into();
            let append = c.is_ascii_uppercase();
            if append && !self.named[idx].is_empty() {
                self.named[idx].push_str(&payload);
                payload = self.named[idx].clone();
            } else {
                self.named[idx] = payload.clone();
            }
            self.unnamed = payload.clone();
            self.unshift_numbered(payload);
        }
    }

    pub fn record_delete_named<S: Into<String>>(&mut self, c: char, text: S) {
        self.record_yank_named(c, text);
    }
}

/// Source of paste content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteSource {
    Unnamed,
    Numbered(usize),
    Named(char),
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteError {
    Unimplemented,
    OutOfRange,
    Empty,
}

/// Facade encapsulating register reads/writes so callers don't reach into
/// `EditorState` for ad-hoc mutations.
pub struct RegistersFacade<'state> {
    registers: &'state mut Registers,
}

impl<'state> RegistersFacade<'state> {
    pub fn new(registers: &'state mut Registers) -> Self {
        Self { registers }
    }

    pub fn write_delete<S: Into<String>>(&mut self, payload: S, target: Option<char>) {
        let text = payload.into();
        if let Some(named) = target.filter(|c| c.is_ascii_alphabetic()) {
            self.registers.record_delete_named(named, text);
        } else {
            self.registers.record_delete(text);
        }
    }

    pub fn write_yank<S: Into<String>>(&mut self, payload: S, target: Option<char>) {
        let text = payload.into();
        if let Some(named) = target.filter(|c| c.is_ascii_alphabetic()) {
            self.registers.record_yank_named(named, text);
        } else {
            self.registers.record_yank(text);
        }
    }

    pub fn read_paste(&self, source: PasteSource) -> Result<String, PasteError> {
        let registers: &Registers = self.registers;
        match source {
            PasteSource::Unnamed => {
                if registers.unnamed.is_empty() {
                    Err(PasteError::Empty)
                } else {
                    Ok(registers.unnamed.clone())
                }
            }
            PasteSource::Numbered(idx) => {
                let entry = registers.numbered.get(idx).ok_or(PasteError::OutOfRange)?;
                if entry.is_empty() {
                    Err(PasteError::Empty)
                } else {
                    Ok(entry.clone())
                }
            }
            PasteSource::Named(c) => {
                let slot = c.to_ascii_lowercase();
                if !slot.is_ascii_lowercase() {
                    return Err(PasteError::OutOfRange);
                }
                let idx = (slot as u8 - b'a') as usize;
                let entry = &registers.named[idx];
                if entry.is_empty() {
                    Err(PasteError::Empty)
                } else {
                    Ok(entry.clone())
                }
            }
            PasteSource::System => Err(PasteError::Unimplemented),
        }
    }
}

/// Diagnostic context threaded through config loading and command execution
/// (the concrete type behind "the error buffer"). Carries enough of a
/// prefix to reproduce dte-style `file:line: message` diagnostics.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    pub config_filename: Option<String>,
    pub config_line: u32,
    pub command_name: Option<String>,
    pub messages: Vec<String>,
    pub is_error: bool,
}

impl ErrorContext {
    pub fn report(&mut self, message: impl Into<String>) {
        let msg = message.into();
        let prefixed = match (&self.config_filename, self.config_line) {
            (Some(file), line) if line > 0 => format!("{file}:{line}: {msg}"),
            (Some(file), _) => format!("{file}: {msg}"),
            (None, _) => msg,
        };
        self.messages.push(prefixed);
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.is_error = false;
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

/// `LineEnding`/`normalize_line_endings` live in `core-text` alongside
/// `Buffer`, which now owns the per-buffer line-ending metadata; re-exported
/// here so existing `core_state::LineEnding` callers keep working.
pub use core_text::{LineEnding, NormalizedText, normalize_line_endings};

/// Raw command-line / search-line text entry buffer for command and search
/// modes. Stores the text without its leading sigil (`:` or `/`).
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
    active: bool,
}

impl CommandLineState {
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn clear(&mut self) {
        self.buf.clear();
        self.active = false;
    }
    pub fn begin(&mut self) {
        self.buf.clear();
        self.active = true;
    }
    pub fn push_char(&mut self, ch: char) {
        self.active = true;
        self.buf.push(ch);
    }
    /// Replace newlines with spaces and append — used for bracketed paste
    /// into command/search line buffers.
    pub fn push_pasted(&mut self, text: &str) {
        self.active = true;
        for ch in text.chars() {
            self.buf.push(if ch == '\n' { ' ' } else { ch });
        }
    }
    pub fn backspace(&mut self) {
        if !self.buf.is_empty() {
            self.buf.pop();
        }
        if self.buf.is_empty() {
            self.active = false;
        }
    }
}

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: std::time::Instant,
}

/// Top-level editor state container.
///
/// File identity (`file_name`, `dirty`, `original_line_ending`,
/// `had_trailing_newline`) lives on the active `Buffer` itself, not here —
/// opening a second buffer must never clobber the first one's save
/// metadata. Use the `file_name()`/`dirty()`/... accessors below, which
/// read/write through to `active_buffer()`.
pub struct EditorState {
    pub buffers: Vec<Buffer>,
    pub active: usize,
    pub last_text_height: usize,
    pub mode_stack: Vec<Mode>,
    changes: Vec<ChangeTree>,
    pub command_line: CommandLineState,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub config_vertical_margin: usize,
    pub registers: Registers,
    pub selection: SelectionModel,
    pub error: ErrorContext,
    /// Preferred visual column for vertical motion, reset by any motion or
    /// edit that isn't itself a vertical step.
    pub sticky_col: Option<usize>,
    /// Most recently used search pattern, reused by a bare `search -n`/`-p`
    /// (repeat last search) with no pattern argument.
    pub last_search: Option<String>,
}

impl EditorState {
    /// Create a new state with a single active buffer.
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffers: vec![buffer],
            active: 0,
            last_text_height: 0,
            mode_stack: vec![Mode::Normal],
            changes: vec![ChangeTree::new()],
            command_line: CommandLineState::default(),
            ephemeral_status: None,
            config_vertical_margin: 0,
            registers: Registers::new(),
            selection: SelectionModel::default(),
            error: ErrorContext::default(),
            sticky_col: None,
            last_search: None,
        }
    }

    /// Add a buffer to the arena, returning its index.
    pub fn add_buffer(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.changes.push(ChangeTree::new());
        self.buffers.len() - 1
    }

    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: std::time::Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: std::time::Instant::now() + ttl,
        });
    }

    pub fn tick_ephemeral(&mut self) -> bool {
        if let Some(m) = &self.ephemeral_status
            && std::time::Instant::now() >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    pub fn set_last_text_height(&mut self, h: usize) {
        self.last_text_height = h;
    }

    pub fn active_buffer(&self) -> &Buffer {
        &self.buffers[self.active]
    }

    pub fn active_buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.active]
    }

    /// Path the active buffer was opened from / will save to.
    pub fn file_name(&self) -> Option<&std::path::Path> {
        self.active_buffer().file_name.as_deref()
    }

    pub fn set_file_name(&mut self, name: Option<std::path::PathBuf>) {
        self.active_buffer_mut().file_name = name;
    }

    /// Whether the active buffer has unsaved changes.
    pub fn dirty(&self) -> bool {
        self.active_buffer().dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.active_buffer_mut().dirty = dirty;
    }

    pub fn original_line_ending(&self) -> LineEnding {
        self.active_buffer().original_line_ending
    }

    pub fn set_original_line_ending(&mut self, line_ending: LineEnding) {
        self.active_buffer_mut().original_line_ending = line_ending;
    }

    pub fn had_trailing_newline(&self) -> bool {
        self.active_buffer().had_trailing_newline
    }

    pub fn set_had_trailing_newline(&mut self, value: bool) {
        self.active_buffer_mut().had_trailing_newline = value;
    }

    fn active_changes(&mut self) -> &mut ChangeTree {
        &mut self.changes[self.active]
    }

    /// Current input mode (top of the mode stack).
    pub fn mode(&self) -> Mode {
        *self.mode_stack.last().expect("mode stack is never empty")
    }

    /// Push a new mode (e.g. entering command or search mode).
    pub fn push_mode(&mut self, mode: Mode) {
        self.mode_stack.push(mode);
    }

    /// Pop back to the previous mode; the root Normal mode is never popped.
    pub fn pop_mode(&mut self) -> Mode {
        if self.mode_stack.len() > 1 {
            self.mode_stack.pop();
        }
        self.mode()
    }

    /// Begin a coalescing scope for subsequent `record_*` calls.
    pub fn begin_change(&mut self, hint: MergeTag) {
        self.active_changes().begin_change(hint);
    }
    pub fn end_change(&mut self) {
        self.active_changes().end_change();
    }
    pub fn begin_change_chain(&mut self) {
        self.active_changes().begin_change_chain();
    }
    pub fn end_change_chain(&mut self) {
        self.active_changes().end_change_chain();
    }

    fn abs_offset(&self, pos: Position) -> usize {
        let buf = self.active_buffer();
        buf.byte_offset(&buf.iter_at(pos.line, pos.byte))
    }

    /// Insert `text` at `pos`, recording it in the change tree and advancing
    /// `pos` past the inserted bytes.
    pub fn insert_text(&mut self, pos: &mut Position, text: &str) {
        let offset = self.abs_offset(*pos);
        self.active_buffer_mut().insert_bytes_at(offset, text.as_bytes());
        self.active_changes().record_insert(offset, text.as_bytes());
        if text.contains('\n') {
            *pos = self.active_buffer().position_of(&self.active_buffer().iter_at_byte(offset + text.len()));
        } else {
            pos.byte += text.len();
        }
        self.active_buffer_mut().dirty = true;
    }

    /// Delete the byte range `[start,end)` from the active buffer, recording
    /// it as a forward deletion. Returns the removed text.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let removed = self.active_buffer_mut().delete_bytes(start, end);
        self.active_changes().record_delete(start, removed.as_bytes());
        self.active_buffer_mut().dirty = true;
        removed
    }

    /// Delete the byte range as a backward deletion (backspace-style), for
    /// `Erase` coalescing.
    pub fn erase_range(&mut self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let removed = self.active_buffer_mut().delete_bytes(start, end);
        self.active_changes().record_erase(start, removed.as_bytes());
        self.active_buffer_mut().dirty = true;
        removed
    }

    /// Atomic replace, recorded as a non-coalescing leaf.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> String {
        let removed = self.active_buffer_mut().delete_bytes(start, end);
        self.active_buffer_mut().insert_bytes_at(start, text.as_bytes());
        self.active_changes()
            .record_replace(start, removed.as_bytes(), text.as_bytes());
        self.active_buffer_mut().dirty = true;
        removed
    }

    /// Delete a byte span `[start,end)`, clamping `cursor` to the start of
    /// the removed region. Returns the removed text.
    pub fn delete_span_with_snapshot(
        &mut self,
        cursor: &mut Position,
        start: usize,
        end: usize,
    ) -> String {
        let removed = self.delete_range(start, end);
        *cursor = self.active_buffer().position_of(&self.active_buffer().iter_at_byte(start));
        removed
    }

    pub fn undo(&mut self, cursor: &mut Position) -> bool {
        let buffer = &mut self.buffers[self.active];
        let offset_before = buffer.byte_offset(&buffer.iter_at(cursor.line, cursor.byte));
        let changed = self.changes[self.active].undo(buffer);
        if changed {
            *cursor = buffer.position_of(&buffer.iter_at_byte(offset_before.min(buffer.total_bytes())));
        }
        changed
    }

    pub fn redo(&mut self, cursor: &mut Position) -> bool {
        let buffer = &mut self.buffers[self.active];
        let changed = self.changes[self.active].redo(buffer, None);
        if changed {
            let offset = buffer.byte_offset(&buffer.iter_at(cursor.line, cursor.byte));
            *cursor = buffer.position_of(&buffer.iter_at_byte(offset.min(buffer.total_bytes())));
        }
        changed
    }

    pub fn undo_depth(&self) -> usize {
        self.changes[self.active].undo_depth()
    }
    pub fn can_redo(&self) -> bool {
        self.changes[self.active].can_redo()
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn registers_facade(&mut self) -> RegistersFacade<'_> {
        RegistersFacade::new(&mut self.registers)
    }

    pub fn selection(&self) -> Option<SelectionSpan> {
        self.selection.active
    }
    pub fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Perform a paste operation: `before` inserts before the cursor's
    /// grapheme (`P`-equivalent), otherwise after (`p`-equivalent).
    pub fn paste(
        &mut self,
        source: PasteSource,
        before: bool,
        cursor: &mut Position,
    ) -> Result<bool, PasteError> {
        let text = self.registers_facade().read_paste(source)?;
        let mut insert_pos = *cursor;
        if !before {
            let buffer = self.active_buffer();
            let line_len = buffer.line_byte_len(insert_pos.line);
            if insert_pos.byte < line_len
                && let Some(line_owned) = buffer.line(insert_pos.line)
            {
                let trimmed = line_owned.strip_suffix('\n').unwrap_or(&line_owned);
                let next = core_text::grapheme::next_boundary(trimmed, insert_pos.byte);
                insert_pos.byte = next.min(trimmed.len());
            }
        }
        self.begin_change(MergeTag::None);
        self.insert_text(&mut insert_pos, &text);
        self.end_change();
        let structural = text.contains('\n');
        if !structural {
            let last_len = text
                .chars()
                .last()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            insert_pos.byte = insert_pos.byte.saturating_sub(last_len);
        }
        *cursor = insert_pos;
        Ok(structural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    #[test]
    fn new_state_starts_in_normal_mode() {
        let buf = Buffer::from_str("t", "abc").unwrap();
        let st = EditorState::new(buf);
        assert_eq!(st.mode(), Mode::Normal);
    }

    #[test]
    fn mode_stack_push_pop() {
        let buf = Buffer::from_str("t", "abc").unwrap();
        let mut st = EditorState::new(buf);
        st.push_mode(Mode::Command);
        assert_eq!(st.mode(), Mode::Command);
        st.pop_mode();
        assert_eq!(st.mode(), Mode::Normal);
        // popping the root mode is a no-op
        st.pop_mode();
        assert_eq!(st.mode(), Mode::Normal);
    }

    #[test]
    fn insert_then_undo_restores_buffer_and_cursor() {
        let buf = Buffer::from_str("t", "abc\n").unwrap();
        let mut st = EditorState::new(buf);
        let mut cursor = Position::new(0, 4);
        st.begin_change(MergeTag::Insert);
        st.insert_text(&mut cursor, "XYZ");
        st.end_change();
        assert_eq!(st.active_buffer().line(0).unwrap(), "abc\nXYZ");
        assert!(st.undo(&mut cursor));
        assert_eq!(st.active_buffer().line(0).unwrap(), "abc\n");
        assert_eq!(cursor, Position::new(0, 4));
    }

    #[test]
    fn coalesced_inserts_undo_in_one_step() {
        let buf = Buffer::from_str("t", "").unwrap();
        let mut st = EditorState::new(buf);
        let mut cursor = Position::origin();
        st.begin_change(MergeTag::Insert);
        for ch in ["a", "b", "c"] {
            st.insert_text(&mut cursor, ch);
        }
        st.end_change();
        assert_eq!(st.undo_depth(), 1);
        assert!(st.undo(&mut cursor));
        assert_eq!(st.active_buffer().line(0).unwrap(), "");
    }

    #[test]
    fn paste_single_line_after() {
        let buf = Buffer::from_str("t", "abc\n").unwrap();
        let mut st = EditorState::new(buf);
        st.registers_facade().write_yank("X", None);
        let mut cursor = Position::new(0, 1);
        let structural = st.paste(PasteSource::Unnamed, false, &mut cursor).unwrap();
        assert!(!structural);
        assert_eq!(st.active_buffer().line(0).unwrap(), "abXc\n");
        assert_eq!(cursor.byte, 2);
    }

    #[test]
    fn paste_single_line_before() {
        let buf = Buffer::from_str("t", "abc").unwrap();
        let mut st = EditorState::new(buf);
        st.registers_facade().write_yank("Z", None);
        let mut cursor = Position::new(0, 2);
        let structural = st.paste(PasteSource::Unnamed, true, &mut cursor).unwrap();
        assert!(!structural);
        assert_eq!(st.active_buffer().line(0).unwrap(), "abZc");
        assert_eq!(cursor.byte, 2);
    }

    #[test]
    fn paste_multiline_is_structural() {
        let buf = Buffer::from_str("t", "ac").unwrap();
        let mut st = EditorState::new(buf);
        st.registers_facade().write_yank("X\nY\n", None);
        let mut cursor = Position::new(0, 1);
        let structural = st.paste(PasteSource::Unnamed, false, &mut cursor).unwrap();
        assert!(structural);
        assert_eq!(st.active_buffer().line_count(), 3);
    }

    #[test]
    fn command_line_paste_replaces_newlines_with_spaces() {
        let mut cl = CommandLineState::default();
        cl.begin();
        cl.push_pasted("a\nb\nc");
        assert_eq!(cl.buffer(), "a b c");
    }

    #[test]
    fn error_context_prefixes_messages_with_file_and_line() {
        let mut err = ErrorContext::default();
        err.config_filename = Some("rc".to_string());
        err.config_line = 4;
        err.report("no such command");
        assert_eq!(err.last(), Some("rc:4: no such command"));
        assert!(err.is_error);
    }
}
