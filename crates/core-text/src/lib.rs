//! Text storage backed by a linked list of byte blocks.
//!
//! A [`Buffer`] owns an ordered sequence of [`Block`]s. Concatenating every
//! block's bytes, in order, yields the file content. Blocks are kept near a
//! preferred size so random access and edits stay close to O(1); only very
//! large single-block edits touch more than one neighbor.

use anyhow::Result;

pub mod grapheme;
pub mod motion;
pub mod segment;
pub mod width;
#[cfg(feature = "term-probe")]
pub mod width_probe;

pub use width::egc_width;

/// Target size for a block before a split is considered. Kept small so tests
/// can exercise multi-block behavior without huge fixtures.
const PREFERRED_BLOCK_SIZE: usize = 8192;
/// A block is split once it exceeds this multiple of the preferred size.
const SPLIT_RATIO: usize = 2;

/// One node of the buffer's block list.
#[derive(Debug, Clone)]
pub struct Block {
    data: Vec<u8>,
    /// Count of `\n` bytes in `data`, maintained incrementally.
    nl: usize,
}

impl Block {
    fn new(data: Vec<u8>) -> Self {
        let nl = data.iter().filter(|&&b| b == b'\n').count();
        Self { data, nl }
    }

    fn empty() -> Self {
        Self {
            data: Vec::new(),
            nl: 0,
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A position inside a buffer expressed as (line index, byte offset within
/// that line). Retained as a convenience coordinate system above the block
/// list / iterator primitives for callers that think in line/column terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

/// A cursor into a buffer's block list: a block index plus a byte offset
/// within that block. Cheap to copy; callers save/restore by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockIter {
    pub block: usize,
    pub offset: usize,
}

impl BlockIter {
    fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Line ending style detected from the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Result of normalizing line endings.
pub struct NormalizedText {
    pub normalized: String,
    pub original: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed: bool,
}

/// Detect and normalize line endings of `input` to LF-only internal
/// representation. Picks the majority style (ties: CRLF > LF > CR).
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut crlf = 0usize;
    let mut lf = 0usize;
    let mut cr = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    crlf += 1;
                    i += 2;
                } else {
                    cr += 1;
                    i += 1;
                }
            }
            b'\n' => {
                lf += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    let had_trailing_newline = if input.is_empty() {
        false
    } else {
        input.ends_with("\r\n") || input.ends_with('\n') || input.ends_with('\r')
    };
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let non_zero = [crlf, lf, cr].iter().filter(|c| **c > 0).count();
    let mixed = non_zero > 1 && [crlf, lf, cr].iter().any(|c| *c > 0 && *c != max);
    if crlf == 0 && cr == 0 {
        return NormalizedText {
            normalized: input.to_string(),
            original,
            had_trailing_newline,
            mixed,
        };
    }
    let mut out = String::with_capacity(input.len());
    let mut seg_start = 0usize;
    let mut j = 0usize;
    while j < bytes.len() {
        if bytes[j] == b'\r' {
            if seg_start < j {
                out.push_str(&input[seg_start..j]);
            }
            if j + 1 < bytes.len() && bytes[j + 1] == b'\n' {
                out.push('\n');
                j += 2;
            } else {
                out.push('\n');
                j += 1;
            }
            seg_start = j;
        } else {
            j += 1;
        }
    }
    if seg_start < input.len() {
        out.push_str(&input[seg_start..]);
    }
    debug_assert!(!out.contains('\r'));
    NormalizedText {
        normalized: out,
        original,
        had_trailing_newline,
        mixed,
    }
}

/// A text buffer backed by a block list.
#[derive(Clone)]
pub struct Buffer {
    blocks: Vec<Block>,
    pub name: String,
    /// Total `\n` count across all blocks; kept equal to the sum of each
    /// block's own count after every mutation.
    nl: usize,
    /// Path this buffer was opened from / will save to, if any. Each buffer
    /// owns its own file identity so switching `EditorState::active` never
    /// disturbs another buffer's save metadata.
    pub file_name: Option<std::path::PathBuf>,
    /// Whether this buffer has unsaved changes.
    pub dirty: bool,
    /// Line-ending style detected when this buffer was loaded, reused on save.
    pub original_line_ending: LineEnding,
    /// Whether the source file ended with a trailing newline, reused on save.
    pub had_trailing_newline: bool,
    /// Per-buffer indent/width settings, overridable by `set`/EditorConfig.
    pub options: BufferOptions,
}

/// Buffer-local editing options: the `indent_width`/`tab_width`/`text_width`/
/// `expand_tab` quartet referenced throughout the command layer. `text_width`
/// of `0` means no configured line-length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOptions {
    pub indent_width: usize,
    pub tab_width: usize,
    pub text_width: usize,
    pub expand_tab: bool,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            tab_width: 8,
            text_width: 0,
            expand_tab: true,
        }
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let mut blocks = Vec::new();
        let bytes = content.as_bytes();
        if bytes.is_empty() {
            blocks.push(Block::empty());
        } else {
            for chunk in bytes.chunks(PREFERRED_BLOCK_SIZE) {
                blocks.push(Block::new(chunk.to_vec()));
            }
        }
        let nl = blocks.iter().map(|b| b.nl).sum();
        Ok(Self {
            blocks,
            name: name.into(),
            nl,
            file_name: None,
            dirty: false,
            original_line_ending: LineEnding::Lf,
            had_trailing_newline: false,
            options: BufferOptions::default(),
        })
    }

    /// Total number of trailing-newline-delimited lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.nl + 1
    }

    /// Total byte length of the buffer's content.
    pub fn total_bytes(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Full-buffer copy, kept only for test assertions that cross-check the
    /// block-local traversal helpers below. Not used on any motion path.
    #[allow(dead_code)]
    fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_bytes());
        for b in &self.blocks {
            out.extend_from_slice(&b.data);
        }
        out
    }

    /// Iterator positioned at the very start of the buffer.
    pub fn iter_bof(&self) -> BlockIter {
        BlockIter::new(0, 0)
    }

    /// Iterator positioned at the very end of the buffer.
    pub fn iter_eof(&self) -> BlockIter {
        let last = self.blocks.len().saturating_sub(1);
        BlockIter::new(last, self.blocks[last].len())
    }

    /// Absolute byte offset of an iterator, counting bytes of every
    /// preceding block.
    pub fn byte_offset(&self, it: &BlockIter) -> usize {
        let mut total = 0;
        for b in &self.blocks[..it.block] {
            total += b.len();
        }
        total + it.offset
    }

    /// Build an iterator at the given absolute byte offset (clamped).
    pub fn iter_at_byte(&self, mut offset: usize) -> BlockIter {
        for (i, b) in self.blocks.iter().enumerate() {
            if offset <= b.len() && (offset < b.len() || i == self.blocks.len() - 1) {
                return BlockIter::new(i, offset);
            }
            offset -= b.len();
        }
        self.iter_eof()
    }

    /// Build an iterator at `(line, byte_in_line)`, clamped to buffer bounds.
    /// Only touches the blocks between the buffer start and the target
    /// position, never the whole buffer.
    pub fn iter_at(&self, line: usize, byte_in_line: usize) -> BlockIter {
        let mut it = self.iter_bof();
        for _ in 0..line {
            if !self.step_line_forward(&mut it) {
                break;
            }
        }
        let mut remaining = byte_in_line;
        loop {
            let block_len = self.block_len(it.block);
            let avail = block_len.saturating_sub(it.offset);
            if remaining <= avail {
                it.offset += remaining;
                break;
            }
            remaining -= avail;
            if it.block + 1 >= self.blocks.len() {
                it.offset = block_len;
                break;
            }
            it.block += 1;
            it.offset = 0;
        }
        it
    }

    /// Translate an iterator back into (line, byte-in-line) coordinates.
    /// Counts newlines in whole blocks before `it.block` using each block's
    /// cached `nl`, then scans only the current block (and, in the rare case
    /// that block has no preceding newline, walks backward through earlier
    /// blocks until one is found).
    pub fn position_of(&self, it: &BlockIter) -> Position {
        let mut line: usize = self.blocks[..it.block].iter().map(|b| b.nl).sum();
        let cur = &self.blocks[it.block].data;
        let mut last_nl_in_block = None;
        for (i, &b) in cur[..it.offset].iter().enumerate() {
            if b == b'\n' {
                line += 1;
                last_nl_in_block = Some(i);
            }
        }
        let byte = match last_nl_in_block {
            Some(nl_idx) => it.offset - (nl_idx + 1),
            None => {
                let mut byte = it.offset;
                let mut idx = it.block;
                while idx > 0 {
                    idx -= 1;
                    let data = &self.blocks[idx].data;
                    match data.iter().rposition(|&c| c == b'\n') {
                        Some(pos) => {
                            byte += data.len() - (pos + 1);
                            break;
                        }
                        None => byte += data.len(),
                    }
                }
                byte
            }
        };
        Position { line, byte }
    }

    fn block_len(&self, idx: usize) -> usize {
        self.blocks.get(idx).map(Block::len).unwrap_or(0)
    }

    /// Step one line forward; returns false if already on the last line.
    /// Scans forward from the iterator's current position block-by-block,
    /// stopping at the first newline rather than copying the buffer.
    fn step_line_forward(&self, it: &mut BlockIter) -> bool {
        let mut block = it.block;
        let mut offset = it.offset;
        loop {
            if block >= self.blocks.len() {
                return false;
            }
            let data = &self.blocks[block].data;
            if let Some(rel) = data[offset..].iter().position(|&b| b == b'\n') {
                let mut new_block = block;
                let mut new_offset = offset + rel + 1;
                if new_offset == data.len() && new_block + 1 < self.blocks.len() {
                    new_block += 1;
                    new_offset = 0;
                }
                *it = BlockIter::new(new_block, new_offset);
                return true;
            }
            block += 1;
            offset = 0;
        }
    }

    /// Return the requested line as an owned `String`, including the
    /// trailing newline if present. Walks forward from the line's start
    /// iterator only as far as the line's own content.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.line_count() {
            return None;
        }
        let start = self.iter_at(idx, 0);
        let mut out = Vec::new();
        let mut block = start.block;
        let mut offset = start.offset;
        loop {
            if block >= self.blocks.len() {
                break;
            }
            let data = &self.blocks[block].data;
            if let Some(rel) = data[offset..].iter().position(|&b| b == b'\n') {
                out.extend_from_slice(&data[offset..offset + rel + 1]);
                break;
            }
            out.extend_from_slice(&data[offset..]);
            block += 1;
            offset = 0;
        }
        Some(String::from_utf8_lossy(&out).into_owned())
    }

    /// Byte length of a line (excluding any newline) for clamping purposes.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        match self.line(idx) {
            Some(s) if s.ends_with('\n') => s.len() - 1,
            Some(s) => s.len(),
            None => 0,
        }
    }

    fn absolute_byte_index(&self, pos: &Position) -> usize {
        self.byte_offset(&self.iter_at(pos.line, pos.byte))
    }

    /// Insert raw bytes at the iterator; splits the containing block when it
    /// would grow past [`SPLIT_RATIO`] times the preferred size. The
    /// iterator is advanced to just past the inserted bytes.
    pub fn insert(&mut self, it: &mut BlockIter, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let added_nl = bytes.iter().filter(|&&b| b == b'\n').count();
        let block = &mut self.blocks[it.block];
        block.data.splice(it.offset..it.offset, bytes.iter().copied());
        block.nl += added_nl;
        self.nl += added_nl;
        it.offset += bytes.len();

        if block.len() > PREFERRED_BLOCK_SIZE * SPLIT_RATIO {
            let split_at = block.len() / 2;
            let tail = block.data.split_off(split_at);
            let old_nl = block.nl;
            *block = Block::new(std::mem::take(&mut self.blocks[it.block].data));
            let new_block = Block::new(tail);
            let _ = old_nl;
            let keep_in_first = it.offset <= split_at;
            self.blocks.insert(it.block + 1, new_block);
            if !keep_in_first {
                it.block += 1;
                it.offset -= split_at;
            }
        }
    }

    /// Delete `n` bytes starting at the iterator, returning the removed
    /// bytes so the caller can record them in a change. Merges an
    /// under-full block with its next neighbor when it would still fit a
    /// single preferred block.
    pub fn delete(&mut self, it: &mut BlockIter, n: usize) -> Vec<u8> {
        let mut removed = Vec::with_capacity(n);
        let mut remaining = n;
        while remaining > 0 {
            if it.block >= self.blocks.len() {
                break;
            }
            let avail = self.blocks[it.block].len() - it.offset;
            if avail == 0 {
                if it.block + 1 >= self.blocks.len() {
                    break;
                }
                it.block += 1;
                it.offset = 0;
                continue;
            }
            let take = avail.min(remaining);
            let block = &mut self.blocks[it.block];
            let drained: Vec<u8> = block.data.splice(it.offset..it.offset + take, []).collect();
            let removed_nl = drained.iter().filter(|&&b| b == b'\n').count();
            block.nl -= removed_nl;
            self.nl -= removed_nl;
            removed.extend_from_slice(&drained);
            remaining -= take;
        }
        self.merge_if_underfull(it.block);
        removed
    }

    fn merge_if_underfull(&mut self, idx: usize) {
        if self.blocks.len() <= 1 {
            return;
        }
        if idx >= self.blocks.len() {
            return;
        }
        if self.blocks[idx].len() == 0 && self.blocks.len() > 1 {
            // drop the empty block, preferring to keep at least one block alive
            if idx + 1 < self.blocks.len() || idx > 0 {
                self.blocks.remove(idx);
            }
            return;
        }
        if idx + 1 < self.blocks.len()
            && self.blocks[idx].len() + self.blocks[idx + 1].len() <= PREFERRED_BLOCK_SIZE
        {
            let next = self.blocks.remove(idx + 1);
            let block = &mut self.blocks[idx];
            block.data.extend_from_slice(&next.data);
            block.nl += next.nl;
        }
    }

    /// Atomic delete-then-insert, for coalescing semantics upstream.
    pub fn replace(&mut self, it: &mut BlockIter, n: usize, bytes: &[u8]) -> Vec<u8> {
        let removed = self.delete(it, n);
        self.insert(it, bytes);
        removed
    }

    fn byte_to_char_index(&self, line: usize, byte_in_line: usize) -> usize {
        byte_in_line + self.line_start_byte(line)
    }

    fn line_start_byte(&self, line: usize) -> usize {
        self.byte_offset(&self.iter_at(line, 0))
    }

    /// Insert a grapheme cluster string (may be multi-byte) at the given
    /// position; advances position by its byte length.
    pub fn insert_grapheme(&mut self, pos: &mut Position, g: &str) {
        let mut it = self.iter_at(pos.line, pos.byte);
        self.insert(&mut it, g.as_bytes());
        pos.byte += g.len();
    }

    /// Insert a newline at the given position, splitting the current line.
    /// Cursor moves to start of new line.
    pub fn insert_newline(&mut self, pos: &mut Position) {
        let mut it = self.iter_at(pos.line, pos.byte);
        self.insert(&mut it, b"\n");
        pos.line += 1;
        pos.byte = 0;
    }

    /// Delete the grapheme cluster before the position (like backspace). If
    /// at start of line and not first line, joins with previous.
    pub fn delete_grapheme_before(&mut self, pos: &mut Position) {
        if pos.line == 0 && pos.byte == 0 {
            return;
        }
        if pos.byte == 0 {
            let prev_line = pos.line - 1;
            let prev_len = self.line_byte_len(prev_line);
            let newline_byte = self.line_start_byte(prev_line) + prev_len;
            let mut it = self.iter_at_byte(newline_byte);
            self.delete(&mut it, 1);
            pos.line = prev_line;
            pos.byte = prev_len;
            return;
        }
        let line_str = self.line_content_string(pos.line);
        let prev = grapheme::prev_boundary(&line_str, pos.byte);
        if prev == pos.byte {
            return;
        }
        let abs_start = self.byte_to_char_index(pos.line, prev);
        let abs_end = self.byte_to_char_index(pos.line, pos.byte);
        let mut it = self.iter_at_byte(abs_start);
        self.delete(&mut it, abs_end - abs_start);
        pos.byte = prev;
    }

    /// Delete the grapheme cluster at the position (like Normal mode 'x').
    /// No-op if at line end.
    pub fn delete_grapheme_at(&mut self, pos: &mut Position) {
        let line_len = self.line_byte_len(pos.line);
        if pos.byte >= line_len {
            return;
        }
        let line_str = self.line_content_string(pos.line);
        let next = grapheme::next_boundary(&line_str, pos.byte);
        if next == pos.byte {
            return;
        }
        let abs_start = self.byte_to_char_index(pos.line, pos.byte);
        let abs_end = self.byte_to_char_index(pos.line, next);
        let mut it = self.iter_at_byte(abs_start);
        self.delete(&mut it, abs_end - abs_start);
    }

    fn line_content_string(&self, idx: usize) -> String {
        let mut s = self.line(idx).unwrap_or_default();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Return the UTF-8 slice in the absolute byte range `[start,end)`.
    /// Only copies bytes from blocks the range actually overlaps.
    pub fn slice_bytes(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let total = self.total_bytes();
        let s = start.min(total);
        let e = end.min(total);
        if s >= e {
            return String::new();
        }
        let mut out = Vec::with_capacity(e - s);
        let mut pos = 0usize;
        for b in &self.blocks {
            let blen = b.data.len();
            if pos >= e {
                break;
            }
            if pos + blen > s {
                let local_start = s.saturating_sub(pos).min(blen);
                let local_end = (e - pos).min(blen);
                if local_start < local_end {
                    out.extend_from_slice(&b.data[local_start..local_end]);
                }
            }
            pos += blen;
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Delete the UTF-8 slice in absolute byte range `[start,end)` (clamped).
    /// Returns the removed text for register / undo integration.
    pub fn delete_bytes(&mut self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let total = self.total_bytes();
        let s = start.min(total);
        let e = end.min(total);
        if s >= e {
            return String::new();
        }
        let mut it = self.iter_at_byte(s);
        let removed = self.delete(&mut it, e - s);
        String::from_utf8_lossy(&removed).into_owned()
    }

    /// Insert raw bytes at an absolute byte offset; returns the new cursor
    /// offset (end of the inserted bytes).
    pub fn insert_bytes_at(&mut self, offset: usize, bytes: &[u8]) -> usize {
        let mut it = self.iter_at_byte(offset);
        self.insert(&mut it, bytes);
        self.byte_offset(&it)
    }

    /// Number of blocks currently in the list (diagnostic / test use).
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
