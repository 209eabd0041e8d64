//! Grapheme and width utilities operating on a single line of text.

use crate::egc_width;
use unicode_segmentation::UnicodeSegmentation;

/// Iterate grapheme clusters in a line.
pub fn iter(line: &str) -> impl Iterator<Item = &str> {
    line.graphemes(true)
}

/// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
pub fn prev_boundary(line: &str, byte: usize) -> usize {
    if byte == 0 || byte > line.len() {
        return 0;
    }
    let mut last = 0;
    for (idx, _) in line.grapheme_indices(true) {
        if idx >= byte {
            break;
        }
        last = idx;
    }
    last
}

/// Next grapheme boundary (returns line.len() if at or beyond end).
pub fn next_boundary(line: &str, byte: usize) -> usize {
    if byte >= line.len() {
        return line.len();
    }
    for (idx, _) in line.grapheme_indices(true) {
        if idx > byte {
            return idx;
        }
    }
    line.len()
}

/// Compute visual column (terminal cells) up to (but not including) byte offset.
pub fn visual_col(line: &str, byte: usize) -> usize {
    let mut col = 0;
    for (idx, g) in line.grapheme_indices(true) {
        if idx >= byte {
            break;
        }
        col += egc_width(g) as usize;
    }
    col
}

/// Width in terminal cells of this grapheme cluster.
pub fn cluster_width(g: &str) -> usize {
    egc_width(g) as usize
}

/// Naive word classification: alphanumeric or underscore start.
pub fn is_word(g: &str) -> bool {
    g.chars()
        .next()
        .map(|c| c == '_' || c.is_alphanumeric())
        .unwrap_or(false)
}
