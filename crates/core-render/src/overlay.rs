//! Overlay row budgeting.
//!
//! The renderer reserves a fixed band of rows above the status line for
//! transient overlays. No overlay content is currently produced -- the
//! debug operator/render-path metrics overlay this module once painted was
//! tied to telemetry counters that no longer exist on `EditorState` -- so
//! this always budgets zero rows. Kept as its own module (rather than
//! inlined into `render_engine`) so a real overlay (e.g. a diagnostics
//! panel) has an obvious seam to land in later.

use crate::batch_writer::BatchWriter;
use core_state::EditorState;

/// Build overlay lines to paint above the status line. Always empty for now.
pub fn build_overlay_lines(_state: &EditorState, _width: u16) -> Vec<String> {
    Vec::new()
}

/// Return overlay line count (cheap) for geometry budgeting.
pub fn overlay_line_count(state: &EditorState, width: u16) -> u16 {
    build_overlay_lines(state, width).len() as u16
}

/// Paint overlay rows (always dirty) into a BatchWriter for partial render paths.
/// Assumes caller already ensured `h > 0` and will paint status line afterwards.
pub fn paint_overlay_rows_batch(writer: &mut BatchWriter, state: &EditorState, w: u16, h: u16) {
    if h == 0 {
        return;
    }
    let lines = build_overlay_lines(state, w);
    let count = lines.len() as u16;
    if count == 0 || count >= h {
        return;
    }
    let first_row = h - 1 - count;
    for (i, line) in lines.iter().enumerate() {
        let y = first_row + i as u16;
        writer.move_to(0, y);
        writer.clear_line(0, y);
        let mut byte = 0usize;
        let mut x: u16 = 0;
        while byte < line.len() && x < w {
            let next = core_text::grapheme::next_boundary(line, byte);
            let cluster = &line[byte..next];
            let width = core_text::grapheme::cluster_width(cluster).max(1) as u16;
            writer.print(cluster.to_string());
            x = x.saturating_add(width);
            byte = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    #[test]
    fn overlay_is_always_empty() {
        let st = core_state::EditorState::new(Buffer::from_str("t", "a\n").unwrap());
        assert!(build_overlay_lines(&st, 80).is_empty());
        assert_eq!(overlay_line_count(&st, 80), 0);
    }
}
