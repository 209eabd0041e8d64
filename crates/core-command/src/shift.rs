//! Shift (indent/outdent) a set of lines left or right by `count` units.

/// Shift `line` right by `count` indent units: always inserts whitespace at
/// column 0, even on an otherwise-empty line.
pub fn shift_right(line: &str, count: usize, indent_width: usize, expand_tab: bool) -> String {
    let unit = if expand_tab {
        " ".repeat(indent_width)
    } else {
        "\t".to_string()
    };
    format!("{}{}", unit.repeat(count), line)
}

/// Shift `line` left by `count` indent units: removes up to
/// `count * indent_width` leading whitespace *columns* (tabs counted at
/// `tab_width`), never going negative (i.e. never removing non-whitespace
/// or underflowing past the line's leading run).
pub fn shift_left(line: &str, count: usize, indent_width: usize, tab_width: usize) -> String {
    let budget = count * indent_width;
    let mut removed_cols = 0usize;
    let mut byte_idx = 0usize;
    for ch in line.chars() {
        if removed_cols >= budget {
            break;
        }
        let col_width = match ch {
            ' ' => 1,
            '\t' => tab_width,
            _ => break,
        };
        removed_cols += col_width;
        byte_idx += ch.len_utf8();
    }
    line[byte_idx..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_shift_inserts_on_empty_line() {
        assert_eq!(shift_right("", 1, 4, true), "    ");
    }

    #[test]
    fn right_shift_with_tabs() {
        assert_eq!(shift_right("x", 2, 4, false), "\t\tx");
    }

    #[test]
    fn left_shift_removes_up_to_budget() {
        assert_eq!(shift_left("        x", 1, 4, 8), "    x");
    }

    #[test]
    fn left_shift_never_removes_non_whitespace() {
        assert_eq!(shift_left("x", 5, 4, 8), "x");
    }

    #[test]
    fn left_shift_counts_tabs_at_tab_width() {
        assert_eq!(shift_left("\tx", 1, 4, 8), "x");
    }

    #[test]
    fn left_shift_stops_mid_run_when_budget_exhausted() {
        assert_eq!(shift_left("      x", 1, 4, 8), "  x");
    }
}
