//! Auto-indent computation for the text inserted after a newline.

/// Options controlling indent computation, mirroring the relevant subset of
/// a buffer's local `Options`.
#[derive(Debug, Clone, Copy)]
pub struct IndentOptions {
    pub indent_width: usize,
    pub tab_width: usize,
    pub expand_tab: bool,
}

/// Compute the string to insert immediately after a newline, given the
/// previous line's full text (trailing newline stripped) and an optional
/// indent-continuation regex match against that line.
///
/// If `indent_regex_matches` is true, one extra indent unit is appended
/// after the previous line's leading whitespace; otherwise the previous
/// line's leading whitespace is copied verbatim, normalized to
/// spaces/tabs per `expand_tab`.
pub fn compute_indent(previous_line: &str, indent_regex_matches: bool, opts: IndentOptions) -> String {
    let leading_len = previous_line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(previous_line.len());
    let leading = &previous_line[..leading_len];
    let mut out = normalize_whitespace(leading, opts);
    if indent_regex_matches {
        out.push_str(&indent_unit(opts));
    }
    out
}

fn indent_unit(opts: IndentOptions) -> String {
    if opts.expand_tab {
        " ".repeat(opts.indent_width)
    } else {
        "\t".to_string()
    }
}

fn normalize_whitespace(leading: &str, opts: IndentOptions) -> String {
    if !opts.expand_tab {
        return leading.to_string();
    }
    let mut out = String::with_capacity(leading.len());
    for ch in leading.chars() {
        if ch == '\t' {
            out.push_str(&" ".repeat(opts.tab_width));
        } else {
            out.push(ch);
        }
    }
    out
}
