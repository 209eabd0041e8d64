//! Status-line `%`-escape sublanguage.

/// Inputs available to a status format string, gathered from the active
/// View/Buffer just before rendering.
#[derive(Debug, Clone, Default)]
pub struct StatusContext {
    pub filename: String,
    pub line: usize,
    pub col: usize,
    pub modified: bool,
    pub overwrite: bool,
    pub syntax: String,
}

/// Expand a format string containing `%f %y %x %M %o %s` escapes (and a
/// literal `%%`) against `ctx`.
pub fn format(fmt: &str, ctx: &StatusContext) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('f') => out.push_str(&ctx.filename),
            Some('y') => out.push_str(&(ctx.line + 1).to_string()),
            Some('x') => out.push_str(&(ctx.col + 1).to_string()),
            Some('M') => out.push(if ctx.modified { '+' } else { ' ' }),
            Some('o') => out.push(if ctx.overwrite { 'O' } else { ' ' }),
            Some('s') => out.push_str(&ctx.syntax),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_all_known_escapes() {
        let ctx = StatusContext {
            filename: "a.rs".into(),
            line: 2,
            col: 0,
            modified: true,
            overwrite: false,
            syntax: "rust".into(),
        };
        assert_eq!(format("%f:%y:%x %M%o %s", &ctx), "a.rs:3:1 +  rust");
    }

    #[test]
    fn unknown_escape_is_passed_through() {
        let ctx = StatusContext::default();
        assert_eq!(format("%q", &ctx), "%q");
    }

    #[test]
    fn literal_percent_escapes() {
        let ctx = StatusContext::default();
        assert_eq!(format("100%%", &ctx), "100%");
    }
}
