//! EditorConfig ingestion: `.editorconfig` parsing, glob matching, and the
//! directory-walk that resolves the properties in effect for one file path.
//!
//! Grounded in the original implementation's `editorconfig/` subsystem
//! (`ini.h`/`match.h`/`editorconfig.h`): a small hand-rolled INI reader, a
//! glob matcher with brace alternation and character classes (no existing
//! crate in this workspace's stack covers either), and a single
//! `EditorConfigOptions` result record per queried path.

use std::fs;
use std::path::Path;

/// `indent_style`. `Unspecified` means no matching section set it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndentStyle {
    #[default]
    Unspecified,
    Tab,
    Space,
}

/// The properties this editor recognises, merged from every `.editorconfig`
/// file between a path and the filesystem root (or a `root = true` file).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorConfigOptions {
    pub indent_style: IndentStyle,
    /// `indent_size = <n>`. Mutually exclusive with `indent_size_is_tab`.
    pub indent_size: Option<u32>,
    /// `indent_size = tab`: use the effective `tab_width` as the indent unit.
    pub indent_size_is_tab: bool,
    pub tab_width: Option<u32>,
    pub max_line_length: Option<u32>,
}

struct Section {
    pattern: String,
    properties: Vec<(String, String)>,
}

struct Document {
    root: bool,
    sections: Vec<Section>,
}

fn parse(content: &str) -> Document {
    let mut root = false;
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(Section {
                pattern: line[1..line.len() - 1].to_string(),
                properties: Vec::new(),
            });
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        match &mut current {
            Some(section) => section.properties.push((key, value)),
            None if key == "root" => root = value.eq_ignore_ascii_case("true"),
            None => {}
        }
    }
    if let Some(section) = current.take() {
        sections.push(section);
    }
    Document { root, sections }
}

/// Walks from `path`'s directory up to the filesystem root, reading any
/// `.editorconfig` it finds and merging the properties of every section
/// whose glob matches `path`. A property already set by a closer directory's
/// file is not overwritten by a farther one; within one file, a later
/// matching section overrides an earlier one for the same property. Stops
/// ascending once a file sets `root = true`.
pub fn resolve_for_path(path: &Path) -> EditorConfigOptions {
    let mut result = EditorConfigOptions::default();
    let mut have_style = false;
    let mut have_size = false;
    let mut have_tab_width = false;
    let mut have_max_len = false;

    let mut dir = path.parent().map(Path::to_path_buf);
    while let Some(d) = dir {
        let candidate = d.join(".editorconfig");
        if let Ok(content) = fs::read_to_string(&candidate) {
            let doc = parse(&content);
            let rel = path.strip_prefix(&d).unwrap_or(path);
            let rel_str = rel.to_string_lossy().replace('\\', "/");

            for section in &doc.sections {
                if !pattern_match(&section.pattern, &rel_str) {
                    continue;
                }
                for (key, value) in &section.properties {
                    match key.as_str() {
                        "indent_style" if !have_style => {
                            result.indent_style = match value.as_str() {
                                "tab" => IndentStyle::Tab,
                                "space" => IndentStyle::Space,
                                _ => IndentStyle::Unspecified,
                            };
                        }
                        "indent_size" if !have_size => {
                            if value == "tab" {
                                result.indent_size_is_tab = true;
                            } else if let Ok(n) = value.parse() {
                                result.indent_size = Some(n);
                            }
                        }
                        "tab_width" if !have_tab_width => {
                            if let Ok(n) = value.parse() {
                                result.tab_width = Some(n);
                            }
                        }
                        "max_line_length" if !have_max_len => {
                            if let Ok(n) = value.parse() {
                                result.max_line_length = Some(n);
                            }
                        }
                        _ => {}
                    }
                }
            }

            have_style |= result.indent_style != IndentStyle::Unspecified;
            have_size |= result.indent_size.is_some() || result.indent_size_is_tab;
            have_tab_width |= result.tab_width.is_some();
            have_max_len |= result.max_line_length.is_some();

            if doc.root {
                break;
            }
        }
        dir = d.parent().map(Path::to_path_buf);
    }
    result
}

/// EditorConfig glob matching: `*` (stays within one `/`-delimited segment),
/// `**` (crosses segments), `?` (one char, not `/`), `[abc]`/`[!abc]`
/// character classes (with `-` ranges), `\`-escapes, and brace alternation
/// (`{a,b,...}`) with arbitrary nesting. An unterminated `[` or `{` falls
/// back to matching itself literally, same as the original matcher.
pub fn pattern_match(pattern: &str, path: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = path.chars().collect();
    match_at(&pat, 0, &text, 0)
}

fn match_at(pat: &[char], pi: usize, text: &[char], ti: usize) -> bool {
    let mut pi = pi;
    let mut ti = ti;
    loop {
        if pi == pat.len() {
            return ti == text.len();
        }
        match pat[pi] {
            '*' => {
                let double = pat.get(pi + 1) == Some(&'*');
                let next_pi = if double { pi + 2 } else { pi + 1 };
                for consume in ti..=text.len() {
                    if !double && text[ti..consume].contains(&'/') {
                        break;
                    }
                    if match_at(pat, next_pi, text, consume) {
                        return true;
                    }
                }
                return false;
            }
            '?' => {
                if ti >= text.len() || text[ti] == '/' {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
            '[' => match find_class_end(pat, pi) {
                Some((start, close, negate)) => {
                    if ti >= text.len() {
                        return false;
                    }
                    let in_class = class_contains(&pat[start..close], text[ti]);
                    if in_class == negate {
                        return false;
                    }
                    pi = close + 1;
                    ti += 1;
                }
                None => {
                    if ti >= text.len() || text[ti] != '[' {
                        return false;
                    }
                    pi += 1;
                    ti += 1;
                }
            },
            '{' => match parse_group(pat, pi) {
                Some((alts, after)) => {
                    for alt in &alts {
                        let mut combined = alt.clone();
                        combined.extend_from_slice(&pat[after..]);
                        if match_at(&combined, 0, text, ti) {
                            return true;
                        }
                    }
                    return false;
                }
                None => {
                    if ti >= text.len() || text[ti] != '{' {
                        return false;
                    }
                    pi += 1;
                    ti += 1;
                }
            },
            '\\' => {
                let literal = pat.get(pi + 1).copied().unwrap_or('\\');
                if ti >= text.len() || text[ti] != literal {
                    return false;
                }
                pi += if pat.get(pi + 1).is_some() { 2 } else { 1 };
                ti += 1;
            }
            c => {
                if ti >= text.len() || text[ti] != c {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
        }
    }
}

/// Finds the `]` closing a `[...]`/`[!...]` class opened at `pat[open]`.
/// Returns `(members_start, close_index, negate)`. A `]` immediately after
/// `[` or `[!` is a literal member, matching shell glob convention.
fn find_class_end(pat: &[char], open: usize) -> Option<(usize, usize, bool)> {
    let mut i = open + 1;
    let negate = pat.get(i) == Some(&'!');
    if negate {
        i += 1;
    }
    let start = i;
    if pat.get(i) == Some(&']') {
        i += 1;
    }
    while i < pat.len() {
        if pat[i] == ']' {
            return Some((start, i, negate));
        }
        i += 1;
    }
    None
}

fn class_contains(members: &[char], c: char) -> bool {
    let mut i = 0;
    while i < members.len() {
        if i + 2 < members.len() && members[i + 1] == '-' {
            let (lo, hi) = (members[i], members[i + 2]);
            if lo <= c && c <= hi {
                return true;
            }
            i += 3;
        } else {
            if members[i] == c {
                return true;
            }
            i += 1;
        }
    }
    false
}

/// Splits the brace group opened at `pat[open]` into top-level
/// comma-separated alternatives, respecting nested braces and `\`-escapes.
/// Returns `None` if no matching `}` closes the group.
fn parse_group(pat: &[char], open: usize) -> Option<(Vec<Vec<char>>, usize)> {
    let mut depth: u32 = 1;
    let mut i = open + 1;
    let mut alt_start = i;
    let mut alts = Vec::new();
    while i < pat.len() {
        match pat[i] {
            '\\' if i + 1 < pat.len() => {
                i += 2;
                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    alts.push(pat[alt_start..i].to_vec());
                    return Some((alts, i + 1));
                }
            }
            ',' if depth == 1 => {
                alts.push(pat[alt_start..i].to_vec());
                alt_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn patmatch(pattern: &str, path: &str) -> bool {
        pattern_match(pattern, path)
    }

    #[test]
    fn star_matches_within_one_segment() {
        assert!(patmatch("*", "file.c"));
        assert!(patmatch("*.{c,h}", "file.c"));
        assert!(patmatch("*.{foo}", "file.foo"));
    }

    #[test]
    fn nested_brace_alternatives_concatenate() {
        assert!(patmatch("*.{foo{bar,baz}}", "file.foobaz"));
        assert!(!patmatch("*.{foo{bar,baz}}", "file.foo"));
    }

    #[test]
    fn double_star_crosses_path_separators() {
        assert!(patmatch("a/**/b/c/*.[ch]", "a/zzz/yyy/foo/b/c/file.h"));
        assert!(!patmatch("a/*/b/c/*.[ch]", "a/zzz/yyy/foo/b/c/file.h"));
    }

    #[test]
    fn unmatched_brace_is_literal() {
        assert!(patmatch("}*.{x,y}", "}foo.y"));
        assert!(!patmatch("}*.{x,y}", "foo.y"));
        assert!(patmatch("{}*.{x,y}", "foo.y"));
    }

    #[test]
    fn character_classes() {
        assert!(patmatch("*.[xyz]", "foo.z"));
        assert!(!patmatch("*.[xyz", "foo.z"));
        assert!(patmatch("*.[xyz", "foo.[xyz"));
        assert!(patmatch("*.[!xyz]", "foo.a"));
        assert!(!patmatch("*.[!xyz]", "foo.z"));
        assert!(patmatch("*.[", "foo.["));
        assert!(patmatch("*.[a", "foo.[a"));
        assert!(patmatch("*.[abc]def", "foo.bdef"));
    }

    #[test]
    fn empty_alternatives_in_a_group() {
        assert!(patmatch("x{{foo,},}", "x"));
        assert!(patmatch("x{{foo,},}", "xfoo"));
        assert!(patmatch("file.{,,x,,y,,}", "file.x"));
        assert!(patmatch("file.{,,x,,y,,}", "file."));
        assert!(!patmatch("file.{,,x,,y,,}", "file.z"));
    }

    #[test]
    fn commas_outside_braces_are_literal() {
        assert!(patmatch("*.x,y,z", "file.x,y,z"));
        assert!(patmatch("*.{x,y,z}", "file.y"));
        assert!(!patmatch("*.{x,y,z}", "file.x,y,z"));
        assert!(!patmatch("*.{x,y,z}", "file.{x,y,z}"));
    }

    #[test]
    fn deeply_nested_groups() {
        assert!(patmatch("file.{{{a,b,{c,,d}}}}", "file.d"));
        assert!(patmatch("file.{{{a,b,{c,,d}}}}", "file."));
        assert!(!patmatch("file.{{{a,b,{c,d}}}}", "file."));
        assert!(patmatch("file.{c[vl]d,inc}", "file.cvd"));
        assert!(patmatch("file.{c[vl]d,inc}", "file.cld"));
        assert!(patmatch("file.{c[vl]d,inc}", "file.inc"));
        assert!(!patmatch("file.{c[vl]d,inc}", "file.cd"));
    }

    #[test]
    fn question_mark_does_not_cross_a_separator() {
        assert!(patmatch("a?b.c", "a_b.c"));
        assert!(!patmatch("a?b.c", "a/b.c"));
    }

    #[test]
    fn backslash_escapes_suppress_wildcard_meaning() {
        assert!(patmatch("a\\[.abc", "a[.abc"));
        assert!(patmatch("a\\{.abc", "a{.abc"));
        assert!(patmatch("a\\*.abc", "a*.abc"));
        assert!(patmatch("a\\?.abc", "a?.abc"));
        assert!(!patmatch("a\\*.abc", "az.abc"));
        assert!(!patmatch("a\\?.abc", "az.abc"));
        assert!(patmatch("*.xyz\\", "file.xyz\\"));
        assert!(!patmatch("*.xyz\\", "file.xyz"));
    }

    #[test]
    fn unbalanced_braces_fall_back_to_literal() {
        assert!(patmatch("{{{a}}}", "a"));
        assert!(!patmatch("{{{a}}", "a"));
    }

    #[test]
    fn resolve_reads_matching_properties_from_an_editorconfig_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut ec = fs::File::create(dir.path().join(".editorconfig")).unwrap();
        writeln!(
            ec,
            "root = true\n\n[*.rs]\nindent_style = space\nindent_size = 4\ntab_width = 8\nmax_line_length = 100\n"
        )
        .unwrap();
        let file = dir.path().join("main.rs");
        fs::write(&file, "").unwrap();

        let opts = resolve_for_path(&file);
        assert_eq!(opts.indent_style, IndentStyle::Space);
        assert_eq!(opts.indent_size, Some(4));
        assert_eq!(opts.tab_width, Some(8));
        assert_eq!(opts.max_line_length, Some(100));
    }

    #[test]
    fn resolve_ignores_sections_that_do_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut ec = fs::File::create(dir.path().join(".editorconfig")).unwrap();
        writeln!(ec, "root = true\n\n[*.py]\nindent_style = tab\n").unwrap();
        let file = dir.path().join("main.rs");
        fs::write(&file, "").unwrap();

        let opts = resolve_for_path(&file);
        assert_eq!(opts.indent_style, IndentStyle::Unspecified);
    }

    #[test]
    fn resolve_stops_ascending_at_a_root_file() {
        let outer = tempfile::tempdir().unwrap();
        let mut outer_ec = fs::File::create(outer.path().join(".editorconfig")).unwrap();
        writeln!(outer_ec, "[*]\nmax_line_length = 9999\n").unwrap();

        let inner = outer.path().join("project");
        fs::create_dir(&inner).unwrap();
        let mut inner_ec = fs::File::create(inner.join(".editorconfig")).unwrap();
        writeln!(inner_ec, "root = true\n\n[*]\nindent_style = tab\n").unwrap();

        let file = inner.join("main.rs");
        fs::write(&file, "").unwrap();

        let opts = resolve_for_path(&file);
        assert_eq!(opts.indent_style, IndentStyle::Tab);
        assert_eq!(opts.max_line_length, None);
    }
}
