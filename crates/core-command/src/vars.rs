//! Built-in `$NAME` variable table for command-line expansion.
//!
//! Resolution order: the fixed built-in table below, then the process
//! environment. Unknown names expand to empty.

/// Context a variable expansion is evaluated against. Fields are borrowed
/// from the active view/buffer at expansion time.
#[derive(Debug, Default, Clone)]
pub struct VarContext {
    pub file: Option<String>,
    pub filetype: Option<String>,
    pub lineno: Option<usize>,
    pub colno: Option<usize>,
    pub word: Option<String>,
    pub selection: Option<String>,
    pub config_dir: Option<String>,
    pub pkg_data_dir: Option<String>,
    pub editor_version: &'static str,
}

/// Resolve `name` against the built-in table, falling back to the process
/// environment, then to an empty string.
pub fn expand(name: &str, ctx: &VarContext) -> String {
    match name {
        "FILE" => ctx.file.clone().unwrap_or_default(),
        "FILEDIR" => ctx
            .file
            .as_deref()
            .and_then(|f| std::path::Path::new(f).parent())
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        "FILETYPE" => ctx.filetype.clone().unwrap_or_default(),
        "LINENO" => ctx.lineno.map(|n| (n + 1).to_string()).unwrap_or_default(),
        "COLNO" => ctx.colno.map(|n| (n + 1).to_string()).unwrap_or_default(),
        "WORD" => ctx.word.clone().unwrap_or_default(),
        "SELECTION" => ctx.selection.clone().unwrap_or_default(),
        "CONFIGDIR" => ctx.config_dir.clone().unwrap_or_default(),
        "PKGDATADIR" => ctx.pkg_data_dir.clone().unwrap_or_default(),
        "EDITOR_VERSION" => ctx.editor_version.to_string(),
        _ => std::env::var(name).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_builtin() {
        let ctx = VarContext {
            file: Some("src/main.rs".into()),
            ..Default::default()
        };
        assert_eq!(expand("FILE", &ctx), "src/main.rs");
        assert_eq!(expand("FILEDIR", &ctx), "src");
    }

    #[test]
    fn unknown_name_falls_through_to_empty() {
        let ctx = VarContext::default();
        assert_eq!(expand("TOTALLY_UNKNOWN_VAR_XYZ", &ctx), "");
    }

    #[test]
    fn lineno_colno_are_one_indexed() {
        let ctx = VarContext {
            lineno: Some(0),
            colno: Some(4),
            ..Default::default()
        };
        assert_eq!(expand("LINENO", &ctx), "1");
        assert_eq!(expand("COLNO", &ctx), "5");
    }
}
