//! `KeyCode`: a 32-bit tagged value encoding either a Unicode scalar or a
//! symbolic key index, plus modifier flags in the high bits.

use thiserror::Error;

pub const MOD_CTRL: u32 = 1 << 29;
pub const MOD_META: u32 = 1 << 30;
pub const MOD_SHIFT: u32 = 1 << 31;
const MOD_MASK: u32 = MOD_CTRL | MOD_META | MOD_SHIFT;
const SYMBOLIC_TAG: u32 = 1 << 28;
const VALUE_MASK: u32 = (1 << 28) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SymbolicKey {
    Up = 0,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    /// Bracketed-paste marker: not itself typed text, a signal that paste
    /// text follows on the decoder's side channel.
    Paste,
    /// Sentinel meaning "no key" (e.g. a disambiguation timeout with
    /// nothing decoded).
    NoKey,
}

impl SymbolicKey {
    fn from_raw(raw: u32) -> Option<Self> {
        use SymbolicKey::*;
        const TABLE: &[SymbolicKey] = &[
            Up, Down, Left, Right, Home, End, Insert, Delete, PageUp, PageDown, F1, F2, F3, F4,
            F5, F6, F7, F8, F9, F10, F11, F12, Tab, Enter, Escape, Space, Backspace, Paste, NoKey,
        ];
        TABLE.get(raw as usize).copied()
    }

    fn name(self) -> &'static str {
        use SymbolicKey::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
            Home => "home",
            End => "end",
            Insert => "ins",
            Delete => "del",
            PageUp => "pgup",
            PageDown => "pgdown",
            F1 => "F1",
            F2 => "F2",
            F3 => "F3",
            F4 => "F4",
            F5 => "F5",
            F6 => "F6",
            F7 => "F7",
            F8 => "F8",
            F9 => "F9",
            F10 => "F10",
            F11 => "F11",
            F12 => "F12",
            Tab => "tab",
            Enter => "enter",
            Escape => "escape",
            Space => "space",
            Backspace => "backspace",
            Paste => "<paste>",
            NoKey => "<none>",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        use SymbolicKey::*;
        Some(match name {
            "up" => Up,
            "down" => Down,
            "left" => Left,
            "right" => Right,
            "home" => Home,
            "end" => End,
            "ins" => Insert,
            "del" => Delete,
            "pgup" => PageUp,
            "pgdown" => PageDown,
            "F1" => F1,
            "F2" => F2,
            "F3" => F3,
            "F4" => F4,
            "F5" => F5,
            "F6" => F6,
            "F7" => F7,
            "F8" => F8,
            "F9" => F9,
            "F10" => F10,
            "F11" => F11,
            "F12" => F12,
            "tab" => Tab,
            "enter" => Enter,
            "escape" => Escape,
            "space" => Space,
            "backspace" => Backspace,
            _ => return None,
        })
    }
}

/// A 32-bit tagged key value. Low 28 bits hold either a Unicode scalar or a
/// [`SymbolicKey`] index (distinguished by [`SYMBOLIC_TAG`]); the top three
/// bits carry Ctrl/Meta/Shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(u32);

impl KeyCode {
    pub fn from_char(c: char, mods: u32) -> Self {
        Self((c as u32 & VALUE_MASK) | (mods & MOD_MASK))
    }

    pub fn from_symbolic(sym: SymbolicKey, mods: u32) -> Self {
        Self((sym as u32 & VALUE_MASK) | SYMBOLIC_TAG | (mods & MOD_MASK))
    }

    pub fn paste_marker() -> Self {
        Self::from_symbolic(SymbolicKey::Paste, 0)
    }

    pub fn no_key() -> Self {
        Self::from_symbolic(SymbolicKey::NoKey, 0)
    }

    pub fn is_paste_marker(self) -> bool {
        self.symbolic() == Some(SymbolicKey::Paste)
    }

    pub fn modifiers(self) -> u32 {
        self.0 & MOD_MASK
    }

    pub fn has_ctrl(self) -> bool {
        self.0 & MOD_CTRL != 0
    }
    pub fn has_meta(self) -> bool {
        self.0 & MOD_META != 0
    }
    pub fn has_shift(self) -> bool {
        self.0 & MOD_SHIFT != 0
    }

    pub fn scalar(self) -> Option<char> {
        if self.0 & SYMBOLIC_TAG != 0 {
            None
        } else {
            char::from_u32(self.0 & VALUE_MASK)
        }
    }

    pub fn symbolic(self) -> Option<SymbolicKey> {
        if self.0 & SYMBOLIC_TAG == 0 {
            None
        } else {
            SymbolicKey::from_raw(self.0 & VALUE_MASK & !SYMBOLIC_TAG)
        }
    }

    /// True for a scalar key with no modifiers at all — the class that is
    /// illegal as a binding source (it is handled by the printable-insert
    /// fallback instead).
    pub fn is_bare_printable(self) -> bool {
        self.modifiers() == 0 && self.scalar().is_some_and(|c| !c.is_control())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key string")]
    Empty,
    #[error("unknown key name")]
    UnknownName,
    #[error("shift modifier cannot combine with a printable key; write the shifted character directly")]
    ShiftOnPrintable,
    #[error("bare printable characters cannot be bound")]
    BarePrintable,
}

/// Parse `[C-][M-][S-]<name>` where `<name>` is a single character, a `^X`
/// control-char escape, or a symbolic key name.
pub fn parse_key_string(s: &str) -> Result<KeyCode, KeyParseError> {
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }
    let mut mods = 0u32;
    let mut rest = s;
    for (prefix, bit) in [("C-", MOD_CTRL), ("M-", MOD_META), ("S-", MOD_SHIFT)] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            mods |= bit;
            rest = stripped;
        }
    }
    if rest.is_empty() {
        return Err(KeyParseError::Empty);
    }

    if let Some(ctrl_char) = rest.strip_prefix('^') {
        let c = ctrl_char.chars().next().ok_or(KeyParseError::Empty)?;
        if ctrl_char.chars().count() != 1 {
            return Err(KeyParseError::UnknownName);
        }
        let code = KeyCode::from_char(c.to_ascii_uppercase(), mods | MOD_CTRL);
        return Ok(code);
    }

    if let Some(sym) = SymbolicKey::from_name(rest) {
        return Ok(KeyCode::from_symbolic(sym, mods));
    }

    let mut chars = rest.chars();
    let c = chars.next().ok_or(KeyParseError::Empty)?;
    if chars.next().is_some() {
        return Err(KeyParseError::UnknownName);
    }
    if mods & MOD_SHIFT != 0 {
        return Err(KeyParseError::ShiftOnPrintable);
    }
    let code = KeyCode::from_char(c, mods);
    if code.is_bare_printable() {
        return Err(KeyParseError::BarePrintable);
    }
    Ok(code)
}

/// Serialize a [`KeyCode`] back to `[C-][M-][S-]<name>` form, the inverse
/// of [`parse_key_string`] for well-formed (non-bare-printable) codes.
pub fn format_key_string(key: KeyCode) -> String {
    let mut out = String::new();
    if key.has_ctrl() {
        out.push_str("C-");
    }
    if key.has_meta() {
        out.push_str("M-");
    }
    if key.has_shift() {
        out.push_str("S-");
    }
    match key.symbolic() {
        Some(sym) => out.push_str(sym.name()),
        None => {
            if let Some(c) = key.scalar() {
                out.push(c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbolic_with_modifiers() {
        let key = parse_key_string("C-M-up").unwrap();
        assert!(key.has_ctrl());
        assert!(key.has_meta());
        assert_eq!(key.symbolic(), Some(SymbolicKey::Up));
    }

    #[test]
    fn parses_control_caret_form() {
        let key = parse_key_string("^A").unwrap();
        assert!(key.has_ctrl());
        assert_eq!(key.scalar(), Some('A'));
    }

    #[test]
    fn rejects_shift_on_printable() {
        assert_eq!(
            parse_key_string("S-a").unwrap_err(),
            KeyParseError::ShiftOnPrintable
        );
    }

    #[test]
    fn rejects_bare_printable() {
        assert_eq!(parse_key_string("a").unwrap_err(), KeyParseError::BarePrintable);
    }

    #[test]
    fn allows_shift_on_symbolic() {
        let key = parse_key_string("S-tab").unwrap();
        assert!(key.has_shift());
        assert_eq!(key.symbolic(), Some(SymbolicKey::Tab));
    }

    #[test]
    fn ctrl_printable_is_a_legal_binding() {
        let key = parse_key_string("C-a").unwrap();
        assert!(key.has_ctrl());
        assert_eq!(key.scalar(), Some('a'));
    }

    #[test]
    fn round_trips_through_format() {
        let key = parse_key_string("C-S-home").unwrap();
        assert_eq!(format_key_string(key), "C-S-home");
    }

    #[test]
    fn paste_marker_is_distinct_from_no_key() {
        assert_ne!(KeyCode::paste_marker(), KeyCode::no_key());
        assert!(KeyCode::paste_marker().is_paste_marker());
        assert!(!KeyCode::no_key().is_paste_marker());
    }
}
