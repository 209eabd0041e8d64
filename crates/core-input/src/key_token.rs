use core_events::{KeyToken, ModMask, NamedKey};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Result of translating a terminal key event into NGI token components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPressParts {
    pub token: KeyToken,
    pub mods: ModMask,
    pub repeat: bool,
}

/// Map a crossterm key event into a NGI token + modifiers.
///
/// Returns `None` for key codes we do not yet support (e.g. media keys).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyPressParts> {
    let token = map_key_token(&event.code)?;
    let mods = map_mod_mask(event.modifiers);
    let repeat = matches!(event.kind, CKeyEventKind::Repeat);
    Some(KeyPressParts {
        token,
        mods,
        repeat,
    })
}

/// Convert a crossterm key code into a NGI key token.
pub(crate) fn map_key_token(code: &CKeyCode) -> Option<KeyToken> {
    let token = match code {
        CKeyCode::Char(c) => KeyToken::Char(*c),
        CKeyCode::Enter => KeyToken::Named(NamedKey::Enter),
        CKeyCode::Esc => KeyToken::Named(NamedKey::Esc),
        CKeyCode::Backspace => KeyToken::Named(NamedKey::Backspace),
        CKeyCode::Tab | CKeyCode::BackTab => KeyToken::Named(NamedKey::Tab),
        CKeyCode::Up => KeyToken::Named(NamedKey::Up),
        CKeyCode::Down => KeyToken::Named(NamedKey::Down),
        CKeyCode::Left => KeyToken::Named(NamedKey::Left),
        CKeyCode::Right => KeyToken::Named(NamedKey::Right),
        CKeyCode::Home => KeyToken::Named(NamedKey::Home),
        CKeyCode::End => KeyToken::Named(NamedKey::End),
        CKeyCode::PageUp => KeyToken::Named(NamedKey::PageUp),
        CKeyCode::PageDown => KeyToken::Named(NamedKey::PageDown),
        CKeyCode::Insert => KeyToken::Named(NamedKey::Insert),
        CKeyCode::Delete => KeyToken::Named(NamedKey::Delete),
        CKeyCode::F(n) => {
            let ordinal = u16::from(*n);
            let clamped = if ordinal > u16::from(u8::MAX) {
                u8::MAX
            } else {
                ordinal as u8
            };
            KeyToken::Named(NamedKey::F(clamped))
        }
        CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(token)
}

/// Convert a decoded token + modifier mask into the editor-level [`core_keymap::KeyCode`]
/// the dispatcher's key bindings are keyed on.
pub fn token_to_keycode(token: &KeyToken, mods: ModMask) -> core_keymap::KeyCode {
    let (base, extra) = match token {
        KeyToken::Chord { base, mods: chord_mods } => (base.as_ref(), *chord_mods),
        other => (other, ModMask::empty()),
    };
    let mut bits = 0u32;
    let all_mods = mods | extra;
    if all_mods.contains(ModMask::CTRL) {
        bits |= core_keymap::MOD_CTRL;
    }
    if all_mods.contains(ModMask::ALT) || all_mods.contains(ModMask::META) {
        bits |= core_keymap::MOD_META;
    }
    if all_mods.contains(ModMask::SHIFT) {
        bits |= core_keymap::MOD_SHIFT;
    }
    match base {
        KeyToken::Char(c) => core_keymap::KeyCode::from_char(*c, bits),
        KeyToken::Named(named) => core_keymap::KeyCode::from_symbolic(map_named_key(named), bits),
        KeyToken::Chord { .. } => unreachable!("chord base already unwrapped"),
    }
}

fn map_named_key(named: &NamedKey) -> core_keymap::SymbolicKey {
    use core_keymap::SymbolicKey as Sym;
    match named {
        NamedKey::Enter => Sym::Enter,
        NamedKey::Esc => Sym::Escape,
        NamedKey::Backspace => Sym::Backspace,
        NamedKey::Tab => Sym::Tab,
        NamedKey::F(n) => match n {
            1 => Sym::F1,
            2 => Sym::F2,
            3 => Sym::F3,
            4 => Sym::F4,
            5 => Sym::F5,
            6 => Sym::F6,
            7 => Sym::F7,
            8 => Sym::F8,
            9 => Sym::F9,
            10 => Sym::F10,
            11 => Sym::F11,
            _ => Sym::F12,
        },
        NamedKey::Up => Sym::Up,
        NamedKey::Down => Sym::Down,
        NamedKey::Left => Sym::Left,
        NamedKey::Right => Sym::Right,
        NamedKey::Home => Sym::Home,
        NamedKey::End => Sym::End,
        NamedKey::PageUp => Sym::PageUp,
        NamedKey::PageDown => Sym::PageDown,
        NamedKey::Insert => Sym::Insert,
        NamedKey::Delete => Sym::Delete,
    }
}

/// Convert crossterm modifier flags into the NGI `ModMask` bits.
pub(crate) fn map_mod_mask(mods: CKeyModifiers) -> ModMask {
    let mut out = ModMask::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= ModMask::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= ModMask::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= ModMask::SHIFT;
    }
    if mods.contains(CKeyModifiers::SUPER) {
        out |= ModMask::SUPER;
    }
    if mods.contains(CKeyModifiers::META) {
        out |= ModMask::META;
    }
    out
}
