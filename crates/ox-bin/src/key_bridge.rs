//! Bridges the async input task's event model (`core_events::KeyToken`) onto
//! the tagged `core_keymap::KeyCode` the dispatcher's binding tables key off
//! of. The two crates model keys independently -- `core_events` carries a
//! richer NGI token (named keys, chords, repeat/timestamp metadata) suited to
//! a decoder sitting close to the terminal, while `core_keymap` wants a
//! small `Copy` value cheap to use as a `HashMap` key -- so nothing upstream
//! translates between them; this is that translation.

use core_events::{KeyToken, ModMask, NamedKey};
use core_keymap::{KeyCode, MOD_CTRL, MOD_META, MOD_SHIFT, SymbolicKey};

fn named_key_to_symbolic(named: NamedKey) -> Option<SymbolicKey> {
    Some(match named {
        NamedKey::Enter => SymbolicKey::Enter,
        NamedKey::Esc => SymbolicKey::Escape,
        NamedKey::Backspace => SymbolicKey::Backspace,
        NamedKey::Tab => SymbolicKey::Tab,
        NamedKey::Up => SymbolicKey::Up,
        NamedKey::Down => SymbolicKey::Down,
        NamedKey::Left => SymbolicKey::Left,
        NamedKey::Right => SymbolicKey::Right,
        NamedKey::Home => SymbolicKey::Home,
        NamedKey::End => SymbolicKey::End,
        NamedKey::PageUp => SymbolicKey::PageUp,
        NamedKey::PageDown => SymbolicKey::PageDown,
        NamedKey::Insert => SymbolicKey::Insert,
        NamedKey::Delete => SymbolicKey::Delete,
        NamedKey::F(1) => SymbolicKey::F1,
        NamedKey::F(2) => SymbolicKey::F2,
        NamedKey::F(3) => SymbolicKey::F3,
        NamedKey::F(4) => SymbolicKey::F4,
        NamedKey::F(5) => SymbolicKey::F5,
        NamedKey::F(6) => SymbolicKey::F6,
        NamedKey::F(7) => SymbolicKey::F7,
        NamedKey::F(8) => SymbolicKey::F8,
        NamedKey::F(9) => SymbolicKey::F9,
        NamedKey::F(10) => SymbolicKey::F10,
        NamedKey::F(11) => SymbolicKey::F11,
        NamedKey::F(12) => SymbolicKey::F12,
        NamedKey::F(_) => return None,
    })
}

fn mod_mask_to_bits(mods: ModMask) -> u32 {
    let mut out = 0u32;
    if mods.contains(ModMask::CTRL) {
        out |= MOD_CTRL;
    }
    // core_keymap has no separate Alt bit; the original editor's keymap
    // treats Alt/Meta chords the same way, so both land on MOD_META.
    if mods.contains(ModMask::ALT) || mods.contains(ModMask::META) {
        out |= MOD_META;
    }
    if mods.contains(ModMask::SHIFT) {
        out |= MOD_SHIFT;
    }
    out
}

/// Translate one decoded key token into the `KeyCode` the binding tables
/// understand, if it maps to something bindable/insertable at all (a bare
/// `NamedKey::F(13..)` has no symbolic slot and is dropped).
pub fn translate_token(token: &KeyToken) -> Option<KeyCode> {
    match token {
        KeyToken::Char(c) => Some(KeyCode::from_char(*c, 0)),
        KeyToken::Named(named) => named_key_to_symbolic(*named).map(|sym| KeyCode::from_symbolic(sym, 0)),
        KeyToken::Chord { base, mods } => {
            let bits = mod_mask_to_bits(*mods);
            match base.as_ref() {
                KeyToken::Char(c) => Some(KeyCode::from_char(*c, bits)),
                KeyToken::Named(named) => {
                    named_key_to_symbolic(*named).map(|sym| KeyCode::from_symbolic(sym, bits))
                }
                // Chords nested inside chords don't occur in practice; treat
                // as unrepresentable rather than guessing at a merge policy.
                KeyToken::Chord { .. } => None,
            }
        }
    }
}
