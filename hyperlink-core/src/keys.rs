/// macOS virtual key codes (Carbon `kVK_*`) and their display names
///
/// Key codes are layout-independent positions on an ANSI keyboard, which is
/// what both the hotkey registration and the CoreGraphics event source expect.

pub const KEY_A: u16 = 0x00;
pub const KEY_C: u16 = 0x08;
pub const KEY_L: u16 = 0x25;
pub const KEY_RETURN: u16 = 0x24;
pub const KEY_TAB: u16 = 0x30;
pub const KEY_SPACE: u16 = 0x31;
pub const KEY_DELETE: u16 = 0x33;
pub const KEY_ESCAPE: u16 = 0x35;
pub const KEY_FORWARD_DELETE: u16 = 0x75;

pub const KEY_RIGHT_COMMAND: u16 = 0x36;
pub const KEY_COMMAND: u16 = 0x37;
pub const KEY_SHIFT: u16 = 0x38;
pub const KEY_OPTION: u16 = 0x3A;
pub const KEY_CONTROL: u16 = 0x3B;
pub const KEY_RIGHT_SHIFT: u16 = 0x3C;
pub const KEY_RIGHT_OPTION: u16 = 0x3D;
pub const KEY_RIGHT_CONTROL: u16 = 0x3E;

/// A named key: virtual key code, glyph shown in the UI, token used in text specs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInfo {
    pub code: u16,
    pub label: &'static str,
    pub token: &'static str,
}

const fn key(code: u16, label: &'static str, token: &'static str) -> KeyInfo {
    KeyInfo { code, label, token }
}

static KEYS: &[KeyInfo] = &[
    // Letters
    key(0x00, "A", "a"),
    key(0x0B, "B", "b"),
    key(0x08, "C", "c"),
    key(0x02, "D", "d"),
    key(0x0E, "E", "e"),
    key(0x03, "F", "f"),
    key(0x05, "G", "g"),
    key(0x04, "H", "h"),
    key(0x22, "I", "i"),
    key(0x26, "J", "j"),
    key(0x28, "K", "k"),
    key(0x25, "L", "l"),
    key(0x2E, "M", "m"),
    key(0x2D, "N", "n"),
    key(0x1F, "O", "o"),
    key(0x23, "P", "p"),
    key(0x0C, "Q", "q"),
    key(0x0F, "R", "r"),
    key(0x01, "S", "s"),
    key(0x11, "T", "t"),
    key(0x20, "U", "u"),
    key(0x09, "V", "v"),
    key(0x0D, "W", "w"),
    key(0x07, "X", "x"),
    key(0x10, "Y", "y"),
    key(0x06, "Z", "z"),
    // Digits
    key(0x1D, "0", "0"),
    key(0x12, "1", "1"),
    key(0x13, "2", "2"),
    key(0x14, "3", "3"),
    key(0x15, "4", "4"),
    key(0x17, "5", "5"),
    key(0x16, "6", "6"),
    key(0x1A, "7", "7"),
    key(0x1C, "8", "8"),
    key(0x19, "9", "9"),
    // Whitespace and editing
    key(KEY_SPACE, "Space", "space"),
    key(KEY_RETURN, "↩", "return"),
    key(KEY_TAB, "⇥", "tab"),
    key(KEY_ESCAPE, "⎋", "escape"),
    key(KEY_DELETE, "⌫", "delete"),
    key(KEY_FORWARD_DELETE, "⌦", "forwarddelete"),
    // Arrows
    key(0x7B, "←", "left"),
    key(0x7C, "→", "right"),
    key(0x7E, "↑", "up"),
    key(0x7D, "↓", "down"),
    // Function keys
    key(0x7A, "F1", "f1"),
    key(0x78, "F2", "f2"),
    key(0x63, "F3", "f3"),
    key(0x76, "F4", "f4"),
    key(0x60, "F5", "f5"),
    key(0x61, "F6", "f6"),
    key(0x62, "F7", "f7"),
    key(0x64, "F8", "f8"),
    key(0x65, "F9", "f9"),
    key(0x6D, "F10", "f10"),
    key(0x67, "F11", "f11"),
    key(0x6F, "F12", "f12"),
];

/// Every named key, in display order
pub fn all() -> &'static [KeyInfo] {
    KEYS
}

/// Look up a key by virtual key code
pub fn by_code(code: u16) -> Option<&'static KeyInfo> {
    KEYS.iter().find(|k| k.code == code)
}

/// Look up a key by its text token (case-insensitive, a few aliases accepted)
pub fn by_token(token: &str) -> Option<&'static KeyInfo> {
    let token = token.trim().to_ascii_lowercase();
    let token = match token.as_str() {
        "enter" => "return",
        "esc" => "escape",
        "backspace" => "delete",
        "del" => "forwarddelete",
        other => other,
    };
    KEYS.iter().find(|k| k.token == token)
}

/// Display label for a key code, `Key(<code>)` for unnamed keys
pub fn label(code: u16) -> String {
    by_code(code)
        .map(|k| k.label.to_string())
        .unwrap_or_else(|| format!("Key({})", code))
}

/// True for the eight modifier keys, which can never be a shortcut's main key
pub fn is_modifier_key(code: u16) -> bool {
    matches!(
        code,
        KEY_COMMAND
            | KEY_RIGHT_COMMAND
            | KEY_OPTION
            | KEY_RIGHT_OPTION
            | KEY_CONTROL
            | KEY_RIGHT_CONTROL
            | KEY_SHIFT
            | KEY_RIGHT_SHIFT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label(KEY_C), "C");
        assert_eq!(label(0x1D), "0");
        assert_eq!(label(KEY_ESCAPE), "⎋");
        assert_eq!(label(0x6F), "F12");
        assert_eq!(label(0x5A), "Key(90)");
    }

    #[test]
    fn test_tokens_and_aliases() {
        assert_eq!(by_token("C").map(|k| k.code), Some(KEY_C));
        assert_eq!(by_token("esc").map(|k| k.code), Some(KEY_ESCAPE));
        assert_eq!(by_token("Enter").map(|k| k.code), Some(KEY_RETURN));
        assert!(by_token("hyper").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in KEYS.iter().enumerate() {
            for b in &KEYS[i + 1..] {
                assert_ne!(a.code, b.code, "{} and {} share a code", a.label, b.label);
            }
        }
    }

    #[test]
    fn test_modifier_keys() {
        assert!(is_modifier_key(KEY_COMMAND));
        assert!(is_modifier_key(KEY_RIGHT_SHIFT));
        assert!(!is_modifier_key(KEY_C));
        assert!(!is_modifier_key(KEY_ESCAPE));
    }
}
