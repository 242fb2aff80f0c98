/// Keyboard shortcut model: a virtual key code plus a modifier mask
mod recorder;

pub use recorder::{RecordOutcome, ShortcutRecorder};

use crate::keys;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

bitflags! {
    /// Modifier keys, using the AppKit device-independent bit positions so a raw
    /// `NSEvent.modifierFlags` mask converts without translation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 17;
        const CONTROL = 1 << 18;
        const OPTION = 1 << 19;
        const COMMAND = 1 << 20;
    }
}

impl Modifiers {
    /// Keep only the four modifier bits of a raw platform mask
    pub fn from_raw(mask: u64) -> Self {
        Self::from_bits_truncate((mask & u32::MAX as u64) as u32)
    }

    /// Glyphs in the conventional ⌃⌥⇧⌘ order
    pub fn symbols(&self) -> String {
        let mut result = String::new();
        if self.contains(Self::CONTROL) {
            result.push('⌃');
        }
        if self.contains(Self::OPTION) {
            result.push('⌥');
        }
        if self.contains(Self::SHIFT) {
            result.push('⇧');
        }
        if self.contains(Self::COMMAND) {
            result.push('⌘');
        }
        result
    }
}

/// A key code plus modifier mask recognized as the capture trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut {
    pub key_code: u16,
    pub modifiers: Modifiers,
}

impl Default for Shortcut {
    /// ⇧⌘C
    fn default() -> Self {
        Self {
            key_code: keys::KEY_C,
            modifiers: Modifiers::COMMAND | Modifiers::SHIFT,
        }
    }
}

impl Shortcut {
    pub fn new(key_code: u16, modifiers: Modifiers) -> Self {
        Self { key_code, modifiers }
    }

    /// True when no shortcut has been recorded yet
    pub fn is_unset(&self) -> bool {
        self.key_code == 0 && self.modifiers.is_empty()
    }

    /// Check a key event against this shortcut. Extra modifiers held on top of
    /// the configured ones still match.
    pub fn matches(&self, key_code: u16, modifiers: Modifiers) -> bool {
        key_code == self.key_code && modifiers.contains(self.modifiers)
    }

    /// Text shown in menus and the recorder window
    pub fn display(&self) -> String {
        if self.is_unset() {
            return "Click to record".to_string();
        }
        format!("{}{}", self.modifiers.symbols(), keys::label(self.key_code))
    }

    /// Parse a textual spec such as `cmd+shift+c`
    pub fn parse(spec: &str) -> Result<Self, ShortcutParseError> {
        let parts: Vec<String> = spec
            .split('+')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        let (key_part, modifier_parts) = parts.split_last().ok_or(ShortcutParseError::Empty)?;

        let mut modifiers = Modifiers::empty();
        for part in modifier_parts {
            modifiers |= match part.as_str() {
                "cmd" | "command" | "meta" | "super" | "⌘" => Modifiers::COMMAND,
                "shift" | "⇧" => Modifiers::SHIFT,
                "ctrl" | "control" | "⌃" => Modifiers::CONTROL,
                "opt" | "option" | "alt" | "⌥" => Modifiers::OPTION,
                other => return Err(ShortcutParseError::UnknownModifier(other.to_string())),
            };
        }

        let key = keys::by_token(key_part)
            .ok_or_else(|| ShortcutParseError::UnknownKey(key_part.clone()))?;

        if modifiers.is_empty() {
            return Err(ShortcutParseError::MissingModifier);
        }

        Ok(Self::new(key.code, modifiers))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut is empty")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("shortcut must include at least one modifier key")]
    MissingModifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cmd_shift_c() {
        let shortcut = Shortcut::default();
        assert_eq!(shortcut.key_code, keys::KEY_C);
        assert_eq!(shortcut.display(), "⇧⌘C");
    }

    #[test]
    fn test_display_order() {
        let all = Modifiers::all();
        assert_eq!(Shortcut::new(keys::KEY_L, all).display(), "⌃⌥⇧⌘L");
        assert_eq!(Shortcut::new(0, Modifiers::empty()).display(), "Click to record");
        assert_eq!(Shortcut::new(0x5A, Modifiers::CONTROL).display(), "⌃Key(90)");
    }

    #[test]
    fn test_matches_with_extra_modifiers() {
        let shortcut = Shortcut::default();
        assert!(shortcut.matches(keys::KEY_C, Modifiers::COMMAND | Modifiers::SHIFT));
        assert!(shortcut.matches(keys::KEY_C, Modifiers::all()));
        assert!(!shortcut.matches(keys::KEY_C, Modifiers::COMMAND));
        assert!(!shortcut.matches(keys::KEY_L, Modifiers::COMMAND | Modifiers::SHIFT));
    }

    #[test]
    fn test_from_raw_drops_unrelated_bits() {
        // caps lock (1 << 16) and function (1 << 23) are not modifiers we track
        let raw = (1u64 << 16) | (1 << 20) | (1 << 23);
        assert_eq!(Modifiers::from_raw(raw), Modifiers::COMMAND);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Shortcut::parse("cmd+shift+c"), Ok(Shortcut::default()));
        assert_eq!(
            "Ctrl + Alt + Space".parse::<Shortcut>(),
            Ok(Shortcut::new(keys::KEY_SPACE, Modifiers::CONTROL | Modifiers::OPTION))
        );
        assert_eq!(Shortcut::parse(""), Err(ShortcutParseError::Empty));
        assert_eq!(Shortcut::parse("c"), Err(ShortcutParseError::MissingModifier));
        assert_eq!(
            Shortcut::parse("hyper+c"),
            Err(ShortcutParseError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            Shortcut::parse("cmd+pause"),
            Err(ShortcutParseError::UnknownKey("pause".into()))
        );
    }
}
