/// Keystroke fallback sequences for browsers whose scripting call failed
use crate::constants::FALLBACK_KEY_PAUSE;
use crate::keys;
use crate::shortcut::Modifiers;
use std::time::Duration;

/// One step of a fallback sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    /// Post a key down/up pair with the given modifiers held
    Key { key_code: u16, modifiers: Modifiers },
    /// Wait before the next step
    Pause(Duration),
}

/// An ordered keystroke sequence plus whether the simulating flag should
/// outlive it by the grace period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    steps: Vec<FallbackStep>,
    hold_guard: bool,
}

fn press(key_code: u16, modifiers: Modifiers) -> FallbackStep {
    FallbackStep::Key { key_code, modifiers }
}

impl Fallback {
    /// ⌘L, ⌘A, ⌘C with short pauses so the address bar can take focus
    pub fn address_bar() -> Self {
        Self {
            steps: vec![
                press(keys::KEY_L, Modifiers::COMMAND),
                FallbackStep::Pause(FALLBACK_KEY_PAUSE),
                press(keys::KEY_A, Modifiers::COMMAND),
                FallbackStep::Pause(FALLBACK_KEY_PAUSE),
                press(keys::KEY_C, Modifiers::COMMAND),
            ],
            hold_guard: true,
        }
    }

    /// ⌘L, ⌘C twice, then Escape twice to leave the address bar
    pub fn firefox() -> Self {
        Self {
            steps: vec![
                press(keys::KEY_L, Modifiers::COMMAND),
                press(keys::KEY_C, Modifiers::COMMAND),
                press(keys::KEY_C, Modifiers::COMMAND),
                press(keys::KEY_ESCAPE, Modifiers::empty()),
                press(keys::KEY_ESCAPE, Modifiers::empty()),
            ],
            hold_guard: false,
        }
    }

    /// The browser's own copy-URL shortcut (⇧⌘C)
    pub fn copy_url_shortcut() -> Self {
        Self {
            steps: vec![press(keys::KEY_C, Modifiers::COMMAND | Modifiers::SHIFT)],
            hold_guard: true,
        }
    }

    pub fn steps(&self) -> &[FallbackStep] {
        &self.steps
    }

    /// Whether hotkey handling stays suppressed for the grace period afterwards
    pub fn holds_guard(&self) -> bool {
        self.hold_guard
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        self.steps
            .iter()
            .filter_map(|step| match step {
                FallbackStep::Key { key_code, modifiers } => {
                    Some(format!("{}{}", modifiers.symbols(), keys::label(*key_code)))
                }
                FallbackStep::Pause(_) => None,
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_bar_sequence() {
        let fallback = Fallback::address_bar();
        assert_eq!(fallback.steps().len(), 5);
        assert_eq!(fallback.describe(), "⌘L, ⌘A, ⌘C");
        assert!(fallback.holds_guard());
        assert_eq!(fallback.steps()[1], FallbackStep::Pause(Duration::from_millis(150)));
    }

    #[test]
    fn test_firefox_sequence() {
        let fallback = Fallback::firefox();
        assert_eq!(fallback.describe(), "⌘L, ⌘C, ⌘C, ⎋, ⎋");
        assert!(!fallback.holds_guard());
    }

    #[test]
    fn test_copy_url_shortcut() {
        assert_eq!(Fallback::copy_url_shortcut().describe(), "⇧⌘C");
    }
}
