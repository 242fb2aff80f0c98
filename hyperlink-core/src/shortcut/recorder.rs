/// Shortcut recording: capture one key combination, reverting on Escape
use super::{Modifiers, Shortcut};
use crate::keys;
use log::{debug, info, warn};

/// Result of feeding a key event to the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Not recording; the event belongs to someone else
    Ignored,
    /// A bare modifier key went down; still waiting for the main key
    Pending,
    /// A new shortcut was captured and should be persisted
    Recorded(Shortcut),
    /// Escape pressed; carries the shortcut to restore
    Cancelled(Shortcut),
    /// Combination had no modifier; carries the shortcut to restore
    Rejected(Shortcut),
}

/// Single-flag recorder that remembers the shortcut in effect when recording began
#[derive(Debug, Default)]
pub struct ShortcutRecorder {
    previous: Option<Shortcut>,
}

impl ShortcutRecorder {
    pub fn new() -> Self {
        Self { previous: None }
    }

    pub fn is_recording(&self) -> bool {
        self.previous.is_some()
    }

    /// Begin recording, remembering `current` for revert
    pub fn start(&mut self, current: Shortcut) {
        info!("Recording shortcut (current: {})", current);
        self.previous = Some(current);
    }

    /// Stop recording and return the shortcut to restore, if recording
    pub fn cancel(&mut self) -> Option<Shortcut> {
        self.previous.take()
    }

    /// Feed one raw key-down event
    pub fn handle_key(&mut self, key_code: u16, modifiers: Modifiers) -> RecordOutcome {
        let Some(previous) = self.previous else {
            return RecordOutcome::Ignored;
        };

        if keys::is_modifier_key(key_code) {
            debug!("Modifier key {} down while recording", key_code);
            return RecordOutcome::Pending;
        }

        self.previous = None;

        if key_code == keys::KEY_ESCAPE {
            info!("Recording canceled, keeping {}", previous);
            return RecordOutcome::Cancelled(previous);
        }

        if modifiers.is_empty() {
            warn!("Invalid shortcut: must include at least one modifier key");
            return RecordOutcome::Rejected(previous);
        }

        let shortcut = Shortcut::new(key_code, modifiers);
        info!("Recorded shortcut: {} (key code {}, modifiers {:#x})", shortcut, key_code, modifiers.bits());
        RecordOutcome::Recorded(shortcut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> ShortcutRecorder {
        let mut recorder = ShortcutRecorder::new();
        recorder.start(Shortcut::default());
        recorder
    }

    #[test]
    fn test_ignored_when_idle() {
        let mut recorder = ShortcutRecorder::new();
        assert_eq!(recorder.handle_key(keys::KEY_L, Modifiers::COMMAND), RecordOutcome::Ignored);
    }

    #[test]
    fn test_records_combination() {
        let mut recorder = recording();
        let outcome = recorder.handle_key(keys::KEY_L, Modifiers::COMMAND | Modifiers::OPTION);
        assert_eq!(
            outcome,
            RecordOutcome::Recorded(Shortcut::new(keys::KEY_L, Modifiers::COMMAND | Modifiers::OPTION))
        );
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_modifier_only_keeps_recording() {
        let mut recorder = recording();
        assert_eq!(recorder.handle_key(keys::KEY_COMMAND, Modifiers::COMMAND), RecordOutcome::Pending);
        assert!(recorder.is_recording());
    }

    #[test]
    fn test_escape_reverts() {
        let mut recorder = recording();
        assert_eq!(
            recorder.handle_key(keys::KEY_ESCAPE, Modifiers::COMMAND),
            RecordOutcome::Cancelled(Shortcut::default())
        );
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_missing_modifier_reverts() {
        let mut recorder = recording();
        assert_eq!(
            recorder.handle_key(keys::KEY_L, Modifiers::empty()),
            RecordOutcome::Rejected(Shortcut::default())
        );
        assert!(!recorder.is_recording());
        // recording is over, a corrected combination is not picked up
        assert_eq!(
            recorder.handle_key(keys::KEY_L, Modifiers::COMMAND),
            RecordOutcome::Ignored
        );
    }

    #[test]
    fn test_cancel() {
        let mut recorder = recording();
        assert_eq!(recorder.cancel(), Some(Shortcut::default()));
        assert_eq!(recorder.cancel(), None);
    }
}
