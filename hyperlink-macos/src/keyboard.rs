/// Synthesized key presses via CoreGraphics events.

use anyhow::{anyhow, Result};
use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use hyperlink_core::{KeySynth, Modifiers};

/// Posts key down/up pairs at the HID event tap.
///
/// `Modifiers` uses the same bit positions as `CGEventFlags`, so the mask is
/// passed through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct CgKeySynth;

impl KeySynth for CgKeySynth {
    fn press(&self, key_code: u16, modifiers: Modifiers) -> Result<()> {
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
            .map_err(|_| anyhow!("Failed to create CGEventSource"))?;
        let flags = CGEventFlags::from_bits_truncate(modifiers.bits() as u64);

        let key_down = CGEvent::new_keyboard_event(source.clone(), key_code, true)
            .map_err(|_| anyhow!("Failed to create key down event for {}", key_code))?;
        key_down.set_flags(flags);

        let key_up = CGEvent::new_keyboard_event(source, key_code, false)
            .map_err(|_| anyhow!("Failed to create key up event for {}", key_code))?;
        key_up.set_flags(flags);

        key_down.post(CGEventTapLocation::HID);
        key_up.post(CGEventTapLocation::HID);
        Ok(())
    }
}
