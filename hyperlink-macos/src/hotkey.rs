use anyhow::Result;
use global_hotkey::{
    hotkey::{Code, HotKey, Modifiers as HotKeyModifiers},
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use hyperlink_core::{Modifiers, Shortcut};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Manages the capture shortcut's global hotkey registration
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
    shortcut: Shortcut,
    active_id: Arc<AtomicU32>,
    registered: bool,
}

impl HotkeyManager {
    /// Register `shortcut` and invoke `callback` on each press.
    ///
    /// Presses are dropped while `suppress` is set, so synthesized keystrokes
    /// that happen to match the shortcut do not re-trigger a capture.
    pub fn new<F>(shortcut: Shortcut, suppress: Arc<AtomicBool>, callback: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        info!("Initializing global hotkey manager");

        let manager = GlobalHotKeyManager::new()
            .map_err(|e| anyhow::anyhow!("Failed to create hotkey manager: {}", e))?;

        let hotkey = to_hotkey(&shortcut)?;
        manager
            .register(hotkey)
            .map_err(|e| anyhow::anyhow!("Failed to register hotkey {}: {}", shortcut, e))?;

        info!(
            "Registered shortcut: {} (key code {}, modifiers {:#x})",
            shortcut,
            shortcut.key_code,
            shortcut.modifiers.bits()
        );

        let active_id = Arc::new(AtomicU32::new(hotkey.id()));
        let callback = Mutex::new(callback);

        let handler_id = active_id.clone();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id != handler_id.load(Ordering::SeqCst) || event.state != HotKeyState::Pressed {
                return;
            }
            if suppress.load(Ordering::SeqCst) {
                debug!("Ignoring shortcut while simulating key presses");
                return;
            }
            let mut callback = callback.lock();
            (*callback)();
        }));

        Ok(Self {
            manager,
            hotkey,
            shortcut,
            active_id,
            registered: true,
        })
    }

    pub fn shortcut(&self) -> Shortcut {
        self.shortcut
    }

    /// Swap the registered shortcut; the old one stays active if the new one fails
    pub fn rebind(&mut self, shortcut: Shortcut) -> Result<()> {
        if shortcut == self.shortcut {
            return self.register();
        }

        let hotkey = to_hotkey(&shortcut)?;
        self.manager
            .register(hotkey)
            .map_err(|e| anyhow::anyhow!("Failed to register hotkey {}: {}", shortcut, e))?;

        if self.registered {
            if let Err(e) = self.manager.unregister(self.hotkey) {
                log::warn!("Failed to unregister previous hotkey {}: {}", self.shortcut, e);
            }
        }

        self.active_id.store(hotkey.id(), Ordering::SeqCst);
        self.hotkey = hotkey;
        self.shortcut = shortcut;
        self.registered = true;
        info!("Registered shortcut: {}", shortcut);
        Ok(())
    }

    /// Register the current shortcut again after `unregister`
    pub fn register(&mut self) -> Result<()> {
        if self.registered {
            return Ok(());
        }
        self.manager
            .register(self.hotkey)
            .map_err(|e| anyhow::anyhow!("Failed to register hotkey {}: {}", self.shortcut, e))?;
        self.registered = true;
        debug!("Shortcut {} active again", self.shortcut);
        Ok(())
    }

    /// Unregister the hotkey, e.g. while the recorder owns the keyboard
    pub fn unregister(&mut self) -> Result<()> {
        if !self.registered {
            return Ok(());
        }
        self.manager
            .unregister(self.hotkey)
            .map_err(|e| anyhow::anyhow!("Failed to unregister hotkey: {}", e))?;
        self.registered = false;
        Ok(())
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        let _ = self.unregister();
    }
}

/// Build the `global-hotkey` representation of a shortcut
pub fn to_hotkey(shortcut: &Shortcut) -> Result<HotKey> {
    let code = key_code_to_code(shortcut.key_code)
        .ok_or_else(|| anyhow::anyhow!("Key code {} cannot be used as a global shortcut", shortcut.key_code))?;
    Ok(HotKey::new(Some(to_hotkey_modifiers(shortcut.modifiers)), code))
}

fn to_hotkey_modifiers(modifiers: Modifiers) -> HotKeyModifiers {
    let mut result = HotKeyModifiers::empty();
    if modifiers.contains(Modifiers::SHIFT) {
        result |= HotKeyModifiers::SHIFT;
    }
    if modifiers.contains(Modifiers::CONTROL) {
        result |= HotKeyModifiers::CONTROL;
    }
    if modifiers.contains(Modifiers::OPTION) {
        result |= HotKeyModifiers::ALT;
    }
    if modifiers.contains(Modifiers::COMMAND) {
        result |= HotKeyModifiers::SUPER;
    }
    result
}

/// Map a macOS virtual key code to the W3C code `global-hotkey` registers with
fn key_code_to_code(key_code: u16) -> Option<Code> {
    let code = match key_code {
        0x00 => Code::KeyA,
        0x0B => Code::KeyB,
        0x08 => Code::KeyC,
        0x02 => Code::KeyD,
        0x0E => Code::KeyE,
        0x03 => Code::KeyF,
        0x05 => Code::KeyG,
        0x04 => Code::KeyH,
        0x22 => Code::KeyI,
        0x26 => Code::KeyJ,
        0x28 => Code::KeyK,
        0x25 => Code::KeyL,
        0x2E => Code::KeyM,
        0x2D => Code::KeyN,
        0x1F => Code::KeyO,
        0x23 => Code::KeyP,
        0x0C => Code::KeyQ,
        0x0F => Code::KeyR,
        0x01 => Code::KeyS,
        0x11 => Code::KeyT,
        0x20 => Code::KeyU,
        0x09 => Code::KeyV,
        0x0D => Code::KeyW,
        0x07 => Code::KeyX,
        0x10 => Code::KeyY,
        0x06 => Code::KeyZ,
        0x1D => Code::Digit0,
        0x12 => Code::Digit1,
        0x13 => Code::Digit2,
        0x14 => Code::Digit3,
        0x15 => Code::Digit4,
        0x17 => Code::Digit5,
        0x16 => Code::Digit6,
        0x1A => Code::Digit7,
        0x1C => Code::Digit8,
        0x19 => Code::Digit9,
        0x31 => Code::Space,
        0x24 => Code::Enter,
        0x30 => Code::Tab,
        0x35 => Code::Escape,
        0x33 => Code::Backspace,
        0x75 => Code::Delete,
        0x7B => Code::ArrowLeft,
        0x7C => Code::ArrowRight,
        0x7E => Code::ArrowUp,
        0x7D => Code::ArrowDown,
        0x7A => Code::F1,
        0x78 => Code::F2,
        0x63 => Code::F3,
        0x76 => Code::F4,
        0x60 => Code::F5,
        0x61 => Code::F6,
        0x62 => Code::F7,
        0x64 => Code::F8,
        0x65 => Code::F9,
        0x6D => Code::F10,
        0x67 => Code::F11,
        0x6F => Code::F12,
        _ => return None,
    };
    Some(code)
}
