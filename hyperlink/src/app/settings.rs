use super::state::AppState;
use hyperlink_core::{Settings, Shortcut};
use hyperlink_macos::open_in_text_editor;
use log::{debug, error, info, warn};

impl AppState {
    /// The settings file is the preferences surface; edits are picked up by the watcher
    pub(super) fn open_preferences(&self) {
        let path = self.store.path();
        info!("Opening preferences: {}", path.display());
        if let Err(e) = open_in_text_editor(path) {
            error!("Failed to open {}: {}", path.display(), e);
        }
    }

    pub(super) fn reload_settings(&mut self) {
        match self.store.reload() {
            Ok(Some(previous)) => self.apply_settings_change(&previous),
            Ok(None) => debug!("Settings file touched without changes"),
            Err(e) => warn!("Ignoring invalid settings file: {}", e),
        }
    }

    fn apply_settings_change(&mut self, previous: &Settings) {
        let current = self.store.get().clone();
        info!("Settings changed");

        if current.shortcut != previous.shortcut {
            self.apply_shortcut(current.shortcut);
        }
        if current.launch_on_login != previous.launch_on_login {
            self.apply_login_item();
        }
        if current.debug_logging != previous.debug_logging {
            if let Err(e) = self.debug_log.set_enabled(current.debug_logging) {
                error!("Failed to switch debug logging: {:#}", e);
            }
        }
        if current.menubar_icon != previous.menubar_icon {
            self.status_bar.set_icon(&current.menubar_icon);
        }
    }

    pub(super) fn apply_shortcut(&mut self, shortcut: Shortcut) {
        if shortcut.is_unset() {
            warn!("No shortcut set, keeping {}", self.hotkey_manager.shortcut());
            return;
        }
        match self.hotkey_manager.rebind(shortcut) {
            Ok(()) => self.status_bar.set_shortcut_hint(&shortcut.display()),
            Err(e) => error!("Could not register {}: {:#}", shortcut, e),
        }
    }

    pub(super) fn apply_login_item(&self) {
        let Some(login_item) = &self.login_item else {
            return;
        };
        let enabled = self.store.get().launch_on_login;
        if let Err(e) = login_item.apply(enabled) {
            error!("Failed to update launch at login: {:#}", e);
        }
    }
}
