use crate::browser::Browser;
use crate::error::SettingsError;
use crate::shortcut::Shortcut;
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What happens after a URL lands on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStyle {
    #[default]
    ShowNotification,
    Silent,
    PlaySound,
    SoundAndNotification,
}

impl NotificationStyle {
    pub fn plays_sound(&self) -> bool {
        matches!(self, Self::PlaySound | Self::SoundAndNotification)
    }

    pub fn shows_notification(&self) -> bool {
        matches!(self, Self::ShowNotification | Self::SoundAndNotification)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ShowNotification => "Show Notification",
            Self::Silent => "Silent Copy",
            Self::PlaySound => "Play Sound",
            Self::SoundAndNotification => "Sound & Notification",
        }
    }
}

/// User settings for Hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browsers the shortcut is active in
    #[serde(deserialize_with = "deserialize_browsers")]
    pub enabled_browsers: BTreeSet<Browser>,
    /// Start Hyperlink when logging in
    pub launch_on_login: bool,
    /// Capture shortcut
    pub shortcut: Shortcut,
    /// Sound / notification feedback after copying
    pub notification_style: NotificationStyle,
    /// System sound played when the style includes sound
    pub sound_name: String,
    /// Clean up URLs before copying (tracking params, www, https)
    pub format_urls: bool,
    /// Write verbose logs to the debug log file
    pub debug_logging: bool,
    /// Check for a newer release at startup
    pub check_updates_automatically: bool,
    /// SF Symbol name used for the menu bar icon
    pub menubar_icon: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled_browsers: Browser::all().iter().copied().collect(),
            launch_on_login: false,
            shortcut: Shortcut::default(),
            notification_style: NotificationStyle::default(),
            sound_name: "Tink".to_string(),
            format_urls: false,
            debug_logging: false,
            check_updates_automatically: true,
            menubar_icon: "link".to_string(),
        }
    }
}

/// Accept any list of names, keeping the ones that match a known browser
fn deserialize_browsers<'de, D>(deserializer: D) -> Result<BTreeSet<Browser>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(names
        .iter()
        .filter_map(|name| {
            let browser = Browser::from_name(name);
            if browser.is_none() {
                warn!("Ignoring unknown browser in settings: {}", name);
            }
            browser
        })
        .collect())
}

impl Settings {
    pub fn is_browser_enabled(&self, browser: Browser) -> bool {
        self.enabled_browsers.contains(&browser)
    }

    /// Default settings file: `<config dir>/hyperlink/settings.toml`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let mut p = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        p.push("hyperlink");
        p.push("settings.toml");
        Ok(p)
    }

    fn resolve(path: Option<&Path>) -> Result<PathBuf, SettingsError> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load settings from file, or create the file with defaults if it does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings_path = Self::resolve(path)?;

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)?;
            let settings: Settings = toml::from_str(&contents)?;
            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save(Some(&settings_path))?;
            info!("Created default settings at {}", settings_path.display());
            Ok(settings)
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&Path>) -> Result<(), SettingsError> {
        let settings_path = Self::resolve(path)?;

        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&settings_path, contents)?;
        Ok(())
    }
}

/// Settings bound to their file; every setter persists immediately
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    pub fn open(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = Settings::resolve(path)?;
        let settings = Settings::load(Some(&path))?;
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Re-read the file, returning the previous value when it changed
    pub fn reload(&mut self) -> Result<Option<Settings>, SettingsError> {
        let fresh = Settings::load(Some(&self.path))?;
        if fresh == self.settings {
            return Ok(None);
        }
        Ok(Some(std::mem::replace(&mut self.settings, fresh)))
    }

    fn update(&mut self, apply: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        apply(&mut self.settings);
        self.settings.save(Some(&self.path))
    }

    pub fn set_browser_enabled(&mut self, browser: Browser, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| {
            if enabled {
                s.enabled_browsers.insert(browser);
            } else {
                s.enabled_browsers.remove(&browser);
            }
        })
    }

    pub fn set_launch_on_login(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.launch_on_login = enabled)
    }

    pub fn set_shortcut(&mut self, shortcut: Shortcut) -> Result<(), SettingsError> {
        self.update(|s| s.shortcut = shortcut)
    }

    pub fn set_notification_style(&mut self, style: NotificationStyle) -> Result<(), SettingsError> {
        self.update(|s| s.notification_style = style)
    }

    pub fn set_sound_name(&mut self, name: &str) -> Result<(), SettingsError> {
        self.update(|s| s.sound_name = name.to_string())
    }

    pub fn set_format_urls(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.format_urls = enabled)
    }

    pub fn set_debug_logging(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.debug_logging = enabled)
    }

    pub fn set_check_updates_automatically(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.check_updates_automatically = enabled)
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.update(|s| *s = Settings::default())?;
        info!("All settings have been reset to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::Modifiers;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.enabled_browsers.len(), Browser::all().len());
        assert!(!settings.launch_on_login);
        assert_eq!(settings.shortcut, Shortcut::default());
        assert!(settings.check_updates_automatically);
        assert_eq!(settings.notification_style, NotificationStyle::ShowNotification);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "format_urls = true\nenabled_browsers = [\"safari\", \"Netscape\", \"Zen\"]\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert!(settings.format_urls);
        assert_eq!(settings.enabled_browsers, BTreeSet::from([Browser::Safari, Browser::Zen]));
        assert_eq!(settings.sound_name, "Tink");
        assert_eq!(settings.shortcut, Shortcut::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.shortcut = Shortcut::new(0x25, Modifiers::CONTROL | Modifiers::OPTION);
        settings.notification_style = NotificationStyle::SoundAndNotification;
        settings.save(Some(&path)).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_store_persists_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = SettingsStore::open(Some(&path)).unwrap();
        store.set_browser_enabled(Browser::Firefox, false).unwrap();
        store.set_debug_logging(true).unwrap();

        let on_disk = Settings::load(Some(&path)).unwrap();
        assert!(!on_disk.is_browser_enabled(Browser::Firefox));
        assert!(on_disk.debug_logging);

        store.reset_to_defaults().unwrap();
        assert_eq!(Settings::load(Some(&path)).unwrap(), Settings::default());
    }

    #[test]
    fn test_store_reload_reports_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut store = SettingsStore::open(Some(&path)).unwrap();

        assert!(store.reload().unwrap().is_none());

        let mut edited = Settings::default();
        edited.launch_on_login = true;
        edited.save(Some(&path)).unwrap();

        let previous = store.reload().unwrap().expect("change detected");
        assert!(!previous.launch_on_login);
        assert!(store.get().launch_on_login);
    }

    #[test]
    fn test_notification_style_flags() {
        assert!(NotificationStyle::SoundAndNotification.plays_sound());
        assert!(NotificationStyle::SoundAndNotification.shows_notification());
        assert!(!NotificationStyle::Silent.plays_sound());
        assert!(!NotificationStyle::Silent.shows_notification());
        assert!(NotificationStyle::PlaySound.plays_sound());
        assert!(!NotificationStyle::PlaySound.shows_notification());
    }
}
