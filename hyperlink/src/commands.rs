use crate::logging::{self, DebugLog};
use anyhow::{Context, Result};
use hyperlink_core::{SettingsStore, Shortcut, UpdateChecker, UpdateStatus};
use std::path::Path;

/// Run the menu bar app until the user quits
#[cfg(target_os = "macos")]
pub fn run_app(config: Option<&Path>, debug_log: DebugLog) -> Result<()> {
    let app = crate::app::App::new(config, debug_log)?;
    app.run()
}

#[cfg(not(target_os = "macos"))]
pub fn run_app(_config: Option<&Path>, _debug_log: DebugLog) -> Result<()> {
    anyhow::bail!("The menu bar app is only available on macOS")
}

/// One-shot capture from the front-most browser
#[cfg(target_os = "macos")]
pub fn copy_once(config: Option<&Path>) -> Result<()> {
    use hyperlink_core::{CaptureEngine, CaptureError, Clipboard, Settings};
    use hyperlink_macos::{frontmost_app, permissions, CgKeySynth, OsascriptRunner};

    let settings = Settings::load(config).context("Failed to load settings")?;
    if !permissions::is_trusted() {
        log::warn!("Accessibility access is not granted; the keystroke fallback will not work");
    }
    let front = frontmost_app().ok_or(CaptureError::NoFrontmostApp)?;

    let mut engine = CaptureEngine::new(OsascriptRunner, CgKeySynth, Clipboard::new()?);
    let capture = engine.capture(&front, &settings)?;
    println!("{}", capture.url);
    Ok(())
}

#[cfg(not(target_os = "macos"))]
pub fn copy_once(_config: Option<&Path>) -> Result<()> {
    anyhow::bail!("Capturing browser URLs is only available on macOS")
}

pub async fn check_update() -> Result<()> {
    let checker = UpdateChecker::new(env!("CARGO_PKG_VERSION"))?;
    match checker.check().await? {
        UpdateStatus::Available { version, url } => {
            println!("Hyperlink {} is available (you have {}): {}", version, checker.current_version(), url);
        }
        UpdateStatus::UpToDate { .. } => {
            println!("Hyperlink {} is up to date", checker.current_version());
        }
    }
    Ok(())
}

pub fn shortcut(config: Option<&Path>, spec: Option<&str>) -> Result<()> {
    let mut store = SettingsStore::open(config).context("Failed to load settings")?;
    if let Some(spec) = spec {
        let shortcut: Shortcut = spec.parse()?;
        store.set_shortcut(shortcut)?;
        log::info!("Shortcut set to {}", shortcut);
    }
    println!("{}", store.get().shortcut.display());
    Ok(())
}

pub fn reset(config: Option<&Path>) -> Result<()> {
    let mut store = SettingsStore::open(config).context("Failed to load settings")?;
    store.reset_to_defaults()?;
    println!("Settings reset to defaults ({})", store.path().display());
    Ok(())
}

pub fn export_debug_log(debug_log: &DebugLog, output: &Path) -> Result<()> {
    let bytes = logging::export(debug_log.path(), output)?;
    println!("Saved {} bytes of debug log to {}", bytes, output.display());
    Ok(())
}
