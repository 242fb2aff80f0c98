/// Accessibility and Automation permission handling.
///
/// Synthesized keystrokes and the global shortcut both need the process to be
/// trusted for Accessibility. Automation consent for scripting a browser is
/// requested by macOS itself on the first `osascript` call.

use log::{info, warn};
use std::process::Command;

const ACCESSIBILITY_PANE: &str = "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Check Accessibility trust without prompting
pub fn is_trusted() -> bool {
    macos_accessibility_client::accessibility::application_is_trusted()
}

/// Check Accessibility trust, showing the system prompt if not yet granted
pub fn is_trusted_with_prompt() -> bool {
    macos_accessibility_client::accessibility::application_is_trusted_with_prompt()
}

pub fn open_accessibility_preferences() -> std::io::Result<()> {
    Command::new("open").arg(ACCESSIBILITY_PANE).spawn()?;
    Ok(())
}

/// Startup check: prompt for Accessibility and open the pane when missing
pub fn ensure_accessibility() -> bool {
    let trusted = is_trusted_with_prompt();
    info!("Accessibility access enabled: {}", trusted);
    if !trusted {
        warn!(
            "Hyperlink needs accessibility permissions to detect keyboard shortcuts. \
             Enable it in System Settings > Privacy & Security > Accessibility."
        );
        if let Err(e) = open_accessibility_preferences() {
            warn!("Failed to open System Settings: {}", e);
        }
    }
    trusted
}
