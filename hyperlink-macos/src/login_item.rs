use anyhow::{Context, Result};
use auto_launch::{AutoLaunch, AutoLaunchBuilder};
use hyperlink_core::constants::BUNDLE_ID;
use log::{debug, info};
use std::path::Path;

/// Starts Hyperlink at login through a per-user LaunchAgent
/// (`~/Library/LaunchAgents/dev.colddev.hyperlink.plist`)
pub struct LoginItem {
    launcher: AutoLaunch,
}

impl LoginItem {
    pub fn new(program: &Path) -> Result<Self> {
        let program = program
            .to_str()
            .context("Executable path is not valid UTF-8")?;

        let launcher = AutoLaunchBuilder::new()
            .set_app_name(BUNDLE_ID)
            .set_app_path(program)
            .set_use_launch_agent(true)
            .build()
            .context("Failed to configure launch at login")?;

        Ok(Self { launcher })
    }

    /// Launch the running executable at login
    pub fn for_current_exe() -> Result<Self> {
        let program = std::env::current_exe().context("Could not determine executable path")?;
        Self::new(&program)
    }

    pub fn program(&self) -> &str {
        self.launcher.get_app_path()
    }

    pub fn is_enabled(&self) -> Result<bool> {
        self.launcher
            .is_enabled()
            .context("Failed to read launch at login state")
    }

    /// Install or remove the agent; does nothing when already in the requested state
    pub fn apply(&self, enabled: bool) -> Result<()> {
        if self.is_enabled()? == enabled {
            debug!("Launch at login already {}", if enabled { "enabled" } else { "disabled" });
            return Ok(());
        }

        if enabled {
            self.launcher
                .enable()
                .context("Failed to register login item")?;
            info!("Registered login item for {}", self.program());
        } else {
            self.launcher
                .disable()
                .context("Failed to remove login item")?;
            info!("Removed login item");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_uses_bundle_id() {
        let item = LoginItem::new(Path::new("/Applications/Hyperlink.app/Contents/MacOS/hyperlink")).unwrap();
        assert_eq!(item.launcher.get_app_name(), BUNDLE_ID);
        assert_eq!(item.program(), "/Applications/Hyperlink.app/Contents/MacOS/hyperlink");
    }
}
