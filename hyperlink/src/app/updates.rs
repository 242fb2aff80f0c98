use super::state::AppState;
use super::UserEvent;
use hyperlink_core::{Feedback, UpdateChecker, UpdateStatus};
use hyperlink_macos::open_path;
use log::{info, warn};

impl AppState {
    /// Query the releases endpoint on the tokio runtime; `manual` reports every outcome
    pub(super) fn check_for_updates(&self, manual: bool) {
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let result = match UpdateChecker::new(env!("CARGO_PKG_VERSION")) {
                Ok(checker) => checker.check().await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = proxy.send_event(UserEvent::UpdateChecked { result, manual });
        });
    }

    pub(super) fn on_update_checked(&self, result: Result<UpdateStatus, String>, manual: bool) {
        match result {
            Ok(UpdateStatus::Available { version, url }) => {
                info!("Update available: {} ({})", version, url);
                self.feedback.notify(
                    "Update Available",
                    &format!("Hyperlink {} is available. Choose Check for Updates… to download it.", version),
                );
                if manual {
                    if let Err(e) = open_path(&url) {
                        warn!("Failed to open {}: {}", url, e);
                    }
                }
            }
            Ok(UpdateStatus::UpToDate { .. }) => {
                if manual {
                    self.feedback.notify("No Updates Available", "You are running the latest version of Hyperlink.");
                }
            }
            Err(e) => {
                warn!("Update check failed: {}", e);
                if manual {
                    self.feedback.notify("Update Check Failed", &e);
                }
            }
        }
    }
}
