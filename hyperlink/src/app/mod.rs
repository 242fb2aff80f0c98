mod capture;
mod event_loop;
mod init;
mod recorder;
mod settings;
mod state;
mod updates;

pub use state::App;

use hyperlink_core::{Capture, CaptureError, UpdateStatus};
use hyperlink_macos::MenuAction;
use std::sync::mpsc::SyncSender;

/// Events delivered to the winit loop from the hotkey handler, menu, worker threads and the watcher
#[derive(Debug)]
pub enum UserEvent {
    Hotkey,
    Menu(MenuAction),
    Captured(Capture),
    CaptureFailed(CaptureError),
    /// Unregister the global shortcut, then acknowledge
    ReleaseShortcut(SyncSender<()>),
    RestoreShortcut,
    UpdateChecked {
        result: Result<UpdateStatus, String>,
        manual: bool,
    },
    SettingsChanged,
    ApplyLoginItem,
}
