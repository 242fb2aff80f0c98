use super::recorder::RecorderWindow;
use super::UserEvent;
use crate::logging::DebugLog;
use hyperlink_core::SettingsStore;
use hyperlink_macos::{HotkeyManager, LoginItem, MacFeedback, StatusBar};
use notify::RecommendedWatcher;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use winit::event_loop::{EventLoop, EventLoopProxy};

/// Main application: the event loop plus everything it drives
pub struct App {
    pub(super) event_loop: EventLoop<UserEvent>,
    pub(super) state: AppState,
}

/// State owned by the main thread while the event loop runs
pub(super) struct AppState {
    pub(super) proxy: EventLoopProxy<UserEvent>,
    pub(super) store: SettingsStore,
    pub(super) debug_log: DebugLog,
    pub(super) status_bar: StatusBar,
    pub(super) hotkey_manager: HotkeyManager,
    pub(super) login_item: Option<LoginItem>,
    pub(super) feedback: MacFeedback,
    pub(super) runtime: tokio::runtime::Handle,
    pub(super) recorder: RecorderWindow,
    /// Set while synthesized keystrokes are being posted
    pub(super) simulating: Arc<AtomicBool>,
    /// Set while a capture is in flight on the worker thread
    pub(super) busy: Arc<AtomicBool>,
    pub(super) _watcher: Option<RecommendedWatcher>,
}
