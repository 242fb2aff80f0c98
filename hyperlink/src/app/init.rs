use super::recorder::RecorderWindow;
use super::state::{App, AppState};
use super::UserEvent;
use crate::logging::DebugLog;
use crate::watcher::watch_settings;
use anyhow::{Context, Result};
use hyperlink_core::constants::LOGIN_ITEM_DELAY;
use hyperlink_core::{SettingsStore, Shortcut};
use hyperlink_macos::{permissions, HotkeyManager, LoginItem, MacFeedback, StatusBar};
use log::{info, warn};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use winit::event_loop::EventLoopBuilder;
use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};

impl App {
    /// Create the application: settings, status item, hotkey and background hooks
    pub fn new(config: Option<&Path>, debug_log: DebugLog) -> Result<Self> {
        info!("Initializing application");

        // Menu bar only: no Dock icon, no main menu
        let event_loop = EventLoopBuilder::<UserEvent>::with_user_event()
            .with_activation_policy(ActivationPolicy::Accessory)
            .build()?;
        let proxy = event_loop.create_proxy();
        let runtime = tokio::runtime::Handle::try_current().context("No tokio runtime available")?;

        let store = SettingsStore::open(config).context("Failed to load settings")?;
        let settings = store.get().clone();
        info!("Loaded settings from {}", store.path().display());

        permissions::ensure_accessibility();

        for browser in &settings.enabled_browsers {
            if let Some(hint) = browser.hint() {
                info!("{}: {}", browser, hint);
            }
        }

        let menu_proxy = proxy.clone();
        let status_bar = StatusBar::new(&settings.menubar_icon, move |action| {
            let _ = menu_proxy.send_event(UserEvent::Menu(action));
        })?;

        let simulating = Arc::new(AtomicBool::new(false));
        let shortcut = if settings.shortcut.is_unset() {
            warn!("No shortcut configured, using {}", Shortcut::default());
            Shortcut::default()
        } else {
            settings.shortcut
        };

        let hotkey_proxy = proxy.clone();
        let on_press = move || {
            let _ = hotkey_proxy.send_event(UserEvent::Hotkey);
        };
        let hotkey_manager = match HotkeyManager::new(shortcut, simulating.clone(), on_press.clone()) {
            Ok(manager) => manager,
            Err(e) => {
                warn!("{:#}; falling back to {}", e, Shortcut::default());
                HotkeyManager::new(Shortcut::default(), simulating.clone(), on_press)?
            }
        };
        status_bar.set_shortcut_hint(&hotkey_manager.shortcut().display());

        let login_item = match LoginItem::for_current_exe() {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Launch at login unavailable: {:#}", e);
                None
            }
        };

        let login_proxy = proxy.clone();
        runtime.spawn(async move {
            tokio::time::sleep(LOGIN_ITEM_DELAY).await;
            let _ = login_proxy.send_event(UserEvent::ApplyLoginItem);
        });

        let watcher_proxy = proxy.clone();
        let watcher = match watch_settings(store.path(), move || {
            let _ = watcher_proxy.send_event(UserEvent::SettingsChanged);
        }) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Settings will not reload automatically: {:#}", e);
                None
            }
        };

        let state = AppState {
            proxy,
            store,
            debug_log,
            status_bar,
            hotkey_manager,
            login_item,
            feedback: MacFeedback,
            runtime,
            recorder: RecorderWindow::new(),
            simulating,
            busy: Arc::new(AtomicBool::new(false)),
            _watcher: watcher,
        };

        if settings.check_updates_automatically {
            state.check_for_updates(false);
        }

        info!("Press {} in a browser to copy the current tab URL", state.hotkey_manager.shortcut());

        Ok(Self { event_loop, state })
    }
}
