use super::state::AppState;
use super::UserEvent;
use hyperlink_core::{deliver, Capture, CaptureEngine, CaptureError, Clipboard, ShortcutGate};
use hyperlink_macos::{frontmost_app, CgKeySynth, OsascriptRunner};
use log::{debug, error, info, warn};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, SyncSender};
use std::thread;
use std::time::Duration;
use winit::event_loop::EventLoopProxy;

const RELEASE_TIMEOUT: Duration = Duration::from_secs(1);

/// Asks the main thread to drop the global hotkey while fallback keys are posted
struct ProxyGate {
    proxy: EventLoopProxy<UserEvent>,
}

impl ShortcutGate for ProxyGate {
    fn release(&self) {
        let (ack, done) = mpsc::sync_channel(1);
        if self.proxy.send_event(UserEvent::ReleaseShortcut(ack)).is_err() {
            return;
        }
        if done.recv_timeout(RELEASE_TIMEOUT).is_err() {
            warn!("Shortcut was not released in time, posting keys anyway");
        }
    }

    fn restore(&self) {
        let _ = self.proxy.send_event(UserEvent::RestoreShortcut);
    }
}

impl AppState {
    /// Shortcut pressed: capture the front-most browser's URL on a worker thread
    pub(super) fn start_capture(&mut self) {
        if self.recorder.is_recording() {
            debug!("Shortcut pressed while recording, ignoring");
            return;
        }
        if self.simulating.load(Ordering::SeqCst) {
            debug!("Shortcut pressed while simulating key presses, ignoring");
            return;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            info!("Capture already in progress, ignoring shortcut");
            return;
        }

        info!("Hotkey triggered");

        // NSWorkspace is queried here, on the main thread
        let Some(front) = frontmost_app() else {
            self.busy.store(false, Ordering::SeqCst);
            self.on_capture_failed(CaptureError::NoFrontmostApp);
            return;
        };

        let settings = self.store.get().clone();
        let simulating = self.simulating.clone();
        let busy = self.busy.clone();
        let proxy = self.proxy.clone();
        let gate = ProxyGate {
            proxy: self.proxy.clone(),
        };

        let spawned = thread::Builder::new()
            .name("hyperlink-capture".into())
            .spawn(move || {
                let result = Clipboard::new()
                    .map_err(CaptureError::Clipboard)
                    .and_then(|clipboard| {
                        CaptureEngine::new(OsascriptRunner, CgKeySynth, clipboard)
                            .with_simulating_flag(simulating)
                            .with_shortcut_gate(gate)
                            .capture(&front, &settings)
                    });
                busy.store(false, Ordering::SeqCst);

                let event = match result {
                    Ok(capture) => UserEvent::Captured(capture),
                    Err(e) => UserEvent::CaptureFailed(e),
                };
                if proxy.send_event(event).is_err() {
                    debug!("Event loop closed before the capture finished");
                }
            });

        if let Err(e) = spawned {
            error!("Failed to start capture thread: {}", e);
            self.busy.store(false, Ordering::SeqCst);
        }
    }

    pub(super) fn on_captured(&self, capture: Capture) {
        let settings = self.store.get();
        deliver(&capture.url, settings.notification_style, &settings.sound_name, &self.feedback);
    }

    pub(super) fn on_capture_failed(&self, error: CaptureError) {
        match error {
            CaptureError::UnsupportedApp(bundle_id) => {
                info!("Frontmost app {} is not a supported browser", bundle_id);
            }
            CaptureError::BrowserDisabled(browser) => {
                info!("{} is disabled in settings", browser);
            }
            CaptureError::NoFrontmostApp => {
                warn!("Could not determine the front-most application");
            }
            CaptureError::FallbackEmpty(browser) => {
                warn!("Fallback copy for {} left the clipboard empty", browser);
            }
            other => error!("Failed to copy URL: {:#}", anyhow::Error::from(other)),
        }
    }

    pub(super) fn release_shortcut(&mut self, ack: SyncSender<()>) {
        // the recorder already holds the shortcut released
        if !self.recorder.is_recording() {
            if let Err(e) = self.hotkey_manager.unregister() {
                warn!("{:#}", e);
            }
        }
        let _ = ack.send(());
    }

    pub(super) fn restore_shortcut(&mut self) {
        if self.recorder.is_recording() {
            return;
        }
        if let Err(e) = self.hotkey_manager.register() {
            error!("{:#}", e);
        }
    }
}
