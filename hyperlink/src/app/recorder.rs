use super::state::AppState;
use super::UserEvent;
use cocoa::appkit::{NSApp, NSApplication};
use cocoa::base::YES;
use hyperlink_core::{Modifiers, RecordOutcome, Shortcut, ShortcutRecorder};
use hyperlink_macos::hotkey::to_hotkey;
use log::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::ModifiersState,
    platform::scancode::PhysicalKeyExtScancode,
    window::{Window, WindowBuilder, WindowId},
};

/// Small window that owns the keyboard while a new shortcut is recorded
pub(super) struct RecorderWindow {
    recorder: ShortcutRecorder,
    window: Option<Window>,
    modifiers: ModifiersState,
}

impl RecorderWindow {
    pub(super) fn new() -> Self {
        Self {
            recorder: ShortcutRecorder::new(),
            window: None,
            modifiers: ModifiersState::empty(),
        }
    }

    pub(super) fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    fn owns(&self, window_id: WindowId) -> bool {
        self.window.as_ref().map(|w| w.id()) == Some(window_id)
    }

    fn set_title(&self, title: &str) {
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }
}

fn prompt(current: Shortcut) -> String {
    format!("Press a new shortcut (current: {}, Esc to cancel)", current)
}

fn to_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL, state.control_key());
    modifiers.set(Modifiers::OPTION, state.alt_key());
    modifiers.set(Modifiers::COMMAND, state.super_key());
    modifiers
}

fn bring_to_front(window: &Window) {
    // Accessory apps are not activated by showing a window
    unsafe {
        NSApp().activateIgnoringOtherApps_(YES);
    }
    window.focus_window();
}

impl AppState {
    /// Open the recorder window and release the global shortcut until it closes
    pub(super) fn start_recording(&mut self, elwt: &EventLoopWindowTarget<UserEvent>) {
        if let Some(window) = &self.recorder.window {
            bring_to_front(window);
            return;
        }

        let current = self.hotkey_manager.shortcut();
        let window = match WindowBuilder::new()
            .with_title(prompt(current))
            .with_inner_size(LogicalSize::new(460.0, 80.0))
            .with_resizable(false)
            .build(elwt)
        {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to open shortcut recorder: {}", e);
                return;
            }
        };

        // The old combination has to reach the window instead of the global hotkey
        if let Err(e) = self.hotkey_manager.unregister() {
            warn!("{:#}", e);
        }

        self.recorder.recorder.start(current);
        self.recorder.modifiers = ModifiersState::empty();
        bring_to_front(&window);
        self.recorder.window = Some(window);
    }

    pub(super) fn handle_window_event(&mut self, window_id: WindowId, event: WindowEvent) {
        if !self.recorder.owns(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(previous) = self.recorder.recorder.cancel() {
                    info!("Recording closed, keeping {}", previous);
                }
                self.finish_recording(None);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.recorder.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let Some(key_code) = event.physical_key.to_scancode() else {
                    return;
                };
                let modifiers = to_modifiers(self.recorder.modifiers);
                let outcome = self.recorder.recorder.handle_key(key_code as u16, modifiers);
                self.on_record_outcome(outcome);
            }
            _ => {}
        }
    }

    fn on_record_outcome(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Ignored | RecordOutcome::Pending => {}
            RecordOutcome::Recorded(shortcut) => {
                if let Err(e) = to_hotkey(&shortcut) {
                    warn!("{:#}", e);
                    self.recorder.recorder.start(self.hotkey_manager.shortcut());
                    self.recorder.set_title(&format!("{} can't be used, try another key", shortcut));
                    return;
                }
                self.finish_recording(Some(shortcut));
            }
            RecordOutcome::Cancelled(_) => self.finish_recording(None),
            RecordOutcome::Rejected(previous) => {
                warn!("Shortcuts need at least one of ⌘ ⌥ ⌃ ⇧, keeping {}", previous);
                self.finish_recording(None);
            }
        }
    }

    fn finish_recording(&mut self, recorded: Option<Shortcut>) {
        self.recorder.window = None;

        if let Some(shortcut) = recorded {
            if let Err(e) = self.store.set_shortcut(shortcut) {
                error!("Failed to save shortcut: {}", e);
            }
            self.apply_shortcut(shortcut);
        }

        if let Err(e) = self.hotkey_manager.register() {
            error!("{:#}", e);
        }
    }
}
