use super::state::{App, AppState};
use super::UserEvent;
use anyhow::Result;
use hyperlink_macos::MenuAction;
use log::info;
use winit::{
    event::Event,
    event_loop::{ControlFlow, EventLoopWindowTarget},
};

impl App {
    /// Run the application event loop
    pub fn run(self) -> Result<()> {
        let App { event_loop, mut state } = self;

        info!("Starting event loop");

        event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(event) => state.handle_user_event(event, elwt),
                Event::WindowEvent { window_id, event } => state.handle_window_event(window_id, event),
                Event::LoopExiting => info!("Shutting down"),
                _ => {}
            }
        })?;

        Ok(())
    }
}

impl AppState {
    fn handle_user_event(&mut self, event: UserEvent, elwt: &EventLoopWindowTarget<UserEvent>) {
        match event {
            UserEvent::Hotkey => self.start_capture(),
            UserEvent::Menu(MenuAction::Preferences) => self.open_preferences(),
            UserEvent::Menu(MenuAction::RecordShortcut) => self.start_recording(elwt),
            UserEvent::Menu(MenuAction::CheckForUpdates) => self.check_for_updates(true),
            UserEvent::Menu(MenuAction::Quit) => {
                info!("Quit requested");
                elwt.exit();
            }
            UserEvent::Captured(capture) => self.on_captured(capture),
            UserEvent::CaptureFailed(error) => self.on_capture_failed(error),
            UserEvent::ReleaseShortcut(ack) => self.release_shortcut(ack),
            UserEvent::RestoreShortcut => self.restore_shortcut(),
            UserEvent::UpdateChecked { result, manual } => self.on_update_checked(result, manual),
            UserEvent::SettingsChanged => self.reload_settings(),
            UserEvent::ApplyLoginItem => self.apply_login_item(),
        }
    }
}
