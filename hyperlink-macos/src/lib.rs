pub mod login_item;

#[cfg(target_os = "macos")]
pub mod applescript;
#[cfg(target_os = "macos")]
pub mod feedback;
#[cfg(target_os = "macos")]
pub mod hotkey;
#[cfg(target_os = "macos")]
pub mod keyboard;
#[cfg(target_os = "macos")]
pub mod permissions;
#[cfg(target_os = "macos")]
pub mod status_bar;
#[cfg(target_os = "macos")]
pub mod workspace;

pub use login_item::LoginItem;

#[cfg(target_os = "macos")]
pub use applescript::OsascriptRunner;
#[cfg(target_os = "macos")]
pub use feedback::MacFeedback;
#[cfg(target_os = "macos")]
pub use hotkey::HotkeyManager;
#[cfg(target_os = "macos")]
pub use keyboard::CgKeySynth;
#[cfg(target_os = "macos")]
pub use status_bar::{MenuAction, StatusBar};
#[cfg(target_os = "macos")]
pub use workspace::{frontmost_app, open_in_text_editor, open_path};
