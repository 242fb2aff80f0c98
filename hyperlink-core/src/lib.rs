pub mod browser;
pub mod capture;
pub mod clipboard;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod keys;
pub mod settings;
pub mod shortcut;
pub mod update;
pub mod url_format;

pub use browser::Browser;
pub use capture::{Capture, CaptureEngine, CaptureMethod, FrontApp, KeySynth, Pasteboard, ScriptRunner, ShortcutGate, Timing};
pub use clipboard::Clipboard;
pub use error::{CaptureError, ScriptError, SettingsError, UpdateError};
pub use feedback::{deliver, Feedback};
pub use settings::{NotificationStyle, Settings, SettingsStore};
pub use shortcut::{Modifiers, RecordOutcome, Shortcut, ShortcutRecorder};
pub use update::{is_newer, UpdateChecker, UpdateStatus};
pub use url_format::format_url;
