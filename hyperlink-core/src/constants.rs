/// Timing and endpoint constants shared by the capture engine and update checker
///
/// The delays below are tuned against the browsers' own key handling: the
/// address bar needs a moment to take focus before select-all and copy land,
/// and the pasteboard is only updated after the browser processes ⌘C.
use std::time::Duration;

/// Pause between the keys of the address-bar fallback (⌘L, ⌘A, ⌘C)
pub const FALLBACK_KEY_PAUSE: Duration = Duration::from_millis(150);

/// Delay between the last synthesized key and reading the clipboard
pub const CLIPBOARD_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Minimum time the simulating flag stays set after the last synthesized key
pub const SIMULATION_GRACE: Duration = Duration::from_millis(500);

/// Delay before the login item is reconciled at startup
pub const LOGIN_ITEM_DELAY: Duration = Duration::from_secs(1);

/// Executable used to run AppleScript snippets
pub const OSASCRIPT_PATH: &str = "/usr/bin/osascript";

/// Latest-release endpoint for update checks
pub const RELEASES_URL: &str = "https://api.github.com/repos/padrewin/Hyperlink/releases/latest";

/// HTTP timeout for update checks in seconds
pub const UPDATE_TIMEOUT_SECS: u64 = 10;

/// Title used for clipboard notifications
pub const APP_NAME: &str = "Hyperlink";

/// Bundle identifier, also used as the LaunchAgent label
pub const BUNDLE_ID: &str = "dev.colddev.hyperlink";
