/// Registry of supported browsers and their automation details
use crate::capture::Fallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A browser Hyperlink knows how to read the current tab URL from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Browser {
    Safari,
    Chrome,
    Arc,
    Edge,
    Brave,
    Firefox,
    Opera,
    Vivaldi,
    Zen,
}

static ALL: &[Browser] = &[
    Browser::Safari,
    Browser::Chrome,
    Browser::Arc,
    Browser::Edge,
    Browser::Brave,
    Browser::Firefox,
    Browser::Opera,
    Browser::Vivaldi,
    Browser::Zen,
];

impl Browser {
    /// Every supported browser, in display order
    pub fn all() -> &'static [Browser] {
        ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Browser::Safari => "Safari",
            Browser::Chrome => "Chrome",
            Browser::Arc => "Arc",
            Browser::Edge => "Edge",
            Browser::Brave => "Brave",
            Browser::Firefox => "Firefox",
            Browser::Opera => "Opera",
            Browser::Vivaldi => "Vivaldi",
            Browser::Zen => "Zen",
        }
    }

    pub fn bundle_id(&self) -> &'static str {
        match self {
            Browser::Safari => "com.apple.Safari",
            Browser::Chrome => "com.google.Chrome",
            Browser::Arc => "company.thebrowser.Browser",
            Browser::Edge => "com.microsoft.edgemac",
            Browser::Brave => "com.brave.Browser",
            Browser::Firefox => "org.mozilla.firefox",
            Browser::Opera => "com.operasoftware.Opera",
            Browser::Vivaldi => "com.vivaldi.Vivaldi",
            Browser::Zen => "app.zen-browser.zen",
        }
    }

    /// Application name as AppleScript's `tell application` expects it
    pub fn script_app_name(&self) -> &'static str {
        match self {
            Browser::Safari => "Safari",
            Browser::Chrome => "Google Chrome",
            Browser::Arc => "Arc",
            Browser::Edge => "Microsoft Edge",
            Browser::Brave => "Brave Browser",
            Browser::Firefox => "Firefox",
            Browser::Opera => "Opera",
            Browser::Vivaldi => "Vivaldi",
            Browser::Zen => "Zen",
        }
    }

    pub fn from_bundle_id(bundle_id: &str) -> Option<Browser> {
        ALL.iter().copied().find(|b| b.bundle_id() == bundle_id)
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Browser> {
        let name = name.trim();
        ALL.iter().copied().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// The statement that reads the current tab URL
    fn url_statement(&self) -> &'static str {
        match self {
            Browser::Safari => "get URL of current tab of first window",
            Browser::Opera => "get URL of active tab of window 1",
            _ => "get URL of active tab of first window",
        }
    }

    /// `osascript` arguments that print the current tab URL
    pub fn osascript_args(&self) -> Vec<String> {
        vec![
            "-e".to_string(),
            format!("tell application \"{}\"", self.script_app_name()),
            "-e".to_string(),
            self.url_statement().to_string(),
            "-e".to_string(),
            "end tell".to_string(),
        ]
    }

    /// Keystroke sequence used when scripting fails
    pub fn fallback(&self) -> Fallback {
        match self {
            Browser::Firefox => Fallback::firefox(),
            Browser::Zen => Fallback::copy_url_shortcut(),
            _ => Fallback::address_bar(),
        }
    }

    /// Caveat shown next to the browser toggle
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Browser::Arc => Some("Arc has a built-in URL copy shortcut. Enabling this may cause conflicts."),
            Browser::Firefox => Some(
                "Requires \"devtools.policy.disabled\" set to true in Firefox, or a shortcut other than ⇧⌘C.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::FallbackStep;
    use crate::keys;
    use crate::shortcut::Modifiers;

    #[test]
    fn test_bundle_id_round_trip() {
        for browser in Browser::all() {
            assert_eq!(Browser::from_bundle_id(browser.bundle_id()), Some(*browser));
        }
        assert_eq!(Browser::from_bundle_id("com.apple.finder"), None);
        assert_eq!(Browser::from_bundle_id(""), None);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Browser::from_name("firefox"), Some(Browser::Firefox));
        assert_eq!(Browser::from_name(" ZEN "), Some(Browser::Zen));
        assert_eq!(Browser::from_name("Netscape"), None);
    }

    #[test]
    fn test_safari_script() {
        assert_eq!(
            Browser::Safari.osascript_args(),
            vec![
                "-e",
                "tell application \"Safari\"",
                "-e",
                "get URL of current tab of first window",
                "-e",
                "end tell",
            ]
        );
    }

    #[test]
    fn test_chromium_and_opera_scripts() {
        let chrome = Browser::Chrome.osascript_args();
        assert_eq!(chrome[1], "tell application \"Google Chrome\"");
        assert_eq!(chrome[3], "get URL of active tab of first window");

        let opera = Browser::Opera.osascript_args();
        assert_eq!(opera[3], "get URL of active tab of window 1");
    }

    #[test]
    fn test_fallback_selection() {
        let zen = Browser::Zen.fallback();
        assert_eq!(
            zen.steps(),
            &[FallbackStep::Key {
                key_code: keys::KEY_C,
                modifiers: Modifiers::COMMAND | Modifiers::SHIFT,
            }]
        );
        assert_eq!(Browser::Firefox.fallback(), Fallback::firefox());
        assert_eq!(Browser::Brave.fallback(), Fallback::address_bar());
    }

    #[test]
    fn test_hints() {
        assert!(Browser::Arc.hint().is_some());
        assert!(Browser::Firefox.hint().is_some());
        assert!(Browser::Safari.hint().is_none());
    }
}
