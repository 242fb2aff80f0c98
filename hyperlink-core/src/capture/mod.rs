/// URL capture: ask the browser through AppleScript, fall back to keystrokes
///
/// The platform pieces (running `osascript`, posting key events, touching the
/// pasteboard) sit behind small traits so the sequencing can be exercised
/// without a live browser.
mod fallback;

pub use fallback::{Fallback, FallbackStep};

use crate::browser::Browser;
use crate::constants::{CLIPBOARD_SETTLE_DELAY, SIMULATION_GRACE};
use crate::error::{CaptureError, ScriptError};
use crate::settings::Settings;
use crate::shortcut::Modifiers;
use crate::url_format::format_url;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs an AppleScript snippet and returns its trimmed standard output
pub trait ScriptRunner {
    fn run(&self, args: &[String]) -> Result<String, ScriptError>;
}

/// Posts synthetic key presses to the front-most application
pub trait KeySynth {
    fn press(&self, key_code: u16, modifiers: Modifiers) -> anyhow::Result<()>;
}

/// Read/write access to the system clipboard's plain-text contents
pub trait Pasteboard {
    fn read_text(&mut self) -> anyhow::Result<Option<String>>;
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Takes the capture shortcut out of the system while a fallback posts its keys.
///
/// A registered global hotkey consumes its key combination, so a synthesized
/// key equal to the shortcut would never reach the browser.
pub trait ShortcutGate {
    /// Returns once the shortcut no longer intercepts key presses
    fn release(&self);
    fn restore(&self);
}

/// The application that had keyboard focus when the shortcut fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontApp {
    pub bundle_id: String,
    pub name: Option<String>,
}

/// How the URL was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMethod {
    Script,
    Fallback,
}

/// A successfully captured URL, already written to the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub browser: Browser,
    pub url: String,
    pub method: CaptureMethod,
}

/// Delays used by the fallback path
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Wait between the last synthesized key and reading the clipboard
    pub clipboard_settle: Duration,
    /// Minimum time the simulating flag stays set after the last key
    pub simulation_grace: Duration,
    /// Honor `FallbackStep::Pause` steps
    pub step_pauses: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            clipboard_settle: CLIPBOARD_SETTLE_DELAY,
            simulation_grace: SIMULATION_GRACE,
            step_pauses: true,
        }
    }
}

impl Timing {
    /// No waiting at all
    pub fn immediate() -> Self {
        Self {
            clipboard_settle: Duration::ZERO,
            simulation_grace: Duration::ZERO,
            step_pauses: false,
        }
    }
}

/// Interpret `osascript` output: a URL is any non-empty text that is not an
/// AppleScript error message
pub fn script_url(output: &str) -> Result<String, ScriptError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(ScriptError::EmptyOutput);
    }
    if trimmed.contains("error") {
        return Err(ScriptError::ErrorOutput(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Clears the simulating flag when dropped
struct SimulationGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SimulationGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for SimulationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Drives one capture from browser detection to clipboard write
pub struct CaptureEngine<S, K, P> {
    scripts: S,
    keys: K,
    pasteboard: P,
    simulating: Arc<AtomicBool>,
    timing: Timing,
    gate: Option<Box<dyn ShortcutGate>>,
}

impl<S, K, P> CaptureEngine<S, K, P>
where
    S: ScriptRunner,
    K: KeySynth,
    P: Pasteboard,
{
    pub fn new(scripts: S, keys: K, pasteboard: P) -> Self {
        Self {
            scripts,
            keys,
            pasteboard,
            simulating: Arc::new(AtomicBool::new(false)),
            timing: Timing::default(),
            gate: None,
        }
    }

    /// Share the simulating flag with the hotkey handler
    pub fn with_simulating_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.simulating = flag;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Release the global shortcut around fallback keystrokes
    pub fn with_shortcut_gate(mut self, gate: impl ShortcutGate + 'static) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    pub fn simulating_flag(&self) -> Arc<AtomicBool> {
        self.simulating.clone()
    }

    /// Resolve the browser for `front` and copy its current tab URL
    pub fn capture(&mut self, front: &FrontApp, settings: &Settings) -> Result<Capture, CaptureError> {
        info!(
            "Frontmost app: {}, Bundle ID: {}",
            front.name.as_deref().unwrap_or("Unknown"),
            front.bundle_id
        );

        let browser = Browser::from_bundle_id(&front.bundle_id)
            .ok_or_else(|| CaptureError::UnsupportedApp(front.bundle_id.clone()))?;

        if !settings.is_browser_enabled(browser) {
            return Err(CaptureError::BrowserDisabled(browser));
        }

        info!("Detected browser: {}", browser);

        let args = browser.osascript_args();
        debug!("Executing osascript for {}: {}", browser, args.join(" "));

        let (raw, method) = match self.scripts.run(&args).and_then(|out| script_url(&out)) {
            Ok(url) => (url, CaptureMethod::Script),
            Err(e) => {
                warn!("AppleScript failed for {}: {}", browser, e);
                (self.run_fallback(browser)?, CaptureMethod::Fallback)
            }
        };

        let url = if settings.format_urls {
            format_url(&raw)
        } else {
            raw
        };

        self.pasteboard
            .write_text(&url)
            .map_err(CaptureError::Clipboard)?;

        info!("URL copied to clipboard via {:?}: {}", method, url);

        Ok(Capture { browser, url, method })
    }

    /// Post the browser's fallback keystrokes, then read what landed on the clipboard
    fn run_fallback(&mut self, browser: Browser) -> Result<String, CaptureError> {
        let fallback = browser.fallback();
        info!("Using fallback sequence ({}) for {}", fallback.describe(), browser);

        let before = self.pasteboard.read_text().ok().flatten();

        if let Some(gate) = &self.gate {
            gate.release();
        }
        let result = self.post_fallback(browser, &fallback, before);
        if let Some(gate) = &self.gate {
            gate.restore();
        }
        result
    }

    fn post_fallback(
        &mut self,
        browser: Browser,
        fallback: &Fallback,
        before: Option<String>,
    ) -> Result<String, CaptureError> {
        let flag = self.simulating.clone();
        let guard = SimulationGuard::engage(&flag);
        let mut last_key = Instant::now();

        for step in fallback.steps() {
            match *step {
                FallbackStep::Key { key_code, modifiers } => {
                    self.keys
                        .press(key_code, modifiers)
                        .map_err(CaptureError::Keystroke)?;
                    last_key = Instant::now();
                }
                FallbackStep::Pause(duration) => {
                    if self.timing.step_pauses {
                        std::thread::sleep(duration);
                    }
                }
            }
        }

        if !fallback.holds_guard() {
            drop(guard);
            std::thread::sleep(self.timing.clipboard_settle);
            return self.read_fallback_result(browser, before);
        }

        std::thread::sleep(self.timing.clipboard_settle);
        let result = self.read_fallback_result(browser, before);

        let remaining = self.timing.simulation_grace.saturating_sub(last_key.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        drop(guard);

        result
    }

    fn read_fallback_result(&mut self, browser: Browser, before: Option<String>) -> Result<String, CaptureError> {
        let text = self
            .pasteboard
            .read_text()
            .map_err(CaptureError::Clipboard)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(CaptureError::FallbackEmpty(browser))?;

        if before.as_deref().map(str::trim) == Some(text.as_str()) {
            warn!("Clipboard unchanged after fallback for {}; copying existing contents", browser);
        }

        Ok(text)
    }
}
