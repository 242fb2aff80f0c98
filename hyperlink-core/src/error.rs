/// Error types for the capture pipeline, settings and update checks
use crate::browser::Browser;
use thiserror::Error;

/// Failure of a single `osascript` invocation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("failed to execute osascript: {0}")]
    Spawn(String),
    #[error("osascript exited with status {status:?}: {output}")]
    Failed { status: Option<i32>, output: String },
    #[error("osascript returned no output")]
    EmptyOutput,
    #[error("AppleScript reported an error: {0}")]
    ErrorOutput(String),
}

/// Why a capture produced no URL
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("front-most application could not be determined")]
    NoFrontmostApp,
    #[error("not a supported browser: {0}")]
    UnsupportedApp(String),
    #[error("browser {0} is not enabled")]
    BrowserDisabled(Browser),
    #[error("fallback for {0} did not retrieve any URL")]
    FallbackEmpty(Browser),
    #[error("clipboard error: {0}")]
    Clipboard(anyhow::Error),
    #[error("failed to simulate key press: {0}")]
    Keystroke(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no configuration directory available")]
    NoConfigDir,
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(reqwest::StatusCode),
    #[error("invalid response format")]
    InvalidResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_errors_read_as_log_lines() {
        assert_eq!(
            CaptureError::NoFrontmostApp.to_string(),
            "front-most application could not be determined"
        );
        assert_eq!(
            CaptureError::FallbackEmpty(Browser::Zen).to_string(),
            "fallback for Zen did not retrieve any URL"
        );
    }

    #[test]
    fn test_server_error_names_status() {
        let err = UpdateError::Server(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "server error: 404 Not Found");
    }
}
