/// Runs AppleScript snippets through `osascript`.

use hyperlink_core::constants::OSASCRIPT_PATH;
use hyperlink_core::{ScriptError, ScriptRunner};
use log::debug;
use std::process::Command;

/// `ScriptRunner` backed by `/usr/bin/osascript`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsascriptRunner;

impl ScriptRunner for OsascriptRunner {
    fn run(&self, args: &[String]) -> Result<String, ScriptError> {
        let output = Command::new(OSASCRIPT_PATH)
            .args(args)
            .output()
            .map_err(|e| ScriptError::Spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("osascript result: stdout={:?} stderr={:?}", stdout, stderr);

        if !output.status.success() {
            let output_text = if stderr.is_empty() { stdout } else { stderr };
            return Err(ScriptError::Failed {
                status: output.status.code(),
                output: output_text,
            });
        }

        Ok(stdout)
    }
}
