/// Logger setup: `env_logger` on stderr, optionally mirrored into the debug log file.

use anyhow::{Context, Result};
use log::LevelFilter;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEBUG_LOG_FILE: &str = "hyperlink_debug.log";

/// `<data dir>/hyperlink/hyperlink_debug.log`
pub fn debug_log_path() -> Result<PathBuf> {
    let mut p = dirs::data_dir().context("Could not determine data directory")?;
    p.push("hyperlink");
    p.push(DEBUG_LOG_FILE);
    Ok(p)
}

/// Writer handed to `env_logger`: always stderr, plus the debug file when open
#[derive(Clone, Default)]
struct TeeWriter {
    file: Arc<Mutex<Option<File>>>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = self.file.lock().as_mut() {
            // A failing debug file must not break stderr logging
            let _ = file.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = self.file.lock().as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Handle for switching debug logging after the logger is installed
#[derive(Clone)]
pub struct DebugLog {
    writer: TeeWriter,
    path: PathBuf,
    base_level: LevelFilter,
}

impl DebugLog {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.file.lock().is_some()
    }

    /// Raise the level to debug and append to the file, or switch both back
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        if enabled == self.is_enabled() {
            return Ok(());
        }

        if enabled {
            let file = open_append(&self.path)?;
            *self.writer.file.lock() = Some(file);
            log::set_max_level(LevelFilter::Debug.max(self.base_level));
            log::info!("Debug logging started, writing to {}", self.path.display());
        } else {
            log::info!("Debug logging stopped");
            self.writer.file.lock().take();
            log::set_max_level(self.base_level);
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// Install the global logger. `RUST_LOG` wins; otherwise the level is `info`.
pub fn init(debug_logging: bool) -> Result<DebugLog> {
    let writer = TeeWriter::default();
    let path = debug_log_path()?;

    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    let explicit = std::env::var_os("RUST_LOG").is_some();
    if !explicit {
        // Let records through the builder; the global max level does the filtering
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(Box::new(writer.clone())));
    builder.try_init().context("Logger already initialized")?;

    let base_level = if explicit { log::max_level() } else { LevelFilter::Info };
    log::set_max_level(base_level);

    let debug_log = DebugLog {
        writer,
        path,
        base_level,
    };
    if debug_logging {
        if let Err(e) = debug_log.set_enabled(true) {
            log::warn!("Could not enable debug logging: {:#}", e);
        }
    }
    Ok(debug_log)
}

/// Copy the debug log file to `output`
pub fn export(source: &Path, output: &Path) -> Result<u64> {
    if !source.exists() {
        anyhow::bail!(
            "No debug log at {}; enable debug_logging in the settings file first",
            source.display()
        );
    }
    fs::copy(source, output)
        .with_context(|| format!("Failed to copy {} to {}", source.display(), output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tee_writes_to_file_when_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join(DEBUG_LOG_FILE);

        let mut writer = TeeWriter::default();
        writer.write_all(b"before\n").unwrap();
        *writer.file.lock() = Some(open_append(&path).unwrap());
        writer.write_all(b"after\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "after\n");
    }

    #[test]
    fn test_export_copies_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join(DEBUG_LOG_FILE);
        let output = dir.path().join("export.txt");
        fs::write(&source, "line one\nline two\n").unwrap();

        let bytes = export(&source, &output).unwrap();
        assert_eq!(bytes, 18);
        assert_eq!(fs::read_to_string(&output).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_export_missing_log() {
        let dir = tempdir().unwrap();
        let result = export(&dir.path().join("missing.log"), &dir.path().join("out.txt"));
        assert!(result.is_err());
    }
}
