/// Settings file watcher for live reload.

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::Path;

/// Watch the directory holding `settings_path` and call `on_change` when the file is written.
///
/// The parent directory is watched so editors that save by replacing the file are seen too.
/// Dropping the returned watcher stops watching.
pub fn watch_settings<F>(settings_path: &Path, on_change: F) -> Result<RecommendedWatcher>
where
    F: Fn() + Send + 'static,
{
    let file_name = settings_path
        .file_name()
        .context("Settings path has no file name")?
        .to_os_string();
    let parent_dir = settings_path.parent().unwrap_or(settings_path);

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if touches_settings(&event, &file_name) {
                    on_change();
                }
            }
            Err(e) => log::warn!("Settings watch error: {}", e),
        },
        Config::default(),
    )
    .context("Failed to create settings watcher")?;

    watcher
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", parent_dir.display()))?;

    log::info!("Watching settings for changes: {}", settings_path.display());
    Ok(watcher)
}

fn touches_settings(event: &Event, file_name: &OsString) -> bool {
    let is_write = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
    is_write
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_settings_writes_are_detected() {
        let name = OsString::from("settings.toml");
        assert!(touches_settings(
            &event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), "/cfg/hyperlink/settings.toml"),
            &name
        ));
        assert!(touches_settings(
            &event(EventKind::Create(CreateKind::File), "/cfg/hyperlink/settings.toml"),
            &name
        ));
    }

    #[test]
    fn test_other_events_are_ignored() {
        let name = OsString::from("settings.toml");
        assert!(!touches_settings(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/hyperlink/settings.toml.swp"),
            &name
        ));
        assert!(!touches_settings(
            &event(EventKind::Remove(RemoveKind::File), "/cfg/hyperlink/settings.toml"),
            &name
        ));
    }
}
