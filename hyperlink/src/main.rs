#[cfg(target_os = "macos")]
mod app;
mod commands;
mod logging;
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod watcher;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hyperlink_core::Settings;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hyperlink", version, about = "Copy the active browser tab URL with a keyboard shortcut")]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the menu bar app (default)
    Run,
    /// Capture the URL of the front-most browser once and print it
    Copy,
    /// Check GitHub for a newer release
    CheckUpdate,
    /// Show the capture shortcut, or set it from a spec such as `cmd+shift+c`
    Shortcut {
        spec: Option<String>,
    },
    /// Reset all settings to their defaults
    Reset,
    /// Copy the debug log file to OUTPUT
    DebugLog {
        #[arg(long, short, value_name = "OUTPUT")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    // A broken settings file must not keep the logger from starting
    let debug_logging = Settings::load(config).map(|s| s.debug_logging).unwrap_or(false);
    let debug_log = logging::init(debug_logging)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            info!("Starting Hyperlink {}", env!("CARGO_PKG_VERSION"));
            commands::run_app(config, debug_log)
        }
        Command::Copy => commands::copy_once(config),
        Command::CheckUpdate => commands::check_update().await,
        Command::Shortcut { spec } => commands::shortcut(config, spec.as_deref()),
        Command::Reset => commands::reset(config),
        Command::DebugLog { output } => commands::export_debug_log(&debug_log, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = Cli::try_parse_from(["hyperlink"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["hyperlink", "shortcut", "cmd+l", "--config", "/tmp/s.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
        match cli.command {
            Some(Command::Shortcut { spec }) => assert_eq!(spec.as_deref(), Some("cmd+l")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_debug_log_requires_output() {
        assert!(Cli::try_parse_from(["hyperlink", "debug-log"]).is_err());
        assert!(Cli::try_parse_from(["hyperlink", "debug-log", "-o", "log.txt"]).is_ok());
    }
}
