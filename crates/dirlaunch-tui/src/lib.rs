//! Terminal front end for dirlaunch.
//!
//! Presents one directory level at a time and launches the command compiled
//! for the selected entry, handing the terminal to the child until it exits.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! dirlaunch_tui::run(PathBuf::from("testpath")).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `↑`/`k`, `↓`/`j` - Move within the level
//! - `→`/`l` - Enter directory
//! - `←`/`h`/`Backspace` - Back to the enclosing level
//! - `Enter`/`Space` - Launch (enters directories)
//! - `R` - Rescan
//! - `t` - Toggle theme
//! - hold `s` and `x` together - Exit

pub mod app;
mod event;
pub mod launcher;
mod terminal;
mod theme;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use dirlaunch_core::ScanConfig;

pub use app::{App, AppResult};
pub use event::{Direction, HoldButton, KeyAction, NavEvent};
pub use launcher::{LaunchOutcome, Launcher, ProcessHost, SystemHost};
pub use theme::Theme;

/// Configuration for the terminal front end.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// What to scan.
    pub scan: ScanConfig,
    /// How long both hold buttons must stay down to exit.
    pub exit_hold: Duration,
    /// Event loop tick interval.
    pub tick: Duration,
}

impl TuiConfig {
    pub fn new(scan: ScanConfig) -> Self {
        Self {
            scan,
            exit_hold: Duration::from_secs(app::EXIT_HOLD_SECS),
            tick: Duration::from_millis(app::TICK_INTERVAL_MS),
        }
    }

    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_exit_hold(mut self, exit_hold: Duration) -> Self {
        self.exit_hold = exit_hold;
        self
    }

    /// Set the tick interval. Intervals below one millisecond are raised to it.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

/// Run the TUI on `root` with default settings.
pub fn run(root: PathBuf) -> AppResult<()> {
    run_with_config(TuiConfig::new(ScanConfig::new(root)))
}

/// Run the TUI application.
pub fn run_with_config(config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let app = App::new(config);
    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.exit_hold, Duration::from_secs(3));
        assert_eq!(config.scan.root, PathBuf::from("testpath"));
    }

    #[test]
    fn test_config_setters() {
        let config = TuiConfig::default()
            .with_scan(ScanConfig::new("elsewhere"))
            .with_exit_hold(Duration::from_millis(500))
            .with_tick(Duration::ZERO);
        assert_eq!(config.scan.root, PathBuf::from("elsewhere"));
        assert_eq!(config.exit_hold, Duration::from_millis(500));
        assert_eq!(config.tick, Duration::from_millis(1));
    }
}
