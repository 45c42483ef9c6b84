//! Main application state and logic.

mod constants;
#[cfg(test)]
pub(crate) mod fixtures;
mod gesture;
pub mod navigation;
mod render;
mod scanning;
pub mod session;
pub mod state;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use dirlaunch_core::{CommandLine, CommandTree, LaunchError};
use dirlaunch_scan::{CommandScanner, ScanProgress};

use crate::event::{KeyAction, NavEvent};
use crate::launcher::{LaunchOutcome, Launcher};
use crate::terminal::{disable_key_release, enable_key_release};
use crate::theme::Theme;
use crate::ui::{LevelState, LevelView};
use crate::TuiConfig;

pub use self::constants::{EXIT_HOLD_SECS, TICK_INTERVAL_MS};
pub use self::gesture::HoldGestureTracker;
pub use self::navigation::{Navigator, Selection};
pub use self::session::{Session, Transition};

use self::render::{render_app, RenderContext};
use self::state::{ScanResult, StatusMessage};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    config: TuiConfig,
    tree: CommandTree,
    session: Session,
    launcher: Launcher,
    theme: Theme,
    list_state: LevelState,
    status: Option<StatusMessage>,
    scan_rx: Option<mpsc::Receiver<ScanResult>>,
    scan_progress: Option<ScanProgress>,
    /// Command to run once the current batch of input is applied.
    pending_launch: Option<CommandLine>,
    /// Whether the terminal reports key releases.
    release_reporting: bool,
    needs_redraw: bool,
}

impl App {
    /// Scan the configured root and open a session on it.
    ///
    /// A root that cannot be scanned yields an empty tree and an error on the
    /// status line; the session still starts.
    pub fn new(config: TuiConfig) -> Self {
        let (tree, status) = match CommandScanner::new().scan(&config.scan) {
            Ok(tree) => {
                tracing::info!(
                    root = %tree.root_path.display(),
                    entries = tree.node_count(),
                    warnings = tree.warnings.len(),
                    "initial scan complete"
                );
                let status = scan_status(&tree);
                (tree, status)
            }
            Err(err) => {
                tracing::error!(%err, "initial scan failed");
                let status = StatusMessage::error(err.to_string());
                (CommandTree::empty(config.scan.clone()), Some(status))
            }
        };

        let mut session = Session::new(config.exit_hold);
        session.start(&tree);

        Self {
            config,
            tree,
            session,
            launcher: Launcher::default(),
            theme: Theme::default(),
            list_state: LevelState::default(),
            status,
            scan_rx: None,
            scan_progress: None,
            pending_launch: None,
            release_reporting: false,
            needs_redraw: true,
        }
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        self.release_reporting = enable_key_release();

        let mut interval = tokio::time::interval(self.config.tick);
        let mut events = EventStream::new();

        while self.session.is_running() {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_event(event);

                    // Drain any additional pending events
                    while self.session.is_running()
                        && self.pending_launch.is_none()
                        && crossterm::event::poll(Duration::ZERO)?
                    {
                        let event = crossterm::event::read()?;
                        self.handle_event(event);
                    }
                    self.needs_redraw = true;
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.scan_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_scan_result(result);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    let now = Instant::now();
                    if self.session.hold_progress(now).is_some() {
                        self.needs_redraw = true;
                    }
                    if self.session.tick(now) == Transition::Exit {
                        tracing::info!("exit gesture completed");
                    }
                }
            }

            // The child owns the terminal until it exits. The event stream's
            // reader thread would otherwise keep reading stdin underneath it.
            if let Some(command) = self.pending_launch.take() {
                drop(events);
                disable_key_release(self.release_reporting);
                ratatui::restore();

                println!("$ {command}");
                let result = self.launcher.execute(&command);

                terminal = ratatui::init();
                self.release_reporting = enable_key_release();
                events = EventStream::new();
                self.finish_launch(result);
                self.needs_redraw = true;
            }
        }

        disable_key_release(self.release_reporting);
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        let view = LevelView::build(
            &self.tree,
            self.session.navigator(),
            self.session.hold_progress(now),
        );
        let ctx = RenderContext {
            theme: &self.theme,
            tree: &self.tree,
            view: &view,
            scan_progress: self.scan_progress.as_ref(),
            status: self.status.as_ref(),
        };
        render_app(&ctx, frame.area(), frame.buffer_mut(), &mut self.list_state);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Resize(..) => self.needs_redraw = true,
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let action = match KeyAction::from_key_event(key) {
            // Without release reports a second press stands in for the release.
            KeyAction::Nav(NavEvent::HoldPress(button))
                if !self.release_reporting && self.session.gesture().is_held(button) =>
            {
                KeyAction::Nav(NavEvent::HoldRelease(button))
            }
            action => action,
        };
        self.handle_action(action);
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Nav(event) => self.apply(event, Instant::now()),
            KeyAction::Refresh => self.start_scan(),
            KeyAction::ToggleTheme => self.theme = self.theme.toggle(),
            KeyAction::None => {}
        }
    }

    fn apply(&mut self, event: NavEvent, now: Instant) {
        match self.session.apply(&self.tree, event, now) {
            Transition::Launch(command) => self.pending_launch = Some(command),
            Transition::Exit => tracing::info!("exit gesture completed"),
            Transition::Moved | Transition::None => {}
        }
    }

    fn finish_launch(&mut self, result: Result<LaunchOutcome, LaunchError>) {
        // Releases that happened while the child ran were never seen.
        self.session.release_all();

        self.status = Some(match result {
            Ok(LaunchOutcome::Completed) => StatusMessage::success("Command finished"),
            Ok(LaunchOutcome::CompletedWithShortFlags(retry)) => {
                StatusMessage::warning(format!("Finished with short flags: {retry}"))
            }
            Err(err) => StatusMessage::error(err.to_string()),
        });
    }

    /// Start a background rescan of the root. Ignored while one is running.
    fn start_scan(&mut self) {
        if self.scan_rx.is_some() {
            return;
        }
        let root = self.config.scan.root.display();
        tracing::debug!(%root, "rescan requested");
        self.status = Some(StatusMessage::info(format!("Rescanning {root}…")));
        self.scan_progress = Some(ScanProgress::new());
        self.scan_rx = Some(scanning::start_scan(self.config.scan.clone()));
    }

    /// Handle a scan result from the background task.
    fn handle_scan_result(&mut self, result: ScanResult) {
        match result {
            ScanResult::Progress(progress) => {
                self.scan_progress = Some(progress);
            }
            ScanResult::Complete(Ok(tree)) => {
                self.install_tree(tree);
                self.scan_rx = None;
                self.scan_progress = None;
            }
            ScanResult::Complete(Err(err)) => {
                tracing::error!(%err, "rescan failed");
                self.status = Some(StatusMessage::error(format!("Rescan failed: {err}")));
                self.scan_rx = None;
                self.scan_progress = None;
            }
        }
    }

    /// Swap in a rebuilt tree, keeping the selection on the same entry.
    fn install_tree(&mut self, tree: CommandTree) {
        let kept = self.session.rebuild(&self.tree, &tree);
        tracing::info!(
            entries = tree.node_count(),
            warnings = tree.warnings.len(),
            selection_kept = kept,
            "rescan complete"
        );
        self.status = scan_status(&tree).or_else(|| {
            Some(StatusMessage::success(format!(
                "Rescanned {} entries",
                tree.node_count()
            )))
        });
        self.tree = tree;
    }
}

/// Status line summary of scan warnings, if any.
fn scan_status(tree: &CommandTree) -> Option<StatusMessage> {
    match tree.warnings.len() {
        0 => None,
        1 => Some(StatusMessage::warning(tree.warnings[0].message.clone())),
        n => Some(StatusMessage::warning(format!("{n} entries could not be read"))),
    }
}
