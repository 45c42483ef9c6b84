//! Navigation session: applies input events to the selection and the hold
//! gesture, and reports what the front end should do next.

use std::time::{Duration, Instant};

use dirlaunch_core::{CommandLine, CommandTree};

use crate::event::{Direction, NavEvent};

use super::gesture::HoldGestureTracker;
use super::navigation::Navigator;

/// Effect of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    None,
    /// The selection changed.
    Moved,
    /// Run this command line.
    Launch(CommandLine),
    /// The exit gesture completed; the session is over.
    Exit,
}

/// State of one interactive session over a command tree.
#[derive(Debug, Clone)]
pub struct Session {
    navigator: Navigator,
    gesture: HoldGestureTracker,
    running: bool,
}

impl Session {
    pub fn new(exit_hold: Duration) -> Self {
        Self {
            navigator: Navigator::new(),
            gesture: HoldGestureTracker::new(exit_hold),
            running: true,
        }
    }

    /// Open the root: the first top-level entry is selected when there is one.
    pub fn start(&mut self, tree: &CommandTree) {
        self.navigator = Navigator::new();
        self.navigator.enter(tree);
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn gesture(&self) -> &HoldGestureTracker {
        &self.gesture
    }

    /// Apply one event. Events after the session has ended are ignored.
    pub fn apply(&mut self, tree: &CommandTree, event: NavEvent, now: Instant) -> Transition {
        if !self.running {
            return Transition::None;
        }

        let moved = match event {
            NavEvent::Move(Direction::Up) => self.navigator.move_up(tree),
            NavEvent::Move(Direction::Down) => self.navigator.move_down(tree),
            NavEvent::Enter => self.navigator.enter(tree),
            NavEvent::Back => self.navigator.back(tree),
            NavEvent::Launch => {
                let node = self.navigator.selected(tree);
                if node.is_dir() {
                    self.navigator.enter(tree)
                } else if node.command.is_empty() {
                    false
                } else {
                    return Transition::Launch(node.command.clone());
                }
            }
            NavEvent::HoldPress(button) => {
                self.gesture.press(button, now);
                return self.tick(now);
            }
            NavEvent::HoldRelease(button) => {
                if self.gesture.release(button, now) {
                    return self.exit();
                }
                false
            }
        };

        if moved {
            Transition::Moved
        } else {
            Transition::None
        }
    }

    /// Advance time. Ends the session when both hold buttons have been down
    /// for the dwell.
    pub fn tick(&mut self, now: Instant) -> Transition {
        if self.running && self.gesture.poll(now) {
            return self.exit();
        }
        Transition::None
    }

    fn exit(&mut self) -> Transition {
        self.running = false;
        self.gesture.clear();
        Transition::Exit
    }

    /// Forget held buttons, e.g. after a child process owned the terminal.
    pub fn release_all(&mut self) {
        self.gesture.clear();
    }

    /// Carry the selection from `prev` over to a rebuilt `next` tree.
    ///
    /// Returns true when the previously selected path still exists.
    pub fn rebuild(&mut self, prev: &CommandTree, next: &CommandTree) -> bool {
        let path = self.navigator.selected(prev).path.clone();
        self.navigator.restore(next, &path)
    }

    /// Hold-to-exit progress for the indicator.
    pub fn hold_progress(&self, now: Instant) -> Option<f64> {
        self.gesture.progress(now)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Duration::from_secs(super::constants::EXIT_HOLD_SECS))
    }
}
