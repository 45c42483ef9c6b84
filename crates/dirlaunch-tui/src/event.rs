//! Event handling for the TUI.
//!
//! Key events are mapped to [`NavEvent`]s here; the session never sees key
//! codes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Direction of a move within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The two buttons of the hold-to-exit gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldButton {
    Start,
    Select,
}

/// Input consumed by the navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Move(Direction),
    Enter,
    Back,
    Launch,
    HoldPress(HoldButton),
    HoldRelease(HoldButton),
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an event to the session.
    Nav(NavEvent),
    /// Rescan the root in the background.
    Refresh,
    ToggleTheme,
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    ///
    /// Hold keys map presses and releases to the matching gesture events and
    /// ignore auto-repeat. Moves follow auto-repeat. Everything else acts on
    /// the initial press only.
    pub fn from_key_event(event: KeyEvent) -> Self {
        if let Some(button) = hold_button(event.code) {
            return match event.kind {
                KeyEventKind::Press => KeyAction::Nav(NavEvent::HoldPress(button)),
                KeyEventKind::Release => KeyAction::Nav(NavEvent::HoldRelease(button)),
                KeyEventKind::Repeat => KeyAction::None,
            };
        }

        match (event.code, event.kind) {
            (_, KeyEventKind::Release) => return KeyAction::None,
            (KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k'), _) => {}
            (_, KeyEventKind::Repeat) => return KeyAction::None,
            _ => {}
        }

        match (event.code, event.modifiers) {
            // Navigation - arrow keys
            (KeyCode::Up, _) => KeyAction::Nav(NavEvent::Move(Direction::Up)),
            (KeyCode::Down, _) => KeyAction::Nav(NavEvent::Move(Direction::Down)),
            (KeyCode::Right, _) => KeyAction::Nav(NavEvent::Enter),
            (KeyCode::Left, _) => KeyAction::Nav(NavEvent::Back),

            // Navigation - vim style
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Nav(NavEvent::Move(Direction::Up)),
            (KeyCode::Char('j'), KeyModifiers::NONE) => {
                KeyAction::Nav(NavEvent::Move(Direction::Down))
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Nav(NavEvent::Enter),
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Nav(NavEvent::Back),
            (KeyCode::Backspace, _) => KeyAction::Nav(NavEvent::Back),

            // Launch
            (KeyCode::Enter, _) => KeyAction::Nav(NavEvent::Launch),
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Nav(NavEvent::Launch),

            // Refresh (Shift-R)
            (KeyCode::Char('R'), _) => KeyAction::Refresh,

            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            _ => KeyAction::None,
        }
    }
}

fn hold_button(code: KeyCode) -> Option<HoldButton> {
    match code {
        KeyCode::Char('s') => Some(HoldButton::Start),
        KeyCode::Char('x') => Some(HoldButton::Select),
        _ => None,
    }
}

/// Key bindings shown in the footer, as `(keys, description)`.
pub const FOOTER_BINDINGS: &[(&str, &str)] = &[
    ("↑↓/jk", "move"),
    ("→/l", "enter"),
    ("←/h", "back"),
    ("⏎", "launch"),
    ("R", "rescan"),
    ("t", "theme"),
    ("s+x", "hold to exit"),
];
