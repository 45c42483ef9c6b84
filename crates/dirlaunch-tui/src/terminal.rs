//! Terminal setup beyond what `ratatui::init` does.

use std::io::stdout;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

/// Ask the terminal to report key releases.
///
/// Returns false when the terminal cannot, in which case hold keys fall back
/// to press-to-toggle.
pub fn enable_key_release() -> bool {
    let supported = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if !supported {
        tracing::debug!("terminal does not report key releases");
        return false;
    }
    match execute!(
        stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    ) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, "failed to enable key release reporting");
            false
        }
    }
}

/// Undo [`enable_key_release`].
pub fn disable_key_release(enabled: bool) {
    if enabled {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}
