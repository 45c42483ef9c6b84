//! Hold-to-exit gesture tracking.

use std::time::{Duration, Instant};

use crate::event::HoldButton;

/// Tracks the two hold buttons and decides when the exit gesture completes.
///
/// The gesture completes once both buttons have been held together for the
/// dwell duration, measured from the later of the two presses.
#[derive(Debug, Clone)]
pub struct HoldGestureTracker {
    start: Option<Instant>,
    select: Option<Instant>,
    dwell: Duration,
}

impl HoldGestureTracker {
    pub fn new(dwell: Duration) -> Self {
        Self {
            start: None,
            select: None,
            dwell,
        }
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    fn slot(&mut self, button: HoldButton) -> &mut Option<Instant> {
        match button {
            HoldButton::Start => &mut self.start,
            HoldButton::Select => &mut self.select,
        }
    }

    /// Record a press. A button already held keeps its original press time.
    pub fn press(&mut self, button: HoldButton, now: Instant) {
        self.slot(button).get_or_insert(now);
    }

    /// Record a release. Returns true when it completes the gesture.
    pub fn release(&mut self, button: HoldButton, now: Instant) -> bool {
        let completed = self.poll(now);
        *self.slot(button) = None;
        completed
    }

    /// Whether both buttons are held with enough overlap to exit.
    pub fn poll(&self, now: Instant) -> bool {
        self.overlap(now).is_some_and(|held| held >= self.dwell)
    }

    /// Fraction of the dwell reached while both buttons are held.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let held = self.overlap(now)?;
        if self.dwell.is_zero() {
            return Some(1.0);
        }
        Some((held.as_secs_f64() / self.dwell.as_secs_f64()).min(1.0))
    }

    pub fn is_held(&self, button: HoldButton) -> bool {
        match button {
            HoldButton::Start => self.start.is_some(),
            HoldButton::Select => self.select.is_some(),
        }
    }

    /// Forget both buttons.
    pub fn clear(&mut self) {
        self.start = None;
        self.select = None;
    }

    fn overlap(&self, now: Instant) -> Option<Duration> {
        let (start, select) = (self.start?, self.select?);
        Some(now.saturating_duration_since(start.max(select)))
    }
}

impl Default for HoldGestureTracker {
    fn default() -> Self {
        Self::new(Duration::from_secs(super::constants::EXIT_HOLD_SECS))
    }
}
