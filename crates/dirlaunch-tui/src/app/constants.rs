//! Application constants.

/// Seconds both hold buttons must stay down together to exit.
pub const EXIT_HOLD_SECS: u64 = 3;

/// Channel buffer size for scan results.
pub const SCAN_CHANNEL_SIZE: usize = 100;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;
