//! Scan progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dirlaunch_core::NodeKind;

/// Progress information during a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Number of files scanned so far.
    pub files_scanned: u64,
    /// Number of directories scanned so far.
    pub dirs_scanned: u64,
    /// Last path visited.
    pub current_path: PathBuf,
    /// Number of warnings encountered.
    pub errors_count: u64,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total items scanned (files + dirs).
    pub fn total_items(&self) -> u64 {
        self.files_scanned + self.dirs_scanned
    }
}

/// Running counters for one scan.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_scanned: u64,
    dirs_scanned: u64,
    errors_count: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_scanned: 0,
            dirs_scanned: 0,
            errors_count: 0,
            current_path: PathBuf::new(),
        }
    }

    pub fn record(&mut self, kind: NodeKind, path: PathBuf) {
        if kind.is_dir() {
            self.dirs_scanned += 1;
        } else {
            self.files_scanned += 1;
        }
        self.current_path = path;
    }

    pub fn record_error(&mut self) {
        self.errors_count += 1;
    }

    pub fn total_items(&self) -> u64 {
        self.files_scanned + self.dirs_scanned
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            files_scanned: self.files_scanned,
            dirs_scanned: self.dirs_scanned,
            current_path: self.current_path.clone(),
            errors_count: self.errors_count,
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts() {
        let mut tracker = ProgressTracker::new();
        tracker.record(NodeKind::Directory, PathBuf::from("t/a"));
        tracker.record(NodeKind::File, PathBuf::from("t/a/b"));
        tracker.record_error();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.dirs_scanned, 1);
        assert_eq!(snapshot.files_scanned, 1);
        assert_eq!(snapshot.errors_count, 1);
        assert_eq!(snapshot.total_items(), 2);
        assert_eq!(snapshot.current_path, PathBuf::from("t/a/b"));
    }
}
