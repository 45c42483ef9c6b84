//! JWalk-based directory scanner.

use std::path::Path;
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;

use dirlaunch_core::{CommandTree, NodeKind, ScanConfig, ScanError, ScanWarning, TreeStats};

use crate::builder::{Inserted, TreeBuilder};
use crate::progress::{ProgressTracker, ScanProgress};

/// Number of entries between progress broadcasts.
const PROGRESS_INTERVAL: u64 = 256;

/// Scanner that mirrors a directory into a [`CommandTree`].
pub struct CommandScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl CommandScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk `config.root` once and build the command tree.
    ///
    /// Entries that cannot be read become warnings on the returned tree and
    /// the walk carries on. Only an unusable root is an error.
    pub fn scan(&self, config: &ScanConfig) -> Result<CommandTree, ScanError> {
        let start = Instant::now();
        let root_path = config.root.as_path();

        let metadata = std::fs::metadata(root_path).map_err(|e| ScanError::io(root_path, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root_path.to_path_buf(),
            });
        }

        let mut builder = TreeBuilder::new(root_path);
        let mut stats = TreeStats::new();
        let mut warnings = Vec::new();
        let mut tracker = ProgressTracker::new();

        for entry_result in self.walker(config) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    let error = match err.io_error().map(std::io::Error::kind) {
                        Some(std::io::ErrorKind::PermissionDenied) => {
                            ScanError::PermissionDenied { path: path.clone() }
                        }
                        _ => ScanError::Walk {
                            path: path.clone(),
                            message: err.to_string(),
                        },
                    };
                    let warning = ScanWarning::from_error(&error);
                    tracing::warn!(path = %path.display(), "{}", warning.message);
                    warnings.push(warning);
                    tracker.record_error();
                    continue;
                }
            };

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root_path) else {
                tracing::debug!(path = %path.display(), "entry outside root, skipped");
                continue;
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                NodeKind::Directory
            } else if file_type.is_symlink() {
                NodeKind::Symlink
            } else if file_type.is_file() {
                NodeKind::File
            } else {
                NodeKind::Other
            };

            if builder.insert(relative, kind) != Inserted::Created {
                continue;
            }

            let depth = entry.depth() as u32;
            match kind {
                NodeKind::Directory => stats.record_dir(depth),
                NodeKind::Symlink => stats.record_symlink(depth),
                NodeKind::File | NodeKind::Other => stats.record_file(depth),
            }

            tracker.record(kind, path.clone());
            if tracker.total_items() % PROGRESS_INTERVAL == 0 {
                let _ = self.progress_tx.send(tracker.snapshot());
            }
        }

        let _ = self.progress_tx.send(tracker.snapshot());

        let scan_duration = start.elapsed();
        tracing::debug!(
            root = %root_path.display(),
            files = stats.total_files,
            dirs = stats.total_dirs,
            warnings = warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(CommandTree::new(
            builder.finish(),
            config.clone(),
            stats,
            scan_duration,
            warnings,
        ))
    }

    fn walker(&self, config: &ScanConfig) -> WalkDir {
        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: std::time::Duration::from_millis(100),
            },
            1 => Parallelism::Serial,
            n => Parallelism::RayonNewPool(n),
        };

        // Ignored names are pruned before descent so their subtrees are never read.
        let filter = config.clone();
        WalkDir::new(&config.root)
            .parallelism(parallelism)
            .sort(config.sort)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(1)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX))
            .process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !filter.should_ignore(&entry.file_name().to_string_lossy()),
                    Err(_) => true,
                });
            })
    }
}

impl Default for CommandScanner {
    fn default() -> Self {
        Self::new()
    }
}
