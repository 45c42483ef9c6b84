//! Directory scanning engine for dirlaunch.
//!
//! This crate walks a root directory once with jwalk and mirrors it into a
//! [`CommandTree`], compiling every entry's command line as its node is
//! created.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirlaunch_scan::{CommandScanner, ScanConfig};
//!
//! let config = ScanConfig::new("testpath");
//! let tree = CommandScanner::new().scan(&config).unwrap();
//!
//! for (indices, node) in tree.walk() {
//!     println!("{indices:?} {} -> {}", node.path.display(), node.command);
//! }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use dirlaunch_scan::{CommandScanner, ScanConfig};
//!
//! let scanner = CommandScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Scanned {} entries", progress.total_items());
//!     }
//! });
//! ```

mod builder;
mod progress;
mod scanner;

pub use progress::ScanProgress;
pub use scanner::CommandScanner;

// Re-export core types for convenience
pub use dirlaunch_core::{
    CommandLine, CommandTree, Node, NodeId, NodeKind, ScanConfig, ScanError, ScanWarning,
    TreeStats, WarningKind,
};
