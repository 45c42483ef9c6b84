//! Core types for dirlaunch.
//!
//! This crate provides the data structures shared by the scanner and the
//! terminal front end: the mirrored node tree, the path-to-command compiler,
//! scan configuration and the error taxonomy.

pub mod command;
mod config;
mod error;
mod node;
mod tree;

pub use command::{compile, CommandLine, DELIMITER};
pub use config::{ScanConfig, ScanConfigBuilder, DEFAULT_ROOT};
pub use error::{LaunchError, ScanError, ScanWarning, SelectionBoundsError, WarningKind};
pub use node::{Node, NodeId, NodeKind};
pub use tree::{CommandTree, TreeStats, Walk};
