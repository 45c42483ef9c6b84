//! Error types for scanning, launching and selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Walk failed below the root.
    #[error("Walk error at {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory entry.
    ReadError,
}

/// Non-fatal warning encountered during scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Convert a scan error on one entry into a warning.
    pub fn from_error(error: &ScanError) -> Self {
        match error {
            ScanError::PermissionDenied { path } => Self::permission_denied(path),
            ScanError::NotFound { path }
            | ScanError::Io { path, .. }
            | ScanError::NotADirectory { path }
            | ScanError::Walk { path, .. } => {
                Self::new(path, error.to_string(), WarningKind::ReadError)
            }
            ScanError::Other { message } => {
                Self::new(PathBuf::new(), message.clone(), WarningKind::ReadError)
            }
        }
    }
}

/// Errors from launching a command line.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The command line had no program name.
    #[error("Nothing to launch: empty command line")]
    EmptyCommand,

    /// The program could not be started.
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure.
    #[error("{program} exited with {}", exit_description(*.code))]
    Exit { program: String, code: Option<i32> },

    /// Both the original and the short-flag retry failed.
    #[error("{retry} (after retry; first attempt: {first})")]
    RetryFailed {
        first: Box<LaunchError>,
        retry: Box<LaunchError>,
    },
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// A selection index path points outside the tree.
///
/// Transitions clamp so this never reaches the user; it signals a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Selection index {index} at depth {depth} is out of bounds ({len} entries)")]
pub struct SelectionBoundsError {
    pub depth: usize,
    pub index: usize,
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
    }

    #[test]
    fn test_warning_from_error() {
        let err = ScanError::io("/x", std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no"));
        let warning = ScanWarning::from_error(&err);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));

        let err = ScanError::Walk {
            path: "/y".into(),
            message: "boom".into(),
        };
        let warning = ScanWarning::from_error(&err);
        assert_eq!(warning.kind, WarningKind::ReadError);
        assert_eq!(warning.path, PathBuf::from("/y"));
    }

    #[test]
    fn test_launch_error_messages() {
        let err = LaunchError::Exit {
            program: "foo".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "foo exited with status 2");

        let err = LaunchError::Exit {
            program: "foo".into(),
            code: None,
        };
        assert_eq!(err.to_string(), "foo exited with a signal");

        let retry = LaunchError::RetryFailed {
            first: Box::new(LaunchError::Exit {
                program: "foo".into(),
                code: Some(1),
            }),
            retry: Box::new(LaunchError::Exit {
                program: "foo".into(),
                code: Some(3),
            }),
        };
        assert!(retry.to_string().starts_with("foo exited with status 3"));
    }
}
