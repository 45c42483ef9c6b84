//! Background rescans.

use tokio::sync::mpsc;

use dirlaunch_core::{ScanConfig, ScanError};
use dirlaunch_scan::CommandScanner;

use super::constants::SCAN_CHANNEL_SIZE;
use super::state::ScanResult;

/// Start a background scan of `config.root`.
///
/// Returns a receiver that will receive scan progress updates and the final
/// tree. The tree is only delivered once complete.
pub fn start_scan(config: ScanConfig) -> mpsc::Receiver<ScanResult> {
    let (tx, rx) = mpsc::channel(SCAN_CHANNEL_SIZE);

    tokio::spawn(async move {
        let scanner = CommandScanner::new();
        let mut progress_rx = scanner.subscribe();

        // Spawn task to forward progress updates
        let tx_progress = tx.clone();
        let progress_task = tokio::spawn(async move {
            while let Ok(progress) = progress_rx.recv().await {
                if tx_progress.send(ScanResult::Progress(progress)).await.is_err() {
                    break;
                }
            }
        });

        // jwalk uses rayon internally
        let result = tokio::task::spawn_blocking(move || scanner.scan(&config))
            .await
            .unwrap_or_else(|e| {
                Err(ScanError::Other {
                    message: e.to_string(),
                })
            });

        progress_task.abort();
        let _ = tx.send(ScanResult::Complete(result)).await;
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scan_delivers_complete_tree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("cat")).unwrap();
        fs::write(temp.path().join("cat/notes.txt"), "hi").unwrap();

        let mut rx = start_scan(ScanConfig::new(temp.path()));
        let mut tree = None;
        while let Some(result) = rx.recv().await {
            if let ScanResult::Complete(result) = result {
                tree = Some(result.unwrap());
                break;
            }
        }

        let tree = tree.expect("scan completed");
        assert_eq!(tree.node_count(), 2);
    }

    #[tokio::test]
    async fn test_scan_reports_missing_root() {
        let temp = TempDir::new().unwrap();
        let mut rx = start_scan(ScanConfig::new(temp.path().join("nope")));
        loop {
            match rx.recv().await {
                Some(ScanResult::Complete(result)) => {
                    assert!(matches!(result, Err(ScanError::NotFound { .. })));
                    break;
                }
                Some(ScanResult::Progress(_)) => continue,
                None => panic!("channel closed without a result"),
            }
        }
    }
}
