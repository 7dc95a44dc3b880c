use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use anyhow::Result;
use gex_core::RawMarketSnapshot;
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::watch;

use crate::input::read_snapshot;

/// How often the blocking loop checks whether anyone is still listening.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Publishes the latest parsed snapshot whenever its file changes.
///
/// A write that fails to parse (e.g. caught mid-write) is logged and the
/// previous snapshot stays current.
pub struct SnapshotWatcher {
    tx: watch::Sender<RawMarketSnapshot>,
}

impl SnapshotWatcher {
    /// Creates a watcher seeded with the snapshot already on disk.
    ///
    /// Returns the watcher and a receiver for snapshot updates.
    #[must_use]
    pub fn new(initial: RawMarketSnapshot) -> (Self, watch::Receiver<RawMarketSnapshot>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }

    /// Watches the snapshot file until every receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if file watching cannot be started or the watcher
    /// task fails.
    pub async fn watch(&self, path: &Path) -> Result<()> {
        let tx = self.tx.clone();
        let path: PathBuf = path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let (notify_tx, notify_rx) = std::sync::mpsc::channel();

            let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            })?;

            watcher.watch(&path, RecursiveMode::NonRecursive)?;
            tracing::info!(path = %path.display(), "Watching snapshot file");

            loop {
                let event = match notify_rx.recv_timeout(POLL_INTERVAL) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) if tx.is_closed() => break,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    continue;
                }
                match read_snapshot(&path) {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                        tracing::debug!("Snapshot reloaded");
                    }
                    Err(e) => {
                        tracing::warn!(error = %format!("{e:#}"), "Skipping unreadable snapshot");
                    }
                }
            }

            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_starts_at_initial_snapshot() {
        let (_watcher, rx) = SnapshotWatcher::new(RawMarketSnapshot::new(450.0));
        assert_eq!(rx.borrow().spot_price, Some(450.0));
    }

    #[tokio::test]
    async fn missing_file_fails_to_watch() {
        let (watcher, _rx) = SnapshotWatcher::new(RawMarketSnapshot::new(450.0));
        let result = watcher.watch(Path::new("/nonexistent/snapshot.json")).await;
        assert!(result.is_err());
    }
}
