//! Template directory watcher for hot reload.
//!
//! The notify callback only forwards events into a channel. A single
//! [`TemplateReloader`] task drains that channel and reloads one burst at a
//! time, so reloads are totally ordered. A burst ends once no event has
//! arrived for the settle period; a truncate-then-write save or a
//! multi-file edit is reloaded once, after it is complete.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::observability::metrics;
use crate::templates::set::TemplateSet;
use crate::templates::store::TemplateStore;

/// A filesystem change under the template directory.
#[derive(Debug, Clone)]
pub struct TemplateEvent {
    pub paths: Vec<PathBuf>,
}

/// Watches the template directory (non-recursively).
pub struct TemplateWatcher {
    dir: PathBuf,
    event_tx: mpsc::UnboundedSender<TemplateEvent>,
}

impl TemplateWatcher {
    /// Create a new TemplateWatcher.
    ///
    /// Returns the watcher and a receiver for change events.
    pub fn new(dir: &Path) -> (Self, mpsc::UnboundedReceiver<TemplateEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        (
            Self {
                dir: dir.to_path_buf(),
                event_tx,
            },
            event_rx,
        )
    }

    /// Start watching. Events stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.event_tx;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::debug!(paths = ?event.paths, "Template change detected");
                        let _ = tx.send(TemplateEvent { paths: event.paths });
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Template watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.dir, "Template watcher started");
        Ok(watcher)
    }
}

/// Quiet period after the last event before a reload runs.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);

/// Applies template changes to the store, one at a time.
pub struct TemplateReloader {
    dir: PathBuf,
    store: TemplateStore,
    events: mpsc::UnboundedReceiver<TemplateEvent>,
    settle: Duration,
}

impl TemplateReloader {
    pub fn new(
        dir: PathBuf,
        store: TemplateStore,
        events: mpsc::UnboundedReceiver<TemplateEvent>,
    ) -> Self {
        Self {
            dir,
            store,
            events,
            settle: DEFAULT_SETTLE,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Process events until the channel closes or shutdown is signalled.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    let coalesced = self.settle_burst().await;
                    tracing::info!(paths = ?event.paths, coalesced, "Reloading templates");
                    self.reload().await;
                }
                _ = shutdown.recv() => break,
            }
        }
        tracing::info!("Template reloader stopped");
    }

    /// Swallow follow-up events until the directory has been quiet for the
    /// settle period. Returns how many events the burst held.
    async fn settle_burst(&mut self) -> usize {
        let mut coalesced = 1;
        while let Ok(Some(_)) = tokio::time::timeout(self.settle, self.events.recv()).await {
            coalesced += 1;
        }
        coalesced
    }

    /// Parse the directory and publish the new set. Returns whether it was published.
    pub async fn reload(&self) -> bool {
        let dir = self.dir.clone();
        match tokio::task::spawn_blocking(move || TemplateSet::load(&dir)).await {
            Ok(Ok(set)) => {
                self.store.replace(set);
                metrics::record_template_reload(true);
                tracing::info!(path = ?self.dir, "Templates reloaded");
                true
            }
            Ok(Err(e)) => {
                metrics::record_template_reload(false);
                tracing::error!(error = %e, "Failed to reload templates. Keeping current templates.");
                false
            }
            Err(e) => {
                metrics::record_template_reload(false);
                tracing::error!(error = %e, "Template reload task failed");
                false
            }
        }
    }
}

/// A running watch. Dropping it stops filesystem notifications.
pub struct WatchHandle {
    watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Stop watching and wait for the reloader to finish.
    ///
    /// The reloader exits on the shutdown signal it was spawned with, so
    /// trigger that first.
    pub async fn stop(self) {
        drop(self.watcher);
        let _ = self.task.await;
    }
}

/// Start watching `dir` and reloading into `store`.
///
/// Returns `None` when the watch cannot be established; the service then keeps
/// the templates it started with for the rest of the process lifetime.
pub fn spawn_template_watch(
    dir: &Path,
    store: TemplateStore,
    shutdown: broadcast::Receiver<()>,
) -> Option<WatchHandle> {
    let (watcher, events) = TemplateWatcher::new(dir);
    let watcher = match watcher.run() {
        Ok(w) => w,
        Err(e) => {
            tracing::error!(
                path = ?dir,
                error = %e,
                "Unable to watch template directory; hot reload disabled"
            );
            return None;
        }
    };

    let reloader = TemplateReloader::new(dir.to_path_buf(), store, events);
    let task = tokio::spawn(reloader.run(shutdown));
    Some(WatchHandle {
        watcher,
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::set::{INDEX, SCRIPT, STYLESHEET};
    use std::fs;

    fn write_templates(dir: &Path, marker: &str) {
        fs::write(dir.join(INDEX), format!("<p>{}</p>", marker)).unwrap();
        fs::write(dir.join(STYLESHEET), format!("/* {} */", marker)).unwrap();
        fs::write(dir.join(SCRIPT), format!("// {}", marker)).unwrap();
    }

    fn index(store: &TemplateStore) -> String {
        store.current().render(INDEX, &()).unwrap()
    }

    fn fixture() -> (tempfile::TempDir, TemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path(), "v1");
        let store = TemplateStore::new(TemplateSet::load(dir.path()).unwrap());
        (dir, store)
    }

    #[tokio::test]
    async fn reload_publishes_new_set() {
        let (dir, store) = fixture();
        let (_tx, rx) = mpsc::unbounded_channel();
        let reloader = TemplateReloader::new(dir.path().to_path_buf(), store.clone(), rx);

        write_templates(dir.path(), "v2");
        assert!(reloader.reload().await);
        assert_eq!(index(&store), "<p>v2</p>");
    }

    #[tokio::test]
    async fn broken_reload_keeps_last_good_set() {
        let (dir, store) = fixture();
        let (_tx, rx) = mpsc::unbounded_channel();
        let reloader = TemplateReloader::new(dir.path().to_path_buf(), store.clone(), rx);

        fs::write(dir.path().join(INDEX), "{{#if}}").unwrap();
        assert!(!reloader.reload().await);
        assert_eq!(index(&store), "<p>v1</p>");
    }

    #[tokio::test]
    async fn events_drive_reloads_until_channel_closes() {
        let (dir, store) = fixture();
        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let reloader = TemplateReloader::new(dir.path().to_path_buf(), store.clone(), rx);
        let task = tokio::spawn(reloader.run(shutdown_rx));

        write_templates(dir.path(), "v2");
        for _ in 0..3 {
            tx.send(TemplateEvent { paths: vec![dir.path().join(INDEX)] }).unwrap();
        }
        drop(tx);
        task.await.unwrap();

        assert_eq!(index(&store), "<p>v2</p>");
    }

    #[tokio::test]
    async fn half_written_edit_is_not_published() {
        let (dir, store) = fixture();
        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let reloader = TemplateReloader::new(dir.path().to_path_buf(), store.clone(), rx)
            .with_settle(Duration::from_millis(300));
        tokio::spawn(reloader.run(shutdown_rx));

        // Truncated, then rewritten shortly after.
        fs::write(dir.path().join(INDEX), "").unwrap();
        tx.send(TemplateEvent { paths: vec![dir.path().join(INDEX)] }).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(index(&store), "<p>v1</p>");

        write_templates(dir.path(), "v2");
        tx.send(TemplateEvent { paths: vec![dir.path().join(INDEX)] }).unwrap();

        for _ in 0..100 {
            if index(&store) == "<p>v2</p>" {
                break;
            }
            assert_eq!(index(&store), "<p>v1</p>");
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(index(&store), "<p>v2</p>");
        assert_eq!(store.current().render(STYLESHEET, &()).unwrap(), "/* v2 */");
    }

    #[tokio::test]
    async fn shutdown_stops_reloader() {
        let (dir, store) = fixture();
        let (_tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let task = tokio::spawn(
            TemplateReloader::new(dir.path().to_path_buf(), store, rx).run(shutdown_rx),
        );

        shutdown_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("reloader should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn missing_directory_disables_watch() {
        let store = TemplateStore::new(TemplateSet::from_sources([(INDEX, "boot")]).unwrap());
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = spawn_template_watch(Path::new("/no/such/templates"), store.clone(), shutdown_rx);
        assert!(handle.is_none());
        assert_eq!(index(&store), "boot");
    }
}
