//! Debounced `*.sql` filesystem watcher.
//!
//! Raw `notify` events are coalesced per-path behind a debounce window so
//! that editor atomic-save storms (write temp file, rename, chmod) collapse
//! into a single stabilized event per edit (spec.md §4.8, S7).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tracing::{debug, warn};

use crate::error::{Result, WatcherError};

const DEBOUNCE: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A handle to a running watcher. `close()` is idempotent: it stops the
/// poll/debounce thread and tears down the underlying observer, letting
/// any in-flight callback invocation finish first.
pub struct WatchHandle {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub fn close(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Starts watching `root` recursively for `*.sql` add/change events.
///
/// `on_stabilized` is called with each path once its debounce window has
/// elapsed without a further event. It runs on the watcher's own thread, so
/// it must not block indefinitely -- the engine side is expected to only
/// push a path onto its processing queue.
pub fn watch<F>(root: PathBuf, on_stabilized: F) -> Result<WatchHandle>
where
    F: Fn(PathBuf) + Send + 'static,
{
    let (tx, rx) = channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .map_err(|e| WatcherError::Start {
        path: root.display().to_string(),
        source: e,
    })?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| WatcherError::Start {
            path: root.display().to_string(),
            source: e,
        })?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_thread = stop.clone();

    let join = std::thread::spawn(move || {
        // Keep the observer alive for the lifetime of the thread.
        let _watcher = watcher;
        let mut pending: HashMap<PathBuf, Instant> = HashMap::new();

        loop {
            if stop_thread.load(Ordering::SeqCst) {
                break;
            }

            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(event)) => {
                    for path in relevant_paths(&event) {
                        pending.insert(path, Instant::now());
                    }
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "filesystem observer error, continuing");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            let stabilized: Vec<PathBuf> = pending
                .iter()
                .filter(|(_, seen)| now.duration_since(**seen) >= DEBOUNCE)
                .map(|(path, _)| path.clone())
                .collect();

            for path in stabilized {
                pending.remove(&path);
                debug!(?path, "stabilized change");
                on_stabilized(path);
            }
        }
    });

    Ok(WatchHandle {
        stop,
        join: Some(join),
    })
}

fn relevant_paths(event: &Event) -> Vec<PathBuf> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|p| is_sql_file(p))
        .cloned()
        .collect()
}

fn is_sql_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("sql")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn is_sql_file_matches_only_sql_extension() {
        assert!(is_sql_file(Path::new("a/b/update_user.sql")));
        assert!(!is_sql_file(Path::new("a/b/update_user.sql.bak")));
        assert!(!is_sql_file(Path::new("a/b/readme.md")));
    }

    #[test]
    fn watch_fires_callback_on_file_write() {
        let dir = tempfile::tempdir().unwrap();
        let seen: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut handle = watch(dir.path().to_path_buf(), move |p| {
            seen_clone.lock().unwrap().push(p);
        })
        .unwrap();

        let file = dir.path().join("t.sql");
        std::fs::write(&file, "select 1;").unwrap();

        std::thread::sleep(Duration::from_millis(500));
        handle.close();

        let seen = seen.lock().unwrap();
        assert!(seen.iter().any(|p| p == &file));
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = watch(dir.path().to_path_buf(), |_| {}).unwrap();
        handle.close();
        handle.close();
    }
}
