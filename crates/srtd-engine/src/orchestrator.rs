//! The Orchestrator facade (spec.md §4.9): composes the engine into the
//! three top-level operations and guarantees scoped disposal of the
//! watcher, ledgers, and database pool on every exit path.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::info;

use srtd_core::Event;

use crate::engine::TemplateEngine;
use crate::error::Result;
use crate::options::{BatchResult, ProcessOptions};

const WATCH_OPTIONS: ProcessOptions = ProcessOptions {
    apply: true,
    generate_files: true,
    force: false,
    bundle: false,
};

/// A handle to a running watch session. `close()` is idempotent: it stops
/// the watcher thread and lets the in-flight drain finish before returning
/// (spec.md §5 "Cancellation").
pub struct WatchHandle {
    watch: Option<srtd_watch::WatchHandle>,
}

impl WatchHandle {
    pub fn close(&mut self) {
        if let Some(mut w) = self.watch.take() {
            w.close();
        }
    }
}

/// Composes [`TemplateEngine`] into the three operations a caller needs:
/// `build`, `apply`, `watch`. The engine lives behind a mutex so the
/// watcher thread (spawned only by `watch`) can hand off stabilized paths
/// without the facade running its own polling loop; outside of `watch`,
/// the lock is uncontended and every call is effectively single-threaded
/// (spec.md §5 "one item at a time" processing).
pub struct Orchestrator {
    engine: Arc<Mutex<TemplateEngine>>,
}

impl Orchestrator {
    pub fn open(project_root: PathBuf) -> Result<Self> {
        let engine = TemplateEngine::open(project_root)?;
        Ok(Orchestrator {
            engine: Arc::new(Mutex::new(engine)),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TemplateEngine> {
        self.engine.lock().expect("engine mutex poisoned")
    }

    pub fn on(&mut self, kind: &'static str, handler: impl Fn(&Event) + Send + 'static) {
        self.lock().on(kind, handler);
    }

    pub fn get_validation_warnings(&self) -> Vec<String> {
        self.lock().get_validation_warnings().to_vec()
    }

    pub fn get_recent_activity(&self) -> Vec<crate::activity::Activity> {
        self.lock().get_recent_activity()
    }

    pub fn find_templates(&self) -> Vec<std::path::PathBuf> {
        self.lock().find_templates()
    }

    pub fn get_status(&self, relative_path: &str) -> crate::status::TemplateStatus {
        self.lock().get_status(relative_path)
    }

    /// `apply(options)` sets `{apply: true, generate_files: false}`.
    pub fn apply(&self, force: bool) -> BatchResult {
        self.lock().process(ProcessOptions {
            apply: true,
            generate_files: false,
            force,
            bundle: false,
        })
    }

    /// `build(options)` sets `{generate_files: true, apply, bundle, force}`.
    pub fn build(&self, apply: bool, bundle: bool, force: bool) -> BatchResult {
        self.lock().process(ProcessOptions {
            apply,
            generate_files: true,
            force,
            bundle,
        })
    }

    /// Starts the watcher: enqueues every discovered template for an
    /// initial catch-up drain, then starts watching for debounced
    /// filesystem events (spec.md §4.7 "initial-scan semantics").
    pub fn watch(&self) -> Result<WatchHandle> {
        {
            let mut engine = self.lock();
            for path in engine.find_templates() {
                if let Some(relative_path) = relative_path_under(engine.project_root(), engine.config(), &path) {
                    engine.enqueue(&relative_path);
                }
            }
            engine.drain(WATCH_OPTIONS);
        }

        let root = {
            let engine = self.lock();
            engine.config().template_root(engine.project_root())
        };

        let engine_for_callback = self.engine.clone();
        let watch = srtd_watch::watch(root, move |path| {
            let mut engine = engine_for_callback.lock().expect("engine mutex poisoned");
            if let Some(relative_path) = relative_path_under(engine.project_root(), engine.config(), &path) {
                info!(relative_path, "watch event, enqueuing");
                engine.enqueue(&relative_path);
                engine.drain(WATCH_OPTIONS);
            }
        })?;

        Ok(WatchHandle { watch: Some(watch) })
    }
}

fn relative_path_under(
    project_root: &std::path::Path,
    config: &srtd_config::SrtdConfig,
    path: &std::path::Path,
) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("sql") {
        return None;
    }
    let root = config.template_root(project_root);
    path.strip_prefix(&root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}
