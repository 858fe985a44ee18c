//! A debounced `notify`-based filesystem watcher for the srtd template
//! engine. Fully synchronous: the watcher runs on its own thread and talks
//! to the engine only through a callback invoked once a path's changes
//! have stabilized.

pub mod error;
pub mod watcher;

pub use error::{Result, WatcherError};
pub use watcher::{watch, WatchHandle};
