//! Watcher error types.

#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("failed to start filesystem observer on {path}: {source}")]
    Start {
        path: String,
        #[source]
        source: notify::Error,
    },
}

pub type Result<T> = std::result::Result<T, WatcherError>;
