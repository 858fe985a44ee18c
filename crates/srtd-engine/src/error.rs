//! Fatal, setup-level engine errors.
//!
//! Per-template failures are *not* represented here -- they stay local to a
//! template's ledger entry and the event bus (spec.md §7). Only failures
//! that prevent the engine from operating at all surface through this type.

#[derive(Debug, thiserror::Error)]
pub enum FatalSetupError {
    #[error("project root not found or not a directory: {0}")]
    ProjectRootNotFound(String),

    #[error(transparent)]
    Database(#[from] srtd_db::FatalSetupError),

    #[error(transparent)]
    Watcher(#[from] srtd_watch::WatcherError),
}

pub type Result<T> = std::result::Result<T, FatalSetupError>;
