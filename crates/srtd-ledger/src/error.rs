//! Ledger error types.

/// Errors that can occur while loading or saving a [`srtd_core::BuildLog`].
///
/// Loading never produces this error for a malformed ledger -- that case
/// degrades to an empty ledger plus a validation warning (spec.md §4.3).
/// This type exists for the failure modes that *are* fatal: a save that
/// cannot write to disk.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger file could not be written.
    #[error("failed to write ledger {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The ledger's parent directory could not be created.
    #[error("failed to create ledger directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the in-memory ledger to JSON failed.
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
