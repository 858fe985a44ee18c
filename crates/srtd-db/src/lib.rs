//! Database application for the srtd template engine.
//!
//! Wraps the sync `postgres` driver behind an `r2d2` connection pool,
//! mirroring the teacher's choice to keep database access fully
//! synchronous -- no async runtime is introduced anywhere in this repo.

pub mod applier;
pub mod error;
pub mod lock;

pub use applier::DatabaseApplier;
pub use error::{ApplyError, FatalSetupError, Result};
pub use lock::advisory_lock_key;
