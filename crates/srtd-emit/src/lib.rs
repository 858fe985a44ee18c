//! Migration file rendering and emission for the srtd template engine.
//!
//! Composes a migration body (header, banner, transaction wrap, template
//! content, footer, provenance line), allocates a collision-free filename,
//! and writes it to the configured migration directory. Ledger field
//! updates on success are the engine's responsibility, not this crate's.

pub mod emitter;
pub mod error;

pub use emitter::{emit_bundle, emit_single, render_body, render_filename, BundleEntry, EmitOutcome};
pub use error::{EmitError, Result};
