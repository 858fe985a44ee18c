//! Core types and pure algorithms for the srtd template build engine.
//!
//! This crate has no I/O: file reading, ledger persistence, database
//! access, and filesystem watching all live in their own crates
//! (`srtd-config`, `srtd-ledger`, `srtd-db`, `srtd-watch`) that depend on
//! the types defined here.

pub mod dependency;
pub mod event;
pub mod hash;
pub mod ledger;
pub mod template;
pub mod timestamp;

pub use dependency::{Cycle, DependencyGraph};
pub use event::Event;
pub use ledger::{BuildLog, LedgerKind, TemplateBuildState, LEDGER_VERSION};
pub use template::Template;
