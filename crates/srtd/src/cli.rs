//! Argument parsing for the `srtd` binary.
//!
//! Three subcommands only, mirroring the Orchestrator facade's three
//! top-level operations (spec.md §4.9, §12): `build`, `apply`, `watch`.
//! No `init`/`doctor`/`clear`/`promote`/`register` — those stay out of
//! scope per SPEC_FULL.md §1.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "srtd", about = "Live-reloading build engine for idempotent SQL templates")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Project root containing `.srtdrc.json`. Defaults to the current directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug-level logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Emit migration files for changed templates, optionally applying them too.
    Build(BuildArgs),
    /// Apply changed templates directly to the configured database.
    Apply(ApplyArgs),
    /// Watch the template directory and build/apply on every stabilized change.
    Watch,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Also apply each template to the database after emitting its migration file.
    #[arg(long)]
    pub apply: bool,

    /// Re-build/re-apply even when the content hash is unchanged.
    #[arg(long)]
    pub force: bool,

    /// Emit a single bundled migration file instead of one file per template.
    #[arg(long)]
    pub bundle: bool,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Re-apply even when the content hash is unchanged.
    #[arg(long)]
    pub force: bool,
}
