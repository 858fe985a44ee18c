//! `srtd` -- the thin CLI entry point over the template engine.
//!
//! Wires `build` / `apply` / `watch` to `srtd_engine::Orchestrator`. No
//! other surface: the TUI, JSON-event formatter, and `init`/`doctor`/
//! `clear`/`promote`/`register` commands stay out of scope (SPEC_FULL.md §1).

mod cli;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use cli::{ApplyArgs, BuildArgs, Cli, Commands, GlobalArgs};
use srtd_engine::{BatchResult, Orchestrator};

fn main() {
    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("srtd=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = run(&cli.global, cli.command);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(global: &GlobalArgs, command: Commands) -> anyhow::Result<()> {
    let project_root = global
        .config
        .clone()
        .unwrap_or_else(|| std::env::current_dir().expect("current directory is readable"));

    let mut orchestrator = Orchestrator::open(project_root)?;

    for warning in orchestrator.get_validation_warnings() {
        eprintln!("warning: {warning}");
    }

    orchestrator.on("templateApplied", |event| {
        tracing::info!(relative_path = event.relative_path(), "applied");
    });
    orchestrator.on("templateBuilt", |event| {
        tracing::info!(relative_path = event.relative_path(), "built");
    });
    orchestrator.on("templateError", |event| {
        tracing::error!(relative_path = event.relative_path(), "error");
    });

    match command {
        Commands::Build(args) => {
            let result = do_build(&orchestrator, args);
            report(&result);
        }
        Commands::Apply(args) => {
            let result = do_apply(&orchestrator, args);
            report(&result);
        }
        Commands::Watch => {
            do_watch(orchestrator)?;
        }
    }

    Ok(())
}

fn do_build(orchestrator: &Orchestrator, args: BuildArgs) -> BatchResult {
    orchestrator.build(args.apply, args.bundle, args.force)
}

fn do_apply(orchestrator: &Orchestrator, args: ApplyArgs) -> BatchResult {
    orchestrator.apply(args.force)
}

/// Runs `watch()` until Ctrl+C, then closes the handle. Mirrors the
/// teacher's `bd::main` graceful-shutdown signal handling: first Ctrl+C
/// stops cleanly, a second forces exit.
fn do_watch(orchestrator: Orchestrator) -> anyhow::Result<()> {
    let mut handle = orchestrator.watch()?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = stop.clone();
    ctrlc::set_handler(move || {
        if stop_signal.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
    })?;

    println!("watching for template changes, press Ctrl+C to stop");
    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    handle.close();
    Ok(())
}

fn report(result: &BatchResult) {
    println!(
        "built={} applied={} skipped={} errors={}",
        result.built.len(),
        result.applied.len(),
        result.skipped.len(),
        result.errors.len()
    );
    for failure in &result.errors {
        eprintln!("  {}: {}", failure.relative_path, failure.message);
    }
}
