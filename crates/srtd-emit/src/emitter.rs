//! Migration file rendering, filename allocation, and atomic emission.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use srtd_config::SrtdConfig;
use srtd_core::template::Template;
use srtd_core::timestamp;

use crate::error::{EmitError, Result};

const PROVENANCE_LINE: &str = "-- Built with https://github.com/t1mmen/srtd";

/// The outcome of a successful single-template or bundle emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutcome {
    pub filename: String,
    pub path: PathBuf,
    pub timestamp: String,
    /// The value the caller should persist as the ledger's `last_timestamp`.
    pub new_last_timestamp: String,
}

/// One template's contribution to a bundle, already resolved by the
/// caller (dependency order, WIP/unchanged filtering already applied).
pub struct BundleEntry<'a> {
    pub template: &'a Template,
    pub content: &'a str,
}

/// Renders a single template's migration body (header, optional banner,
/// optional transaction wrap, body, footer, provenance line) -- without
/// allocating a filename or touching disk. Exposed separately so tests and
/// the bundle renderer can compose bodies without an `EmitOutcome`.
pub fn render_body(
    template_dir_label: &str,
    template: &Template,
    content: &str,
    config: &SrtdConfig,
    previous_migration_file: Option<&str>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "-- Generated with srtd from template: {}/{}.sql\n",
        template_dir_label, template.name
    ));

    if !config.banner.trim().is_empty() {
        out.push_str(&format!("-- {}\n", config.banner));
    }

    if config.wrap_in_transaction {
        out.push_str("BEGIN;\n\n");
    }

    out.push_str(content.trim_end());

    if config.wrap_in_transaction {
        out.push_str("\n\nCOMMIT;");
    }

    if !config.footer.is_empty() {
        out.push('\n');
        out.push_str(&config.footer);
    }

    out.push('\n');
    out.push_str(&format!(
        "-- Last built: {}\n",
        previous_migration_file.unwrap_or("Never")
    ));
    out.push_str(PROVENANCE_LINE);
    out.push('\n');

    out
}

/// Substitutes `$timestamp`, `$prefix`, `$migrationName` into the
/// configured filename pattern using literal (non-regex) replacement, so a
/// migration name containing `$&`-style sequences can never reinterpret
/// the pattern (spec.md §9 design note).
pub fn render_filename(pattern: &str, timestamp: &str, prefix: &str, migration_name: &str) -> String {
    let prefix_expanded = if prefix.is_empty() {
        String::new()
    } else {
        format!("{prefix}-")
    };

    pattern
        .replace("$timestamp", timestamp)
        .replace("$prefix", &prefix_expanded)
        .replace("$migrationName", migration_name)
}

/// Emits a single template's migration file.
///
/// Allocates a timestamp via [`timestamp::next`], re-allocating (strictly
/// increasing) as long as the resulting filename already exists on disk --
/// the no-overwrite invariant (spec.md §4.5, S3).
#[allow(clippy::too_many_arguments)]
pub fn emit_single(
    template_dir_label: &str,
    template: &Template,
    content: &str,
    config: &SrtdConfig,
    migration_root: &Path,
    last_timestamp: &str,
    previous_migration_file: Option<&str>,
    now: DateTime<Utc>,
) -> Result<EmitOutcome> {
    let body = render_body(template_dir_label, template, content, config, previous_migration_file);
    write_with_unique_filename(
        migration_root,
        config,
        last_timestamp,
        &template.name,
        &body,
        now,
    )
}

/// Emits a single bundle file: the concatenation of every entry's own
/// rendered body, in the order given by the caller (the dependency
/// resolver's topological order). The caller is responsible for excluding
/// WIP and unchanged templates before calling this.
pub fn emit_bundle(
    template_dir_label: &str,
    entries: &[BundleEntry<'_>],
    config: &SrtdConfig,
    migration_root: &Path,
    last_timestamp: &str,
    now: DateTime<Utc>,
) -> Result<EmitOutcome> {
    let mut body = String::new();
    for entry in entries {
        body.push_str(&render_body(
            template_dir_label,
            entry.template,
            entry.content,
            config,
            None,
        ));
        body.push('\n');
    }

    write_with_unique_filename(migration_root, config, last_timestamp, "bundle", &body, now)
}

fn write_with_unique_filename(
    migration_root: &Path,
    config: &SrtdConfig,
    last_timestamp: &str,
    migration_name: &str,
    body: &str,
    now: DateTime<Utc>,
) -> Result<EmitOutcome> {
    std::fs::create_dir_all(migration_root).map_err(|e| EmitError::CreateDir {
        path: migration_root.display().to_string(),
        source: e,
    })?;

    let mut effective_last = last_timestamp.to_string();
    let (mut ts, mut new_last) = timestamp::next(now, &effective_last);
    let mut filename = render_filename(&config.migration_filename, &ts, &config.migration_prefix, migration_name);
    let mut path = migration_root.join(&filename);

    // An existing file on disk at this timestamp is treated as if the
    // ledger's `last_timestamp` were already at that value -- keep
    // reallocating until the filename is free (spec.md §4.5 collision
    // invariant, S3).
    while path.exists() {
        effective_last = ts.clone();
        let (next_ts, next_last) = timestamp::next(now, &effective_last);
        ts = next_ts;
        new_last = next_last;
        filename = render_filename(&config.migration_filename, &ts, &config.migration_prefix, migration_name);
        path = migration_root.join(&filename);
    }

    std::fs::write(&path, body).map_err(|e| EmitError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(EmitOutcome {
        filename,
        path,
        timestamp: ts,
        new_last_timestamp: new_last,
    })
}
