//! The [`BuildLog`] document shape shared by the shared and local ledgers.
//!
//! Two instances of this same shape exist at runtime: a committed *shared*
//! ledger carrying `last_build_*` fields, and an untracked *local* ledger
//! carrying `last_applied_*` fields. Both share the template-key space but
//! own distinct fields -- readers merge the two per-entry (see
//! [`TemplateBuildState::merge`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current ledger document version. Evolution is additive only.
pub const LEDGER_VERSION: &str = "1.0";

/// Per-template ledger entry. Every field is optional: absence means "never
/// occurred". Fields are stored as strings end-to-end (dates as ISO-8601
/// text) to keep the on-disk shape forgiving of schema drift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBuildState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_migration_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_error: Option<String>,
}

impl TemplateBuildState {
    /// `true` when this entry's `last_applied_hash` matches `current_hash`
    /// (the template is applied-clean).
    pub fn is_applied_clean(&self, current_hash: &str) -> bool {
        self.last_applied_hash.as_deref() == Some(current_hash)
    }

    /// `true` when this entry's `last_build_hash` matches `current_hash`
    /// (the template is build-clean).
    pub fn is_build_clean(&self, current_hash: &str) -> bool {
        self.last_build_hash.as_deref() == Some(current_hash)
    }

    /// Merges a shared-ledger entry and a local-ledger entry into a single
    /// view. Shared fields win from `shared`, local fields win from
    /// `local`; each side's "foreign" fields are ignored.
    pub fn merge(shared: Option<&Self>, local: Option<&Self>) -> Self {
        let mut out = TemplateBuildState::default();
        if let Some(s) = shared {
            out.last_build_hash = s.last_build_hash.clone();
            out.last_build_date = s.last_build_date.clone();
            out.last_build_error = s.last_build_error.clone();
            out.last_migration_file = s.last_migration_file.clone();
        }
        if let Some(l) = local {
            out.last_applied_hash = l.last_applied_hash.clone();
            out.last_applied_date = l.last_applied_date.clone();
            out.last_applied_error = l.last_applied_error.clone();
        }
        out
    }
}

/// A versioned build log document. Two instances exist on disk: the shared
/// (committed) ledger and the local (gitignored) ledger.
///
/// `#[serde(default)]` on the container (backed by this type's `Default`
/// impl) means a document missing `version` and/or `last_timestamp` --
/// historical ledgers predate both fields -- still deserializes, filling
/// the missing keys from defaults while keeping whatever `templates` entries
/// are present (spec.md §4.3, §9 Open Questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildLog {
    pub version: String,
    pub last_timestamp: String,
    /// Keyed by `Template::relative_path`. A `BTreeMap` gives stable key
    /// ordering on save without a separate serialization pass.
    pub templates: BTreeMap<String, TemplateBuildState>,
}

impl Default for BuildLog {
    fn default() -> Self {
        BuildLog {
            version: LEDGER_VERSION.to_string(),
            last_timestamp: String::new(),
            templates: BTreeMap::new(),
        }
    }
}

impl BuildLog {
    /// Returns the entry for `relative_path`, inserting a default one if
    /// absent, and returns a mutable reference to it.
    pub fn entry_mut(&mut self, relative_path: &str) -> &mut TemplateBuildState {
        self.templates.entry(relative_path.to_string()).or_default()
    }

    pub fn get(&self, relative_path: &str) -> Option<&TemplateBuildState> {
        self.templates.get(relative_path)
    }
}

/// Discriminates which of the two ledger files a [`LedgerStore`] operation
/// targets. Defined here (rather than in `srtd-ledger`) because it is part
/// of the shared vocabulary between the config schema and the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Shared,
    Local,
}
