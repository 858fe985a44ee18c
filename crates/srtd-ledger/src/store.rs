//! [`LedgerStore`] -- load/save for the shared and local `BuildLog` documents.
//!
//! Load semantics (spec.md §4.3): a missing file returns an empty ledger; a
//! malformed file returns an empty ledger *and* a validation warning --
//! never an error. Save semantics: write the full document, stable key
//! ordering (via `BuildLog::templates` being a `BTreeMap`), no partial
//! updates.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use srtd_core::{BuildLog, LedgerKind};

use crate::error::{LedgerError, Result};

/// A non-fatal problem found while loading a ledger file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWarning {
    pub path: PathBuf,
    pub kind: LedgerKind,
    pub message: String,
}

/// Loads a `BuildLog` from `path`.
///
/// Returns the loaded log (or an empty default) and, when the file existed
/// but failed to parse or validate, a [`LedgerWarning`] describing why it
/// was replaced with an empty ledger.
pub fn load(path: &Path, kind: LedgerKind) -> (BuildLog, Option<LedgerWarning>) {
    if !path.exists() {
        debug!(?path, "ledger file absent, starting empty");
        return (BuildLog::default(), None);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(?path, error = %e, "failed to read ledger file, using empty ledger");
            return (
                BuildLog::default(),
                Some(LedgerWarning {
                    path: path.to_path_buf(),
                    kind,
                    message: e.to_string(),
                }),
            );
        }
    };

    match serde_json::from_str::<BuildLog>(&content) {
        Ok(log) => (log, None),
        Err(e) => {
            warn!(?path, error = %e, "ledger JSON invalid, using empty ledger");
            (
                BuildLog::default(),
                Some(LedgerWarning {
                    path: path.to_path_buf(),
                    kind,
                    message: e.to_string(),
                }),
            )
        }
    }
}

/// Saves `log` to `path`, creating parent directories as needed.
///
/// Writes the full document every time -- there is no partial-update path.
/// Callers (the engine) are expected to call this after every state
/// transition that touches a ledger field.
pub fn save(path: &Path, log: &BuildLog) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LedgerError::CreateDir {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(log)?;
    std::fs::write(path, json).map_err(|e| LedgerError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!(?path, "ledger saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use srtd_core::TemplateBuildState;

    #[test]
    fn load_missing_file_returns_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let (log, warning) = load(&path, LedgerKind::Shared);
        assert_eq!(log.templates.len(), 0);
        assert_eq!(log.last_timestamp, "");
        assert!(warning.is_none());
    }

    #[test]
    fn load_malformed_json_returns_empty_ledger_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let (log, warning) = load(&path, LedgerKind::Shared);
        assert!(log.templates.is_empty());
        assert!(warning.is_some());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("buildlog.json");

        let mut log = BuildLog::default();
        log.last_timestamp = "20240101120000".to_string();
        log.entry_mut("a.sql").last_build_hash = Some("abc123".into());

        save(&path, &log).unwrap();
        let (loaded, warning) = load(&path, LedgerKind::Shared);

        assert!(warning.is_none());
        assert_eq!(loaded.last_timestamp, "20240101120000");
        assert_eq!(
            loaded.get("a.sql").unwrap().last_build_hash.as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn save_writes_stable_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildlog.json");

        let mut log = BuildLog::default();
        log.entry_mut("z.sql").clone_from(&TemplateBuildState::default());
        log.entry_mut("a.sql").clone_from(&TemplateBuildState::default());

        save(&path, &log).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let pos_a = content.find("a.sql").unwrap();
        let pos_z = content.find("z.sql").unwrap();
        assert!(pos_a < pos_z, "BTreeMap should serialize in key order");
    }
}
