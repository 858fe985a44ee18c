//! The [`Template`] identity and its derivation from a discovered file.

use std::path::{Path, PathBuf};

use crate::hash::hash;

/// A single SQL template discovered under a configured template root.
///
/// Created by discovery, mutated only by re-hashing on change, and treated
/// as destroyed (never an error) when its backing file disappears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Basename without the `.sql` extension, e.g. `update_user`.
    pub name: String,

    /// Absolute path to the template file.
    pub path: PathBuf,

    /// Path relative to the configured template root; the ledger key.
    pub relative_path: String,

    /// Fingerprint of the current file contents.
    pub current_hash: String,

    /// `true` when `path` contains the configured WIP marker substring.
    pub wip: bool,

    /// Basenames extracted from `@depends-on:` comments in the file.
    pub declared_dependencies: Vec<String>,
}

impl Template {
    /// Builds a [`Template`] by reading `path` from disk and deriving all
    /// fields relative to `template_root`.
    ///
    /// `wip_indicator` is the configured substring (e.g. `.wip`) that marks
    /// a template path as work-in-progress.
    pub fn discover(
        path: &Path,
        template_root: &Path,
        wip_indicator: &str,
        content: &str,
    ) -> Self {
        let relative_path = path
            .strip_prefix(template_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let wip = !wip_indicator.is_empty() && relative_path.contains(wip_indicator);

        Template {
            name,
            path: path.to_path_buf(),
            relative_path,
            current_hash: hash(content.as_bytes()),
            wip,
            declared_dependencies: crate::dependency::extract_depends_on(content),
        }
    }

    /// An empty-hash placeholder used when a previously discovered
    /// template's file has disappeared between discovery and read.
    pub fn missing_placeholder(relative_path: &str, template_root: &Path) -> Self {
        Template {
            name: relative_path
                .rsplit('/')
                .next()
                .unwrap_or(relative_path)
                .trim_end_matches(".sql")
                .to_string(),
            path: template_root.join(relative_path),
            relative_path: relative_path.to_string(),
            current_hash: String::new(),
            wip: false,
            declared_dependencies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_derives_name_and_relative_path() {
        let root = Path::new("/project/supabase/migrations-templates");
        let path = root.join("functions/update_user.sql");
        let t = Template::discover(&path, root, ".wip", "select 1;");
        assert_eq!(t.name, "update_user");
        assert_eq!(t.relative_path, "functions/update_user.sql");
        assert!(!t.wip);
    }

    #[test]
    fn discover_flags_wip_by_path_substring() {
        let root = Path::new("/project/templates");
        let path = root.join("draft.wip.sql");
        let t = Template::discover(&path, root, ".wip", "select 1;");
        assert!(t.wip);
    }

    #[test]
    fn discover_extracts_declared_dependencies() {
        let root = Path::new("/project/templates");
        let path = root.join("b.sql");
        let content = "-- @depends-on: a.sql\nselect 1;";
        let t = Template::discover(&path, root, ".wip", content);
        assert_eq!(t.declared_dependencies, vec!["a.sql".to_string()]);
    }

    #[test]
    fn missing_placeholder_has_empty_hash() {
        let root = Path::new("/project/templates");
        let t = Template::missing_placeholder("gone.sql", root);
        assert_eq!(t.current_hash, "");
        assert_eq!(t.name, "gone");
    }
}
