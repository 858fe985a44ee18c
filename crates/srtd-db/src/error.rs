//! Database application error types.

/// A structured, stable error record from a failed template application.
///
/// `message` is always the *first line* of the driver's error message --
/// multi-line messages are collapsed so the error remains a single
/// displayable string. `file` is the template's ledger-relative path, so a
/// consumer can locate the offending source file without re-deriving it
/// from `template_name` (spec.md §4.6 `ApplyError{file, message,
/// template_name}`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to apply template {template_name} ({file}): {message}")]
pub struct ApplyError {
    pub file: String,
    pub template_name: String,
    pub message: String,
}

impl ApplyError {
    pub fn new(
        template_name: impl Into<String>,
        file: impl Into<String>,
        raw_message: impl AsRef<str>,
    ) -> Self {
        let first_line = raw_message
            .as_ref()
            .lines()
            .next()
            .unwrap_or("")
            .to_string();
        ApplyError {
            file: file.into(),
            template_name: template_name.into(),
            message: first_line,
        }
    }
}

/// A fatal setup error -- pool construction failure, bad connection
/// string. The facade surfaces this to the caller, which may exit
/// non-zero; it is distinct from a per-template [`ApplyError`].
#[derive(Debug, thiserror::Error)]
pub enum FatalSetupError {
    #[error("failed to build database connection pool: {0}")]
    PoolBuild(String),
}

pub type Result<T> = std::result::Result<T, FatalSetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_error_collapses_multiline_message_to_first_line() {
        let e = ApplyError::new(
            "fn_a",
            "functions/fn_a.sql",
            "syntax error at or near \"CRATE\"\nLINE 1: CRATE ...\n    ^",
        );
        assert_eq!(e.message, "syntax error at or near \"CRATE\"");
        assert!(!e.message.contains('\n'));
        assert_eq!(e.file, "functions/fn_a.sql");
    }
}
