//! Options and outcome types for [`crate::engine::TemplateEngine::process`].

/// Selects which of the engine's five ordered decision rules apply to a
/// processing run (spec.md §4.7).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    pub apply: bool,
    pub generate_files: bool,
    pub force: bool,
    pub bundle: bool,
}

/// The result of one `process()` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub built: Vec<String>,
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<TemplateFailure>,
}

/// One template's recorded failure within a batch. The `message` field is
/// always a plain string (never a serialized error object), matching the
/// event bus's string-only error contract (spec.md §8 property 8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFailure {
    pub relative_path: String,
    pub message: String,
}
