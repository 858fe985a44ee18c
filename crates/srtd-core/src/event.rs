//! Engine-to-bus event types.
//!
//! Errors carried on events are always plain strings -- never a raw error
//! object -- so that external consumers (a JSON formatter, a TUI) never see
//! `[object Object]`-style leakage (spec.md §8 property 8).

/// A single engine event, tagged by what happened to which template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TemplateAdded { relative_path: String },
    TemplateChanged { relative_path: String },
    TemplateApplied { relative_path: String },
    TemplateBuilt { relative_path: String, migration_file: String },
    TemplateError { relative_path: String, error: String },
}

impl Event {
    /// The template this event concerns, regardless of variant.
    pub fn relative_path(&self) -> &str {
        match self {
            Event::TemplateAdded { relative_path }
            | Event::TemplateChanged { relative_path }
            | Event::TemplateApplied { relative_path }
            | Event::TemplateBuilt { relative_path, .. }
            | Event::TemplateError { relative_path, .. } => relative_path,
        }
    }

    /// A short machine-readable kind string, matching the query surface's
    /// `on(event_kind, handler)` vocabulary (spec.md §6).
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TemplateAdded { .. } => "templateAdded",
            Event::TemplateChanged { .. } => "templateChanged",
            Event::TemplateApplied { .. } => "templateApplied",
            Event::TemplateBuilt { .. } => "templateBuilt",
            Event::TemplateError { .. } => "templateError",
        }
    }
}
