//! A fixed-capacity ring buffer of recent engine activity, exposed through
//! `get_recent_activity` (spec.md §6, §11).

use std::collections::VecDeque;

use srtd_core::Event;

pub const ACTIVITY_CAPACITY: usize = 50;

/// One recorded occurrence: the event plus when the engine observed it.
/// Timestamps are supplied by the caller (never taken internally) so the
/// buffer stays trivially testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub event: Event,
    pub at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        ActivityLog::default()
    }

    pub fn record(&mut self, event: Event, at: chrono::DateTime<chrono::Utc>) {
        if self.entries.len() == ACTIVITY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(Activity { event, at });
    }

    /// Most recent first.
    pub fn recent(&self) -> Vec<Activity> {
        self.entries.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn recent_returns_newest_first() {
        let mut log = ActivityLog::new();
        log.record(Event::TemplateAdded { relative_path: "a.sql".into() }, ts());
        log.record(Event::TemplateAdded { relative_path: "b.sql".into() }, ts());
        let recent = log.recent();
        assert_eq!(recent[0].event.relative_path(), "b.sql");
        assert_eq!(recent[1].event.relative_path(), "a.sql");
    }

    #[test]
    fn ring_buffer_drops_oldest_past_capacity() {
        let mut log = ActivityLog::new();
        for i in 0..(ACTIVITY_CAPACITY + 5) {
            log.record(
                Event::TemplateAdded { relative_path: format!("t{i}.sql") },
                ts(),
            );
        }
        assert_eq!(log.recent().len(), ACTIVITY_CAPACITY);
        assert_eq!(log.recent()[0].event.relative_path(), format!("t{}.sql", ACTIVITY_CAPACITY + 4));
    }
}
