//! A typed, synchronous event bus.
//!
//! Handlers run synchronously on the engine's own turn -- no handler may
//! suspend the engine indefinitely (spec.md §9 "emitter pattern -> event
//! bus").

use srtd_core::Event;

type Handler = Box<dyn Fn(&Event) + Send>;

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(&'static str, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Registers `handler` for events whose `Event::kind()` equals `kind`.
    pub fn on(&mut self, kind: &'static str, handler: impl Fn(&Event) + Send + 'static) {
        self.handlers.push((kind, Box::new(handler)));
    }

    pub fn publish(&self, event: &Event) {
        for (kind, handler) in &self.handlers {
            if *kind == event.kind() {
                handler(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn handler_only_fires_for_its_registered_kind() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let mut bus = EventBus::new();
        bus.on("templateApplied", move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&Event::TemplateChanged { relative_path: "a.sql".into() });
        assert_eq!(count.load(Ordering::SeqCst), 0);

        bus.publish(&Event::TemplateApplied { relative_path: "a.sql".into() });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
