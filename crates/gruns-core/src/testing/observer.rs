use std::sync::Mutex;

use crate::{
    diff::UpdateMask,
    observer::ReconcileObserver,
    resource::{ResourceKind, TriggerState},
};

/// Event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Created(ResourceKind, String),
    Updated(ResourceKind, String, Vec<&'static str>),
    Unchanged(ResourceKind, String),
    Transitioned(String, TriggerState, TriggerState),
    Deleted(ResourceKind, String),
}

/// Observer that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl ReconcileObserver for RecordingObserver {
    fn resource_created(&self, kind: ResourceKind, name: &str) {
        self.push(Event::Created(kind, name.to_string()));
    }

    fn resource_updated(&self, kind: ResourceKind, name: &str, mask: &UpdateMask) {
        self.push(Event::Updated(kind, name.to_string(), mask.paths().to_vec()));
    }

    fn resource_unchanged(&self, kind: ResourceKind, name: &str) {
        self.push(Event::Unchanged(kind, name.to_string()));
    }

    fn trigger_transitioned(&self, name: &str, from: TriggerState, to: TriggerState) {
        self.push(Event::Transitioned(name.to_string(), from, to));
    }

    fn resource_deleted(&self, kind: ResourceKind, name: &str) {
        self.push(Event::Deleted(kind, name.to_string()));
    }
}
