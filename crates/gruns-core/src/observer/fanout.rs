use crate::{
    diff::UpdateMask,
    observer::{ObserverHandle, ReconcileObserver},
    resource::{ResourceKind, TriggerState},
};

/// Forwards every event to each inner observer, in order.
#[derive(Clone, Default)]
pub struct FanoutObserver {
    inner: Vec<ObserverHandle>,
}

impl FanoutObserver {
    pub fn new(inner: Vec<ObserverHandle>) -> Self {
        Self { inner }
    }

    /// Add an observer, builder style.
    pub fn with(mut self, observer: ObserverHandle) -> Self {
        self.inner.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ReconcileObserver for FanoutObserver {
    fn resource_created(&self, kind: ResourceKind, name: &str) {
        for o in &self.inner {
            o.resource_created(kind, name);
        }
    }

    fn resource_updated(&self, kind: ResourceKind, name: &str, mask: &UpdateMask) {
        for o in &self.inner {
            o.resource_updated(kind, name, mask);
        }
    }

    fn resource_unchanged(&self, kind: ResourceKind, name: &str) {
        for o in &self.inner {
            o.resource_unchanged(kind, name);
        }
    }

    fn trigger_transitioned(&self, name: &str, from: TriggerState, to: TriggerState) {
        for o in &self.inner {
            o.trigger_transitioned(name, from, to);
        }
    }

    fn resource_deleted(&self, kind: ResourceKind, name: &str) {
        for o in &self.inner {
            o.resource_deleted(kind, name);
        }
    }
}
