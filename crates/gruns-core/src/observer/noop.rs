use crate::{
    diff::UpdateMask,
    observer::ReconcileObserver,
    resource::{ResourceKind, TriggerState},
};

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ReconcileObserver for NoOpObserver {
    #[inline(always)]
    fn resource_created(&self, _: ResourceKind, _: &str) {}

    #[inline(always)]
    fn resource_updated(&self, _: ResourceKind, _: &str, _: &UpdateMask) {}

    #[inline(always)]
    fn resource_unchanged(&self, _: ResourceKind, _: &str) {}

    #[inline(always)]
    fn trigger_transitioned(&self, _: &str, _: TriggerState, _: TriggerState) {}

    #[inline(always)]
    fn resource_deleted(&self, _: ResourceKind, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_observer_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpObserver>(), 0);
    }
}
