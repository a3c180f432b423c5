use gruns_core::{
    ReconcileObserver,
    diff::UpdateMask,
    resource::{ResourceKind, TriggerState},
};
use tracing::{debug, info};

/// Observer that reports every reconciliation event through `tracing`.
///
/// Changes log at `info`; resources that already match log at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl ReconcileObserver for LogObserver {
    fn resource_created(&self, kind: ResourceKind, name: &str) {
        info!(kind = kind.as_label(), name, "created {kind}");
    }

    fn resource_updated(&self, kind: ResourceKind, name: &str, mask: &UpdateMask) {
        info!(kind = kind.as_label(), name, fields = %mask, "updated {kind}");
    }

    fn resource_unchanged(&self, kind: ResourceKind, name: &str) {
        debug!(kind = kind.as_label(), name, "{kind} up to date");
    }

    fn trigger_transitioned(&self, name: &str, from: TriggerState, to: TriggerState) {
        info!(name, %from, %to, "trigger state changed");
    }

    fn resource_deleted(&self, kind: ResourceKind, name: &str) {
        info!(kind = kind.as_label(), name, "deleted orphaned {kind}");
    }
}
