use std::sync::Arc;

use crate::{
    diff::UpdateMask,
    resource::{ResourceKind, TriggerState},
};

/// Receiver of reconciliation events.
///
/// Implementations are injected into [`crate::Reconciler`] and called synchronously from the
/// reconcile loop, so they must not block. `name` is always the full remote resource name.
pub trait ReconcileObserver: Send + Sync + 'static {
    /// A missing resource was created.
    fn resource_created(&self, kind: ResourceKind, name: &str);
    /// An existing resource was updated; `mask` lists the changed fields.
    fn resource_updated(&self, kind: ResourceKind, name: &str, mask: &UpdateMask);
    /// An existing resource already matched the job file.
    fn resource_unchanged(&self, kind: ResourceKind, name: &str);
    /// A trigger was paused or resumed.
    fn trigger_transitioned(&self, name: &str, from: TriggerState, to: TriggerState);
    /// An orphaned resource was deleted.
    fn resource_deleted(&self, kind: ResourceKind, name: &str);
}

/// Shared handle to an observer.
pub type ObserverHandle = Arc<dyn ReconcileObserver>;
