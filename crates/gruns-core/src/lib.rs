pub mod api;
pub mod diff;
pub mod error;
pub mod map;
pub mod observer;
pub mod prepare;
pub mod reconcile;
pub mod resource;

mod apply;
pub use apply::{ApplySummary, Reconciler};

pub use observer::{
    FanoutObserver, NoOpObserver, ObserverHandle, ReconcileObserver, noop_observer,
};

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod prelude {
    pub use crate::api::{ApiError, ExecutionJobApi, TriggerApi};
    pub use crate::apply::{ApplySummary, Reconciler};
    pub use crate::diff::UpdateMask;
    pub use crate::error::{CoreError, Operation};
    pub use crate::observer::{ObserverHandle, ReconcileObserver};
    pub use crate::resource::{ExecutionJob, ResourceKind, TriggerJob, TriggerState};
}
