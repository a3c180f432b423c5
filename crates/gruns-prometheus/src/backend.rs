use std::sync::Arc;

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder, proto::MetricFamily};

use gruns_core::{
    ReconcileObserver,
    diff::UpdateMask,
    resource::{ResourceKind, TriggerState},
};

/// Prometheus observer for reconciliation runs.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `kind`: "execution_job", "trigger"
/// - `state`: the trigger state entered, "enabled" or "paused"
/// - `field`: an update mask path, one of the managed fields
#[derive(Clone)]
pub struct PrometheusObserver {
    created: CounterVec,
    updated: CounterVec,
    unchanged: CounterVec,
    deleted: CounterVec,
    transitions: CounterVec,
    update_fields: CounterVec,
    registry: Arc<Registry>,
}

fn counter(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let c = CounterVec::new(Opts::new(name, help).namespace("gruns"), labels)?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

impl PrometheusObserver {
    /// Create an observer registering its counters in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            created: counter(
                &registry,
                "resources_created_total",
                "Remote resources created",
                &["kind"],
            )?,
            updated: counter(
                &registry,
                "resources_updated_total",
                "Remote resources updated",
                &["kind"],
            )?,
            unchanged: counter(
                &registry,
                "resources_unchanged_total",
                "Remote resources already matching the job file",
                &["kind"],
            )?,
            deleted: counter(
                &registry,
                "resources_deleted_total",
                "Orphaned remote resources deleted",
                &["kind"],
            )?,
            transitions: counter(
                &registry,
                "trigger_transitions_total",
                "Trigger pause/resume transitions by state entered",
                &["state"],
            )?,
            update_fields: counter(
                &registry,
                "update_fields_total",
                "Fields sent in update masks",
                &["kind", "field"],
            )?,
            registry,
        })
    }

    /// Create an observer with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Render all metrics in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl ReconcileObserver for PrometheusObserver {
    fn resource_created(&self, kind: ResourceKind, _name: &str) {
        self.created.with_label_values(&[kind.as_label()]).inc();
    }

    fn resource_updated(&self, kind: ResourceKind, _name: &str, mask: &UpdateMask) {
        self.updated.with_label_values(&[kind.as_label()]).inc();
        for field in mask.iter() {
            self.update_fields
                .with_label_values(&[kind.as_label(), field])
                .inc();
        }
    }

    fn resource_unchanged(&self, kind: ResourceKind, _name: &str) {
        self.unchanged.with_label_values(&[kind.as_label()]).inc();
    }

    fn trigger_transitioned(&self, _name: &str, _from: TriggerState, to: TriggerState) {
        self.transitions.with_label_values(&[to.as_label()]).inc();
    }

    fn resource_deleted(&self, kind: ResourceKind, _name: &str) {
        self.deleted.with_label_values(&[kind.as_label()]).inc();
    }
}
