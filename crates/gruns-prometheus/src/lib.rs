//! Prometheus counters for reconciliation runs.
//!
//! [`PrometheusObserver`] implements [`gruns_core::ReconcileObserver`]. A run is a one-shot
//! process, so there is no scrape endpoint: render the registry with
//! [`PrometheusObserver::encode_text`] after `apply` and hand it to a textfile collector or a
//! pushgateway.
//!
//! ```rust
//! use std::sync::Arc;
//! use gruns_core::ObserverHandle;
//! use gruns_prometheus::PrometheusObserver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusObserver::new()?;
//! let handle: ObserverHandle = Arc::new(metrics.clone());
//! // ... Reconciler::new(ctx, jobs, triggers).with_observer(handle) ...
//! let text = metrics.encode_text()?;
//! assert!(text.is_empty() || text.contains("gruns_"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `gruns_resources_created_total{kind}`
//! - `gruns_resources_updated_total{kind}`
//! - `gruns_resources_unchanged_total{kind}`
//! - `gruns_resources_deleted_total{kind}`
//! - `gruns_trigger_transitions_total{state}`
//! - `gruns_update_fields_total{kind, field}`

mod backend;
pub use backend::PrometheusObserver;

pub use prometheus::{Encoder, Registry, TextEncoder};
