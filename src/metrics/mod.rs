//! Optional counters for memoized stores (feature `metrics`).
//!
//! Recording, snapshotting and export are split into separate traits so the
//! stores only ever write counters; reading and publishing happen elsewhere.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::MemoMetrics;
pub use snapshot::MemoMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsSnapshotProvider};
