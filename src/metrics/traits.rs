//! # Metrics Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────┐      ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │      │     PeekMetricsReadRecorder │
//!   │  hit/miss/insert/failure    │      │  peek (via &self)           │
//!   │  arity mismatch             │      └─────────────────────────────┘
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │
//!   │  eviction / pruned branches │
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by every store variant.
pub trait CoreMetricsRecorder {
    fn record_call_hit(&mut self);
    fn record_call_miss(&mut self);
    fn record_insert(&mut self);
    fn record_compute_failure(&mut self);
    fn record_arity_mismatch(&mut self);
}

/// Counters specific to the bounded store.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_eviction(&mut self);
    fn record_pruned_branches(&mut self, count: usize);
}

/// Read-path counters for `&self` methods (uses interior mutability).
pub trait PeekMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
