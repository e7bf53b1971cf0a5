use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsRecorder, PeekMetricsReadRecorder,
};

/// Raw counters owned by a store.
#[derive(Debug, Default)]
pub struct MemoMetrics {
    pub call_hits: u64,
    pub call_misses: u64,
    pub inserts: u64,
    pub compute_failures: u64,
    pub arity_mismatches: u64,
    pub evictions: u64,
    pub pruned_branches: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

impl CoreMetricsRecorder for MemoMetrics {
    fn record_call_hit(&mut self) {
        self.call_hits += 1;
    }

    fn record_call_miss(&mut self) {
        self.call_misses += 1;
    }

    fn record_insert(&mut self) {
        self.inserts += 1;
    }

    fn record_compute_failure(&mut self) {
        self.compute_failures += 1;
    }

    fn record_arity_mismatch(&mut self) {
        self.arity_mismatches += 1;
    }
}

impl LruMetricsRecorder for MemoMetrics {
    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_pruned_branches(&mut self, count: usize) {
        self.pruned_branches += count as u64;
    }
}

impl PeekMetricsReadRecorder for &MemoMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}
