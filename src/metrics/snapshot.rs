use crate::metrics::metrics_impl::MemoMetrics;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MemoMetricsSnapshot {
    pub call_hits: u64,
    pub call_misses: u64,
    pub inserts: u64,
    pub compute_failures: u64,
    pub arity_mismatches: u64,

    pub evictions: u64,
    pub pruned_branches: u64,

    pub peek_calls: u64,
    pub peek_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: Option<usize>,
}

impl MemoMetricsSnapshot {
    pub(crate) fn from_metrics(
        metrics: &MemoMetrics,
        cache_len: usize,
        capacity: Option<usize>,
    ) -> Self {
        Self {
            call_hits: metrics.call_hits,
            call_misses: metrics.call_misses,
            inserts: metrics.inserts,
            compute_failures: metrics.compute_failures,
            arity_mismatches: metrics.arity_mismatches,
            evictions: metrics.evictions,
            pruned_branches: metrics.pruned_branches,
            peek_calls: metrics.peek_calls.get(),
            peek_found: metrics.peek_found.get(),
            cache_len,
            capacity,
        }
    }

    /// Total calls that reached the store with a well-formed key.
    pub fn calls(&self) -> u64 {
        self.call_hits + self.call_misses
    }

    /// Fraction of calls served from the cache, 0.0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        let calls = self.calls();
        if calls == 0 {
            0.0
        } else {
            self.call_hits as f64 / calls as f64
        }
    }
}
