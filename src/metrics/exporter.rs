use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::MemoMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for memo metrics snapshots.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<MemoMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &MemoMetricsSnapshot) {
        self.write_counter("call_hits_total", snapshot.call_hits);
        self.write_counter("call_misses_total", snapshot.call_misses);
        self.write_counter("inserts_total", snapshot.inserts);
        self.write_counter("compute_failures_total", snapshot.compute_failures);
        self.write_counter("arity_mismatches_total", snapshot.arity_mismatches);
        self.write_counter("evictions_total", snapshot.evictions);
        self.write_counter("pruned_branches_total", snapshot.pruned_branches);
        self.write_counter("peek_calls_total", snapshot.peek_calls);
        self.write_counter("peek_found_total", snapshot.peek_found);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        if let Some(capacity) = snapshot.capacity {
            self.write_gauge("capacity", capacity as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("memo", Vec::new());
        exporter.export(&MemoMetricsSnapshot {
            call_hits: 7,
            evictions: 2,
            cache_len: 4,
            capacity: Some(8),
            ..Default::default()
        });

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE memo_call_hits_total counter\nmemo_call_hits_total 7\n"));
        assert!(text.contains("memo_evictions_total 2\n"));
        assert!(text.contains("# TYPE memo_cache_len gauge\nmemo_cache_len 4\n"));
        assert!(text.contains("memo_capacity 8\n"));
    }

    #[test]
    fn unbounded_snapshot_omits_capacity_gauge() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&MemoMetricsSnapshot::default());

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("call_hits_total 0\n"));
        assert!(!text.contains("capacity"));
    }
}
