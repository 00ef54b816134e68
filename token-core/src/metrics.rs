//! Metrics collection for observability
//!
//! Prometheus metrics for the actor embedding. The core ledger itself stays
//! silent; everything here is recorded at the actor layer.
//!
//! # Metrics
//!
//! - `ledger_transfers_total` - Applied transfers (direct and delegated)
//! - `ledger_approvals_total` - Applied approvals
//! - `ledger_rejections_total` - Operations rejected by a check
//! - `ledger_events_total` - Journal entries published to subscribers
//! - `ledger_op_duration_seconds` - Histogram of operation latencies

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Applied transfers
    pub transfers_total: IntCounter,

    /// Applied approvals
    pub approvals_total: IntCounter,

    /// Rejected operations
    pub rejections_total: IntCounter,

    /// Published journal entries
    pub events_total: IntCounter,

    /// Operation latency histogram
    pub op_duration: Histogram,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create a metrics collector with its own registry.
    ///
    /// Metrics are registered only locally, never in the process-global
    /// registry, so multiple collectors can coexist in one process.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let transfers_total = IntCounter::with_opts(Opts::new(
            "ledger_transfers_total",
            "Applied transfers (direct and delegated)",
        ))?;
        registry.register(Box::new(transfers_total.clone()))?;

        let approvals_total = IntCounter::with_opts(Opts::new(
            "ledger_approvals_total",
            "Applied approvals",
        ))?;
        registry.register(Box::new(approvals_total.clone()))?;

        let rejections_total = IntCounter::with_opts(Opts::new(
            "ledger_rejections_total",
            "Operations rejected by a check",
        ))?;
        registry.register(Box::new(rejections_total.clone()))?;

        let events_total = IntCounter::with_opts(Opts::new(
            "ledger_events_total",
            "Journal entries published to subscribers",
        ))?;
        registry.register(Box::new(events_total.clone()))?;

        let op_duration = Histogram::with_opts(
            HistogramOpts::new(
                "ledger_op_duration_seconds",
                "Histogram of operation latencies",
            )
            .buckets(vec![
                0.000_001, 0.000_005, 0.000_010, 0.000_050, 0.000_100, 0.000_500, 0.001, 0.005,
            ]),
        )?;
        registry.register(Box::new(op_duration.clone()))?;

        Ok(Self {
            transfers_total,
            approvals_total,
            rejections_total,
            events_total,
            op_duration,
            registry,
        })
    }

    /// Record an applied transfer
    pub fn record_transfer(&self) {
        self.transfers_total.inc();
    }

    /// Record an applied approval
    pub fn record_approval(&self) {
        self.approvals_total.inc();
    }

    /// Record a rejected operation
    pub fn record_rejection(&self) {
        self.rejections_total.inc();
    }

    /// Record published journal entries
    pub fn record_events(&self, count: usize) {
        self.events_total.inc_by(count as u64);
    }

    /// Record operation duration
    pub fn record_op_duration(&self, duration_seconds: f64) {
        self.op_duration.observe(duration_seconds);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.transfers_total.get(), 0);
        assert_eq!(metrics.rejections_total.get(), 0);
    }

    #[test]
    fn test_collectors_are_independent() {
        // Two collectors in one process must not clash
        let first = Metrics::new().unwrap();
        let second = Metrics::new().unwrap();

        first.record_transfer();
        assert_eq!(first.transfers_total.get(), 1);
        assert_eq!(second.transfers_total.get(), 0);
    }

    #[test]
    fn test_record_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_transfer();
        metrics.record_transfer();
        metrics.record_approval();
        metrics.record_rejection();
        metrics.record_events(3);

        assert_eq!(metrics.transfers_total.get(), 2);
        assert_eq!(metrics.approvals_total.get(), 1);
        assert_eq!(metrics.rejections_total.get(), 1);
        assert_eq!(metrics.events_total.get(), 3);
    }

    #[test]
    fn test_registry_exposes_families() {
        let metrics = Metrics::new().unwrap();
        metrics.record_transfer();
        assert_eq!(metrics.registry().gather().len(), 5);
    }
}
